/*! Computes the free and bound subject variables of checked elements and detects variables
that are used both free and bound.

The summaries are computed bottom-up. Whenever the summaries of siblings are combined, a name
that is free in one sibling and bound in another is reported; a binder that rebinds a name of
an enclosing binder is detected top-down, with the help of [`Binders`].

[`Binders`]: crate::check::scope::Binders
*/
use super::{Diagnostic, Error};
use crate::{location::Location, trace};

/// Is an occurrence of a subject variable, free or as the variable of a binder.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Occurrence {
    name: String,
    location: Location,
}

impl Occurrence {
    /// Returns the name of the subject variable.
    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the location of the occurrence.
    #[inline(always)]
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Contains the free and the bound subject variables of an element, each in the order of
/// their first occurrence, together with the location of that occurrence.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ScopeSummary {
    free: Vec<Occurrence>,
    bound: Vec<Occurrence>,
}

impl ScopeSummary {
    /// Creates the summary of a free occurrence of `name` at `location`.
    pub(crate) fn variable<S: Into<String>>(name: S, location: Location) -> Self {
        Self {
            free: vec![Occurrence {
                name: name.into(),
                location,
            }],
            bound: Vec::new(),
        }
    }

    /// Returns the free occurrences.
    #[inline(always)]
    pub fn free(&self) -> &[Occurrence] {
        &self.free
    }

    /// Returns the binding occurrences.
    #[inline(always)]
    pub fn bound(&self) -> &[Occurrence] {
        &self.bound
    }

    /// Returns the names of the free subject variables.
    pub fn free_names(&self) -> Vec<&str> {
        self.free.iter().map(Occurrence::name).collect()
    }

    /// Returns the names of the bound subject variables.
    pub fn bound_names(&self) -> Vec<&str> {
        self.bound.iter().map(Occurrence::name).collect()
    }

    /// Returns true if `name` occurs free.
    pub fn is_free(&self, name: &str) -> bool {
        self.find_free(name).is_some()
    }

    /// Returns true if `name` is bound somewhere.
    pub fn is_bound(&self, name: &str) -> bool {
        self.find_bound(name).is_some()
    }

    fn find_free(&self, name: &str) -> Option<&Occurrence> {
        self.free.iter().find(|o| o.name == name)
    }

    fn find_bound(&self, name: &str) -> Option<&Occurrence> {
        self.bound.iter().find(|o| o.name == name)
    }

    // adds the occurrences of `other` that are new to the receiver
    fn absorb(&mut self, other: Self) {
        for o in other.free {
            if !self.is_free(&o.name) {
                self.free.push(o);
            }
        }
        for o in other.bound {
            if !self.is_bound(&o.name) {
                self.bound.push(o);
            }
        }
    }

    /// Binds `name` by a binder whose variable is at `location`, which precedes every other
    /// occurrence in the receiver.
    pub(crate) fn bind<S: Into<String>>(&mut self, name: S, location: Location) {
        let name = name.into();
        self.free.retain(|o| o.name != name);
        if !self.is_bound(&name) {
            self.bound.insert(0, Occurrence { name, location });
        }
    }
}

/// Combines the summaries of siblings, given from left to right, into the summary of their
/// parent. Fails at the first name that is free in one sibling and bound in another.
pub(crate) fn combine<I>(children: I) -> Result<ScopeSummary, Diagnostic>
where
    I: IntoIterator<Item = ScopeSummary>,
{
    let mut summary = ScopeSummary::default();
    for child in children {
        let conflict = child
            .bound
            .iter()
            .find_map(|b| summary.find_free(&b.name).map(|f| (f, b)));
        if let Some((free, bound)) = conflict {
            debug!(event = trace::CONFLICT, name = %free.name, free = %free.location, bound = %bound.location);
            return Err(Diagnostic::new(
                Error::BoundVariableAlreadyFree {
                    name: free.name.clone(),
                },
                free.location.clone(),
            )
            .with_reference(bound.location.clone()));
        }

        let conflict = child
            .free
            .iter()
            .find_map(|f| summary.find_bound(&f.name).map(|b| (f, b)));
        if let Some((free, bound)) = conflict {
            debug!(event = trace::CONFLICT, name = %free.name, free = %free.location, bound = %bound.location);
            return Err(Diagnostic::new(
                Error::FreeVariableAlreadyBound {
                    name: free.name.clone(),
                },
                free.location.clone(),
            )
            .with_reference(bound.location.clone()));
        }

        summary.absorb(child);
    }
    Ok(summary)
}

/// Is the stack of names bound by the binders enclosing an element, outermost first.
#[derive(Clone, Debug, Default)]
pub(crate) struct Binders<'a> {
    names: Vec<&'a str>,
}

impl<'a> Binders<'a> {
    /// Enters a binder of `name`.
    pub(crate) fn push(&mut self, name: &'a str) {
        self.names.push(name);
    }

    /// Leaves the innermost binder.
    pub(crate) fn pop(&mut self) -> Option<&'a str> {
        self.names.pop()
    }

    /// Returns true if an enclosing binder binds `name`.
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.names.iter().rev().any(|bound| *bound == name)
    }
}
