/*! Defines the [`Oracle`] that tells the checker which constants a module declares, and
[`Signature`], its implementation backed by the declarations of a module.

[`Oracle`]: crate::oracle::Oracle
[`Signature`]: crate::oracle::Signature
*/
use crate::parser;
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

/// Is the authority on the predicate and function constants that are declared, and on the
/// availability of the equality predicate and the class operator.
pub trait Oracle {
    /// Returns true if a predicate constant `name` with `arity` arguments is declared.
    fn predicate_exists(&self, name: &str, arity: usize) -> bool;

    /// Returns true if a function constant `name` with `arity` arguments is declared.
    fn function_exists(&self, name: &str, arity: usize) -> bool;

    /// Returns true if class terms may be used.
    fn class_operator_exists(&self) -> bool;

    /// Returns the name of the equality predicate, if one is declared.
    fn equality_operator_name(&self) -> Option<&str>;

    /// Returns true if an equality predicate is declared.
    fn equality_operator_exists(&self) -> bool {
        self.equality_operator_name().is_some()
    }
}

impl<T: Oracle + ?Sized> Oracle for &T {
    fn predicate_exists(&self, name: &str, arity: usize) -> bool {
        (**self).predicate_exists(name, arity)
    }

    fn function_exists(&self, name: &str, arity: usize) -> bool {
        (**self).function_exists(name, arity)
    }

    fn class_operator_exists(&self) -> bool {
        (**self).class_operator_exists()
    }

    fn equality_operator_name(&self) -> Option<&str> {
        (**self).equality_operator_name()
    }

    fn equality_operator_exists(&self) -> bool {
        (**self).equality_operator_exists()
    }
}

/// Is the arity of the equality predicate.
pub const EQUALITY_ARITY: usize = 2;

/// Is the set of constants and capabilities declared by a module.
///
/// **Note**: a constant may be declared with several arities; each pair of name and arity is
/// a separate constant.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Signature {
    /// Is the arities of the declared predicate constants.
    predicates: BTreeMap<String, BTreeSet<usize>>,

    /// Is the arities of the declared function constants.
    functions: BTreeMap<String, BTreeSet<usize>>,

    /// Is the name of the equality predicate.
    equality: Option<String>,

    /// Is true if class terms may be used.
    class_operator: bool,
}

impl Signature {
    /// Creates an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a predicate constant `name` with `arity` arguments.
    pub fn add_predicate<S: Into<String>>(&mut self, name: S, arity: usize) {
        self.predicates.entry(name.into()).or_default().insert(arity);
    }

    /// Declares a function constant `name` with `arity` arguments.
    pub fn add_function<S: Into<String>>(&mut self, name: S, arity: usize) {
        self.functions.entry(name.into()).or_default().insert(arity);
    }

    /// Declares `name` as the equality predicate, which is also declared as a predicate
    /// constant with two arguments.
    pub fn set_equality<S: Into<String>>(&mut self, name: S) {
        let name = name.into();
        self.add_predicate(name.clone(), EQUALITY_ARITY);
        self.equality = Some(name);
    }

    /// Makes class terms available.
    pub fn enable_class_operator(&mut self) {
        self.class_operator = true;
    }

    /// Returns a signature that declares everything the receiver or `other` declares. The
    /// equality predicate of `other` takes precedence.
    pub fn merge(mut self, other: Self) -> Self {
        for (name, arities) in other.predicates {
            self.predicates.entry(name).or_default().extend(arities);
        }
        for (name, arities) in other.functions {
            self.functions.entry(name).or_default().extend(arities);
        }
        if other.equality.is_some() {
            self.equality = other.equality;
        }
        self.class_operator |= other.class_operator;
        self
    }

    /// Returns the declared predicate constants as pairs of name and arity.
    pub fn predicates(&self) -> impl Iterator<Item = (&str, usize)> {
        self.predicates
            .iter()
            .flat_map(|(name, arities)| arities.iter().map(move |a| (name.as_str(), *a)))
    }

    /// Returns the declared function constants as pairs of name and arity.
    pub fn functions(&self) -> impl Iterator<Item = (&str, usize)> {
        self.functions
            .iter()
            .flat_map(|(name, arities)| arities.iter().map(move |a| (name.as_str(), *a)))
    }
}

impl Oracle for Signature {
    fn predicate_exists(&self, name: &str, arity: usize) -> bool {
        self.predicates
            .get(name)
            .map_or(false, |arities| arities.contains(&arity))
    }

    fn function_exists(&self, name: &str, arity: usize) -> bool {
        self.functions
            .get(name)
            .map_or(false, |arities| arities.contains(&arity))
    }

    fn class_operator_exists(&self) -> bool {
        self.class_operator
    }

    fn equality_operator_name(&self) -> Option<&str> {
        self.equality.as_deref()
    }
}

// renders the declarations in module notation
impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let mut lines = Vec::new();
        if let Some(equality) = &self.equality {
            lines.push(format!("equality {};", parser::name(equality)));
        }
        if self.class_operator {
            lines.push("class;".to_string());
        }
        for (name, arity) in self.predicates() {
            if self.equality.as_deref() == Some(name) && arity == EQUALITY_ARITY {
                continue;
            }
            lines.push(format!("predicate {} {};", parser::name(name), arity));
        }
        for (name, arity) in self.functions() {
            lines.push(format!("function {} {};", parser::name(name), arity));
        }
        write!(f, "{}", lines.join("\n"))
    }
}
