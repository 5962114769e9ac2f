/*! Defines modules: files that declare constants and list the formulae and terms to check.

A [`Module`] is usually obtained by [parsing] its text. Its declarations make up the
[`Signature`] that serves as the oracle for checking its entries; every [`Entry`] is checked
on its own, in a [`Context`] named after the entry.

**Example**:
```rust
use qedeq_logic::{check::Checker, module::Module};

let module: Module = r#"
    equality equal;
    formula [symmetry] FORALL(VAR("x"), FORALL(VAR("y"),
        IMPL(PREDCON("equal", VAR("x"), VAR("y")), PREDCON("equal", VAR("y"), VAR("x")))));
    formula PREDCON("in", VAR("x"), VAR("y"));
"#.parse().unwrap();

let signature = module.signature();
let reports = module.check(&Checker::with_oracle(&signature));
assert!(reports[0].is_ok());
assert_eq!("symmetry", reports[0].context().origin());

// `in` is not declared:
assert_eq!(Some(30590), reports[1].code());
assert_eq!("formula 2", reports[1].context().origin());
```

[parsing]: crate::parser
[`Module`]: crate::module::Module
[`Signature`]: crate::oracle::Signature
[`Entry`]: crate::module::Entry
[`Context`]: crate::location::Context
*/
use crate::{
    check::{Checker, Diagnostic, Kind, ScopeSummary},
    element::Element,
    location::Context,
    oracle::Signature,
    parser,
};
use itertools::Itertools;
use std::{collections::HashSet, fmt};
use thiserror::Error;

/// Is the type of errors found when assembling a module from its items.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    #[error("entries must have distinct labels, `{label}` is used more than once")]
    DuplicateLabel { label: String },

    #[error("equality is declared as `{first}` and as `{second}`")]
    ConflictingEquality { first: String, second: String },
}

/// Is a formula or a term of a module, to be checked.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Entry {
    kind: Kind,
    label: Option<String>,
    element: Element,
}

impl Entry {
    /// Creates an entry of the given `kind`, with an optional `label`.
    pub fn new(kind: Kind, label: Option<String>, element: Element) -> Self {
        Self {
            kind,
            label,
            element,
        }
    }

    /// Returns whether the receiver is a formula or a term.
    #[inline(always)]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline(always)]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[inline(always)]
    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.kind)?;
        if let Some(label) = &self.label {
            write!(f, " [{}]", parser::name(label))?;
        }
        write!(f, " {};", self.element)
    }
}

/// Is an item of a module file, in the order of the file.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Item {
    /// Declares a predicate constant.
    Predicate { name: String, arity: usize },

    /// Declares a function constant.
    Function { name: String, arity: usize },

    /// Declares the equality predicate.
    Equality { name: String },

    /// Makes class terms available.
    Class,

    /// Is a formula or term to check.
    Entry(Entry),
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Self::Predicate { name, arity } => {
                write!(f, "predicate {} {};", parser::name(name), arity)
            }
            Self::Function { name, arity } => {
                write!(f, "function {} {};", parser::name(name), arity)
            }
            Self::Equality { name } => write!(f, "equality {};", parser::name(name)),
            Self::Class => write!(f, "class;"),
            Self::Entry(entry) => write!(f, "{}", entry),
        }
    }
}

/// Is the outcome of checking an entry of a module.
#[derive(Clone, PartialEq, Debug)]
pub struct Report<'m> {
    entry: &'m Entry,
    context: Context,
    result: Result<ScopeSummary, Diagnostic>,
}

impl<'m> Report<'m> {
    /// Returns the checked entry.
    #[inline(always)]
    pub fn entry(&self) -> &'m Entry {
        self.entry
    }

    /// Returns the context the entry was checked in.
    #[inline(always)]
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Returns the free and bound subject variables of an accepted entry, or the diagnostic
    /// of a rejected one.
    #[inline(always)]
    pub fn result(&self) -> &Result<ScopeSummary, Diagnostic> {
        &self.result
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.result.as_ref().err()
    }

    /// Returns true if the entry is well-formed.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the code of the diagnostic if the entry was rejected.
    pub fn code(&self) -> Option<u32> {
        self.result.as_ref().err().map(Diagnostic::code)
    }
}

/// Is a parsed module: its declarations and entries in the order of the file.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Module {
    items: Vec<Item>,
}

impl Module {
    /// Assembles a module from its items. Fails if two entries share a label or if two
    /// different equality predicates are declared.
    pub fn new<I: IntoIterator<Item = Item>>(items: I) -> Result<Self, Error> {
        let items: Vec<Item> = items.into_iter().collect();

        let mut labels = HashSet::new();
        let mut equality: Option<&str> = None;
        for item in &items {
            match item {
                Item::Entry(entry) => {
                    if let Some(label) = entry.label() {
                        if !labels.insert(label) {
                            return Err(Error::DuplicateLabel {
                                label: label.to_string(),
                            });
                        }
                    }
                }
                Item::Equality { name } => match equality {
                    Some(first) if first != name.as_str() => {
                        return Err(Error::ConflictingEquality {
                            first: first.to_string(),
                            second: name.to_string(),
                        })
                    }
                    _ => equality = Some(name.as_str()),
                },
                _ => (),
            }
        }

        Ok(Self { items })
    }

    /// Returns the items of the receiver.
    #[inline(always)]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the entries of the receiver.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.items.iter().filter_map(|item| match item {
            Item::Entry(entry) => Some(entry),
            _ => None,
        })
    }

    /// Returns the signature declared by the receiver. Declarations apply to all entries,
    /// wherever they appear in the module.
    pub fn signature(&self) -> Signature {
        let mut signature = Signature::new();
        for item in &self.items {
            match item {
                Item::Predicate { name, arity } => signature.add_predicate(name.as_str(), *arity),
                Item::Function { name, arity } => signature.add_function(name.as_str(), *arity),
                Item::Equality { name } => signature.set_equality(name.as_str()),
                Item::Class => signature.enable_class_operator(),
                Item::Entry(_) => (),
            }
        }
        signature
    }

    /// Checks every entry of the receiver on its own and returns the reports in the order of
    /// the entries.
    pub fn check(&self, checker: &Checker) -> Vec<Report> {
        self.entries()
            .enumerate()
            .map(|(i, entry)| {
                let context = match entry.label() {
                    Some(label) => Context::new(label),
                    None => Context::new(format!("{} {}", entry.kind(), i + 1)),
                };
                let result = checker.analyze(entry.kind(), entry.element(), &context);
                Report {
                    entry,
                    context,
                    result,
                }
            })
            .collect()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.items.iter().join("\n"))
    }
}
