/*! Defines the errors reported by the checker and the located [`Diagnostic`] wrapping them.

Every error has a stable numeric code; the codes are listed in [`codes`].

[`Diagnostic`]: crate::check::Diagnostic
[`codes`]: crate::check::codes
*/
use crate::location::Location;
use thiserror::Error;

/// Lists the numeric codes of all errors reported by the checker.
pub mod codes {
    pub const ELEMENT_MUST_NOT_BE_NULL: u32 = 30400;
    pub const ATOM_MUST_NOT_BE_NULL: u32 = 30410;
    pub const LIST_MUST_NOT_BE_NULL: u32 = 30420;
    pub const ATOM_CONTENT_MUST_NOT_BE_NULL: u32 = 30430;
    pub const ATOM_CONTENT_MUST_NOT_BE_EMPTY: u32 = 30440;
    pub const OPERATOR_CONTENT_MUST_NOT_BE_NULL: u32 = 30450;
    pub const OPERATOR_CONTENT_MUST_NOT_BE_EMPTY: u32 = 30460;
    pub const ATOM_OR_LIST_EXPECTED: u32 = 30470;
    pub const NESTING_TOO_DEEP: u32 = 30480;
    pub const UNKNOWN_LOGICAL_OPERATOR: u32 = 30530;
    pub const SUBJECT_VARIABLE_EXPECTED: u32 = 30540;
    pub const SUBJECT_VARIABLE_ALREADY_BOUND: u32 = 30550;
    pub const UNKNOWN_PREDICATE_CONSTANT: u32 = 30590;
    pub const UNKNOWN_TERM_OPERATOR: u32 = 30620;
    pub const CLASS_OPERATOR_UNKNOWN: u32 = 30680;
    pub const UNKNOWN_FUNCTION_CONSTANT: u32 = 30690;
    pub const NAME_EXPECTED: u32 = 30720;
    pub const NAME_MUST_BE_AN_ATOM: u32 = 30730;
    pub const TOO_FEW_ARGUMENTS: u32 = 30740;
    pub const TOO_MANY_ARGUMENTS: u32 = 30760;
    pub const BOUND_VARIABLE_ALREADY_FREE: u32 = 30770;
    pub const FREE_VARIABLE_ALREADY_BOUND: u32 = 30780;
}

/// Is the type of errors found by the checker.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    #[error("element must not be null")]
    ElementMissing,

    #[error("atom must not be null")]
    AtomMissing,

    #[error("list must not be null")]
    ListMissing,

    #[error("atom content must not be null")]
    AtomContentMissing,

    #[error("atom content must not be empty")]
    AtomContentEmpty,

    #[error("operator must not be null")]
    OperatorMissing,

    #[error("operator must not be empty")]
    OperatorEmpty,

    #[error("element must be an atom or a list")]
    AtomOrListExpected,

    #[error("element is nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("unknown logical operator `{operator}`")]
    UnknownLogicalOperator { operator: String },

    #[error("subject variable expected")]
    SubjectVariableExpected,

    #[error("subject variable `{name}` is already bound")]
    SubjectVariableAlreadyBound { name: String },

    #[error("unknown predicate constant `{name}` with {arity} argument(s)")]
    UnknownPredicateConstant { name: String, arity: usize },

    #[error("unknown term operator `{operator}`")]
    UnknownTermOperator { operator: String },

    #[error("class operator is not known yet")]
    ClassOperatorUnknown,

    #[error("unknown function constant `{name}` with {arity} argument(s)")]
    UnknownFunctionConstant { name: String, arity: usize },

    #[error("`{operator}` expects a name as its first argument")]
    NameExpected { operator: String },

    #[error("the name of `{operator}` must be an atom")]
    NameMustBeAnAtom { operator: String },

    #[error("`{operator}` carries more than one name")]
    NameRepeated { operator: String },

    #[error("`{operator}` expects at least {expected} argument(s) but has {found}")]
    TooFewArguments {
        operator: String,
        expected: usize,
        found: usize,
    },

    #[error("`{operator}` expects at most {expected} argument(s) but has {found}")]
    TooManyArguments {
        operator: String,
        expected: usize,
        found: usize,
    },

    #[error("subject variable `{name}` occurs free and is bound later on")]
    BoundVariableAlreadyFree { name: String },

    #[error("subject variable `{name}` occurs free but was bound before")]
    FreeVariableAlreadyBound { name: String },
}

impl Error {
    /// Returns the stable numeric code of the receiver.
    pub fn code(&self) -> u32 {
        match self {
            Self::ElementMissing => codes::ELEMENT_MUST_NOT_BE_NULL,
            Self::AtomMissing => codes::ATOM_MUST_NOT_BE_NULL,
            Self::ListMissing => codes::LIST_MUST_NOT_BE_NULL,
            Self::AtomContentMissing => codes::ATOM_CONTENT_MUST_NOT_BE_NULL,
            Self::AtomContentEmpty => codes::ATOM_CONTENT_MUST_NOT_BE_EMPTY,
            Self::OperatorMissing => codes::OPERATOR_CONTENT_MUST_NOT_BE_NULL,
            Self::OperatorEmpty => codes::OPERATOR_CONTENT_MUST_NOT_BE_EMPTY,
            Self::AtomOrListExpected => codes::ATOM_OR_LIST_EXPECTED,
            Self::NestingTooDeep { .. } => codes::NESTING_TOO_DEEP,
            Self::UnknownLogicalOperator { .. } => codes::UNKNOWN_LOGICAL_OPERATOR,
            Self::SubjectVariableExpected => codes::SUBJECT_VARIABLE_EXPECTED,
            Self::SubjectVariableAlreadyBound { .. } => codes::SUBJECT_VARIABLE_ALREADY_BOUND,
            Self::UnknownPredicateConstant { .. } => codes::UNKNOWN_PREDICATE_CONSTANT,
            Self::UnknownTermOperator { .. } => codes::UNKNOWN_TERM_OPERATOR,
            Self::ClassOperatorUnknown => codes::CLASS_OPERATOR_UNKNOWN,
            Self::UnknownFunctionConstant { .. } => codes::UNKNOWN_FUNCTION_CONSTANT,
            Self::NameExpected { .. } => codes::NAME_EXPECTED,
            Self::NameMustBeAnAtom { .. } => codes::NAME_MUST_BE_AN_ATOM,
            Self::TooFewArguments { .. } => codes::TOO_FEW_ARGUMENTS,
            Self::TooManyArguments { .. } | Self::NameRepeated { .. } => codes::TOO_MANY_ARGUMENTS,
            Self::BoundVariableAlreadyFree { .. } => codes::BOUND_VARIABLE_ALREADY_FREE,
            Self::FreeVariableAlreadyBound { .. } => codes::FREE_VARIABLE_ALREADY_BOUND,
        }
    }
}

/// Is an [`Error`] located inside the checked element. Scoping conflicts also carry the
/// location of the conflicting occurrence as a `reference`.
///
/// [`Error`]: crate::check::Error
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("{code}: {error} (at {location}{})",
        .reference.as_ref().map(|r| format!(", see {}", r)).unwrap_or_default(),
        code = .error.code(),
)]
pub struct Diagnostic {
    error: Error,
    location: Location,
    reference: Option<Location>,
}

impl Diagnostic {
    /// Creates a diagnostic for `error` found at `location`.
    pub fn new(error: Error, location: Location) -> Self {
        Self {
            error,
            location,
            reference: None,
        }
    }

    /// Attaches the location of a conflicting occurrence to the receiver.
    pub fn with_reference(self, reference: Location) -> Self {
        Self {
            reference: Some(reference),
            ..self
        }
    }

    /// Returns the error of the receiver.
    #[inline(always)]
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Returns the stable numeric code of the receiver's error.
    #[inline(always)]
    pub fn code(&self) -> u32 {
        self.error.code()
    }

    /// Returns the location where the error was found.
    #[inline(always)]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Returns the location of the conflicting occurrence, if any.
    #[inline(always)]
    pub fn reference(&self) -> Option<&Location> {
        self.reference.as_ref()
    }

    /// Returns the human readable message of the receiver's error.
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(30400, Error::ElementMissing.code());
        assert_eq!(30470, Error::AtomOrListExpected.code());
        assert_eq!(
            30530,
            Error::UnknownLogicalOperator {
                operator: "UIMPL".into()
            }
            .code()
        );
        assert_eq!(
            30760,
            Error::TooManyArguments {
                operator: "IMPL".into(),
                expected: 2,
                found: 3
            }
            .code()
        );
        assert_eq!(
            30760,
            Error::NameRepeated {
                operator: "PREDVAR".into()
            }
            .code()
        );
        assert_eq!(
            30780,
            Error::FreeVariableAlreadyBound { name: "x".into() }.code()
        );
    }

    #[test]
    fn test_diagnostic_to_string() {
        let diagnostic = Diagnostic::new(
            Error::UnknownPredicateConstant {
                name: "F".into(),
                arity: 0,
            },
            Location::new("axiom 1", vec![]),
        );
        assert_eq!(
            "30590: unknown predicate constant `F` with 0 argument(s) (at axiom 1)",
            diagnostic.to_string()
        );
        assert_eq!(
            "unknown predicate constant `F` with 0 argument(s)",
            diagnostic.message()
        );
        assert_eq!(None, diagnostic.reference());

        let diagnostic = Diagnostic::new(
            Error::BoundVariableAlreadyFree { name: "x".into() },
            Location::new("axiom 1", vec![0, 1]),
        )
        .with_reference(Location::new("axiom 1", vec![1, 2, 0]));
        assert_eq!(30770, diagnostic.code());
        assert_eq!(
            "30770: subject variable `x` occurs free and is bound later on \
             (at axiom 1[0][1], see axiom 1[1][2][0])",
            diagnostic.to_string()
        );
    }
}
