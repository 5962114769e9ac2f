//! Validates operators and the number of their arguments against the operator catalogue.
use super::Error;
use crate::{element::List, operator::Operator};

/// Returns the operator of `list` if it heads a formula.
pub(crate) fn formula_operator(list: &List) -> Result<Operator, Error> {
    match list.operator().parse::<Operator>() {
        Ok(op) if op.is_formula() => Ok(op),
        _ => Err(Error::UnknownLogicalOperator {
            operator: list.operator().to_string(),
        }),
    }
}

/// Returns the operator of `list` if it heads a term.
pub(crate) fn term_operator(list: &List) -> Result<Operator, Error> {
    match list.operator().parse::<Operator>() {
        Ok(op) if op.is_term() => Ok(op),
        _ => Err(Error::UnknownTermOperator {
            operator: list.operator().to_string(),
        }),
    }
}

// bounds on the number of arguments, not counting the name of named operators
fn bounds(op: Operator) -> (usize, Option<usize>) {
    match op {
        Operator::Not => (1, Some(1)),
        Operator::And | Operator::Or | Operator::Equi => (2, None),
        Operator::Impl => (2, Some(2)),
        Operator::Forall | Operator::Exists | Operator::ExistsU => (2, Some(3)),
        Operator::Class => (2, Some(2)),
        Operator::PredVar | Operator::PredCon | Operator::FunCon => (0, None),
        Operator::FunVar => (1, None),
        Operator::Var => (0, Some(0)),
    }
}

/// Checks the number of children of `list`, headed by `op`.
///
/// **Note**: the name of a named operator is expected to be present; it is not counted as an
/// argument.
pub(crate) fn check_arity(op: Operator, list: &List) -> Result<(), Error> {
    let found = if op.is_named() {
        list.len().saturating_sub(1)
    } else {
        list.len()
    };
    let (min, max) = bounds(op);
    if found < min {
        return Err(Error::TooFewArguments {
            operator: op.to_string(),
            expected: min,
            found,
        });
    }
    if let Some(max) = max {
        if found > max {
            return Err(Error::TooManyArguments {
                operator: op.to_string(),
                expected: max,
                found,
            });
        }
    }
    Ok(())
}
