/*! Defines the catalogue of operators that may head a list element of a formula or a term. */
use std::{fmt, str::FromStr};

/// Is the closed set of operators known to the checker.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Operator {
    /// Negation, `NOT(φ)`.
    Not,
    /// Conjunction of at least two formulae.
    And,
    /// Disjunction of at least two formulae.
    Or,
    /// Implication between exactly two formulae.
    Impl,
    /// Equivalence of at least two formulae.
    Equi,
    /// Universal quantification, `FORALL(VAR, [restriction], body)`.
    Forall,
    /// Existential quantification, `EXISTS(VAR, [restriction], body)`.
    Exists,
    /// Unique existential quantification, `EXISTSU(VAR, [restriction], body)`.
    ExistsU,
    /// Application of a predicate variable on terms.
    PredVar,
    /// Application of a predicate constant on terms.
    PredCon,
    /// Subject variable, `VAR(name)`.
    Var,
    /// Application of a function variable on at least one term.
    FunVar,
    /// Application of a function constant on terms.
    FunCon,
    /// Class term, `CLASS(VAR, φ)`.
    Class,
}

impl Operator {
    /// Returns the tag of the receiver, as it appears in element trees.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Impl => "IMPL",
            Self::Equi => "EQUI",
            Self::Forall => "FORALL",
            Self::Exists => "EXISTS",
            Self::ExistsU => "EXISTSU",
            Self::PredVar => "PREDVAR",
            Self::PredCon => "PREDCON",
            Self::Var => "VAR",
            Self::FunVar => "FUNVAR",
            Self::FunCon => "FUNCON",
            Self::Class => "CLASS",
        }
    }

    /// Returns true if the receiver heads a formula.
    pub fn is_formula(&self) -> bool {
        !self.is_term()
    }

    /// Returns true if the receiver heads a term.
    pub fn is_term(&self) -> bool {
        matches!(self, Self::Var | Self::FunVar | Self::FunCon | Self::Class)
    }

    /// Returns true if the receiver introduces a subject variable.
    pub fn is_binder(&self) -> bool {
        matches!(
            self,
            Self::Forall | Self::Exists | Self::ExistsU | Self::Class
        )
    }

    /// Returns true if the receiver applies a symbol that must be declared in a module.
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::PredCon | Self::FunCon)
    }

    /// Returns true if the receiver carries a name as its first child.
    pub fn is_named(&self) -> bool {
        matches!(
            self,
            Self::PredVar | Self::PredCon | Self::Var | Self::FunVar | Self::FunCon
        )
    }
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT" => Ok(Self::Not),
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "IMPL" => Ok(Self::Impl),
            "EQUI" => Ok(Self::Equi),
            "FORALL" => Ok(Self::Forall),
            "EXISTS" => Ok(Self::Exists),
            "EXISTSU" => Ok(Self::ExistsU),
            "PREDVAR" => Ok(Self::PredVar),
            "PREDCON" => Ok(Self::PredCon),
            "VAR" => Ok(Self::Var),
            "FUNVAR" => Ok(Self::FunVar),
            "FUNCON" => Ok(Self::FunCon),
            "CLASS" => Ok(Self::Class),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Operator; 14] = [
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Impl,
        Operator::Equi,
        Operator::Forall,
        Operator::Exists,
        Operator::ExistsU,
        Operator::PredVar,
        Operator::PredCon,
        Operator::Var,
        Operator::FunVar,
        Operator::FunCon,
        Operator::Class,
    ];

    #[test]
    fn test_parse_tags() {
        for op in ALL.iter() {
            assert_eq!(Ok(*op), op.as_str().parse::<Operator>());
        }
        assert!("UIMPL".parse::<Operator>().is_err());
        assert!("and".parse::<Operator>().is_err());
        assert!("".parse::<Operator>().is_err());
    }

    #[test]
    fn test_formula_and_term_operators() {
        let terms: Vec<_> = ALL.iter().filter(|op| op.is_term()).collect();
        assert_eq!(
            vec![
                &Operator::Var,
                &Operator::FunVar,
                &Operator::FunCon,
                &Operator::Class
            ],
            terms
        );
        assert_eq!(10, ALL.iter().filter(|op| op.is_formula()).count());
    }

    #[test]
    fn test_binders_and_constants() {
        assert!(Operator::Class.is_binder());
        assert!(Operator::ExistsU.is_binder());
        assert!(!Operator::PredVar.is_binder());
        assert!(Operator::PredCon.is_constant());
        assert!(Operator::FunCon.is_constant());
        assert!(!Operator::FunVar.is_constant());
        assert!(Operator::Var.is_named());
        assert!(!Operator::Class.is_named());
    }
}
