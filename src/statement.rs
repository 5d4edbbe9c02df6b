use crate::{
    error::StatementError, expression::Expression, logical::Logical, quantified::Quantified,
    relational::Relational, scope, Expr,
};
use std::fmt;

/// A node of a formula tree.
///
/// Every statement reachable through this type has passed validation: relational sides are
/// expressions, logical statements have at least two elements and quantified statements bind
/// every symbol they reference.
#[derive(Clone, PartialEq, Debug)]
pub enum Statement<E = Expr> {
    Relational(Relational<E>),
    Logical(Logical<E>),
    Quantified(Quantified<E>),
}

impl<E: Expression> Statement<E> {
    pub fn is_relational(&self) -> bool {
        matches!(self, Statement::Relational(_))
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, Statement::Logical(_))
    }

    pub fn is_quantified(&self) -> bool {
        matches!(self, Statement::Quantified(_))
    }

    pub fn as_relational(&self) -> Option<&Relational<E>> {
        match self {
            Statement::Relational(rel) => Some(rel),
            _ => None,
        }
    }

    pub fn as_logical(&self) -> Option<&Logical<E>> {
        match self {
            Statement::Logical(logical) => Some(logical),
            _ => None,
        }
    }

    pub fn as_quantified(&self) -> Option<&Quantified<E>> {
        match self {
            Statement::Quantified(q) => Some(q),
            _ => None,
        }
    }

    /// The symbols this statement references without binding them (see [`scope`])
    pub fn free_symbols(&self) -> Result<Vec<E::Symbol>, StatementError> {
        scope::escaping_symbols(self)
    }

    /// Returns the canonical text of this statement, e.g. `∀x (x = 5 → (x < 10 ∧ x ≠ 7))`
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl<E: Expression> fmt::Display for Statement<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Relational(rel) => write!(f, "{}", rel),
            Statement::Logical(logical) => write!(f, "{}", logical),
            Statement::Quantified(q) => write!(f, "{}", q),
        }
    }
}

impl<E> From<Relational<E>> for Statement<E> {
    fn from(rel: Relational<E>) -> Self {
        Statement::Relational(rel)
    }
}

impl<E> From<Logical<E>> for Statement<E> {
    fn from(logical: Logical<E>) -> Self {
        Statement::Logical(logical)
    }
}

impl<E> From<Quantified<E>> for Statement<E> {
    fn from(q: Quantified<E>) -> Self {
        Statement::Quantified(q)
    }
}
