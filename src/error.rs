use thiserror::Error;

/// The broad category of a [`StatementError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value of the wrong kind was supplied, e.g. a non-symbol as a bound variable
    InvalidArgumentType,
    /// A value outside the allowed set or with the wrong cardinality was supplied
    InvalidArgumentValue,
    /// Scope resolution found symbols that no enclosing quantifier binds
    UnboundVariable,
}

/// An error which is produced when trying to build or mutate a statement into an ill-formed
/// state. The statement being mutated is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    #[error("{side} side must be an expression, got {value}")]
    InvalidExpression { side: &'static str, value: String },
    #[error("variable at index {index} must be a symbol, got {value}")]
    InvalidVariable { index: usize, value: String },
    #[error("operator must be one of =, ≠, <, ≤, got {0:?}")]
    InvalidOperator(String),
    #[error(
        "connective must be one of conjunction, disjunction, implication, equivalence, got {0:?}"
    )]
    InvalidConnective(String),
    #[error("quantifier must be one of universal, existential, got {0:?}")]
    InvalidQuantifier(String),
    #[error("sides must contain exactly 2 elements, got {0}")]
    InvalidSides(usize),
    #[error("elements must have at least 2 items, got {0}")]
    TooFewElements(usize),
    #[error("variables list cannot be empty")]
    EmptyVariables,
    #[error("unbound variables: {}", .0.join(", "))]
    UnboundVariables(Vec<String>),
}

impl StatementError {
    pub fn kind(&self) -> ErrorKind {
        use StatementError::*;
        match self {
            InvalidExpression { .. } | InvalidVariable { .. } => ErrorKind::InvalidArgumentType,
            InvalidOperator(_)
            | InvalidConnective(_)
            | InvalidQuantifier(_)
            | InvalidSides(_)
            | TooFewElements(_)
            | EmptyVariables => ErrorKind::InvalidArgumentValue,
            UnboundVariables(_) => ErrorKind::UnboundVariable,
        }
    }
}
