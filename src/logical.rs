use crate::{error::StatementError, expression::Expression, statement::Statement, Expr};
use std::{fmt, str::FromStr};

/// The connective joining the elements of a [`Logical`] statement
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Connective {
    Conjunction,
    Disjunction,
    Implication,
    Equivalence,
}

impl Connective {
    pub const ALL: [Connective; 4] = [
        Connective::Conjunction,
        Connective::Disjunction,
        Connective::Implication,
        Connective::Equivalence,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Connective::Conjunction => "∧",
            Connective::Disjunction => "∨",
            Connective::Implication => "→",
            Connective::Equivalence => "↔",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Connective::Conjunction => "conjunction",
            Connective::Disjunction => "disjunction",
            Connective::Implication => "implication",
            Connective::Equivalence => "equivalence",
        }
    }
}

impl FromStr for Connective {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.symbol() == s || c.name() == s)
            .ok_or_else(|| StatementError::InvalidConnective(s.to_owned()))
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Two or more statements joined by a [`Connective`].
///
/// The order of the elements is kept. Implication and equivalence chains with more than two
/// elements are allowed and render with the same separator, e.g. `(a → b → c)`.
#[derive(Clone, PartialEq, Debug)]
pub struct Logical<E = Expr> {
    connective: Connective,
    elements: Vec<Statement<E>>,
}

impl<E: Expression> Logical<E> {
    pub fn new(
        elements: Vec<Statement<E>>,
        connective: Connective,
    ) -> Result<Self, StatementError> {
        check_elements(&elements)?;
        Ok(Logical {
            connective,
            elements,
        })
    }

    pub fn connective(&self) -> Connective {
        self.connective
    }

    /// Returns a copy of the elements
    pub fn elements(&self) -> Vec<Statement<E>> {
        self.elements.clone()
    }

    /// Iterates over the elements without copying them
    pub fn iter(&self) -> impl Iterator<Item = &Statement<E>> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always `false`, a logical statement holds at least two elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn set_connective(&mut self, connective: Connective) {
        self.connective = connective;
    }

    /// Replaces all elements at once.
    ///
    /// # Errors
    /// * `TooFewElements` - if `elements` contains less than two statements
    pub fn set_elements(&mut self, elements: Vec<Statement<E>>) -> Result<(), StatementError> {
        check_elements(&elements)?;
        self.elements = elements;
        Ok(())
    }
}

fn check_elements<E>(elements: &[Statement<E>]) -> Result<(), StatementError> {
    if elements.len() < 2 {
        Err(StatementError::TooFewElements(elements.len()))
    } else {
        Ok(())
    }
}

impl<E: Expression> fmt::Display for Logical<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i != 0 {
                write!(f, " {} ", self.connective)?;
            }
            write!(f, "{}", element)?;
        }
        f.write_str(")")
    }
}
