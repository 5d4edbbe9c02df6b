use crate::{error::StatementError, expression::Expression, Expr};
use std::{fmt, str::FromStr};

/// The comparison of a [`Relational`] statement
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operator {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::LessThan,
        Operator::LessOrEqual,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "≠",
            Operator::LessThan => "<",
            Operator::LessOrEqual => "≤",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operator::Equal => "eq",
            Operator::NotEqual => "ne",
            Operator::LessThan => "lt",
            Operator::LessOrEqual => "le",
        }
    }
}

impl FromStr for Operator {
    type Err = StatementError;

    /// Accepts either the symbol (`≤`) or the short name (`le`) of an operator
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.symbol() == s || op.name() == s)
            .ok_or_else(|| StatementError::InvalidOperator(s.to_owned()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single comparison between two expressions, like _x + 1 < y_.
///
/// # Example
/// ```
/// use math_statement::{Expr, Operator, Relational};
///
/// let mut rel = Relational::new(Expr::symbol("x"), Operator::Equal, Expr::integer(5)).unwrap();
/// assert_eq!(rel.to_string(), "x = 5");
///
/// rel.set_operator(Operator::LessOrEqual);
/// assert!(rel.set_right(Expr::rational(1, 0)).is_err());
/// assert_eq!(rel.to_string(), "x ≤ 5");
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Relational<E = Expr> {
    operator: Operator,
    left: E,
    right: E,
}

impl<E: Expression> Relational<E> {
    pub fn new(left: E, operator: Operator, right: E) -> Result<Self, StatementError> {
        check_side(&left, "left")?;
        check_side(&right, "right")?;
        Ok(Relational {
            operator,
            left,
            right,
        })
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn left(&self) -> &E {
        &self.left
    }

    pub fn right(&self) -> &E {
        &self.right
    }

    /// Returns a copy of both sides, left first
    pub fn sides(&self) -> Vec<E> {
        vec![self.left.clone(), self.right.clone()]
    }

    pub fn set_operator(&mut self, operator: Operator) {
        self.operator = operator;
    }

    pub fn set_left(&mut self, left: E) -> Result<(), StatementError> {
        check_side(&left, "left")?;
        self.left = left;
        Ok(())
    }

    pub fn set_right(&mut self, right: E) -> Result<(), StatementError> {
        check_side(&right, "right")?;
        self.right = right;
        Ok(())
    }

    /// Replaces both sides at once.
    ///
    /// # Errors
    /// * `InvalidSides` - if `sides` does not contain exactly two expressions
    /// * `InvalidExpression` - if one of them is not an expression, in which case neither side is
    /// replaced
    pub fn set_sides(&mut self, sides: Vec<E>) -> Result<(), StatementError> {
        let [left, right]: [E; 2] = sides
            .try_into()
            .map_err(|sides: Vec<E>| StatementError::InvalidSides(sides.len()))?;
        check_side(&left, "left")?;
        check_side(&right, "right")?;
        self.left = left;
        self.right = right;
        Ok(())
    }

    /// The symbols occurring on either side, left side first
    pub fn free_symbols(&self) -> Vec<E::Symbol> {
        let mut symbols = self.left.free_symbols();
        for s in self.right.free_symbols() {
            if !symbols.contains(&s) {
                symbols.push(s);
            }
        }
        symbols
    }
}

fn check_side<E: Expression>(side: &E, name: &'static str) -> Result<(), StatementError> {
    if side.is_expression() {
        Ok(())
    } else {
        Err(StatementError::InvalidExpression {
            side: name,
            value: side.to_string(),
        })
    }
}

impl<E: Expression> fmt::Display for Relational<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn x() -> Expr {
        Expr::symbol("x")
    }

    fn y() -> Expr {
        Expr::symbol("y")
    }

    #[test]
    fn new_keeps_its_arguments() {
        let rel = Relational::new(x(), Operator::Equal, Expr::integer(5)).unwrap();
        assert_eq!(rel.left(), &x());
        assert_eq!(rel.operator(), Operator::Equal);
        assert_eq!(rel.right(), &Expr::integer(5));
        assert_eq!(rel.sides(), vec![x(), Expr::integer(5)]);
    }

    #[test]
    fn renders_every_operator() {
        let rendered: Vec<String> = Operator::ALL
            .iter()
            .map(|op| {
                Relational::new(x(), *op, Expr::integer(5))
                    .unwrap()
                    .to_string()
            })
            .collect();
        assert_eq!(rendered, vec!["x = 5", "x ≠ 5", "x < 5", "x ≤ 5"]);
    }

    #[test]
    fn rejects_undefined_operands() {
        let err = Relational::new(Expr::Undefined, Operator::Equal, x()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentType);
        assert_eq!(
            err,
            StatementError::InvalidExpression {
                side: "left",
                value: "undefined".to_owned()
            }
        );

        let err = Relational::new(x(), Operator::Equal, x() / Expr::rational(3, 0)).unwrap_err();
        assert!(matches!(
            err,
            StatementError::InvalidExpression { side: "right", .. }
        ));
    }

    #[test]
    fn failed_setters_leave_the_statement_unchanged() {
        let mut rel = Relational::new(x(), Operator::LessThan, Expr::integer(10)).unwrap();
        let before = rel.clone();

        assert!(rel.set_left(Expr::Undefined).is_err());
        assert!(rel.set_right(Expr::Undefined).is_err());
        assert_eq!(
            rel.set_sides(vec![y(), Expr::Undefined]),
            Err(StatementError::InvalidExpression {
                side: "right",
                value: "undefined".to_owned()
            })
        );
        assert_eq!(rel, before);

        let err = rel.set_sides(vec![y()]).unwrap_err();
        assert_eq!(err, StatementError::InvalidSides(1));
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentValue);
        assert_eq!(
            rel.set_sides(vec![x(), y(), x()]),
            Err(StatementError::InvalidSides(3))
        );
        assert_eq!(rel, before);
    }

    #[test]
    fn setters_replace_fields() {
        let mut rel = Relational::new(x(), Operator::Equal, Expr::integer(5)).unwrap();
        rel.set_left(y()).unwrap();
        assert_eq!(rel.to_string(), "y = 5");
        rel.set_sides(vec![x() + y(), Expr::sin(x()) * Expr::cos(y())])
            .unwrap();
        rel.set_operator(Operator::NotEqual);
        assert_eq!(rel.to_string(), "x + y ≠ sin(x)*cos(y)");
    }

    #[test]
    fn sides_returns_a_copy() {
        let rel = Relational::new(x(), Operator::Equal, Expr::integer(5)).unwrap();
        let mut sides = rel.sides();
        sides[0] = y();
        assert_eq!(rel.left(), &x());
    }

    #[test]
    fn operator_from_str() {
        assert_eq!("≤".parse::<Operator>(), Ok(Operator::LessOrEqual));
        assert_eq!("ne".parse::<Operator>(), Ok(Operator::NotEqual));
        let err = "==".parse::<Operator>().unwrap_err();
        assert_eq!(err, StatementError::InvalidOperator("==".to_owned()));
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentValue);
        assert!(">".parse::<Operator>().is_err());
    }

    #[test]
    fn free_symbols_of_both_sides() {
        let rel = Relational::new(x() + y(), Operator::Equal, Expr::symbol("z") * x()).unwrap();
        let names: Vec<String> = rel.free_symbols().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    quickcheck! {
        fn round_trip(left: Expr, right: Expr) -> bool {
            let rel = Relational::new(left.clone(), Operator::LessThan, right.clone()).unwrap();
            rel.left() == &left && rel.right() == &right && rel.operator() == Operator::LessThan
        }
    }
}
