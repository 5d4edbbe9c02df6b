use crate::{
    error::StatementError, expression::Expression, scope, statement::Statement, Expr,
};
use std::{collections::HashSet, fmt, str::FromStr};

/// The quantifier of a [`Quantified`] statement
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Quantifier {
    Universal,
    Existential,
}

impl Quantifier {
    pub fn symbol(&self) -> &'static str {
        match self {
            Quantifier::Universal => "∀",
            Quantifier::Existential => "∃",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Quantifier::Universal => "universal",
            Quantifier::Existential => "existential",
        }
    }
}

impl FromStr for Quantifier {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Quantifier::Universal, Quantifier::Existential]
            .into_iter()
            .find(|q| q.symbol() == s || q.name() == s)
            .ok_or_else(|| StatementError::InvalidQuantifier(s.to_owned()))
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A statement like _for all x with x = 5, x < 10 holds_, binding one or more variables over a
/// domain and a predicate.
///
/// Every symbol referenced in the domain or the predicate must be one of the variables. A
/// quantified statement nested inside the domain or predicate binds its own variables, which
/// are invisible outside of it. This is checked on construction and whenever the variables, the
/// domain or the predicate are replaced; a failed check leaves the statement unchanged.
///
/// Variables may be listed more than once. They are kept as given for display and treated as a
/// set for binding.
///
/// # Example
/// ```
/// use math_statement::{Expr, Operator, Quantified, Quantifier, Relational, StatementError};
///
/// let x = Expr::symbol("x");
/// let domain = Relational::new(x.clone(), Operator::Equal, Expr::integer(5)).unwrap();
/// let predicate = Relational::new(x.clone(), Operator::LessThan, Expr::integer(10)).unwrap();
///
/// let q = Quantified::new(
///     vec![x],
///     domain.clone().into(),
///     predicate.into(),
///     Quantifier::Universal,
/// )
/// .unwrap();
/// assert_eq!(q.to_string(), "∀x (x = 5 → x < 10)");
///
/// let open = Relational::new(Expr::symbol("y"), Operator::LessThan, Expr::integer(10)).unwrap();
/// let err = Quantified::new(
///     vec![Expr::symbol("x")],
///     domain.into(),
///     open.into(),
///     Quantifier::Universal,
/// )
/// .unwrap_err();
/// assert_eq!(err, StatementError::UnboundVariables(vec!["y".to_owned()]));
/// ```
#[derive(Clone, PartialEq, Debug)]
pub struct Quantified<E = Expr> {
    quantifier: Quantifier,
    variables: Vec<E>,
    domain: Box<Statement<E>>,
    predicate: Box<Statement<E>>,
}

impl<E: Expression> Quantified<E> {
    /// Creates a new quantified statement.
    ///
    /// # Errors
    /// * `EmptyVariables` - if `variables` is empty
    /// * `InvalidVariable` - if one of `variables` is not a symbol
    /// * `UnboundVariables` - if `domain` or `predicate` reference a symbol not in `variables`,
    /// or a quantified statement inside them does so for its own variables
    pub fn new(
        variables: Vec<E>,
        domain: Statement<E>,
        predicate: Statement<E>,
        quantifier: Quantifier,
    ) -> Result<Self, StatementError> {
        check_variables(&variables)?;
        scope::check_bound(&variables, &domain, &predicate)?;
        Ok(Quantified {
            quantifier,
            variables,
            domain: Box::new(domain),
            predicate: Box::new(predicate),
        })
    }

    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Returns a copy of the variables in the order they were given
    pub fn variables(&self) -> Vec<E> {
        self.variables.clone()
    }

    /// Returns the bound symbols, each once, in the order they were given
    pub fn bound_symbols(&self) -> Vec<E::Symbol> {
        let mut seen = HashSet::new();
        self.variables
            .iter()
            .filter_map(|v| v.as_symbol())
            .filter(|s| seen.insert(s.clone()))
            .collect()
    }

    pub fn domain(&self) -> &Statement<E> {
        &self.domain
    }

    pub fn predicate(&self) -> &Statement<E> {
        &self.predicate
    }

    pub fn set_quantifier(&mut self, quantifier: Quantifier) {
        self.quantifier = quantifier;
    }

    /// Replaces the variables. Fails without changing anything if the new variables no longer
    /// bind every symbol of the domain and predicate.
    pub fn set_variables(&mut self, variables: Vec<E>) -> Result<(), StatementError> {
        check_variables(&variables)?;
        scope::check_bound(&variables, &self.domain, &self.predicate)?;
        self.variables = variables;
        Ok(())
    }

    pub fn set_domain(&mut self, domain: Statement<E>) -> Result<(), StatementError> {
        scope::check_bound(&self.variables, &domain, &self.predicate)?;
        *self.domain = domain;
        Ok(())
    }

    pub fn set_predicate(&mut self, predicate: Statement<E>) -> Result<(), StatementError> {
        scope::check_bound(&self.variables, &self.domain, &predicate)?;
        *self.predicate = predicate;
        Ok(())
    }
}

fn check_variables<E: Expression>(variables: &[E]) -> Result<(), StatementError> {
    if variables.is_empty() {
        return Err(StatementError::EmptyVariables);
    }
    match variables.iter().position(|v| v.as_symbol().is_none()) {
        Some(index) => Err(StatementError::InvalidVariable {
            index,
            value: variables[index].to_string(),
        }),
        None => Ok(()),
    }
}

impl<E: Expression> fmt::Display for Quantified<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.quantifier)?;
        for (i, variable) in self.variables.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", variable)?;
        }
        write!(f, " ({} → {})", self.domain, self.predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorKind, Connective, Logical, Operator, Relational, Symbol};

    fn s(name: &str) -> Expr {
        Expr::symbol(name)
    }

    fn rel(name: &str, operator: Operator, value: i64) -> Statement {
        Relational::new(s(name), operator, Expr::integer(value))
            .unwrap()
            .into()
    }

    fn forall_x() -> Quantified {
        Quantified::new(
            vec![s("x")],
            rel("x", Operator::Equal, 5),
            rel("x", Operator::LessThan, 10),
            Quantifier::Universal,
        )
        .unwrap()
    }

    fn exists_z(domain: Statement, predicate: Statement) -> Result<Quantified, StatementError> {
        Quantified::new(vec![s("z")], domain, predicate, Quantifier::Existential)
    }

    #[test]
    fn accepts_bound_variables() {
        let q = forall_x();
        assert_eq!(q.to_string(), "∀x (x = 5 → x < 10)");
        assert_eq!(q.quantifier(), Quantifier::Universal);
        assert_eq!(q.variables(), vec![s("x")]);
        assert_eq!(q.domain(), &rel("x", Operator::Equal, 5));
    }

    #[test]
    fn rejects_unbound_variable() {
        let err = Quantified::new(
            vec![s("x")],
            rel("x", Operator::Equal, 5),
            rel("y", Operator::LessThan, 10),
            Quantifier::Universal,
        )
        .unwrap_err();
        assert_eq!(err, StatementError::UnboundVariables(vec!["y".to_owned()]));
        assert_eq!(err.kind(), ErrorKind::UnboundVariable);
    }

    #[test]
    fn inner_quantifier_shadows() {
        let inner = exists_z(rel("z", Operator::Equal, 0), rel("z", Operator::LessOrEqual, 1))
            .unwrap();
        let outer = Quantified::new(
            vec![s("x")],
            rel("x", Operator::Equal, 5),
            inner.into(),
            Quantifier::Universal,
        )
        .unwrap();
        assert_eq!(outer.to_string(), "∀x (x = 5 → ∃z (z = 0 → z ≤ 1))");
    }

    #[test]
    fn same_name_bound_inside_and_outside() {
        let inner = Quantified::new(
            vec![s("x")],
            rel("x", Operator::Equal, 0),
            rel("x", Operator::NotEqual, 1),
            Quantifier::Existential,
        )
        .unwrap();
        let outer = Quantified::new(
            vec![s("x")],
            rel("x", Operator::Equal, 5),
            inner.into(),
            Quantifier::Universal,
        );
        assert!(outer.is_ok());
    }

    #[test]
    fn inner_quantifier_must_bind_its_own_symbols() {
        assert_eq!(
            exists_z(rel("z", Operator::Equal, 0), rel("w", Operator::Equal, 1)).unwrap_err(),
            StatementError::UnboundVariables(vec!["w".to_owned()])
        );

        // Being bound by the outer quantifier is not enough.
        assert_eq!(
            exists_z(rel("z", Operator::Equal, 0), rel("x", Operator::Equal, 1)).unwrap_err(),
            StatementError::UnboundVariables(vec!["x".to_owned()])
        );
    }

    #[test]
    fn nested_inside_logical() {
        let inner = exists_z(rel("z", Operator::Equal, 0), rel("z", Operator::Equal, 1)).unwrap();
        let both: Statement = Logical::new(
            vec![inner.into(), rel("x", Operator::LessThan, 3)],
            Connective::Conjunction,
        )
        .unwrap()
        .into();
        let q = Quantified::new(
            vec![s("x")],
            rel("x", Operator::Equal, 5),
            both.clone(),
            Quantifier::Universal,
        )
        .unwrap();
        assert_eq!(
            q.to_string(),
            "∀x (x = 5 → (∃z (z = 0 → z = 1) ∧ x < 3))"
        );

        let err = Quantified::new(
            vec![s("z")],
            rel("z", Operator::Equal, 5),
            both,
            Quantifier::Universal,
        )
        .unwrap_err();
        assert_eq!(err, StatementError::UnboundVariables(vec!["x".to_owned()]));
    }

    #[test]
    fn structural_errors_come_first() {
        let err = Quantified::new(
            vec![],
            rel("y", Operator::Equal, 5),
            rel("y", Operator::Equal, 5),
            Quantifier::Universal,
        )
        .unwrap_err();
        assert_eq!(err, StatementError::EmptyVariables);
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentValue);

        let err = Quantified::new(
            vec![s("x"), Expr::integer(5)],
            rel("y", Operator::Equal, 5),
            rel("y", Operator::Equal, 5),
            Quantifier::Universal,
        )
        .unwrap_err();
        assert_eq!(
            err,
            StatementError::InvalidVariable {
                index: 1,
                value: "5".to_owned()
            }
        );
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentType);
    }

    #[test]
    fn resetting_a_field_to_its_value_never_fails() {
        let mut q = forall_x();
        let before = q.clone();
        q.set_predicate(q.predicate().clone()).unwrap();
        q.set_domain(q.domain().clone()).unwrap();
        q.set_variables(q.variables()).unwrap();
        assert_eq!(q, before);
    }

    #[test]
    fn narrowing_variables_is_rejected() {
        let mut q = Quantified::new(
            vec![s("x"), s("y")],
            rel("x", Operator::Equal, 5),
            rel("y", Operator::LessThan, 10),
            Quantifier::Universal,
        )
        .unwrap();
        let before = q.clone();
        assert_eq!(
            q.set_variables(vec![s("x")]),
            Err(StatementError::UnboundVariables(vec!["y".to_owned()]))
        );
        assert_eq!(q.set_variables(vec![]), Err(StatementError::EmptyVariables));
        assert_eq!(q, before);

        q.set_variables(vec![s("y"), s("x"), s("z")]).unwrap();
        assert_eq!(q.to_string(), "∀y, x, z (x = 5 → y < 10)");
    }

    #[test]
    fn failed_domain_or_predicate_keeps_the_old_one() {
        let mut q = forall_x();
        let before = q.clone();
        assert!(q.set_domain(rel("y", Operator::Equal, 0)).is_err());
        assert!(q.set_predicate(rel("y", Operator::Equal, 0)).is_err());
        assert_eq!(q, before);

        q.set_predicate(rel("x", Operator::NotEqual, 7)).unwrap();
        q.set_quantifier(Quantifier::Existential);
        assert_eq!(q.to_string(), "∃x (x = 5 → x ≠ 7)");
    }

    #[test]
    fn duplicate_variables_are_kept_but_bind_once() {
        let q = Quantified::new(
            vec![s("x"), s("x")],
            rel("x", Operator::Equal, 5),
            rel("x", Operator::LessThan, 10),
            Quantifier::Universal,
        )
        .unwrap();
        assert_eq!(q.to_string(), "∀x, x (x = 5 → x < 10)");
        assert_eq!(q.bound_symbols(), vec![Symbol::from("x")]);
    }

    #[test]
    fn variables_returns_a_copy() {
        let q = Quantified::new(
            vec![s("x"), s("y")],
            rel("x", Operator::Equal, 5),
            rel("x", Operator::LessThan, 10),
            Quantifier::Universal,
        )
        .unwrap();
        let mut variables = q.variables();
        variables[0] = s("z");
        variables.clear();
        assert_eq!(q.variables(), vec![s("x"), s("y")]);
    }

    #[test]
    fn quantifier_from_str() {
        assert_eq!("∃".parse::<Quantifier>(), Ok(Quantifier::Existential));
        assert_eq!("universal".parse::<Quantifier>(), Ok(Quantifier::Universal));
        let err = "some".parse::<Quantifier>().unwrap_err();
        assert_eq!(err, StatementError::InvalidQuantifier("some".to_owned()));
        assert_eq!(err.kind(), ErrorKind::InvalidArgumentValue);
    }
}
