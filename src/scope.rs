//! Scope resolution for quantified statements.
//!
//! The escaping free symbols of a statement are the symbols it references that no quantifier
//! inside it binds:
//! * a relational statement references the free symbols of both sides
//! * a logical statement references the union of its elements' symbols
//! * a quantified statement must bind every symbol its domain and predicate reference, so
//!   nothing escapes from it. An inner quantifier shadows outer bindings of the same name.
//!
//! Quantified statements nested anywhere below are checked again during resolution, so an
//! ill-formed subtree is reported even if it was never checked itself.

use crate::{error::StatementError, expression::Expression, statement::Statement};
use std::collections::HashSet;
use std::hash::Hash;

/// A set of symbols remembering the order of insertion
#[derive(Debug)]
struct OrderedSymbols<S> {
    order: Vec<S>,
    seen: HashSet<S>,
}

impl<S: Clone + Eq + Hash> OrderedSymbols<S> {
    fn new() -> Self {
        OrderedSymbols {
            order: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn extend(&mut self, symbols: impl IntoIterator<Item = S>) {
        for s in symbols {
            if self.seen.insert(s.clone()) {
                self.order.push(s);
            }
        }
    }

    fn into_vec(self) -> Vec<S> {
        self.order
    }
}

/// Returns the symbols of `statement` that are not bound by a quantifier inside it, in order of
/// first occurrence.
///
/// # Errors
/// * `UnboundVariables` - if a quantified statement within `statement` references a symbol it
/// does not bind
pub fn escaping_symbols<E: Expression>(
    statement: &Statement<E>,
) -> Result<Vec<E::Symbol>, StatementError> {
    let mut symbols = OrderedSymbols::new();
    collect(statement, &mut symbols)?;
    Ok(symbols.into_vec())
}

/// Checks that `variables` bind every escaping symbol of `domain` and `predicate`.
///
/// # Errors
/// * `UnboundVariables` - naming every symbol that is not bound, in order of first occurrence
pub fn check_bound<E: Expression>(
    variables: &[E],
    domain: &Statement<E>,
    predicate: &Statement<E>,
) -> Result<(), StatementError> {
    let unbound = unbound_symbols(variables, domain, predicate)?;
    if unbound.is_empty() {
        Ok(())
    } else {
        Err(reject(&unbound))
    }
}

fn unbound_symbols<E: Expression>(
    variables: &[E],
    domain: &Statement<E>,
    predicate: &Statement<E>,
) -> Result<Vec<E::Symbol>, StatementError> {
    let bound: HashSet<E::Symbol> = variables.iter().filter_map(|v| v.as_symbol()).collect();
    let mut referenced = OrderedSymbols::new();
    collect(domain, &mut referenced)?;
    collect(predicate, &mut referenced)?;
    Ok(referenced
        .into_vec()
        .into_iter()
        .filter(|s| !bound.contains(s))
        .collect())
}

fn collect<E: Expression>(
    statement: &Statement<E>,
    symbols: &mut OrderedSymbols<E::Symbol>,
) -> Result<(), StatementError> {
    match statement {
        Statement::Relational(rel) => symbols.extend(rel.free_symbols()),
        Statement::Logical(logical) => {
            for element in logical.iter() {
                collect(element, symbols)?;
            }
        }
        Statement::Quantified(q) => {
            let variables = q.variables();
            tracing::trace!("resolving nested scope binding {} variables", variables.len());
            let unbound = unbound_symbols(&variables, q.domain(), q.predicate())?;
            if !unbound.is_empty() {
                return Err(reject(&unbound));
            }
        }
    }
    Ok(())
}

fn reject<S: std::fmt::Display>(unbound: &[S]) -> StatementError {
    let names: Vec<String> = unbound.iter().map(|s| s.to_string()).collect();
    tracing::debug!("rejecting quantified statement, unbound: {}", names.join(", "));
    StatementError::UnboundVariables(names)
}
