//! `math_statement` represents formal mathematical statements as validated trees and guarantees
//! that every statement is well-formed: each symbol used in a comparison is bound by an
//! enclosing quantifier.
//!
//! # Main data structures
//! There are three kinds of [`Statement`]s, built on top of [`Expression`]s.
//!
//! ## Expressions
//! An [`Expression`] is an atomic mathematical term like _x + sin(y)_. Statements treat
//! expressions as opaque values and only ask for the symbols occurring in them, so any symbolic
//! engine can be plugged in by implementing the trait. [`Expr`] is the exact engine shipped
//! with this crate. With the `parsing` feature (enabled by default) expressions can be read from
//! text using [`parsing::parse_expression`].
//!
//! ## Relational statements
//! A [`Relational`] compares two expressions with one of _=_, _≠_, _<_ or _≤_.
//!
//! ## Logical statements
//! A [`Logical`] joins two or more statements using _∧_, _∨_, _→_ or _↔_.
//!
//! ## Quantified statements
//! A [`Quantified`] binds variables over a domain and a predicate, like
//! _∀x (x = 5 → x < 10)_. Every symbol referenced in the domain and predicate must be bound
//! by its variables. A quantifier nested inside binds its own variables, which stay invisible
//! outside of it (see [`scope`]).
//!
//! All constructors validate their arguments before a statement is produced, and all setters
//! validate before anything is changed. If validation fails a [`StatementError`] is returned and
//! the statement keeps its previous, valid state.

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod error;
pub mod expression;
mod logical;
#[cfg(feature = "parsing")]
pub mod parsing;
mod quantified;
mod relational;
pub mod scope;
mod statement;
mod types;

pub use error::{ErrorKind, StatementError};
pub use expression::{Expr, Expression, Function};
pub use logical::*;
pub use quantified::*;
pub use relational::*;
pub use statement::*;
pub use types::*;
