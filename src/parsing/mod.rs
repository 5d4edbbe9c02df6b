//! Reading [`Expr`]s from text.
//!
//! The grammar is the usual one for arithmetic, from loosest to tightest binding:
//! `+ -`, `* /`, unary `-`, and right associative `^`. Operands are decimal numbers (read as
//! exact rationals), `pi` or `π`, function applications like `sin(x)` and symbol names.
//! Function names are reserved and cannot be used as symbols.
//!
//! # Example
//! ```
//! use math_statement::{parsing::parse_expression, Expr};
//!
//! let e = parse_expression("2*(x + 0.5)^2 - sin(y)").unwrap();
//! assert_eq!(e.to_string(), "2*(x + 1/2)^2 - sin(y)");
//! assert_eq!("x +".parse::<Expr>().unwrap_err().offset, 3);
//! ```

mod error;

pub use error::*;

use crate::expression::{Expr, Function};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0, one_of},
    combinator::{all_consuming, cut, map, map_opt, opt, recognize},
    error::context,
    multi::{fold_many0, many0_count},
    sequence::{delimited, pair, preceded},
    Finish, IResult,
};
use num_bigint::BigInt;
use num_rational::BigRational;
use std::str::FromStr;

type PResult<'a, O> = IResult<&'a str, O, GreedyError<&'a str>>;

/// Parses a whole string as an expression
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    all_consuming(ws(expression))(input)
        .finish()
        .map(|(_, expr)| expr)
        .map_err(|e| e.into_parse_error(input))
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expression(s)
    }
}

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> PResult<'a, O>,
) -> impl FnMut(&'a str) -> PResult<'a, O> {
    delimited(multispace0, inner, multispace0)
}

fn expression(input: &str) -> PResult<'_, Expr> {
    let (input, first) = term(input)?;
    fold_many0(
        pair(ws(one_of("+-")), cut(term)),
        move || first.clone(),
        |acc: Expr, (op, rhs): (char, Expr)| if op == '+' { acc + rhs } else { acc - rhs },
    )(input)
}

fn term(input: &str) -> PResult<'_, Expr> {
    let (input, first) = unary(input)?;
    fold_many0(
        pair(ws(one_of("*/")), cut(unary)),
        move || first.clone(),
        |acc: Expr, (op, rhs): (char, Expr)| if op == '*' { acc * rhs } else { acc / rhs },
    )(input)
}

fn unary(input: &str) -> PResult<'_, Expr> {
    alt((map(preceded(ws(char('-')), cut(unary)), |e: Expr| -e), power))(input)
}

fn power(input: &str) -> PResult<'_, Expr> {
    let (input, base) = atom(input)?;
    let (input, exponent) = opt(preceded(ws(char('^')), cut(unary)))(input)?;
    let expr = match exponent {
        Some(exponent) => base.pow(exponent),
        None => base,
    };
    Ok((input, expr))
}

fn atom(input: &str) -> PResult<'_, Expr> {
    context(
        "operand",
        alt((
            number,
            delimited(char('('), ws(expression), cut(char(')'))),
            call_or_name,
        )),
    )(input)
}

fn number(input: &str) -> PResult<'_, Expr> {
    map_opt(
        recognize(pair(digit1, opt(pair(char('.'), digit1)))),
        decimal,
    )(input)
}

fn decimal(text: &str) -> Option<Expr> {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let numer = BigInt::parse_bytes(format!("{}{}", whole, fraction).as_bytes(), 10)?;
    let denom = num_traits::pow(BigInt::from(10), fraction.len());
    Some(Expr::Rational(BigRational::new(numer, denom)))
}

fn call_or_name(input: &str) -> PResult<'_, Expr> {
    let (input, name) = identifier(input)?;
    if let Some(function) = Function::from_name(name) {
        let (input, arg) = context(
            "function argument",
            cut(delimited(ws(char('(')), ws(expression), char(')'))),
        )(input)?;
        return Ok((input, Expr::apply(function, arg)));
    }
    let expr = match name {
        "pi" | "π" => Expr::Pi,
        _ => Expr::symbol(name),
    };
    Ok((input, expr))
}

fn identifier(input: &str) -> PResult<'_, &str> {
    alt((
        tag("π"),
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0_count(alt((alphanumeric1, tag("_")))),
        )),
    ))(input)
}
