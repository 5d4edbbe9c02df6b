use crate::types::Symbol;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::ops;

/// The contract statements rely on to inspect their operands.
///
/// A [`Statement`][crate::Statement] never looks inside an expression; it only asks whether a
/// value is an expression at all, whether it is a plain symbol, and which symbols occur free in
/// it. [`Expr`] is the implementation shipped with this crate.
pub trait Expression: Clone + PartialEq + fmt::Display + fmt::Debug {
    type Symbol: Clone + Eq + Hash + fmt::Display + fmt::Debug;

    /// Whether this value may be used as the side of a comparison
    fn is_expression(&self) -> bool;

    /// Returns the symbol if this expression is nothing but a single symbol
    fn as_symbol(&self) -> Option<Self::Symbol>;

    /// The symbols occurring in this expression, each once, in order of first occurrence
    fn free_symbols(&self) -> Vec<Self::Symbol>;
}

/// A unary function that can be applied to an [`Expr`]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Exp,
    Ln,
    Sqrt,
}

impl Function {
    pub const ALL: [Function; 6] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Exp,
        Function::Ln,
        Function::Sqrt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Sqrt => "sqrt",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// The exact value of this function at a rational point, if it is rational and known
    fn eval_exact(&self, x: &BigRational) -> Option<BigRational> {
        match self {
            Function::Sin | Function::Tan if x.is_zero() => Some(BigRational::zero()),
            Function::Cos | Function::Exp if x.is_zero() => Some(BigRational::one()),
            Function::Ln if x.is_one() => Some(BigRational::zero()),
            Function::Sqrt if x.is_zero() || x.is_one() => Some(x.clone()),
            _ => None,
        }
    }
}

/// An exact symbolic expression tree.
///
/// Constants are arbitrary precision rationals; there are no floating point values. `Undefined`
/// is the result of operations without a value (like `1/0`) and is not a valid
/// [`Expression`] operand.
///
/// # Example
/// ```
/// use math_statement::{Expr, Expression, Symbol};
///
/// let x = Expr::symbol("x");
/// let y = Expr::symbol("y");
/// let e = x.clone() + Expr::sin(y) * x;
/// assert_eq!(e.to_string(), "x + sin(y)*x");
/// assert_eq!(e.free_symbols(), vec![Symbol::from("x"), Symbol::from("y")]);
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    Rational(BigRational),
    Symbol(Symbol),
    Pi,
    Undefined,
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Apply(Function, Box<Expr>),
}

// Binding strength used to decide where parentheses are needed when displaying. Right operands
// of the left associative operators must bind strictly tighter than the operator itself.
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_NEG: u8 = 3;
const PREC_POW: u8 = 4;
const PREC_ATOM: u8 = 5;

// Powers with larger exponents are left unevaluated by `simplify`.
const MAX_FOLDED_EXPONENT: u32 = 64;

impl Expr {
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(Symbol::new(name))
    }

    pub fn integer(n: i64) -> Self {
        Expr::Rational(BigRational::from_integer(BigInt::from(n)))
    }

    /// Creates the exact fraction `numer / denom`, or `Undefined` if `denom` is zero
    pub fn rational(numer: i64, denom: i64) -> Self {
        if denom == 0 {
            Expr::Undefined
        } else {
            Expr::Rational(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
        }
    }

    pub fn apply(function: Function, arg: Expr) -> Self {
        Expr::Apply(function, Box::new(arg))
    }

    pub fn sin(arg: Expr) -> Self {
        Self::apply(Function::Sin, arg)
    }

    pub fn cos(arg: Expr) -> Self {
        Self::apply(Function::Cos, arg)
    }

    pub fn tan(arg: Expr) -> Self {
        Self::apply(Function::Tan, arg)
    }

    pub fn exp(arg: Expr) -> Self {
        Self::apply(Function::Exp, arg)
    }

    pub fn ln(arg: Expr) -> Self {
        Self::apply(Function::Ln, arg)
    }

    pub fn sqrt(arg: Expr) -> Self {
        Self::apply(Function::Sqrt, arg)
    }

    pub fn pow(self, exponent: Expr) -> Self {
        Expr::Pow(Box::new(self), Box::new(exponent))
    }

    /// Returns `false` if `Undefined` occurs anywhere in this expression
    pub fn is_defined(&self) -> bool {
        match self {
            Expr::Undefined => false,
            Expr::Rational(_) | Expr::Symbol(_) | Expr::Pi => true,
            Expr::Neg(a) | Expr::Apply(_, a) => a.is_defined(),
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => a.is_defined() && b.is_defined(),
        }
    }

    /// Returns the symbols of this expression in order of their first appearance
    pub fn symbols(&self) -> Vec<Symbol> {
        let mut seen = HashSet::new();
        let mut symbols = Vec::new();
        self.collect_symbols(&mut seen, &mut symbols);
        symbols
    }

    fn collect_symbols(&self, seen: &mut HashSet<Symbol>, symbols: &mut Vec<Symbol>) {
        match self {
            Expr::Symbol(s) => {
                if seen.insert(s.clone()) {
                    symbols.push(s.clone());
                }
            }
            Expr::Rational(_) | Expr::Pi | Expr::Undefined => {}
            Expr::Neg(a) | Expr::Apply(_, a) => a.collect_symbols(seen, symbols),
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => {
                a.collect_symbols(seen, symbols);
                b.collect_symbols(seen, symbols);
            }
        }
    }

    /// Folds exactly computable constant subexpressions and removes neutral elements.
    ///
    /// This never guesses a value for a symbol. `Undefined` absorbs every operation it takes
    /// part in and division by zero produces it.
    ///
    /// # Example
    /// ```
    /// use math_statement::Expr;
    ///
    /// let x = Expr::symbol("x");
    /// let e = (Expr::integer(1) + Expr::rational(1, 2)) * x.clone() + Expr::integer(0);
    /// assert_eq!(e.simplify().to_string(), "3/2*x");
    /// assert_eq!((x.clone() - x).simplify(), Expr::integer(0));
    /// assert_eq!((Expr::integer(1) / Expr::integer(0)).simplify(), Expr::Undefined);
    /// ```
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            Rational(_) | Symbol(_) | Pi | Undefined => self,

            Neg(a) => match a.simplify() {
                Undefined => Undefined,
                Rational(r) => Rational(-r),
                Neg(inner) => *inner,
                a => Neg(Box::new(a)),
            },

            Add(a, b) => match (a.simplify(), b.simplify()) {
                (Undefined, _) | (_, Undefined) => Undefined,
                (Rational(x), Rational(y)) => Rational(x + y),
                (Rational(x), b) if x.is_zero() => b,
                (a, Rational(y)) if y.is_zero() => a,
                (a, b) => Add(Box::new(a), Box::new(b)),
            },

            Sub(a, b) => match (a.simplify(), b.simplify()) {
                (Undefined, _) | (_, Undefined) => Undefined,
                (a, b) if a == b => Rational(BigRational::zero()),
                (Rational(x), Rational(y)) => Rational(x - y),
                (a, Rational(y)) if y.is_zero() => a,
                (Rational(x), b) if x.is_zero() => Neg(Box::new(b)).simplify(),
                (a, b) => Sub(Box::new(a), Box::new(b)),
            },

            Mul(a, b) => match (a.simplify(), b.simplify()) {
                (Undefined, _) | (_, Undefined) => Undefined,
                (Rational(x), Rational(y)) => Rational(x * y),
                (Rational(x), _) | (_, Rational(x)) if x.is_zero() => Rational(x),
                (Rational(x), b) if x.is_one() => b,
                (a, Rational(y)) if y.is_one() => a,
                (a, b) => Mul(Box::new(a), Box::new(b)),
            },

            Div(a, b) => match (a.simplify(), b.simplify()) {
                (Undefined, _) | (_, Undefined) => Undefined,
                (_, Rational(y)) if y.is_zero() => Undefined,
                (Rational(x), Rational(y)) => Rational(x / y),
                (a, Rational(y)) if y.is_one() => a,
                (a, b) => Div(Box::new(a), Box::new(b)),
            },

            Pow(a, b) => match (a.simplify(), b.simplify()) {
                (Undefined, _) | (_, Undefined) => Undefined,
                (a, Rational(e)) if e.is_one() => a,
                (Rational(x), Rational(e)) => match Self::rational_pow(&x, &e) {
                    Some(Some(r)) => Rational(r),
                    Some(None) => Undefined,
                    None => Pow(Box::new(Rational(x)), Box::new(Rational(e))),
                },
                (_, Rational(e)) if e.is_zero() => Rational(BigRational::one()),
                (a, b) => Pow(Box::new(a), Box::new(b)),
            },

            Apply(f, a) => match a.simplify() {
                Undefined => Undefined,
                Rational(x) => match f.eval_exact(&x) {
                    Some(r) => Rational(r),
                    None if f == Function::Ln && !x.is_positive() => Undefined,
                    None => Apply(f, Box::new(Rational(x))),
                },
                a => Apply(f, Box::new(a)),
            },
        }
    }

    /// `None` if the power cannot be folded exactly, `Some(None)` if it has no value
    fn rational_pow(base: &BigRational, exponent: &BigRational) -> Option<Option<BigRational>> {
        if !exponent.is_integer() {
            return None;
        }
        let e = exponent.to_integer();
        let magnitude = e.abs().to_u32().filter(|m| *m <= MAX_FOLDED_EXPONENT)?;
        if e.is_negative() {
            if base.is_zero() {
                return Some(None);
            }
            Some(Some(num_traits::pow(base.recip(), magnitude as usize)))
        } else if magnitude == 0 && base.is_zero() {
            Some(None)
        } else {
            Some(Some(num_traits::pow(base.clone(), magnitude as usize)))
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Rational(r) if !r.is_integer() => PREC_PRODUCT,
            Expr::Rational(r) if r.is_negative() => PREC_NEG,
            Expr::Rational(_) | Expr::Symbol(_) | Expr::Pi | Expr::Undefined => PREC_ATOM,
            Expr::Apply(..) => PREC_ATOM,
            Expr::Neg(_) => PREC_NEG,
            Expr::Add(..) | Expr::Sub(..) => PREC_SUM,
            Expr::Mul(..) | Expr::Div(..) => PREC_PRODUCT,
            Expr::Pow(..) => PREC_POW,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, min_precedence: u8) -> fmt::Result {
        if self.precedence() < min_precedence {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Rational(r) if r.is_integer() => write!(f, "{}", r.numer()),
            Expr::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Expr::Symbol(s) => write!(f, "{}", s),
            Expr::Pi => f.write_str("π"),
            Expr::Undefined => f.write_str("undefined"),
            Expr::Neg(a) => {
                f.write_str("-")?;
                a.fmt_operand(f, PREC_NEG)
            }
            Expr::Add(a, b) => {
                a.fmt_operand(f, PREC_SUM)?;
                f.write_str(" + ")?;
                b.fmt_operand(f, PREC_PRODUCT)
            }
            Expr::Sub(a, b) => {
                a.fmt_operand(f, PREC_SUM)?;
                f.write_str(" - ")?;
                b.fmt_operand(f, PREC_PRODUCT)
            }
            Expr::Mul(a, b) => {
                a.fmt_operand(f, PREC_PRODUCT)?;
                f.write_str("*")?;
                b.fmt_operand(f, PREC_NEG)
            }
            Expr::Div(a, b) => {
                a.fmt_operand(f, PREC_PRODUCT)?;
                f.write_str("/")?;
                b.fmt_operand(f, PREC_NEG)
            }
            Expr::Pow(a, b) => {
                a.fmt_operand(f, PREC_ATOM)?;
                f.write_str("^")?;
                b.fmt_operand(f, PREC_NEG)
            }
            Expr::Apply(function, a) => write!(f, "{}({})", function.name(), a),
        }
    }
}

impl Expression for Expr {
    type Symbol = Symbol;

    fn is_expression(&self) -> bool {
        self.is_defined()
    }

    fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Expr::Symbol(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn free_symbols(&self) -> Vec<Symbol> {
        self.symbols()
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::integer(n)
    }
}

impl From<BigRational> for Expr {
    fn from(r: BigRational) -> Self {
        Expr::Rational(r)
    }
}

impl From<Symbol> for Expr {
    fn from(s: Symbol) -> Self {
        Expr::Symbol(s)
    }
}

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $variant:ident) => {
        impl ops::$trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::$variant(Box::new(self), Box::new(rhs))
            }
        }
    };
}

binary_operator!(Add, add, Add);
binary_operator!(Sub, sub, Sub);
binary_operator!(Mul, mul, Mul);
binary_operator!(Div, div, Div);

impl ops::Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(Box::new(self))
    }
}
