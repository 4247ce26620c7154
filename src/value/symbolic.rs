//! Symbolic expression elements
//!
//! The symbolic kind stores a small expression tree per slot. Arithmetic on
//! symbolic elements builds new nodes, folding integer-integer pairs where
//! the result stays exact.

use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A symbolic expression element
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Exact integer constant
    Integer(BigInt),
    /// Named free symbol
    Symbol(String),
    /// Sum of two expressions
    Add(Box<Expr>, Box<Expr>),
    /// Difference of two expressions
    Sub(Box<Expr>, Box<Expr>),
    /// Product of two expressions
    Mul(Box<Expr>, Box<Expr>),
    /// Quotient of two expressions
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// The zero expression
    pub fn zero() -> Self {
        Self::Integer(BigInt::zero())
    }

    /// Integer constant expression
    pub fn integer(v: i64) -> Self {
        Self::Integer(BigInt::from(v))
    }

    /// Free symbol expression
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Integer(v) => Some(v),
            _ => None,
        }
    }
}

impl Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self.as_integer(), rhs.as_integer()) {
            (Some(a), Some(b)) => Self::Integer(a + b),
            _ => Self::Add(Box::new(self), Box::new(rhs)),
        }
    }
}

impl Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match (self.as_integer(), rhs.as_integer()) {
            (Some(a), Some(b)) => Self::Integer(a - b),
            _ => Self::Sub(Box::new(self), Box::new(rhs)),
        }
    }
}

impl Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self.as_integer(), rhs.as_integer()) {
            (Some(a), Some(b)) => Self::Integer(a * b),
            _ => Self::Mul(Box::new(self), Box::new(rhs)),
        }
    }
}

impl Div for Expr {
    type Output = Self;

    /// Folds only when the quotient is exact; otherwise keeps the node so no
    /// precision is lost.
    fn div(self, rhs: Self) -> Self {
        if let (Some(a), Some(b)) = (self.as_integer(), rhs.as_integer()) {
            if !b.is_zero() && (a % b).is_zero() {
                return Self::Integer(a / b);
            }
        }
        Self::Div(Box::new(self), Box::new(rhs))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Symbol(s) => f.write_str(s),
            Self::Add(a, b) => write!(f, "({a} + {b})"),
            Self::Sub(a, b) => write!(f, "({a} - {b})"),
            Self::Mul(a, b) => write!(f, "({a} * {b})"),
            Self::Div(a, b) => write!(f, "({a} / {b})"),
        }
    }
}
