//! Constructors and operator overloads.
//!
//! The binary constructors accept anything convertible into `Arc<Expr>`,
//! so passing an existing `Arc` shares that subtree instead of copying it.

use std::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use polyfactor_integers::{Integer, Rational};
use smallvec::SmallVec;

use crate::expr::{BinaryOp, Expr, SignedTerm, UnaryOp};

impl Expr {
    /// A numeric literal.
    #[must_use]
    pub fn number(value: Rational) -> Self {
        Expr::Number(value)
    }

    /// An integer literal.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Expr::Number(Rational::from(value))
    }

    /// An integer literal from an arbitrary precision integer.
    #[must_use]
    pub fn from_integer(value: Integer) -> Self {
        Expr::Number(Rational::from_integer(value))
    }

    /// A rational literal `n/d`.
    ///
    /// # Panics
    ///
    /// Panics if `d` is zero.
    #[must_use]
    pub fn rational(n: i64, d: i64) -> Self {
        Expr::Number(Rational::from_i64(n, d))
    }

    /// An identifier.
    #[must_use]
    pub fn ident(name: &str) -> Self {
        Expr::Identifier(name.to_string())
    }

    /// A binary node.
    pub fn binary(op: BinaryOp, left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        Expr::Binary {
            op,
            left: left.into(),
            right: right.into(),
        }
    }

    /// `left + right`.
    pub fn add(left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    /// `left - right`.
    pub fn sub(left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        Self::binary(BinaryOp::Sub, left, right)
    }

    /// `left * right`.
    pub fn mul(left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        Self::binary(BinaryOp::Mul, left, right)
    }

    /// `left / right`.
    pub fn div(left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        Self::binary(BinaryOp::Div, left, right)
    }

    /// `base ^ exponent`.
    pub fn pow(base: impl Into<Arc<Expr>>, exponent: impl Into<Arc<Expr>>) -> Self {
        Self::binary(BinaryOp::Pow, base, exponent)
    }

    /// `-operand`.
    pub fn neg(operand: impl Into<Arc<Expr>>) -> Self {
        Expr::Unary {
            op: UnaryOp::Neg,
            operand: operand.into(),
        }
    }

    /// A stacked fraction.
    pub fn fraction(numerator: impl Into<Arc<Expr>>, denominator: impl Into<Arc<Expr>>) -> Self {
        Expr::Fraction {
            numerator: numerator.into(),
            denominator: denominator.into(),
        }
    }

    /// A function call.
    #[must_use]
    pub fn call(name: &str, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.to_string(),
            args: args.into_iter().map(Arc::new).collect::<SmallVec<_>>(),
        }
    }

    /// `sqrt(arg)`.
    pub fn sqrt(arg: impl Into<Arc<Expr>>) -> Self {
        let mut args = SmallVec::new();
        args.push(arg.into());
        Expr::Call {
            name: "sqrt".to_string(),
            args,
        }
    }

    /// `self ^ k` with an integer literal exponent.
    #[must_use]
    pub fn powi(&self, k: u32) -> Self {
        Self::pow(self.clone(), Expr::integer(i64::from(k)))
    }

    /// `var ^ k`, collapsing `k = 1` to `var` and `k = 0` to `1`.
    #[must_use]
    pub fn var_power(var: &str, k: u32) -> Self {
        match k {
            0 => Expr::integer(1),
            1 => Expr::ident(var),
            _ => Expr::ident(var).powi(k),
        }
    }

    /// Builds a left-associated sum from signed terms.
    ///
    /// A negative leading term becomes a negative literal or a unary
    /// minus; later negative terms become subtractions. An empty list is 0.
    #[must_use]
    pub fn sum(terms: &[SignedTerm]) -> Self {
        let mut iter = terms.iter();
        let Some(first) = iter.next() else {
            return Expr::integer(0);
        };
        let mut acc = if first.negative {
            match first.expr.as_number() {
                Some(q) => Expr::Number(-q),
                None => Expr::neg(Arc::clone(&first.expr)),
            }
        } else {
            (*first.expr).clone()
        };
        for term in iter {
            acc = if term.negative {
                Expr::sub(acc, Arc::clone(&term.expr))
            } else {
                Expr::add(acc, Arc::clone(&term.expr))
            };
        }
        acc
    }

    /// Builds a left-associated product. An empty list is 1.
    #[must_use]
    pub fn product(factors: Vec<Arc<Expr>>) -> Self {
        let mut iter = factors.into_iter();
        let Some(first) = iter.next() else {
            return Expr::integer(1);
        };
        let first = Arc::try_unwrap(first).unwrap_or_else(|shared| (*shared).clone());
        iter.fold(first, |acc, factor| Expr::mul(acc, factor))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::integer(value)
    }
}

impl From<Rational> for Expr {
    fn from(value: Rational) -> Self {
        Expr::Number(value)
    }
}

macro_rules! expr_binop {
    ($trait:ident, $method:ident, $op:expr) => {
        impl $trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, self, rhs)
            }
        }

        impl $trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::binary($op, self.clone(), rhs.clone())
            }
        }

        impl $trait<i64> for Expr {
            type Output = Expr;

            fn $method(self, rhs: i64) -> Expr {
                Expr::binary($op, self, Expr::integer(rhs))
            }
        }

        impl $trait<Expr> for i64 {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::binary($op, Expr::integer(self), rhs)
            }
        }
    };
}

expr_binop!(Add, add, BinaryOp::Add);
expr_binop!(Sub, sub, BinaryOp::Sub);
expr_binop!(Mul, mul, BinaryOp::Mul);

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::ident("x")
    }

    #[test]
    fn test_sum_builder() {
        let terms = vec![
            SignedTerm::positive(x().powi(2)),
            SignedTerm::negative(Expr::integer(4)),
        ];
        assert_eq!(Expr::sum(&terms), x().powi(2) - 4);

        let leading_negative = vec![SignedTerm::negative(Expr::integer(4)), SignedTerm::positive(x())];
        assert_eq!(Expr::sum(&leading_negative), Expr::integer(-4) + x());
        assert_eq!(Expr::sum(&[]), Expr::integer(0));
    }

    #[test]
    fn test_product_builder() {
        let factors = vec![Arc::new(Expr::integer(3)), Arc::new(x()), Arc::new(x() + 1)];
        assert_eq!(Expr::product(factors), 3 * x() * (x() + 1));
        assert_eq!(Expr::product(Vec::new()), Expr::integer(1));
    }

    #[test]
    fn test_var_power() {
        assert_eq!(Expr::var_power("x", 0), Expr::integer(1));
        assert_eq!(Expr::var_power("x", 1), x());
        assert_eq!(Expr::var_power("x", 4), x().powi(4));
    }
}
