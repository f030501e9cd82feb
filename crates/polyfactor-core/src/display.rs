//! Plain infix rendering.
//!
//! Used for the human-readable trace the engine returns alongside a
//! result: `x^2 - 4`, `3*(2*x + 3)`, `(x - 2)*(x + 2)`.
//!
//! Parentheses are inserted from operator precedence only, so rendering
//! never changes how a tree would be re-read.

use std::fmt;

use crate::expr::{BinaryOp, Expr, UnaryOp};

/// Binding strength, loosest first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Sum,
    Product,
    Unary,
    Power,
    Atom,
}

fn precedence(expr: &Expr) -> Prec {
    match expr {
        Expr::Number(q) if q.is_negative() => Prec::Unary,
        Expr::Number(q) if !q.is_integer() => Prec::Product,
        Expr::Number(_) | Expr::Identifier(_) | Expr::Call { .. } => Prec::Atom,
        Expr::Binary { op, .. } => match op {
            BinaryOp::Add | BinaryOp::Sub => Prec::Sum,
            BinaryOp::Mul | BinaryOp::Div => Prec::Product,
            BinaryOp::Pow => Prec::Power,
        },
        Expr::Unary { .. } => Prec::Unary,
        Expr::Fraction { .. } => Prec::Product,
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(q) => write!(f, "{q}"),
            Expr::Identifier(name) => write!(f, "{name}"),
            Expr::Binary { op, left, right } => {
                let (lp, rp) = (precedence(left), precedence(right));
                match op {
                    BinaryOp::Add => {
                        write_operand(f, left, false)?;
                        write!(f, " + ")?;
                        write_operand(f, right, rp == Prec::Unary && right.as_number().is_none())
                    }
                    BinaryOp::Sub => {
                        write_operand(f, left, false)?;
                        write!(f, " - ")?;
                        write_operand(f, right, matches!(rp, Prec::Sum | Prec::Unary))
                    }
                    BinaryOp::Mul => {
                        // products associate, so a*(b*c) reads as a*b*c
                        write_operand(f, left, lp < Prec::Product)?;
                        write!(f, "*")?;
                        write_operand(f, right, matches!(rp, Prec::Sum | Prec::Unary))
                    }
                    BinaryOp::Div => {
                        write_operand(f, left, lp < Prec::Product)?;
                        write!(f, "/")?;
                        write_operand(f, right, rp <= Prec::Unary)
                    }
                    BinaryOp::Pow => {
                        write_operand(f, left, lp <= Prec::Power)?;
                        write!(f, "^")?;
                        write_operand(f, right, rp < Prec::Atom)
                    }
                }
            }
            Expr::Unary { op, operand } => {
                let sign = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Plus => "+",
                };
                write!(f, "{sign}")?;
                // -2*x reads the same as -(2*x)
                write_operand(
                    f,
                    operand,
                    matches!(precedence(operand), Prec::Sum | Prec::Unary),
                )
            }
            Expr::Call { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
            Expr::Fraction {
                numerator,
                denominator,
            } => {
                write_operand(f, numerator, precedence(numerator) < Prec::Product)?;
                write!(f, "/")?;
                write_operand(f, denominator, precedence(denominator) < Prec::Atom)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::Expr;

    fn x() -> Expr {
        Expr::ident("x")
    }

    #[test]
    fn test_polynomial_rendering() {
        assert_eq!((x().powi(2) - 4).to_string(), "x^2 - 4");
        assert_eq!((3 * (2 * x() + 3)).to_string(), "3*(2*x + 3)");
        assert_eq!(((x() - 2) * (x() + 2)).to_string(), "(x - 2)*(x + 2)");
    }

    #[test]
    fn test_powers_and_negation() {
        assert_eq!((x() + 1).powi(2).to_string(), "(x + 1)^2");
        assert_eq!(Expr::neg(x().powi(2)).to_string(), "-x^2");
        assert_eq!(Expr::neg(x() + 1).to_string(), "-(x + 1)");
        assert_eq!(Expr::neg(2 * (x() + 1)).to_string(), "-2*(x + 1)");
        assert_eq!((x() - (x() - 1)).to_string(), "x - (x - 1)");
        assert_eq!(Expr::pow(Expr::integer(-2), x()).to_string(), "(-2)^x");
    }

    #[test]
    fn test_products_and_powers_on_the_right() {
        let e = x().powi(3) - 6 * x().powi(2) + 11 * x() - 6;
        assert_eq!(e.to_string(), "x^3 - 6*x^2 + 11*x - 6");
        let root2 = Expr::sqrt(Expr::integer(2));
        assert_eq!(
            (x().powi(2) - root2 * x() + 1).to_string(),
            "x^2 - sqrt(2)*x + 1"
        );
        let nested = Expr::mul(Expr::rational(1, 2), (x() - 1) * x());
        assert_eq!(nested.to_string(), "1/2*(x - 1)*x");
        assert_eq!((x() - Expr::integer(-2)).to_string(), "x - (-2)");
        assert_eq!((x() * Expr::neg(x())).to_string(), "x*(-x)");
    }

    #[test]
    fn test_radicals_and_fractions() {
        let root = Expr::fraction(Expr::integer(4) + Expr::sqrt(Expr::integer(12)), Expr::integer(2));
        assert_eq!(root.to_string(), "(4 + sqrt(12))/2");
        assert_eq!(Expr::rational(1, 2).to_string(), "1/2");
        assert_eq!((x() + Expr::rational(1, 2)).powi(2).to_string(), "(x + 1/2)^2");
    }
}
