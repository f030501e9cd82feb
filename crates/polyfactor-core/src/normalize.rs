//! Expansion to a sparse polynomial normal form.
//!
//! `expand` multiplies out sums, products and non-negative integer powers
//! into a sum of monomials with exact rational coefficients. Anything it
//! cannot multiply out (function calls, symbolic exponents, division by a
//! non-constant) becomes an opaque atom keyed by its canonical form, so
//! two trees that differ only in such a subterm's operand order still
//! compare equal.
//!
//! Square roots of non-negative rationals are kept as `Radical` atoms with
//! `sqrt(r)^2 = r` applied during multiplication; this is what lets surd
//! factorizations such as `x^4 + 1 = (x^2 + sqrt(2)*x + 1)(x^2 - sqrt(2)*x + 1)`
//! be verified exactly.

use std::collections::BTreeMap;
use std::sync::Arc;

use polyfactor_integers::{Integer, Rational};

use crate::canonical::canonical;
use crate::expr::{BinaryOp, Expr, SignedTerm, UnaryOp};

/// Square factors up to this root are pulled out of radicands.
const RADICAND_TRIAL_LIMIT: u64 = 10_000;

/// Caps on how far expansion goes before a subterm is left opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandLimits {
    /// Largest integer exponent that is multiplied out.
    pub max_power: u32,
    /// Largest number of terms an intermediate product may have.
    pub max_terms: usize,
}

impl Default for ExpandLimits {
    fn default() -> Self {
        Self {
            max_power: 64,
            max_terms: 10_000,
        }
    }
}

/// An indivisible factor of a monomial.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Atom {
    /// A named symbol.
    Symbol(String),
    /// `sqrt(r)` for an integer `r >= 2` with no small square factors.
    Radical(Integer),
    /// A subterm that could not be expanded, in canonical form.
    Opaque(Expr),
}

impl Atom {
    /// Renders the atom back into a tree.
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        match self {
            Atom::Symbol(name) => Expr::ident(name),
            Atom::Radical(r) => Expr::sqrt(Expr::from_integer(r.clone())),
            Atom::Opaque(e) => e.clone(),
        }
    }

    /// Returns true if the identifier `name` occurs in the atom.
    #[must_use]
    pub fn contains_identifier(&self, name: &str) -> bool {
        match self {
            Atom::Symbol(s) => s == name,
            Atom::Radical(_) => false,
            Atom::Opaque(e) => e.contains_identifier(name),
        }
    }
}

/// A product of atoms with multiplicities; the empty map is the constant 1.
pub type Monomial = BTreeMap<Atom, u32>;

/// A sparse polynomial over the rationals in arbitrary atoms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expanded {
    terms: BTreeMap<Monomial, Rational>,
}

impl Expanded {
    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// A constant.
    #[must_use]
    pub fn constant(c: Rational) -> Self {
        let mut out = Self::zero();
        out.insert(Monomial::new(), c);
        out
    }

    /// A single atom with coefficient 1.
    #[must_use]
    pub fn atom(atom: Atom) -> Self {
        let mut mono = Monomial::new();
        mono.insert(atom, 1);
        let mut out = Self::zero();
        out.insert(mono, Rational::one());
        out
    }

    /// `sqrt(c)` for a non-negative rational, with square factors pulled
    /// out: `sqrt(p/q) = m/q * sqrt(r)` where `p*q = m^2 * r`.
    #[must_use]
    pub fn radical(c: &Rational) -> Option<Self> {
        if c.is_negative() {
            return None;
        }
        if c.is_zero() {
            return Some(Self::zero());
        }
        let q = c.denominator();
        let (m, r) = (&c.numerator() * &q).square_part(RADICAND_TRIAL_LIMIT);
        let coeff = Rational::new(m, q);
        if r.is_one() {
            return Some(Self::constant(coeff));
        }
        if let Some(root) = r.sqrt_exact() {
            return Some(Self::constant(coeff * Rational::from_integer(root)));
        }
        Some(Self::atom(Atom::Radical(r)).scale(&coeff))
    }

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in ascending monomial order.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (&Monomial, &Rational)> {
        self.terms.iter()
    }

    /// The value of a constant polynomial.
    #[must_use]
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(Rational::zero()),
            1 => self.terms.get(&Monomial::new()).cloned(),
            _ => None,
        }
    }

    fn insert(&mut self, mono: Monomial, c: Rational) {
        if c.is_zero() {
            return;
        }
        let sum = match self.terms.remove(&mono) {
            Some(existing) => existing + c,
            None => c,
        };
        if !sum.is_zero() {
            self.terms.insert(mono, sum);
        }
    }

    /// Sum of two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (mono, c) in &other.terms {
            out.insert(mono.clone(), c.clone());
        }
        out
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), -c))
                .collect(),
        }
    }

    /// Difference of two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies every coefficient by `c`.
    #[must_use]
    pub fn scale(&self, c: &Rational) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|(m, k)| (m.clone(), k * c))
                .collect(),
        }
    }

    /// Product of two polynomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &other.terms {
                let (factor, mono) = mul_monomials(ma, mb);
                out.insert(mono, &(ca * cb) * &factor);
            }
        }
        out
    }

    /// `self^k`, or `None` if an intermediate result exceeds `max_terms`.
    #[must_use]
    pub fn pow(&self, k: u32, max_terms: usize) -> Option<Self> {
        let mut result = Self::constant(Rational::one());
        let mut base = self.clone();
        let mut exp = k;
        while exp > 0 {
            if exp & 1 == 1 {
                if result.len() * base.len() > max_terms {
                    return None;
                }
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                if base.len() * base.len() > max_terms {
                    return None;
                }
                base = base.mul(&base);
            }
        }
        Some(result)
    }

    /// Renders as a sum of terms, highest monomial first.
    #[must_use]
    pub fn to_expr(&self) -> Expr {
        let terms: Vec<SignedTerm> = self
            .terms
            .iter()
            .rev()
            .map(|(mono, c)| {
                let magnitude = c.abs();
                let mut factors: Vec<Arc<Expr>> = Vec::new();
                if mono.is_empty() || !magnitude.is_one() {
                    factors.push(Arc::new(Expr::Number(magnitude)));
                }
                for (atom, &e) in mono {
                    let base = atom.to_expr();
                    factors.push(Arc::new(if e == 1 { base } else { base.powi(e) }));
                }
                SignedTerm {
                    negative: c.is_negative(),
                    expr: Arc::new(Expr::product(factors)),
                }
            })
            .collect();
        Expr::sum(&terms)
    }
}

/// Multiplies two monomials, folding `sqrt(r)^2` into the returned
/// rational factor.
fn mul_monomials(a: &Monomial, b: &Monomial) -> (Rational, Monomial) {
    let mut mono = a.clone();
    for (atom, e) in b {
        *mono.entry(atom.clone()).or_insert(0) += e;
    }
    let mut factor = Rational::one();
    mono.retain(|atom, e| {
        if let Atom::Radical(r) = atom {
            if *e >= 2 {
                factor = &factor * &Rational::from_integer(r.pow(*e / 2));
                *e %= 2;
            }
        }
        *e > 0
    });
    (factor, mono)
}

/// Expands with default limits.
#[must_use]
pub fn expand(expr: &Expr) -> Expanded {
    expand_with(expr, &ExpandLimits::default())
}

/// Expands a tree into sparse polynomial form.
///
/// Total: subterms that cannot be expanded within `limits` become opaque
/// atoms instead of failing.
#[must_use]
pub fn expand_with(expr: &Expr, limits: &ExpandLimits) -> Expanded {
    match expr {
        Expr::Number(q) => Expanded::constant(q.clone()),
        Expr::Identifier(name) => Expanded::atom(Atom::Symbol(name.clone())),
        Expr::Binary { op, left, right } => match op {
            BinaryOp::Add => expand_with(left, limits).add(&expand_with(right, limits)),
            BinaryOp::Sub => expand_with(left, limits).sub(&expand_with(right, limits)),
            BinaryOp::Mul => {
                let a = expand_with(left, limits);
                let b = expand_with(right, limits);
                if a.len() * b.len() > limits.max_terms {
                    opaque(expr)
                } else {
                    a.mul(&b)
                }
            }
            BinaryOp::Div => divide(expr, left, right, limits),
            BinaryOp::Pow => power(expr, left, right, limits),
        },
        Expr::Unary { op, operand } => match op {
            UnaryOp::Neg => expand_with(operand, limits).neg(),
            UnaryOp::Plus => expand_with(operand, limits),
        },
        Expr::Fraction {
            numerator,
            denominator,
        } => divide(expr, numerator, denominator, limits),
        Expr::Call { name, args } if name == "sqrt" && args.len() == 1 => {
            expand_with(&args[0], limits)
                .as_constant()
                .and_then(|c| Expanded::radical(&c))
                .unwrap_or_else(|| opaque(expr))
        }
        Expr::Call { .. } => opaque(expr),
    }
}

fn opaque(expr: &Expr) -> Expanded {
    Expanded::atom(Atom::Opaque(canonical(expr)))
}

fn divide(expr: &Expr, numerator: &Expr, denominator: &Expr, limits: &ExpandLimits) -> Expanded {
    match expand_with(denominator, limits)
        .as_constant()
        .and_then(|c| c.recip())
    {
        Some(inv) => expand_with(numerator, limits).scale(&inv),
        None => opaque(expr),
    }
}

fn power(expr: &Expr, base: &Expr, exponent: &Expr, limits: &ExpandLimits) -> Expanded {
    let Some(e) = expand_with(exponent, limits).as_constant() else {
        return opaque(expr);
    };
    let base_expanded = expand_with(base, limits);

    if let Some(k) = e.to_integer() {
        if !k.is_negative() {
            let within = k.to_u64().and_then(|k| u32::try_from(k).ok());
            return match within {
                Some(k) if k <= limits.max_power => base_expanded
                    .pow(k, limits.max_terms)
                    .unwrap_or_else(|| opaque(expr)),
                _ => opaque(expr),
            };
        }
        // c^(-k) for a nonzero constant base
        let inverse = base_expanded
            .as_constant()
            .and_then(|c| c.recip())
            .zip(k.abs().to_u64().and_then(|k| u32::try_from(k).ok()));
        return match inverse {
            Some((inv, k)) if k <= limits.max_power => Expanded::constant(inv.pow(k)),
            _ => opaque(expr),
        };
    }

    if e == Rational::from_i64(1, 2) {
        if let Some(root) = base_expanded
            .as_constant()
            .and_then(|c| Expanded::radical(&c))
        {
            return root;
        }
    }
    opaque(expr)
}

/// Expands and rebuilds the tree in normal form.
#[must_use]
pub fn normalize(expr: &Expr) -> Expr {
    expand(expr).to_expr()
}

/// Returns true if `a - b` expands to zero.
#[must_use]
pub fn algebraically_equal(a: &Expr, b: &Expr) -> bool {
    algebraically_equal_with(a, b, &ExpandLimits::default())
}

/// [`algebraically_equal`] with explicit limits.
#[must_use]
pub fn algebraically_equal_with(a: &Expr, b: &Expr, limits: &ExpandLimits) -> bool {
    expand_with(a, limits).sub(&expand_with(b, limits)).is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::ident("x")
    }

    #[test]
    fn test_expand_product() {
        // (x - 2)(x + 2) = x^2 - 4
        let e = (x() - 2) * (x() + 2);
        assert!(algebraically_equal(&e, &(x().powi(2) - 4)));
        assert_eq!(normalize(&e), x().powi(2) - 4);
    }

    #[test]
    fn test_expand_power() {
        let e = (x() + 1).powi(3);
        let expected = x().powi(3) + 3 * x().powi(2) + 3 * x() + 1;
        assert!(algebraically_equal(&e, &expected));
        assert!(!algebraically_equal(&e, &(x().powi(3) + 1)));
    }

    #[test]
    fn test_division_by_constant() {
        let e = Expr::fraction(2 * x() + 4, Expr::integer(2));
        assert!(algebraically_equal(&e, &(x() + 2)));
    }

    #[test]
    fn test_opaque_subterms() {
        let sin_a = Expr::call("sin", vec![x() + 1]);
        let sin_b = Expr::call("sin", vec![1 + x()]);
        assert!(algebraically_equal(&(2 * sin_a.clone()), &(sin_b.clone() + sin_a)));
        // division by a non-constant stays opaque
        let inv = Expr::div(Expr::integer(1), x());
        assert!(algebraically_equal(&(inv.clone() + inv.clone()), &(2 * inv)));
    }

    #[test]
    fn test_radicals_square_away() {
        // (x^2 + sqrt(2) x + 1)(x^2 - sqrt(2) x + 1) = x^4 + 1
        let s = Expr::sqrt(Expr::integer(2));
        let a = x().powi(2) + s.clone() * x() + 1;
        let b = x().powi(2) - s * x() + 1;
        assert!(algebraically_equal(&(a * b), &(x().powi(4) + 1)));
    }

    #[test]
    fn test_radical_simplification() {
        // sqrt(12) = 2 sqrt(3); (4 + sqrt(12))/2 * (4 - sqrt(12))/2 = 1
        let r = Expr::sqrt(Expr::integer(12));
        let a = Expr::fraction(Expr::integer(4) + r.clone(), Expr::integer(2));
        let b = Expr::fraction(Expr::integer(4) - r, Expr::integer(2));
        assert!(algebraically_equal(&(a * b), &Expr::integer(1)));
        assert_eq!(expand(&Expr::sqrt(Expr::integer(9))).as_constant(), Some(Rational::from(3)));
        assert_eq!(
            expand(&Expr::sqrt(Expr::rational(1, 4))).as_constant(),
            Some(Rational::from_i64(1, 2))
        );
    }

    #[test]
    fn test_power_limit_leaves_opaque() {
        let limits = ExpandLimits {
            max_power: 4,
            max_terms: 100,
        };
        let e = (x() + 1).powi(10);
        let expanded = expand_with(&e, &limits);
        assert_eq!(expanded.len(), 1);
        assert!(algebraically_equal_with(&e, &e.clone(), &limits));
    }
}
