//! Single-variable polynomial views of expression trees.
//!
//! A view maps each exponent of the designated variable to a rational
//! coefficient. It is built through the expander, so products and powers
//! of sums are recognized, not just flat sums of monomials.
//!
//! Other identifiers, radicals and opaque subterms free of the variable
//! count as constant factors of value 1 and clear `is_univariate`; every
//! strategy that rebuilds a tree from a view requires that flag.

use std::collections::BTreeMap;
use std::sync::Arc;

use polyfactor_core::{expand_with, Atom, BinaryOp, ExpandLimits, Expr, SignedTerm, UnaryOp};
use polyfactor_integers::{Integer, Rational};
use polyfactor_poly::DensePoly;

/// Coefficients of a polynomial in one variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolynomialView {
    /// The largest exponent present; at least 1.
    pub degree: u32,
    /// Nonzero coefficients keyed by exponent.
    pub coefficients: BTreeMap<u32, Rational>,
    /// False if some term carried another symbol or an opaque factor.
    pub is_univariate: bool,
}

impl PolynomialView {
    /// Coefficient of `x^k`, zero if absent.
    #[must_use]
    pub fn coefficient(&self, k: u32) -> Rational {
        self.coefficients.get(&k).cloned().unwrap_or_else(Rational::zero)
    }

    /// Number of nonzero terms.
    #[must_use]
    pub fn term_count(&self) -> usize {
        self.coefficients.len()
    }

    /// Gcd of all exponents present.
    #[must_use]
    pub fn exponent_gcd(&self) -> u32 {
        self.coefficients.keys().fold(0, |g, &k| gcd_u32(g, k))
    }

    /// The view as a dense polynomial over Q.
    #[must_use]
    pub fn to_dense(&self) -> DensePoly<Rational> {
        let mut coeffs = vec![Rational::zero(); self.degree as usize + 1];
        for (&k, c) in &self.coefficients {
            coeffs[k as usize] = c.clone();
        }
        DensePoly::new(coeffs)
    }

    /// `(scale, p)` with `p` in Z[x] and `view = p / scale`.
    #[must_use]
    pub fn integer_form(&self) -> (Integer, DensePoly<Integer>) {
        DensePoly::from_rational(&self.to_dense())
    }
}

fn gcd_u32(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd_u32(b, a % b)
    }
}

/// Builds the view of `expr` in `var` with default expansion limits.
#[must_use]
pub fn analyze_polynomial(expr: &Expr, var: &str) -> Option<PolynomialView> {
    analyze_polynomial_with(expr, var, &ExpandLimits::default())
}

/// Builds the view of `expr` in `var`.
///
/// Returns `None` if the variable appears under a negative or
/// non-integer exponent, inside a function call or in a denominator, or
/// does not appear at all.
#[must_use]
pub fn analyze_polynomial_with(
    expr: &Expr,
    var: &str,
    limits: &ExpandLimits,
) -> Option<PolynomialView> {
    if !is_polynomial_in(expr, var) {
        return None;
    }

    let mut coefficients: BTreeMap<u32, Rational> = BTreeMap::new();
    let mut is_univariate = true;
    for (mono, c) in expand_with(expr, limits).terms() {
        let mut degree = 0;
        for (atom, &e) in mono {
            match atom {
                Atom::Symbol(name) if name == var => degree = e,
                // a power of the variable left unexpanded
                _ if atom.contains_identifier(var) => return None,
                _ => is_univariate = false,
            }
        }
        let entry = coefficients.entry(degree).or_insert_with(Rational::zero);
        *entry = &*entry + c;
    }
    coefficients.retain(|_, c| !c.is_zero());

    let degree = coefficients.keys().next_back().copied()?;
    if degree == 0 {
        return None;
    }
    Some(PolynomialView {
        degree,
        coefficients,
        is_univariate,
    })
}

fn is_polynomial_in(expr: &Expr, var: &str) -> bool {
    if !expr.contains_identifier(var) {
        return true;
    }
    match expr {
        Expr::Number(_) | Expr::Identifier(_) => true,
        Expr::Binary { op, left, right } => match op {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul => {
                is_polynomial_in(left, var) && is_polynomial_in(right, var)
            }
            BinaryOp::Div => !right.contains_identifier(var) && is_polynomial_in(left, var),
            BinaryOp::Pow => expr.as_integer_power().is_some() && is_polynomial_in(left, var),
        },
        Expr::Unary { operand, .. } => is_polynomial_in(operand, var),
        Expr::Fraction {
            numerator,
            denominator,
        } => !denominator.contains_identifier(var) && is_polynomial_in(numerator, var),
        Expr::Call { .. } => false,
    }
}

/// Flattens nested `+`/`-` chains into signed terms.
///
/// Signs are pushed through subtraction and unary minus, and negative
/// literals become negated positive ones.
#[must_use]
pub fn extract_terms(expr: &Expr) -> Vec<SignedTerm> {
    let mut terms = Vec::new();
    collect_terms(expr, false, &mut terms);
    terms
}

fn collect_terms(expr: &Expr, negative: bool, out: &mut Vec<SignedTerm>) {
    match expr {
        Expr::Binary {
            op: BinaryOp::Add,
            left,
            right,
        } => {
            collect_terms(left, negative, out);
            collect_terms(right, negative, out);
        }
        Expr::Binary {
            op: BinaryOp::Sub,
            left,
            right,
        } => {
            collect_terms(left, negative, out);
            collect_terms(right, !negative, out);
        }
        Expr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => collect_terms(operand, !negative, out),
        Expr::Unary {
            op: UnaryOp::Plus,
            operand,
        } => collect_terms(operand, negative, out),
        Expr::Number(q) if q.is_negative() => out.push(SignedTerm {
            negative: !negative,
            expr: Arc::new(Expr::Number(-q)),
        }),
        _ => out.push(SignedTerm {
            negative,
            expr: Arc::new(expr.clone()),
        }),
    }
}

/// A term `c * v1^k1 * v2^k2 ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monomial {
    /// Signed rational coefficient.
    pub coefficient: Rational,
    /// Identifier exponents; every entry is positive.
    pub powers: BTreeMap<String, u32>,
}

impl Monomial {
    /// A bare constant.
    #[must_use]
    pub fn constant(coefficient: Rational) -> Self {
        Self {
            coefficient,
            powers: BTreeMap::new(),
        }
    }

    /// `name^k`.
    #[must_use]
    pub fn power(name: &str, k: u32) -> Self {
        let mut powers = BTreeMap::new();
        if k > 0 {
            powers.insert(name.to_string(), k);
        }
        Self {
            coefficient: Rational::one(),
            powers,
        }
    }

    /// Product of two monomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let mut powers = self.powers.clone();
        for (name, k) in &other.powers {
            *powers.entry(name.clone()).or_insert(0) += k;
        }
        Self {
            coefficient: &self.coefficient * &other.coefficient,
            powers,
        }
    }

    /// The same monomial with its coefficient negated.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            coefficient: -&self.coefficient,
            powers: self.powers.clone(),
        }
    }

    /// Exponent of `name`, 0 if absent.
    #[must_use]
    pub fn degree_in(&self, name: &str) -> u32 {
        self.powers.get(name).copied().unwrap_or(0)
    }

    /// Returns true when there are no identifier factors.
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.powers.is_empty()
    }

    /// Renders `|c| * v1^k1 * ...`, dropping a unit coefficient.
    #[must_use]
    pub fn magnitude_expr(&self) -> Expr {
        let magnitude = self.coefficient.abs();
        let mut factors: Vec<Arc<Expr>> = Vec::new();
        if self.powers.is_empty() || !magnitude.is_one() {
            factors.push(Arc::new(Expr::Number(magnitude)));
        }
        for (name, &k) in &self.powers {
            factors.push(Arc::new(Expr::var_power(name, k)));
        }
        Expr::product(factors)
    }

    /// The monomial as an additive term.
    #[must_use]
    pub fn to_signed_term(&self) -> SignedTerm {
        SignedTerm {
            negative: self.coefficient.is_negative(),
            expr: Arc::new(self.magnitude_expr()),
        }
    }
}

/// How a single additive term decomposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermParts {
    /// A coefficient times powers of identifiers.
    Monomial(Monomial),
    /// Anything else; treated as a coefficient of 1.
    Opaque,
}

impl TermParts {
    /// The monomial, if recognized.
    #[must_use]
    pub fn as_monomial(&self) -> Option<&Monomial> {
        match self {
            TermParts::Monomial(m) => Some(m),
            TermParts::Opaque => None,
        }
    }
}

/// Splits a term into coefficient and identifier powers.
///
/// Recognizes numbers, identifiers, integer powers of either, division by
/// a nonzero literal, unary minus and products of these.
#[must_use]
pub fn term_parts(expr: &Expr) -> TermParts {
    monomial_of(expr).map_or(TermParts::Opaque, TermParts::Monomial)
}

/// [`term_parts`] with the term's sign folded into the coefficient.
#[must_use]
pub fn signed_term_parts(term: &SignedTerm) -> TermParts {
    match term_parts(&term.expr) {
        TermParts::Monomial(m) if term.negative => TermParts::Monomial(m.negated()),
        parts => parts,
    }
}

fn monomial_of(expr: &Expr) -> Option<Monomial> {
    match expr {
        Expr::Number(q) => Some(Monomial::constant(q.clone())),
        Expr::Identifier(name) => Some(Monomial::power(name, 1)),
        Expr::Binary {
            op: BinaryOp::Mul,
            left,
            right,
        } => Some(monomial_of(left)?.mul(&monomial_of(right)?)),
        Expr::Binary {
            op: BinaryOp::Div,
            left,
            right,
        } => {
            let inv = right.as_number()?.recip()?;
            let mut m = monomial_of(left)?;
            m.coefficient = &m.coefficient * &inv;
            Some(m)
        }
        Expr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => monomial_of(operand).map(|m| m.negated()),
        _ => {
            let (base, k) = expr.as_integer_power()?;
            match &**base {
                Expr::Identifier(name) => Some(Monomial::power(name, k)),
                Expr::Number(q) => Some(Monomial::constant(q.pow(k))),
                _ => None,
            }
        }
    }
}

/// Renders coefficients as a sum of terms in `var`, highest degree first.
///
/// Negative terms become subtractions; unit coefficients and `^1` are
/// omitted.
#[must_use]
pub fn poly_to_expr(coefficients: &BTreeMap<u32, Rational>, var: &str) -> Expr {
    let terms: Vec<SignedTerm> = coefficients
        .iter()
        .rev()
        .filter(|(_, c)| !c.is_zero())
        .map(|(&k, c)| SignedTerm {
            negative: c.is_negative(),
            expr: Arc::new(power_term(&c.abs(), var, k)),
        })
        .collect();
    Expr::sum(&terms)
}

/// [`poly_to_expr`] for a dense integer polynomial.
#[must_use]
pub fn dense_to_expr(p: &DensePoly<Integer>, var: &str) -> Expr {
    let coefficients = p
        .coeffs()
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_zero())
        .filter_map(|(k, c)| Some((u32::try_from(k).ok()?, Rational::from_integer(c.clone()))))
        .collect();
    poly_to_expr(&coefficients, var)
}

fn power_term(magnitude: &Rational, var: &str, k: u32) -> Expr {
    if k == 0 {
        Expr::Number(magnitude.clone())
    } else if magnitude.is_one() {
        Expr::var_power(var, k)
    } else {
        Expr::mul(Expr::Number(magnitude.clone()), Expr::var_power(var, k))
    }
}
