//! Dense univariate polynomials.

use std::fmt;

use polyfactor_rings::traits::Ring;

/// Below this length multiplication stays schoolbook.
const KARATSUBA_THRESHOLD: usize = 32;

/// A dense univariate polynomial.
///
/// Coefficients are stored in ascending degree order with no trailing
/// zeros; the zero polynomial is the single coefficient `[0]`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DensePoly<R: Ring> {
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Creates a polynomial from ascending coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }
        Self { coeffs }
    }

    /// Creates a polynomial from machine-integer coefficients.
    #[must_use]
    pub fn from_i64s(coeffs: &[i64]) -> Self {
        Self::new(coeffs.iter().map(|&c| R::from_i64(c)).collect())
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![R::zero()],
        }
    }

    /// The constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![R::one()],
        }
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// The polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// The monomial c * x^n.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Degree of the polynomial; the zero polynomial reports 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns true for constants (including zero).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// The leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        &self.coeffs[self.coeffs.len() - 1]
    }

    /// The coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// All coefficients, ascending.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Consumes the polynomial, returning its coefficients.
    #[must_use]
    pub fn into_coeffs(self) -> Vec<R> {
        self.coeffs
    }

    /// Evaluates at a point by Horner's rule.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        Self::new((0..len).map(|i| self.coeff(i) + other.coeff(i)).collect())
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        Self::new((0..len).map(|i| self.coeff(i) - other.coeff(i)).collect())
    }

    /// Multiplies two polynomials, switching to Karatsuba for long inputs.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        if self.coeffs.len() < KARATSUBA_THRESHOLD || other.coeffs.len() < KARATSUBA_THRESHOLD {
            self.mul_schoolbook(other)
        } else {
            self.mul_karatsuba(other)
        }
    }

    fn mul_schoolbook(&self, other: &Self) -> Self {
        let mut result = vec![R::zero(); self.coeffs.len() + other.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].clone() + a.clone() * b.clone();
            }
        }
        Self::new(result)
    }

    fn mul_karatsuba(&self, other: &Self) -> Self {
        let n = self.coeffs.len();
        let m = other.coeffs.len();
        if n < KARATSUBA_THRESHOLD || m < KARATSUBA_THRESHOLD {
            return self.mul_schoolbook(other);
        }

        let half = n.max(m).div_ceil(2);
        let split = |p: &Self| -> (Self, Self) {
            if p.coeffs.len() <= half {
                (p.clone(), Self::zero())
            } else {
                (
                    Self::new(p.coeffs[..half].to_vec()),
                    Self::new(p.coeffs[half..].to_vec()),
                )
            }
        };

        // a*b = z2*x^(2*half) + z1*x^half + z0
        let (a0, a1) = split(self);
        let (b0, b1) = split(other);
        let z0 = a0.mul(&b0);
        let z2 = a1.mul(&b1);
        let z1 = a0.add(&a1).mul(&b0.add(&b1)).sub(&z0).sub(&z2);

        z0.add(&z1.shift(half)).add(&z2.shift(2 * half))
    }

    /// Multiplies every coefficient by `c`.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        Self::new(self.coeffs.iter().map(|x| x.clone() * c.clone()).collect())
    }

    /// The formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return Self::zero();
        }
        Self::new(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(i, c)| c.clone() * R::from_i64(i as i64))
                .collect(),
        )
    }

    /// Multiplies by x^n.
    #[must_use]
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }
        let mut coeffs = vec![R::zero(); n];
        coeffs.extend(self.coeffs.iter().cloned());
        Self::new(coeffs)
    }

    /// Raises to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }
        result
    }

    /// Substitutes x^k for x, i.e. returns p(x^k).
    #[must_use]
    pub fn inflate(&self, k: usize) -> Self {
        if k <= 1 || self.is_constant() {
            return self.clone();
        }
        let mut coeffs = vec![R::zero(); self.degree() * k + 1];
        for (i, c) in self.coeffs.iter().enumerate() {
            coeffs[i * k] = c.clone();
        }
        Self::new(coeffs)
    }

    /// Inverse of [`inflate`](Self::inflate): returns q with p(x) = q(x^k),
    /// or `None` when some nonzero exponent is not a multiple of `k`.
    #[must_use]
    pub fn deflate(&self, k: usize) -> Option<Self> {
        if k == 0 {
            return None;
        }
        let mut coeffs = Vec::with_capacity(self.coeffs.len() / k + 1);
        for (i, c) in self.coeffs.iter().enumerate() {
            if i % k == 0 {
                coeffs.push(c.clone());
            } else if !c.is_zero() {
                return None;
            }
        }
        Some(Self::new(coeffs))
    }

    /// Exponents that carry a nonzero coefficient, ascending.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        self.coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, _)| i)
    }
}

impl<R: Ring + fmt::Display> fmt::Display for DensePoly<R> {
    /// Highest degree first, e.g. `3*x^2 + x - 4`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut first = true;
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let text = c.to_string();
            let (negative, magnitude) = match text.strip_prefix('-') {
                Some(rest) => (true, rest.to_string()),
                None => (false, text),
            };
            if first {
                if negative {
                    write!(f, "-")?;
                }
            } else if negative {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            first = false;

            let unit = magnitude == "1";
            match (i, unit) {
                (0, _) => write!(f, "{magnitude}")?,
                (1, true) => write!(f, "x")?,
                (1, false) => write!(f, "{magnitude}*x")?,
                (_, true) => write!(f, "x^{i}")?,
                (_, false) => write!(f, "{magnitude}*x^{i}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyfactor_integers::{Integer, Rational};

    fn poly(coeffs: &[i64]) -> DensePoly<Integer> {
        DensePoly::from_i64s(coeffs)
    }

    #[test]
    fn test_normalization() {
        let p = poly(&[1, 2, 0, 0]);
        assert_eq!(p.degree(), 1);
        assert!(poly(&[0, 0]).is_zero());
        assert!(poly(&[]).is_zero());
    }

    #[test]
    fn test_basic_ops() {
        let p = DensePoly::new(vec![Rational::from(1), Rational::from(2)]); // 1 + 2x
        let q = DensePoly::new(vec![Rational::from(3), Rational::from(4)]); // 3 + 4x

        let sum = p.add(&q);
        assert_eq!(sum.coeff(0), Rational::from(4));
        assert_eq!(sum.coeff(1), Rational::from(6));
        assert!(p.sub(&p).is_zero());
    }

    #[test]
    fn test_mul_schoolbook() {
        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x^2
        assert_eq!(poly(&[1, 2]).mul(&poly(&[3, 4])), poly(&[3, 10, 8]));
    }

    #[test]
    fn test_mul_karatsuba_matches_schoolbook() {
        let a: Vec<i64> = (0..70).map(|i| (i * 7 % 13) - 6).collect();
        let b: Vec<i64> = (0..45).map(|i| (i * 5 % 11) - 5).collect();
        let (a, b) = (poly(&a), poly(&b));
        assert_eq!(a.mul_karatsuba(&b), a.mul_schoolbook(&b));
    }

    #[test]
    fn test_eval_and_derivative() {
        // p(x) = 1 + 2x + 3x^2
        let p = poly(&[1, 2, 3]);
        assert_eq!(p.eval(&Integer::new(2)), Integer::new(17));
        assert_eq!(p.derivative(), poly(&[2, 6]));
    }

    #[test]
    fn test_pow() {
        // (x + 1)^3
        assert_eq!(poly(&[1, 1]).pow(3), poly(&[1, 3, 3, 1]));
        assert_eq!(poly(&[5, 1]).pow(0), poly(&[1]));
    }

    #[test]
    fn test_inflate_deflate() {
        let p = poly(&[4, 0, -5, 0, 1]); // x^4 - 5x^2 + 4
        let q = p.deflate(2).unwrap();
        assert_eq!(q, poly(&[4, -5, 1]));
        assert_eq!(q.inflate(2), p);
        assert!(poly(&[1, 1, 1]).deflate(2).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(poly(&[-4, 0, 1]).to_string(), "x^2 - 4");
        assert_eq!(poly(&[3, -1, 2]).to_string(), "2*x^2 - x + 3");
        assert_eq!(poly(&[0, -1]).to_string(), "-x");
    }
}
