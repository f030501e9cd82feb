//! Euclidean operations on polynomials over a field.

use polyfactor_rings::traits::Field;

use crate::dense::DensePoly;

impl<F: Field> DensePoly<F> {
    /// Euclidean division: returns `(q, r)` with `self = q * divisor + r`
    /// and `deg r < deg divisor`.
    ///
    /// Returns `None` when `divisor` is zero.
    #[must_use]
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        if divisor.is_zero() {
            return None;
        }
        let lc_inv = divisor.leading_coeff().inv()?;
        let d = divisor.degree();
        let mut rem = self.coeffs().to_vec();
        if rem.len() <= d {
            return Some((Self::zero(), self.clone()));
        }
        let mut quot = vec![F::zero(); rem.len() - d];

        for i in (0..quot.len()).rev() {
            let c = rem[i + d].clone() * lc_inv.clone();
            if c.is_zero() {
                continue;
            }
            for (j, dc) in divisor.coeffs().iter().enumerate() {
                rem[i + j] = rem[i + j].clone() - c.clone() * dc.clone();
            }
            quot[i] = c;
        }
        rem.truncate(d.max(1));
        Some((Self::new(quot), Self::new(rem)))
    }

    /// Scales so the leading coefficient is one. Zero stays zero.
    #[must_use]
    pub fn monic(&self) -> Self {
        match self.leading_coeff().inv() {
            Some(inv) if !self.is_zero() => self.scale(&inv),
            _ => self.clone(),
        }
    }

    /// Monic greatest common divisor.
    #[must_use]
    pub fn gcd_monic(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = match a.div_rem(&b) {
                Some((_, r)) => r,
                None => break,
            };
            a = b;
            b = r;
        }
        a.monic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyfactor_integers::Rational;

    fn qpoly(coeffs: &[i64]) -> DensePoly<Rational> {
        DensePoly::from_i64s(coeffs)
    }

    #[test]
    fn test_div_rem() {
        // (x^3 - 6x^2 + 11x - 6) / (x - 1) = x^2 - 5x + 6
        let (q, r) = qpoly(&[-6, 11, -6, 1]).div_rem(&qpoly(&[-1, 1])).unwrap();
        assert_eq!(q, qpoly(&[6, -5, 1]));
        assert!(r.is_zero());
    }

    #[test]
    fn test_div_rem_with_remainder() {
        // (2x^2 + 1) / (2x) = x, remainder 1
        let (q, r) = qpoly(&[1, 0, 2]).div_rem(&qpoly(&[0, 2])).unwrap();
        assert_eq!(q, qpoly(&[0, 1]));
        assert_eq!(r, qpoly(&[1]));
        assert!(qpoly(&[1, 1]).div_rem(&qpoly(&[0])).is_none());
    }

    #[test]
    fn test_gcd() {
        // gcd((x-1)(x+2), (x-1)(x+3)) = x - 1
        let a = qpoly(&[-1, 1]).mul(&qpoly(&[2, 1]));
        let b = qpoly(&[-1, 1]).mul(&qpoly(&[3, 1]));
        assert_eq!(a.gcd_monic(&b), qpoly(&[-1, 1]));
    }
}
