//! Polynomials with integer coefficients.
//!
//! Z is not a field, so division here is either exact (returning `None`
//! on a nonzero remainder) or a pseudo-division that scales the dividend
//! by a power of the divisor's leading coefficient first.

use polyfactor_integers::{Integer, Rational};

use crate::dense::DensePoly;

impl DensePoly<Integer> {
    /// Non-negative gcd of the coefficients; 0 for the zero polynomial.
    #[must_use]
    pub fn content(&self) -> Integer {
        self.coeffs()
            .iter()
            .fold(Integer::zero(), |acc, c| acc.gcd(c))
    }

    /// Splits into `(c, pp)` with `self = c * pp`, `pp` primitive and its
    /// leading coefficient positive. The sign lives in `c`.
    #[must_use]
    pub fn content_primitive(&self) -> (Integer, Self) {
        let mut c = self.content();
        if c.is_zero() {
            return (c, Self::zero());
        }
        if self.leading_coeff().is_negative() {
            c = -c;
        }
        let pp = Self::new(self.coeffs().iter().map(|x| x / &c).collect());
        (c, pp)
    }

    /// Primitive part with a positive leading coefficient.
    #[must_use]
    pub fn primitive_part(&self) -> Self {
        self.content_primitive().1
    }

    /// Largest absolute coefficient.
    #[must_use]
    pub fn max_norm(&self) -> Integer {
        self.coeffs()
            .iter()
            .map(Integer::abs)
            .max()
            .unwrap_or_else(Integer::zero)
    }

    /// Sum of squared coefficients.
    #[must_use]
    pub fn norm_squared(&self) -> Integer {
        self.coeffs()
            .iter()
            .fold(Integer::zero(), |acc, c| acc + c * c)
    }

    /// Exact quotient `self / divisor`, or `None` if the division leaves a
    /// remainder (or would need fractions).
    #[must_use]
    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        if self.is_zero() {
            return Some(Self::zero());
        }
        let d = divisor.degree();
        if self.degree() < d {
            return None;
        }
        let lc = divisor.leading_coeff();
        let mut rem = self.coeffs().to_vec();
        let mut quot = vec![Integer::zero(); rem.len() - d];

        for i in (0..quot.len()).rev() {
            if rem[i + d].is_zero() {
                continue;
            }
            let c = rem[i + d].div_exact(lc)?;
            for (j, dc) in divisor.coeffs().iter().enumerate() {
                rem[i + j] = &rem[i + j] - &(&c * dc);
            }
            quot[i] = c;
        }

        rem.iter()
            .all(Integer::is_zero)
            .then(|| Self::new(quot))
    }

    /// Returns true if `divisor` divides `self` in Z[x].
    #[must_use]
    pub fn is_divisible_by(&self, divisor: &Self) -> bool {
        self.div_exact(divisor).is_some()
    }

    /// Pseudo-remainder: the remainder of `lc(divisor)^(m-n+1) * self`
    /// divided by `divisor`, computed without fractions.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    #[must_use]
    pub fn pseudo_rem(&self, divisor: &Self) -> Self {
        assert!(!divisor.is_zero(), "pseudo-division by zero");
        let n = divisor.degree();
        if self.degree() < n || self.is_zero() {
            return self.clone();
        }
        let lc = divisor.leading_coeff().clone();
        let mut rem = self.clone();
        let mut steps = self.degree() - n + 1;

        while !rem.is_zero() && rem.degree() >= n {
            let shift = rem.degree() - n;
            let lead = rem.leading_coeff().clone();
            rem = rem
                .scale(&lc)
                .sub(&divisor.scale(&lead).shift(shift));
            steps -= 1;
        }
        // Keep the scaling uniform at lc^(m-n+1) regardless of early exit.
        if steps > 0 {
            rem = rem.scale(&lc.pow(u32::try_from(steps).unwrap_or(u32::MAX)));
        }
        rem
    }

    /// Greatest common divisor in Z[x] with a positive leading coefficient.
    ///
    /// Uses the primitive polynomial remainder sequence, so intermediate
    /// coefficients stay bounded by the inputs' content-free growth.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.content_primitive_positive();
        }
        if other.is_zero() {
            return self.content_primitive_positive();
        }

        let content = self.content().gcd(&other.content());
        let (mut a, mut b) = if self.degree() >= other.degree() {
            (self.primitive_part(), other.primitive_part())
        } else {
            (other.primitive_part(), self.primitive_part())
        };

        while !b.is_zero() {
            let r = a.pseudo_rem(&b);
            a = b;
            b = if r.is_zero() { r } else { r.primitive_part() };
        }

        a.primitive_part().scale(&content)
    }

    fn content_primitive_positive(&self) -> Self {
        if self.leading_coeff().is_negative() {
            self.neg()
        } else {
            self.clone()
        }
    }

    /// Coefficients reduced into `[0, m)`.
    #[must_use]
    pub fn rem_coeffs(&self, m: &Integer) -> Self {
        Self::new(self.coeffs().iter().map(|c| c.rem_euclid(m)).collect())
    }

    /// Coefficients reduced to the symmetric range `(-m/2, m/2]`.
    #[must_use]
    pub fn symmetric_mod(&self, m: &Integer) -> Self {
        let half = m / &Integer::new(2);
        Self::new(
            self.coeffs()
                .iter()
                .map(|c| {
                    let r = c.rem_euclid(m);
                    if r > half {
                        r - m
                    } else {
                        r
                    }
                })
                .collect(),
        )
    }

    /// Embeds into Q[x].
    #[must_use]
    pub fn to_rational(&self) -> DensePoly<Rational> {
        DensePoly::new(
            self.coeffs()
                .iter()
                .map(|c| Rational::from_integer(c.clone()))
                .collect(),
        )
    }

    /// Clears denominators: returns `(scale, p)` with `p = scale * q` in
    /// Z[x] and `scale` the positive lcm of `q`'s denominators.
    #[must_use]
    pub fn from_rational(q: &DensePoly<Rational>) -> (Integer, Self) {
        let scale = q
            .coeffs()
            .iter()
            .fold(Integer::one(), |acc, c| acc.lcm(&c.denominator()));
        let coeffs = q
            .coeffs()
            .iter()
            .map(|c| &(&c.numerator() * &scale) / &c.denominator())
            .collect();
        (scale, Self::new(coeffs))
    }
}
