//! Polynomials over GF(p) with a runtime word-sized prime.
//!
//! The factorizer tries several primes per input, so the modulus is a
//! value rather than a type parameter. Coefficients are kept reduced in
//! `[0, p)` and the zero polynomial has no coefficients.
//!
//! Factorization is distinct-degree followed by Cantor-Zassenhaus
//! equal-degree splitting for odd `p`.

use log::warn;
use polyfactor_integers::Integer;
use polyfactor_poly::DensePoly;
use rand::Rng;

/// Equal-degree splitting gives up on a factor after this many draws.
const MAX_SPLIT_ATTEMPTS: usize = 1000;

#[allow(clippy::cast_possible_truncation)]
fn mul_mod(a: u64, b: u64, p: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(p)) as u64
}

/// Multiplicative inverse of `a` modulo `p`, if it exists.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn inv_mod(a: u64, p: u64) -> Option<u64> {
    let mut old_r = i128::from(a % p);
    let mut r = i128::from(p);
    let mut old_s: i128 = 1;
    let mut s: i128 = 0;

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    (old_r == 1).then(|| old_s.rem_euclid(i128::from(p)) as u64)
}

/// A polynomial over GF(p), coefficients ascending.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ModPoly {
    coeffs: Vec<u64>,
    p: u64,
}

impl ModPoly {
    /// Creates a polynomial, reducing coefficients mod `p`.
    #[must_use]
    pub fn new(coeffs: Vec<u64>, p: u64) -> Self {
        Self::trimmed(coeffs.into_iter().map(|c| c % p).collect(), p)
    }

    fn trimmed(mut coeffs: Vec<u64>, p: u64) -> Self {
        while coeffs.last() == Some(&0) {
            coeffs.pop();
        }
        Self { coeffs, p }
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero(p: u64) -> Self {
        Self {
            coeffs: Vec::new(),
            p,
        }
    }

    /// The constant 1.
    #[must_use]
    pub fn one(p: u64) -> Self {
        Self::new(vec![1], p)
    }

    /// The polynomial x.
    #[must_use]
    pub fn x(p: u64) -> Self {
        Self::new(vec![0, 1], p)
    }

    /// Reduces an integer polynomial mod `p`.
    #[must_use]
    pub fn from_integer_poly(f: &DensePoly<Integer>, p: u64) -> Self {
        let m = Integer::from(p);
        Self::trimmed(
            f.coeffs()
                .iter()
                .map(|c| c.rem_euclid(&m).to_u64().unwrap_or(0))
                .collect(),
            p,
        )
    }

    /// Lifts to Z[x] with coefficients in `[0, p)`.
    #[must_use]
    pub fn to_integer_poly(&self) -> DensePoly<Integer> {
        DensePoly::new(self.coeffs.iter().map(|&c| Integer::from(c)).collect())
    }

    /// The prime modulus.
    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.p
    }

    /// Coefficients in ascending order; empty for zero.
    #[must_use]
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// Returns true for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// The degree; zero and constants both report 0.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    /// The leading coefficient; 0 for the zero polynomial.
    #[must_use]
    pub fn leading_coeff(&self) -> u64 {
        self.coeffs.last().copied().unwrap_or(0)
    }

    /// Sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let p = self.p;
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| {
                let a = self.coeffs.get(i).copied().unwrap_or(0);
                let b = other.coeffs.get(i).copied().unwrap_or(0);
                (a + b) % p
            })
            .collect();
        Self::trimmed(coeffs, p)
    }

    /// Negation.
    #[must_use]
    pub fn neg(&self) -> Self {
        let p = self.p;
        Self::trimmed(self.coeffs.iter().map(|&c| (p - c) % p).collect(), p)
    }

    /// Difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies every coefficient by `c`.
    #[must_use]
    pub fn scale(&self, c: u64) -> Self {
        let p = self.p;
        Self::trimmed(self.coeffs.iter().map(|&a| mul_mod(a, c, p)).collect(), p)
    }

    /// Product.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let p = self.p;
        if self.is_zero() || other.is_zero() {
            return Self::zero(p);
        }
        let mut out = vec![0u64; self.coeffs.len() + other.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                out[i + j] = (out[i + j] + mul_mod(a, b, p)) % p;
            }
        }
        Self::trimmed(out, p)
    }

    /// Euclidean division, or `None` for a zero divisor.
    #[must_use]
    pub fn div_rem(&self, divisor: &Self) -> Option<(Self, Self)> {
        let p = self.p;
        let lc_inv = inv_mod(divisor.leading_coeff(), p)?;
        if self.coeffs.len() < divisor.coeffs.len() {
            return Some((Self::zero(p), self.clone()));
        }
        let d = divisor.degree();
        let mut rem = self.coeffs.clone();
        let mut quot = vec![0u64; rem.len() - d];

        for i in (0..quot.len()).rev() {
            let c = mul_mod(rem[i + d], lc_inv, p);
            if c == 0 {
                continue;
            }
            for (j, &dc) in divisor.coeffs.iter().enumerate() {
                rem[i + j] = (rem[i + j] + p - mul_mod(c, dc, p)) % p;
            }
            quot[i] = c;
        }
        rem.truncate(d);
        Some((Self::trimmed(quot, p), Self::trimmed(rem, p)))
    }

    /// Remainder modulo `m`; `self` unchanged when `m` is zero.
    #[must_use]
    pub fn rem(&self, m: &Self) -> Self {
        self.div_rem(m).map_or_else(|| self.clone(), |(_, r)| r)
    }

    /// Scales to leading coefficient 1. Zero stays zero.
    #[must_use]
    pub fn monic(&self) -> Self {
        match inv_mod(self.leading_coeff(), self.p) {
            Some(inv) => self.scale(inv),
            None => self.clone(),
        }
    }

    /// Monic gcd.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let r = a.rem(&b);
            a = b;
            b = r;
        }
        a.monic()
    }

    /// Extended gcd: returns `(g, s, t)` with `s*self + t*other = g` and
    /// `g` monic.
    #[must_use]
    pub fn ext_gcd(&self, other: &Self) -> (Self, Self, Self) {
        let p = self.p;
        let (mut old_r, mut r) = (self.clone(), other.clone());
        let (mut old_s, mut s) = (Self::one(p), Self::zero(p));
        let (mut old_t, mut t) = (Self::zero(p), Self::one(p));

        while !r.is_zero() {
            let Some((q, new_r)) = old_r.div_rem(&r) else {
                break;
            };
            let new_s = old_s.sub(&q.mul(&s));
            let new_t = old_t.sub(&q.mul(&t));
            (old_r, r) = (r, new_r);
            (old_s, s) = (s, new_s);
            (old_t, t) = (t, new_t);
        }

        match inv_mod(old_r.leading_coeff(), p) {
            Some(inv) => (old_r.scale(inv), old_s.scale(inv), old_t.scale(inv)),
            None => (old_r, old_s, old_t),
        }
    }

    /// `self^exp mod modulus` by repeated squaring.
    #[must_use]
    pub fn pow_mod(&self, mut exp: u64, modulus: &Self) -> Self {
        let mut result = Self::one(self.p).rem(modulus);
        let mut base = self.rem(modulus);
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base).rem(modulus);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base).rem(modulus);
            }
        }
        result
    }

    /// Formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        let p = self.p;
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| mul_mod(c, i as u64 % p, p))
            .collect();
        Self::trimmed(coeffs, p)
    }

    /// Returns true if `self` has no repeated factor over GF(p).
    #[must_use]
    pub fn is_squarefree(&self) -> bool {
        if self.degree() == 0 {
            return !self.is_zero();
        }
        let d = self.derivative();
        !d.is_zero() && self.gcd(&d).degree() == 0
    }

    /// Distinct-degree factorization of a squarefree polynomial.
    ///
    /// Returns `(d, g)` pairs where `g` is the monic product of all
    /// irreducible factors of degree `d`.
    #[must_use]
    pub fn distinct_degree(&self) -> Vec<(usize, Self)> {
        let p = self.p;
        let x = Self::x(p);
        let mut h = self.monic();
        let mut x_pow = x.clone();
        let mut out = Vec::new();
        let mut d = 0;

        while 2 * (d + 1) <= h.degree() {
            d += 1;
            x_pow = x_pow.pow_mod(p, &h);
            let g = h.gcd(&x_pow.sub(&x));
            if g.degree() > 0 {
                if let Some((q, _)) = h.div_rem(&g) {
                    h = q;
                }
                x_pow = x_pow.rem(&h);
                out.push((d, g));
            }
        }
        if h.degree() > 0 {
            out.push((h.degree(), h));
        }
        out
    }

    /// Splits a monic product of irreducibles all of degree `d`.
    ///
    /// For a random `a`, `N(a) = a * a^p * ... * a^(p^(d-1))` lies in the
    /// prime field on every component, so `N(a)^((p-1)/2) - 1` picks out
    /// roughly half of the factors.
    pub fn equal_degree<R: Rng>(&self, d: usize, rng: &mut R) -> Vec<Self> {
        let n = self.degree();
        if d == 0 || n <= d {
            return vec![self.monic()];
        }
        let p = self.p;
        let one = Self::one(p);

        for _ in 0..MAX_SPLIT_ATTEMPTS {
            let a = Self::random_below(n, p, rng);
            if a.degree() == 0 {
                continue;
            }
            let mut g = self.gcd(&a);
            if g.degree() == 0 {
                let mut frob = a.clone();
                let mut norm = a;
                for _ in 1..d {
                    frob = frob.pow_mod(p, self);
                    norm = norm.mul(&frob).rem(self);
                }
                let b = norm.pow_mod((p - 1) / 2, self).sub(&one);
                g = self.gcd(&b);
            }
            if g.degree() > 0 && g.degree() < n {
                let Some((q, _)) = self.div_rem(&g) else {
                    continue;
                };
                let mut out = g.equal_degree(d, rng);
                out.extend(q.monic().equal_degree(d, rng));
                return out;
            }
        }
        warn!("equal-degree split of a degree {n} factor mod {p} gave up");
        vec![self.monic()]
    }

    /// Monic irreducible factors of a squarefree polynomial, sorted by
    /// degree then coefficients. Only odd primes are supported.
    pub fn factor<R: Rng>(&self, rng: &mut R) -> Vec<Self> {
        if self.degree() == 0 {
            return Vec::new();
        }
        if self.degree() == 1 {
            return vec![self.monic()];
        }
        let mut out: Vec<Self> = self
            .distinct_degree()
            .into_iter()
            .flat_map(|(d, g)| g.equal_degree(d, rng))
            .collect();
        out.sort_by(|a, b| {
            a.degree()
                .cmp(&b.degree())
                .then_with(|| a.coeffs.cmp(&b.coeffs))
        });
        out
    }

    fn random_below<R: Rng>(n: usize, p: u64, rng: &mut R) -> Self {
        Self::trimmed((0..n).map(|_| rng.gen_range(0..p)).collect(), p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mp(coeffs: &[u64], p: u64) -> ModPoly {
        ModPoly::new(coeffs.to_vec(), p)
    }

    fn product(factors: &[ModPoly], p: u64) -> ModPoly {
        factors.iter().fold(ModPoly::one(p), |acc, f| acc.mul(f))
    }

    #[test]
    fn test_inv_mod() {
        assert_eq!(inv_mod(3, 7), Some(5));
        assert_eq!(inv_mod(0, 7), None);
        assert_eq!(inv_mod(6, 9), None);
    }

    #[test]
    fn test_div_rem() {
        // x^2 + 3x + 2 = (x + 1)(x + 2) mod 7
        let (q, r) = mp(&[2, 3, 1], 7).div_rem(&mp(&[1, 1], 7)).unwrap();
        assert_eq!(q, mp(&[2, 1], 7));
        assert!(r.is_zero());
        assert!(mp(&[1], 7).div_rem(&ModPoly::zero(7)).is_none());
    }

    #[test]
    fn test_ext_gcd() {
        let a = mp(&[1, 1], 5);
        let b = mp(&[2, 1], 5);
        let (g, s, t) = a.ext_gcd(&b);
        assert_eq!(g, ModPoly::one(5));
        assert_eq!(s.mul(&a).add(&t.mul(&b)), ModPoly::one(5));
    }

    #[test]
    fn test_is_squarefree() {
        assert!(mp(&[2, 3, 1], 7).is_squarefree());
        // (x + 1)^2
        assert!(!mp(&[1, 2, 1], 5).is_squarefree());
        // x^5 - 1 = (x - 1)^5 mod 5
        assert!(!mp(&[4, 0, 0, 0, 0, 1], 5).is_squarefree());
    }

    #[test]
    fn test_distinct_degree() {
        // (x - 1)(x^2 + 1) mod 7; x^2 + 1 is irreducible since -1 is a non-residue
        let f = mp(&[6, 1], 7).mul(&mp(&[1, 0, 1], 7));
        let ddf = f.distinct_degree();
        assert_eq!(ddf.len(), 2);
        assert_eq!(ddf[0], (1, mp(&[6, 1], 7)));
        assert_eq!(ddf[1], (2, mp(&[1, 0, 1], 7)));
    }

    #[test]
    fn test_factor_into_linears() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        // (x - 1)(x - 2)(x - 3) mod 11
        let f = mp(&[10, 1], 11).mul(&mp(&[9, 1], 11)).mul(&mp(&[8, 1], 11));
        let factors = f.factor(&mut rng);
        assert_eq!(factors.len(), 3);
        assert!(factors.iter().all(|g| g.degree() == 1));
        assert_eq!(product(&factors, 11), f);
    }

    #[test]
    fn test_factor_equal_degree_quadratics() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        // x^4 + 1 = (x^2 + x + 2)(x^2 + 2x + 2) mod 3
        let f = mp(&[1, 0, 0, 0, 1], 3);
        let factors = f.factor(&mut rng);
        assert_eq!(factors.len(), 2);
        assert!(factors.iter().all(|g| g.degree() == 2));
        assert_eq!(product(&factors, 3), f);
    }

    #[test]
    fn test_integer_round_trip() {
        let f = DensePoly::from_i64s(&[-1, 0, 1]);
        let m = ModPoly::from_integer_poly(&f, 5);
        assert_eq!(m.coeffs(), &[4, 0, 1]);
        assert_eq!(m.to_integer_poly(), DensePoly::from_i64s(&[4, 0, 1]));
    }
}
