//! Cyclotomic polynomials.

use polyfactor_integers::Integer;
use polyfactor_poly::DensePoly;

/// Positive divisors of `n` in increasing order; empty for zero.
#[must_use]
pub fn divisors(n: u32) -> Vec<u32> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1u32;
    while u64::from(d) * u64::from(d) <= u64::from(n) {
        if n % d == 0 {
            small.push(d);
            if d != n / d {
                large.push(n / d);
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

/// The n-th cyclotomic polynomial, by exact division of `x^n - 1` by
/// `Φ_d` for every proper divisor `d` of `n`.
///
/// `cyclotomic(0)` is taken to be 1.
#[must_use]
pub fn cyclotomic(n: u32) -> DensePoly<Integer> {
    if n == 0 {
        return DensePoly::one();
    }
    let mut phi = DensePoly::monomial(Integer::one(), n as usize).sub(&DensePoly::one());
    for d in divisors(n) {
        if d == n {
            continue;
        }
        if let Some(q) = phi.div_exact(&cyclotomic(d)) {
            phi = q;
        }
    }
    phi
}
