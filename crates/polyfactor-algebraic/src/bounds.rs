//! Coefficient bounds and Hensel precision.
//!
//! All bounds are computed exactly in integers.

use polyfactor_integers::Integer;
use polyfactor_poly::DensePoly;

fn ceil_sqrt(n: &Integer) -> Integer {
    match n.nth_root_floor(2) {
        Some(r) if &(&r * &r) == n => r,
        Some(r) => r + Integer::one(),
        None => Integer::zero(),
    }
}

fn binomial(n: u32, k: u32) -> Integer {
    (0..k).fold(Integer::one(), |acc, i| {
        &(&acc * &Integer::from(n - i)) / &Integer::from(i + 1)
    })
}

/// Mignotte bound for the coefficients of `lc(f) * h` where `h` is any
/// factor of `f`: `|lc| * 2^n * ceil(sqrt(n + 1)) * |f|_inf`.
#[must_use]
pub fn mignotte_bound(f: &DensePoly<Integer>) -> Integer {
    let n = f.degree();
    let root = ceil_sqrt(&Integer::from(n + 1));
    let two_n = Integer::new(2).pow(u32::try_from(n).unwrap_or(u32::MAX));
    &(&(&f.leading_coeff().abs() * &two_n) * &root) * &f.max_norm()
}

/// Modulus bound for the lattice path.
///
/// `2^(n^2/2) * C(2n, n)^(n/2) * N^(2n)` where `N` bounds the 2-norm of
/// any factor of `f` (`2^n * |f|_2`), so the bound stays valid for every
/// quotient produced while factors are split off.
#[must_use]
pub fn lattice_bound(f: &DensePoly<Integer>) -> Integer {
    let n = u32::try_from(f.degree()).unwrap_or(u32::MAX);
    let half_n_sq = (n * n).div_ceil(2);
    let half_n = n.div_ceil(2);
    // N^2 = 4^n * |f|_2^2
    let norm_sq = &Integer::new(4).pow(n) * &f.norm_squared();
    &(&Integer::new(2).pow(half_n_sq) * &binomial(2 * n, n).pow(half_n)) * &norm_sq.pow(n)
}

/// Least `e >= 1` with `p^e > 2 * bound`.
#[must_use]
pub fn precision_for(p: u64, bound: &Integer) -> u32 {
    let target = bound * &Integer::new(2);
    let p = Integer::from(p);
    let mut e = 1;
    let mut power = p.clone();
    while power <= target {
        power = &power * &p;
        e += 1;
    }
    e
}
