//! Hensel lifting for polynomial factorization.
//!
//! Lifts a factorization modulo p to a factorization modulo p^e. The
//! modular factors are arranged in a balanced binary tree; each inner
//! node lifts a pair `f = g * h` together with Bezout cofactors
//! `s * g + t * h = 1`, doubling the precision each step.

use polyfactor_integers::Integer;
use polyfactor_poly::DensePoly;

use crate::modular::ModPoly;

/// Result of Hensel lifting.
#[derive(Clone, Debug)]
pub struct HenselLiftResult {
    /// Monic lifted factors with coefficients in `[0, p^e)`, in the order
    /// of the modular factors.
    pub factors: Vec<DensePoly<Integer>>,
    /// The prime used.
    pub prime: u64,
    /// The final modulus `p^e`.
    pub modulus: Integer,
    /// Number of quadratic lifting steps performed.
    pub steps: usize,
}

/// Lifts the monic factorization `f = lc(f) * prod(factors_mod_p) mod p`
/// to modulus `p^e`.
///
/// `factors_mod_p` must be pairwise coprime and `p` must not divide
/// `lc(f)`.
#[must_use]
pub fn hensel_lift(
    f: &DensePoly<Integer>,
    factors_mod_p: &[ModPoly],
    p: u64,
    e: u32,
) -> HenselLiftResult {
    let modulus = Integer::from(p).pow(e);
    let mut steps = 0;
    let factors = if factors_mod_p.is_empty() {
        Vec::new()
    } else {
        lift_node(f, factors_mod_p, p, &modulus, &mut steps)
    };
    HenselLiftResult {
        factors,
        prime: p,
        modulus,
        steps,
    }
}

fn lift_node(
    f: &DensePoly<Integer>,
    factors: &[ModPoly],
    p: u64,
    modulus: &Integer,
    steps: &mut usize,
) -> Vec<DensePoly<Integer>> {
    if factors.len() == 1 {
        return vec![make_monic_mod(f, modulus)];
    }
    let (left, right) = factors.split_at(factors.len() / 2);

    // the leading coefficient rides with the left subtree
    let lc = ModPoly::from_integer_poly(&DensePoly::constant(f.leading_coeff().clone()), p);
    let g0 = left.iter().fold(lc, |acc, u| acc.mul(u));
    let h0 = right.iter().fold(ModPoly::one(p), |acc, u| acc.mul(u));
    let (_, s0, t0) = g0.ext_gcd(&h0);

    let (g, h) = lift_pair(
        f,
        [g0, h0, s0, t0].map(|m| m.to_integer_poly()),
        p,
        modulus,
        steps,
    );

    let mut out = lift_node(&g, left, p, modulus, steps);
    out.extend(lift_node(&h, right, p, modulus, steps));
    out
}

/// Repeats the quadratic Hensel step until the modulus reaches `target`.
///
/// Input: `f = g*h mod p`, `s*g + t*h = 1 mod p`, `h` monic.
fn lift_pair(
    f: &DensePoly<Integer>,
    [mut g, mut h, mut s, mut t]: [DensePoly<Integer>; 4],
    p: u64,
    target: &Integer,
    steps: &mut usize,
) -> (DensePoly<Integer>, DensePoly<Integer>) {
    let one = DensePoly::<Integer>::one();
    let mut m = Integer::from(p);

    while &m < target {
        let m2 = &m * &m;

        let e = f.sub(&g.mul(&h)).rem_coeffs(&m2);
        let (q, r) = div_rem_monic(&s.mul(&e), &h, &m2);
        let g_next = g.add(&t.mul(&e)).add(&q.mul(&g)).rem_coeffs(&m2);
        let h_next = h.add(&r).rem_coeffs(&m2);

        let b = s
            .mul(&g_next)
            .add(&t.mul(&h_next))
            .sub(&one)
            .rem_coeffs(&m2);
        let (c, d) = div_rem_monic(&s.mul(&b), &h_next, &m2);
        s = s.sub(&d).rem_coeffs(&m2);
        t = t.sub(&t.mul(&b)).sub(&c.mul(&g_next)).rem_coeffs(&m2);

        g = g_next;
        h = h_next;
        m = m2;
        *steps += 1;
    }

    (g.rem_coeffs(target), h.rem_coeffs(target))
}

/// Division by a monic `h` with everything reduced into `[0, m)`.
fn div_rem_monic(
    a: &DensePoly<Integer>,
    h: &DensePoly<Integer>,
    m: &Integer,
) -> (DensePoly<Integer>, DensePoly<Integer>) {
    let d = h.degree();
    let mut rem: Vec<Integer> = a.coeffs().iter().map(|c| c.rem_euclid(m)).collect();
    if rem.len() <= d {
        return (DensePoly::zero(), DensePoly::new(rem));
    }
    let mut quot = vec![Integer::zero(); rem.len() - d];

    for i in (0..quot.len()).rev() {
        let c = rem[i + d].rem_euclid(m);
        if c.is_zero() {
            continue;
        }
        for (j, hc) in h.coeffs().iter().enumerate() {
            rem[i + j] = (&rem[i + j] - &(&c * hc)).rem_euclid(m);
        }
        quot[i] = c;
    }
    rem.truncate(d.max(1));
    (DensePoly::new(quot), DensePoly::new(rem).rem_coeffs(m))
}

/// Inverse of `a` modulo `m`, if `gcd(a, m) = 1`.
fn mod_inverse(a: &Integer, m: &Integer) -> Option<Integer> {
    let mut old_r = a.rem_euclid(m);
    let mut r = m.clone();
    let mut old_s = Integer::one();
    let mut s = Integer::zero();

    while !r.is_zero() {
        let q = old_r.floor_div(&r);
        let new_r = &old_r - &(&q * &r);
        old_r = std::mem::replace(&mut r, new_r);
        let new_s = &old_s - &(&q * &s);
        old_s = std::mem::replace(&mut s, new_s);
    }

    old_r.is_one().then(|| old_s.rem_euclid(m))
}

fn make_monic_mod(u: &DensePoly<Integer>, m: &Integer) -> DensePoly<Integer> {
    match mod_inverse(u.leading_coeff(), m) {
        Some(inv) => u.scale(&inv).rem_coeffs(m),
        None => u.rem_coeffs(m),
    }
}
