//! Recombination of lifted modular factors into factors over Z.
//!
//! Each true factor of `f` is, modulo `p^e`, the leading coefficient times
//! a product of some subset of the lifted monic factors. With few modular
//! factors the subsets are enumerated directly; with many, a short vector
//! of a lattice built from one modular factor reveals the true factor
//! containing it.

use itertools::Itertools;
use log::trace;
use polyfactor_integers::{Integer, Rational};
use polyfactor_poly::DensePoly;

use crate::lll::lll_reduce;
use crate::modular::ModPoly;

/// Zassenhaus subset recombination.
///
/// Subsets are tried by increasing size. A candidate `pp(sym(lc * prod))`
/// is accepted when it divides the current cofactor exactly; its modular
/// factors are then removed from the pool. Returns the factors of `f`,
/// each primitive with positive leading coefficient.
#[must_use]
pub fn subsets(
    f: &DensePoly<Integer>,
    lifted: &[DensePoly<Integer>],
    modulus: &Integer,
) -> Vec<DensePoly<Integer>> {
    let mut g = f.clone();
    let mut remaining = lifted.to_vec();
    let mut found = Vec::new();
    let mut size = 1;

    while 2 * size <= remaining.len() {
        let lc = g.leading_coeff().clone();
        let lc_g0 = &lc * &g.coeff(0);

        let hit = (0..remaining.len())
            .combinations(size)
            .find_map(|subset| {
                let candidate = subset
                    .iter()
                    .fold(DensePoly::constant(lc.clone()), |acc, &i| {
                        acc.mul(&remaining[i]).rem_coeffs(modulus)
                    })
                    .symmetric_mod(modulus);
                // the constant term of lc * h divides lc * g(0)
                let c0 = candidate.coeff(0);
                if !c0.is_zero() && !lc_g0.is_divisible_by(&c0) {
                    return None;
                }
                let h = candidate.primitive_part();
                g.div_exact(&h).map(|q| (subset, h, q))
            });

        match hit {
            Some((subset, h, q)) => {
                trace!("subset {subset:?} gives factor of degree {}", h.degree());
                found.push(h);
                g = q;
                remaining = remaining
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| !subset.contains(i))
                    .map(|(_, u)| u)
                    .collect();
            }
            None => size += 1,
        }
    }

    if g.degree() > 0 {
        found.push(g.primitive_part());
    }
    found
}

/// Lattice recombination.
///
/// For the first modular factor `u` of degree `d`, the lattice of
/// polynomials of degree below `j` divisible by `u` modulo `p^e` is
/// spanned by `u * x^i` and `p^e * x^i`. Once `j` exceeds the degree of the
/// true factor `h0` containing `u`, and `p^e` satisfies
/// [`crate::bounds::lattice_bound`], the reduced basis's first vector is a
/// multiple of `h0`, so `gcd(g, b1)` recovers it.
#[must_use]
pub fn lattice(
    f: &DensePoly<Integer>,
    modular: &[ModPoly],
    lifted: &[DensePoly<Integer>],
    modulus: &Integer,
    delta: &Rational,
) -> Vec<DensePoly<Integer>> {
    let mut g = f.clone();
    let mut pool: Vec<(ModPoly, DensePoly<Integer>)> =
        modular.iter().cloned().zip(lifted.iter().cloned()).collect();
    let mut found = Vec::new();

    while pool.len() > 1 {
        let (u_mod, u) = pool[0].clone();
        let Some(h) = factor_containing(&g, &u, &u_mod, modulus, delta) else {
            break;
        };
        let Some(q) = g.div_exact(&h) else {
            break;
        };
        trace!("lattice gives factor of degree {}", h.degree());
        pool.retain(|(m, _)| !divides_mod_p(&h, m));
        found.push(h);
        g = q;
    }

    if g.degree() > 0 {
        found.push(g.primitive_part());
    }
    found
}

fn factor_containing(
    g: &DensePoly<Integer>,
    u: &DensePoly<Integer>,
    u_mod: &ModPoly,
    modulus: &Integer,
    delta: &Rational,
) -> Option<DensePoly<Integer>> {
    let d = u.degree();
    let n = g.degree();

    (d + 1..=n).find_map(|j| {
        let reduced = lll_reduce(&factor_lattice(u, j, modulus), delta);
        let b1 = DensePoly::new(reduced.basis.into_iter().next()?);
        let h = g.gcd(&b1);
        (h.degree() > 0 && divides_mod_p(&h, u_mod)).then_some(h)
    })
}

/// Rows `p^e * x^i` for `i < d` and `u * x^i` for `i < j - d`, as
/// coefficient vectors of length `j`.
fn factor_lattice(u: &DensePoly<Integer>, j: usize, modulus: &Integer) -> Vec<Vec<Integer>> {
    let d = u.degree();
    let mut rows = Vec::with_capacity(j);
    for i in 0..d {
        let mut row = vec![Integer::zero(); j];
        row[i] = modulus.clone();
        rows.push(row);
    }
    for i in 0..j - d {
        let mut row = vec![Integer::zero(); j];
        for (k, c) in u.coeffs().iter().enumerate() {
            row[i + k] = c.clone();
        }
        rows.push(row);
    }
    rows
}

fn divides_mod_p(h: &DensePoly<Integer>, factor: &ModPoly) -> bool {
    ModPoly::from_integer_poly(h, factor.modulus())
        .rem(factor)
        .is_zero()
}
