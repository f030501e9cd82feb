//! Complete factorization of univariate polynomials over Z.
//!
//! Pipeline: content and sign, powers of x, squarefree decomposition,
//! then for every squarefree part a modular factorization at a well
//! chosen prime, Hensel lifting past the coefficient bound and
//! recombination of the lifted factors.

use log::trace;
use polyfactor_integers::Integer;
use polyfactor_poly::DensePoly;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::bounds::{lattice_bound, mignotte_bound, precision_for};
use crate::error::AlgebraicError;
use crate::hensel::hensel_lift;
use crate::modular::ModPoly;
use crate::options::AlgebraicOptions;
use crate::recombine;
use crate::squarefree::squarefree_factorization;

/// Primes tried for modular factorization are the odd primes below this.
const PRIME_LIMIT: u64 = 1000;

/// How lifted factors were recombined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Recombination {
    /// Every squarefree part was irreducible modulo the chosen prime, or
    /// of degree at most one.
    #[default]
    Trivial,
    /// Zassenhaus subset enumeration.
    Subsets,
    /// LLL lattice reconstruction.
    Lattice,
}

/// Statistics from a factorization.
#[derive(Clone, Debug, Default)]
pub struct FactorStats {
    /// Prime used for each squarefree part that needed one.
    pub primes: Vec<u64>,
    /// Largest Hensel precision `e` used.
    pub precision: u32,
    /// Total number of modular factors.
    pub modular_factors: usize,
    /// The most involved recombination path taken.
    pub recombination: Recombination,
}

/// An irreducible factor with its multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerFactor {
    /// Primitive, positive leading coefficient.
    pub poly: DensePoly<Integer>,
    /// Power the factor appears with.
    pub multiplicity: u32,
}

/// Result of [`factor_over_integers`].
#[derive(Clone, Debug)]
pub struct IntegerFactorization {
    /// Signed content of the input.
    pub content: Integer,
    /// Irreducible factors, sorted by degree then coefficients.
    pub factors: Vec<IntegerFactor>,
    /// Statistics.
    pub stats: FactorStats,
}

impl IntegerFactorization {
    /// True if the primitive part is a single irreducible factor.
    #[must_use]
    pub fn is_irreducible(&self) -> bool {
        self.factors.len() == 1 && self.factors[0].multiplicity == 1
    }

    /// Re-multiplies content and factors.
    #[must_use]
    pub fn expand(&self) -> DensePoly<Integer> {
        self.factors.iter().fold(
            DensePoly::constant(self.content.clone()),
            |acc, f| acc.mul(&f.poly.pow(f.multiplicity)),
        )
    }
}

/// Factors `f` into irreducibles over Z.
///
/// # Errors
///
/// `ZeroPolynomial` for zero input, `NoSuitablePrime` if no odd prime
/// below 1000 is admissible for some squarefree part, and
/// `VerificationFailed` if the factors do not multiply back to `f`.
pub fn factor_over_integers(
    f: &DensePoly<Integer>,
    opts: &AlgebraicOptions,
) -> Result<IntegerFactorization, AlgebraicError> {
    if f.is_zero() {
        return Err(AlgebraicError::ZeroPolynomial);
    }
    let (content, primitive) = f.content_primitive();
    let mut stats = FactorStats::default();
    let mut factors = Vec::new();

    // powers of x
    let low = primitive.support().next().unwrap_or(0);
    let primitive = if low > 0 {
        factors.push(IntegerFactor {
            poly: DensePoly::x(),
            multiplicity: u32::try_from(low).unwrap_or(u32::MAX),
        });
        DensePoly::new(primitive.coeffs()[low..].to_vec())
    } else {
        primitive
    };

    if primitive.degree() > 0 {
        let sf = squarefree_factorization(&primitive);
        for part in &sf.factors {
            for poly in factor_squarefree(&part.factor, opts, &mut stats)? {
                factors.push(IntegerFactor {
                    poly,
                    multiplicity: part.multiplicity,
                });
            }
        }
    }

    factors.sort_by(|a, b| {
        a.poly
            .degree()
            .cmp(&b.poly.degree())
            .then_with(|| a.poly.coeffs().cmp(b.poly.coeffs()))
    });

    let result = IntegerFactorization {
        content,
        factors,
        stats,
    };
    if &result.expand() != f {
        return Err(AlgebraicError::VerificationFailed);
    }
    Ok(result)
}

/// Factors many polynomials in parallel.
pub fn factor_over_integers_batch(
    polys: &[DensePoly<Integer>],
    opts: &AlgebraicOptions,
) -> Vec<Result<IntegerFactorization, AlgebraicError>> {
    polys
        .par_iter()
        .map(|f| factor_over_integers(f, opts))
        .collect()
}

/// Factors a primitive squarefree polynomial with positive leading
/// coefficient.
fn factor_squarefree(
    g: &DensePoly<Integer>,
    opts: &AlgebraicOptions,
    stats: &mut FactorStats,
) -> Result<Vec<DensePoly<Integer>>, AlgebraicError> {
    if g.degree() <= 1 {
        return Ok(vec![g.clone()]);
    }

    let (p, modular) = choose_prime(g, opts)?;
    stats.primes.push(p);
    stats.modular_factors += modular.len();
    trace!(
        "degree {} part: prime {p}, {} modular factors",
        g.degree(),
        modular.len()
    );

    if modular.len() == 1 {
        stats.precision = stats.precision.max(1);
        return Ok(vec![g.clone()]);
    }

    let use_lattice = modular.len() > opts.subset_threshold;
    let bound = if use_lattice {
        lattice_bound(g)
    } else {
        mignotte_bound(g)
    };
    let e = precision_for(p, &bound);
    stats.precision = stats.precision.max(e);
    trace!("lifting to {p}^{e}");

    let lifted = hensel_lift(g, &modular, p, e);
    let found = if use_lattice {
        stats.recombination = stats.recombination.max(Recombination::Lattice);
        recombine::lattice(g, &modular, &lifted.factors, &lifted.modulus, &opts.delta())
    } else {
        stats.recombination = stats.recombination.max(Recombination::Subsets);
        recombine::subsets(g, &lifted.factors, &lifted.modulus)
    };
    trace!("recombined into {} factors", found.len());
    Ok(found)
}

/// Picks the admissible prime giving the fewest modular factors among the
/// first `prime_trials` candidates. A single factor ends the search early.
fn choose_prime(
    g: &DensePoly<Integer>,
    opts: &AlgebraicOptions,
) -> Result<(u64, Vec<ModPoly>), AlgebraicError> {
    let mut rng = ChaCha8Rng::seed_from_u64(opts.rng_seed);
    let mut best: Option<(u64, Vec<ModPoly>)> = None;
    let mut trials = 0;

    for p in odd_primes(PRIME_LIMIT) {
        if g.leading_coeff().is_divisible_by(&Integer::from(p)) {
            continue;
        }
        let reduced = ModPoly::from_integer_poly(g, p);
        if !reduced.is_squarefree() {
            continue;
        }
        let factors = reduced.factor(&mut rng);
        trace!("mod {p}: {} factors", factors.len());
        if factors.len() == 1 {
            return Ok((p, factors));
        }
        if best.as_ref().map_or(true, |(_, b)| factors.len() < b.len()) {
            best = Some((p, factors));
        }
        trials += 1;
        if trials >= opts.prime_trials.max(1) {
            break;
        }
    }

    best.ok_or(AlgebraicError::NoSuitablePrime)
}

fn odd_primes(limit: u64) -> impl Iterator<Item = u64> {
    (3..limit)
        .step_by(2)
        .filter(|&n| (3..).step_by(2).take_while(|d| d * d <= n).all(|d| n % d != 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[i64]) -> DensePoly<Integer> {
        DensePoly::from_i64s(coeffs)
    }

    fn factor(coeffs: &[i64]) -> IntegerFactorization {
        factor_over_integers(&poly(coeffs), &AlgebraicOptions::default()).unwrap()
    }

    fn polys(result: &IntegerFactorization) -> Vec<(DensePoly<Integer>, u32)> {
        result
            .factors
            .iter()
            .map(|f| (f.poly.clone(), f.multiplicity))
            .collect()
    }

    #[test]
    fn test_odd_primes() {
        let first: Vec<u64> = odd_primes(30).collect();
        assert_eq!(first, vec![3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_difference_of_squares() {
        let result = factor(&[-4, 0, 1]);
        assert_eq!(polys(&result), vec![(poly(&[-2, 1]), 1), (poly(&[2, 1]), 1)]);
        assert!(result.content.is_one());
    }

    #[test]
    fn test_cubic_with_three_roots() {
        let result = factor(&[-6, 11, -6, 1]);
        assert_eq!(
            polys(&result),
            vec![
                (poly(&[-3, 1]), 1),
                (poly(&[-2, 1]), 1),
                (poly(&[-1, 1]), 1)
            ]
        );
    }

    #[test]
    fn test_x4_minus_1() {
        let result = factor(&[-1, 0, 0, 0, 1]);
        assert_eq!(
            polys(&result),
            vec![
                (poly(&[-1, 1]), 1),
                (poly(&[1, 1]), 1),
                (poly(&[1, 0, 1]), 1)
            ]
        );
    }

    #[test]
    fn test_irreducible() {
        let result = factor(&[1, 1, 1]);
        assert!(result.is_irreducible());
        assert_eq!(result.stats.recombination, Recombination::Trivial);
        // x^4 + 1 splits modulo every prime but not over Z
        assert!(factor(&[1, 0, 0, 0, 1]).is_irreducible());
    }

    #[test]
    fn test_content_sign_and_multiplicity() {
        // -2 x^2 (x + 1)^2
        let f = poly(&[0, 0, -2, -4, -2]);
        let result = factor_over_integers(&f, &AlgebraicOptions::default()).unwrap();
        assert_eq!(result.content, Integer::new(-2));
        assert_eq!(
            polys(&result),
            vec![(poly(&[0, 1]), 2), (poly(&[1, 1]), 2)]
        );
        assert_eq!(result.expand(), f);
    }

    #[test]
    fn test_non_monic() {
        // (2x + 1)(3x - 1)(x^2 + x + 1)
        let f = poly(&[1, 2]).mul(&poly(&[-1, 3])).mul(&poly(&[1, 1, 1]));
        let result = factor_over_integers(&f, &AlgebraicOptions::default()).unwrap();
        assert_eq!(result.factors.len(), 3);
        assert_eq!(result.expand(), f);
    }

    #[test]
    fn test_lattice_path() {
        // (x - 1)(x - 2)(x - 3)(x^2 + 1) with lattice recombination forced
        let f = poly(&[-1, 1])
            .mul(&poly(&[-2, 1]))
            .mul(&poly(&[-3, 1]))
            .mul(&poly(&[1, 0, 1]));
        let opts = AlgebraicOptions::default().with_subset_threshold(1);
        let result = factor_over_integers(&f, &opts).unwrap();
        assert_eq!(result.factors.len(), 4);
        assert_eq!(result.expand(), f);
        assert_eq!(result.stats.recombination, Recombination::Lattice);
    }

    #[test]
    fn test_zero_and_constant() {
        assert_eq!(
            factor_over_integers(&DensePoly::zero(), &AlgebraicOptions::default()).unwrap_err(),
            AlgebraicError::ZeroPolynomial
        );
        let c = factor(&[-7]);
        assert!(c.factors.is_empty());
        assert_eq!(c.content, Integer::new(-7));
    }

    #[test]
    fn test_batch() {
        let inputs = vec![poly(&[-4, 0, 1]), poly(&[1, 1, 1])];
        let results = factor_over_integers_batch(&inputs, &AlgebraicOptions::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().factors.len(), 2);
        assert!(results[1].as_ref().unwrap().is_irreducible());
    }
}
