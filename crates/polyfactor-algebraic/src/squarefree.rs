//! Squarefree factorization over Z.
//!
//! Yun's algorithm on the primitive part, using the primitive-PRS gcd.
//! Every division is exact by Gauss's lemma since all divisors are
//! primitive.

use polyfactor_integers::Integer;
use polyfactor_poly::DensePoly;
use rayon::prelude::*;

/// A squarefree factor with its multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquarefreeFactor {
    /// The squarefree polynomial, primitive with positive leading coefficient.
    pub factor: DensePoly<Integer>,
    /// The power it appears with.
    pub multiplicity: u32,
}

/// Result of squarefree factorization.
#[derive(Clone, Debug)]
pub struct SquarefreeFactorization {
    /// Signed content.
    pub content: Integer,
    /// Pairwise coprime squarefree factors, by increasing multiplicity.
    pub factors: Vec<SquarefreeFactor>,
}

impl SquarefreeFactorization {
    /// Reconstructs the original polynomial.
    #[must_use]
    pub fn to_polynomial(&self) -> DensePoly<Integer> {
        self.factors.iter().fold(
            DensePoly::constant(self.content.clone()),
            |acc, sf| acc.mul(&sf.factor.pow(sf.multiplicity)),
        )
    }
}

/// Computes the squarefree factorization of `f`.
///
/// The zero polynomial gives content 0 and no factors.
#[must_use]
pub fn squarefree_factorization(f: &DensePoly<Integer>) -> SquarefreeFactorization {
    if f.is_zero() {
        return SquarefreeFactorization {
            content: Integer::zero(),
            factors: Vec::new(),
        };
    }
    let (content, primitive) = f.content_primitive();
    let factors = if primitive.degree() == 0 {
        Vec::new()
    } else {
        yun(&primitive)
    };
    SquarefreeFactorization { content, factors }
}

fn yun(f: &DensePoly<Integer>) -> Vec<SquarefreeFactor> {
    let f_prime = f.derivative();
    let a0 = f.gcd(&f_prime);
    let (Some(mut b), Some(c)) = (f.div_exact(&a0), f_prime.div_exact(&a0)) else {
        return vec![SquarefreeFactor {
            factor: f.clone(),
            multiplicity: 1,
        }];
    };
    let mut d = c.sub(&b.derivative());
    let mut factors = Vec::new();
    let mut i = 1;

    while b.degree() > 0 {
        let a = b.gcd(&d);
        let (Some(next_b), Some(c)) = (b.div_exact(&a), d.div_exact(&a)) else {
            // unreachable for primitive input; keep what is left as one factor
            factors.push(SquarefreeFactor {
                factor: b.primitive_part(),
                multiplicity: i,
            });
            break;
        };
        if a.degree() > 0 {
            factors.push(SquarefreeFactor {
                factor: a.primitive_part(),
                multiplicity: i,
            });
        }
        d = c.sub(&next_b.derivative());
        b = next_b;
        i += 1;
    }
    factors
}

/// Squarefree factorization of many polynomials in parallel.
#[must_use]
pub fn squarefree_factorization_batch(polys: &[DensePoly<Integer>]) -> Vec<SquarefreeFactorization> {
    polys.par_iter().map(squarefree_factorization).collect()
}
