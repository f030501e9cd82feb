//! LLL (Lenstra-Lenstra-Lovász) lattice reduction.
//!
//! Basis vectors stay integral; the Gram-Schmidt data is kept exactly
//! over the rationals and rebuilt after every swap.

use polyfactor_integers::{Integer, Rational};

/// Result of LLL reduction.
#[derive(Clone, Debug)]
pub struct LllResult {
    /// The reduced basis, one vector per row.
    pub basis: Vec<Vec<Integer>>,
    /// Number of main-loop iterations performed.
    pub iterations: usize,
}

/// Gram-Schmidt coefficients.
struct GramSchmidt {
    /// `mu[i][j] = <b_i, b*_j> / |b*_j|^2` for `j < i`.
    mu: Vec<Vec<Rational>>,
    /// `|b*_i|^2`.
    norms: Vec<Rational>,
}

impl GramSchmidt {
    fn compute(b: &[Vec<Integer>]) -> Self {
        let n = b.len();
        let mut mu = vec![vec![Rational::zero(); n]; n];
        let mut norms: Vec<Rational> = Vec::with_capacity(n);
        let mut star: Vec<Vec<Rational>> = Vec::with_capacity(n);

        for (i, row) in b.iter().enumerate() {
            let mut v: Vec<Rational> = row.iter().cloned().map(Rational::from_integer).collect();
            for j in 0..i {
                let coeff = if norms[j].is_zero() {
                    Rational::zero()
                } else {
                    &dot(row, &star[j]) / &norms[j]
                };
                for (x, s) in v.iter_mut().zip(&star[j]) {
                    *x = &*x - &(&coeff * s);
                }
                mu[i][j] = coeff;
            }
            norms.push(v.iter().fold(Rational::zero(), |acc, x| acc + x * x));
            star.push(v);
        }

        Self { mu, norms }
    }
}

fn dot(a: &[Integer], b: &[Rational]) -> Rational {
    a.iter().zip(b).fold(Rational::zero(), |acc, (x, y)| {
        acc + &Rational::from_integer(x.clone()) * y
    })
}

/// Performs LLL reduction on a basis of linearly independent rows.
///
/// `delta` must lie in `(1/4, 1]`; 3/4 is the classical choice. The first
/// vector of the result is within `2^((n-1)/2)` of the shortest nonzero
/// lattice vector.
#[must_use]
pub fn lll_reduce(basis: &[Vec<Integer>], delta: &Rational) -> LllResult {
    let n = basis.len();
    let mut b = basis.to_vec();
    if n <= 1 {
        return LllResult {
            basis: b,
            iterations: 0,
        };
    }

    let half = Rational::from_i64(1, 2);
    let mut gs = GramSchmidt::compute(&b);
    let mut iterations = 0;
    let mut k = 1;

    while k < n {
        iterations += 1;

        // size reduction
        for j in (0..k).rev() {
            if gs.mu[k][j].abs() <= half {
                continue;
            }
            let r = gs.mu[k][j].round();
            let row_j = b[j].clone();
            for (x, y) in b[k].iter_mut().zip(&row_j) {
                *x = &*x - &(&r * y);
            }
            let r = Rational::from_integer(r);
            for l in 0..j {
                gs.mu[k][l] = &gs.mu[k][l] - &(&r * &gs.mu[j][l]);
            }
            gs.mu[k][j] = &gs.mu[k][j] - &r;
        }

        // Lovász condition
        let mu = &gs.mu[k][k - 1];
        let threshold = &(delta - &(mu * mu)) * &gs.norms[k - 1];
        if gs.norms[k] >= threshold {
            k += 1;
        } else {
            b.swap(k - 1, k);
            gs = GramSchmidt::compute(&b);
            k = (k - 1).max(1);
        }
    }

    LllResult {
        basis: b,
        iterations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[i64]]) -> Vec<Vec<Integer>> {
        data.iter()
            .map(|r| r.iter().map(|&x| Integer::new(x)).collect())
            .collect()
    }

    fn delta() -> Rational {
        Rational::from_i64(3, 4)
    }

    #[test]
    fn test_lll_identity() {
        let basis = rows(&[&[1, 0], &[0, 1]]);
        let result = lll_reduce(&basis, &delta());
        assert_eq!(result.basis, basis);
    }

    #[test]
    fn test_lll_reduces_basis() {
        let result = lll_reduce(&rows(&[&[1, 1], &[0, 1]]), &delta());
        assert_eq!(result.basis, rows(&[&[0, 1], &[1, 0]]));
    }

    #[test]
    fn test_lll_three_dimensional() {
        let basis = rows(&[&[1, 1, 1], &[-1, 0, 2], &[3, 5, 6]]);
        let result = lll_reduce(&basis, &delta());
        assert_eq!(result.basis, rows(&[&[0, 1, 0], &[1, 0, 1], &[-1, 0, 2]]));
        assert!(result.iterations > 0);
    }

    #[test]
    fn test_short_vector_in_knapsack_lattice() {
        // (1, 0, 1000), (0, 1, 1001): the difference (-1, 1, 1) is short
        let result = lll_reduce(&rows(&[&[1, 0, 1000], &[0, 1, 1001]]), &delta());
        let first = &result.basis[0];
        let norm: i64 = first.iter().map(|x| x.to_i64().unwrap().pow(2)).sum();
        assert_eq!(norm, 3);
    }
}
