//! Property-based tests for integer factorization.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::options::AlgebraicOptions;
    use crate::squarefree::squarefree_factorization;
    use crate::univariate::factor_over_integers;
    use polyfactor_integers::Integer;
    use polyfactor_poly::DensePoly;

    fn small_factor() -> impl Strategy<Value = DensePoly<Integer>> {
        prop_oneof![
            (1i64..4, -6i64..7).prop_map(|(a, b)| DensePoly::from_i64s(&[b, a])),
            (1i64..3, -4i64..5, -5i64..6).prop_map(|(a, b, c)| DensePoly::from_i64s(&[c, b, a])),
        ]
    }

    fn product_of_factors() -> impl Strategy<Value = (Vec<DensePoly<Integer>>, DensePoly<Integer>)> {
        proptest::collection::vec(small_factor(), 1..=4).prop_map(|fs| {
            let product = fs.iter().fold(DensePoly::one(), |acc, f| acc.mul(f));
            (fs, product)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn factors_multiply_back((_, f) in product_of_factors()) {
            let result = factor_over_integers(&f, &AlgebraicOptions::default()).unwrap();
            prop_assert_eq!(result.expand(), f);
        }

        #[test]
        fn every_factor_divides_input((_, f) in product_of_factors()) {
            let result = factor_over_integers(&f, &AlgebraicOptions::default()).unwrap();
            for factor in &result.factors {
                prop_assert!(f.is_divisible_by(&factor.poly));
                prop_assert!(factor.poly.leading_coeff().is_positive());
            }
        }

        #[test]
        fn at_least_as_fine_as_input_factors((fs, f) in product_of_factors()) {
            let result = factor_over_integers(&f, &AlgebraicOptions::default()).unwrap();
            let found: u32 = result.factors.iter().map(|x| x.multiplicity).sum();
            prop_assert!(found as usize >= fs.len());
        }

        #[test]
        fn squarefree_reconstructs((_, f) in product_of_factors()) {
            prop_assert_eq!(squarefree_factorization(&f).to_polynomial(), f);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn lattice_and_subsets_agree((_, f) in product_of_factors()) {
            let subsets = factor_over_integers(&f, &AlgebraicOptions::default()).unwrap();
            let lattice = factor_over_integers(
                &f,
                &AlgebraicOptions::default().with_subset_threshold(1),
            )
            .unwrap();
            prop_assert_eq!(subsets.factors, lattice.factors);
        }
    }
}
