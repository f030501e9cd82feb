//! End-to-end factorization of the reference examples.

use polyfactor::prelude::*;

fn x() -> Expr {
    Expr::ident("x")
}

fn check(input: &Expr, expected: &Expr) -> FactorizationResult {
    let result = factor(input, "x");
    assert!(
        equivalent(&result.ast, expected),
        "factor({input}) = {}, expected {expected}",
        result.ast
    );
    assert!(algebraically_equal(&result.ast, input));
    result
}

#[test]
fn linear_common_factor() {
    let result = check(&(6 * x() + 9), &(3 * (2 * x() + 3)));
    assert!(result.success);
    assert_eq!(result.strategy_used.as_deref(), Some("common-factor"));
}

#[test]
fn difference_of_squares() {
    let result = check(&(x().powi(2) - 4), &((x() - 2) * (x() + 2)));
    assert_eq!(result.strategy_used.as_deref(), Some("difference-of-squares"));
}

#[test]
fn cubic_with_three_rational_roots() {
    let input = x().powi(3) - 6 * x().powi(2) + 11 * x() - 6;
    let result = check(&input, &((x() - 1) * (x() - 2) * (x() - 3)));
    assert_eq!(result.strategy_used.as_deref(), Some("polynomial-roots"));
}

#[test]
fn quartic_difference_recurses() {
    let input = x().powi(4) - 1;
    check(&input, &((x() - 1) * (x() + 1) * (x().powi(2) + 1)));
}

#[test]
fn irreducible_quadratic_is_unchanged() {
    let input = x().powi(2) + x() + 1;
    let result = factor(&input, "x");
    assert!(!result.success);
    assert!(!result.changed);
    assert!(result.irreducible);
    assert_eq!(result.ast, input);
    assert!(result.strategy_used.is_none());
}

#[test]
fn quadratics_without_a_linear_term() {
    for input in [x().powi(2) + 1, x().powi(2) - 2] {
        let result = factor(&input, "x");
        assert!(!result.changed);
        assert!(result.irreducible, "{input} was not certified irreducible");
    }
    check(
        &(x().powi(4) + 4),
        &((x().powi(2) - 2 * x() + 2) * (x().powi(2) + 2 * x() + 2)),
    );
}

#[test]
fn high_degree_goes_through_integer_factorization() {
    // (x^3 + 2x + 1)(x^4 - x + 3)
    let f = x().powi(3) + 2 * x() + 1;
    let g = x().powi(4) - x() + 3;
    let input = normalize(&(f.clone() * g.clone()));
    let result = check(&input, &(f * g));
    assert_eq!(result.strategy_used.as_deref(), Some("integer-factorization"));
}

#[test]
fn rational_coefficients() {
    let input = Expr::rational(1, 2) * x().powi(2) - Expr::rational(1, 8);
    let result = factor(&input, "x");
    assert!(result.changed);
    assert!(algebraically_equal(&result.ast, &input));
}

#[test]
fn surd_split_of_x4_plus_1() {
    let input = x().powi(4) + 1;
    let result = factor(&input, "x");
    assert_eq!(
        result.ast.to_string(),
        "(x^2 + sqrt(2)*x + 1)*(x^2 - sqrt(2)*x + 1)"
    );
    assert!(algebraically_equal(&result.ast, &input));

    let exact = Factorizer::with_config(FactorConfig::default().with_surd_factors(false));
    let result = exact.factor(&input, "x");
    assert!(!result.changed);
    assert!(result.irreducible);
}

#[test]
fn refactoring_is_a_no_op() {
    let inputs = [
        6 * x() + 9,
        x().powi(2) - 4,
        x().powi(3) - 6 * x().powi(2) + 11 * x() - 6,
        x().powi(4) - 1,
        x().powi(6) - 1,
    ];
    for input in &inputs {
        let once = factor(input, "x");
        let twice = factor(&once.ast, "x");
        assert!(!twice.changed, "{} changed again into {}", once.ast, twice.ast);
    }
}

#[test]
fn disabled_strategies_change_the_route() {
    let config = FactorConfig::default().without_strategy("difference-of-squares");
    let result = Factorizer::with_config(config).factor(&(x().powi(2) - 4), "x");
    assert_eq!(result.strategy_used.as_deref(), Some("polynomial-roots"));
    assert!(algebraically_equal(&result.ast, &(x().powi(2) - 4)));
}

#[test]
fn batch_agrees_with_single_calls() {
    let inputs = vec![6 * x() + 9, x().powi(2) - 4, x().powi(2) + x() + 1];
    let batch = factor_batch(&inputs, "x");
    assert_eq!(batch.len(), inputs.len());
    for (input, result) in inputs.iter().zip(&batch) {
        assert_eq!(result.ast, factor(input, "x").ast);
    }
}

#[test]
fn non_polynomials_are_left_alone() {
    let input = Expr::call("sin", vec![x()]) + x().powi(2);
    let result = factor(&input, "x");
    assert!(!result.changed);
    assert_eq!(result.ast, input);
}
