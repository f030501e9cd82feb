//! Polynomial Factorization Walkthrough
//!
//! Factors the reference inputs through the strategy dispatcher and prints
//! every recorded step, then shows the integer factorization backend on its
//! own.
//!
//! Run with: cargo run --example factor_demo

use std::time::Instant;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

use polyfactor::prelude::*;

fn rule(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{title}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

fn show(factorizer: &Factorizer, input: &Expr) {
    let start = Instant::now();
    let result = factorizer.factor(input, "x");
    let elapsed = start.elapsed();

    println!("  Input:    {input}");
    println!("  Result:   {}", result.ast);
    println!(
        "  Strategy: {}",
        result.strategy_used.as_deref().unwrap_or("none")
    );
    if result.irreducible {
        println!("  Irreducible over the integers");
    }
    for step in &result.steps {
        println!("    - {step}");
    }
    println!("  Time: {elapsed:?}\n");
}

fn main() {
    let _ = CombinedLogger::init(vec![TermLogger::new(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);

    println!("╔════════════════════════════════════════════════════════════════════╗");
    println!("║               polyfactor: Strategy-Driven Factoring                ║");
    println!("╚════════════════════════════════════════════════════════════════════╝\n");

    example_1_reference_inputs();
    example_2_special_forms();
    example_3_configuration();
    example_4_integer_backend();
}

/// Example 1: the five reference inputs
fn example_1_reference_inputs() {
    rule("Example 1: Reference Inputs");
    let x = Expr::ident("x");
    let factorizer = Factorizer::new();

    for input in [
        6 * x.clone() + 9,
        x.powi(2) - 4,
        x.powi(3) - 6 * x.powi(2) + 11 * x.clone() - 6,
        x.powi(4) - 1,
        x.powi(2) + x.clone() + 1,
    ] {
        show(&factorizer, &input);
    }
}

/// Example 2: grouping, substitution and cyclotomic splitting
fn example_2_special_forms() {
    rule("Example 2: Special Forms");
    let x = Expr::ident("x");
    let factorizer = Factorizer::new();

    for input in [
        x.powi(3) + x.powi(2) + x.clone() + 1,
        x.powi(4) - 10 * x.powi(2) + 1,
        x.powi(6) - 1,
        x.powi(4) + 1,
    ] {
        show(&factorizer, &input);
    }
}

/// Example 3: disabling strategies and surd factors
fn example_3_configuration() {
    rule("Example 3: Configuration");
    let x = Expr::ident("x");

    let config = FactorConfig::default().without_strategy("difference-of-squares");
    println!("  Without difference-of-squares:");
    show(&Factorizer::with_config(config), &(x.powi(2) - 4));

    let config = FactorConfig::default().with_surd_factors(false);
    println!("  Without surd factors:");
    show(&Factorizer::with_config(config), &(x.powi(4) + 1));
}

/// Example 4: the integer factorization backend directly
fn example_4_integer_backend() {
    rule("Example 4: Factorization over the Integers");
    let options = AlgebraicOptions::default();

    for (label, coeffs) in [
        ("x^8 - 1", vec![-1, 0, 0, 0, 0, 0, 0, 0, 1]),
        (
            "Swinnerton-Dyer (sqrt 2, sqrt 3, sqrt 5)",
            vec![576, 0, -960, 0, 352, 0, -40, 0, 1],
        ),
        ("(x^3 + 2x + 1)(x^4 - x + 3)", vec![3, 5, -2, 3, 0, 2, 0, 1]),
    ] {
        let f: DensePoly<Integer> = DensePoly::from_i64s(&coeffs);
        println!("  Factoring: {label}");

        let start = Instant::now();
        match factor_over_integers(&f, &options) {
            Ok(result) => {
                println!("  Time: {:?}", start.elapsed());
                println!("  Content: {}", result.content);
                for factor in &result.factors {
                    println!("    ({})^{}", factor.poly, factor.multiplicity);
                }
                println!(
                    "  Primes: {:?}, modular factors: {}, recombination: {:?}\n",
                    result.stats.primes, result.stats.modular_factors, result.stats.recombination
                );
            }
            Err(err) => println!("  Failed: {err}\n"),
        }
    }
}
