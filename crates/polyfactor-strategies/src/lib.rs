//! # polyfactor-strategies
//!
//! Factorization of expression trees by priority-ordered strategies.
//!
//! This crate provides:
//! - A polynomial view of trees in one designated variable
//! - The [`Strategy`] trait and eight built-in strategies, from common
//!   factor extraction down to full factorization over the integers
//! - [`StrategyRegistry`] for ordering and extending the strategy set
//! - [`Factorizer`], a fixpoint driver that verifies every rewrite and
//!   recurses into the factors it produces
//!
//! ## Usage
//!
//! ```
//! use polyfactor_core::Expr;
//! use polyfactor_strategies::Factorizer;
//!
//! let x = Expr::ident("x");
//! let result = Factorizer::new().factor(&(6 * x + 9), "x");
//! assert_eq!(result.ast.to_string(), "3*(2*x + 3)");
//! ```
//!
//! ## Guarantees
//!
//! - **Soundness**: with verification on, every accepted rewrite expands
//!   to the same polynomial as its input
//! - **Termination**: rounds are bounded per node, recursion is bounded in
//!   depth, and a repeated canonical form stops a node immediately
//! - **Determinism**: strategies are tried in a fixed priority order

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod registry;
pub mod strategies;
pub mod strategy;
pub mod view;

#[cfg(test)]
mod proptests;

pub use config::FactorConfig;
pub use dispatcher::Factorizer;
pub use error::{FactorError, FactorResult};
pub use registry::StrategyRegistry;
pub use strategies::{
    all_strategies, default_strategies, BinomialPower, CommonFactor, DifferenceOfSquares,
    ExponentSubstitution, Grouping, IntegerFactorization, PerfectPower, PolynomialRoots,
};
pub use strategy::{FactorizationContext, FactorizationResult, Strategy};
pub use view::{
    analyze_polynomial, analyze_polynomial_with, extract_terms, poly_to_expr, term_parts,
    Monomial, PolynomialView, TermParts,
};
