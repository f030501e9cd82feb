//! Polynomial factorization over the integers.
//!
//! This crate provides:
//! - **Squarefree decomposition**: Yun's algorithm over Z
//! - **Modular factorization**: distinct-degree and Cantor-Zassenhaus
//!   equal-degree splitting over GF(p)
//! - **Hensel lifting**: multifactor quadratic lifting from p to p^e
//! - **Recombination**: Zassenhaus subset search, and an LLL lattice path
//!   for inputs with many modular factors
//! - **Cyclotomic polynomials** by exact division
//!
//! The entry point is [`factor_over_integers`]; its result is always
//! re-multiplied and compared with the input before it is returned.
//!
//! # Parallelism
//!
//! Independent inputs are factored in parallel with rayon through
//! [`factor_over_integers_batch`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bounds;
pub mod cyclotomic;
pub mod error;
pub mod hensel;
pub mod lll;
pub mod modular;
pub mod options;
pub mod recombine;
pub mod squarefree;
pub mod univariate;

#[cfg(test)]
mod proptests;

pub use cyclotomic::{cyclotomic, divisors};
pub use error::AlgebraicError;
pub use hensel::hensel_lift;
pub use lll::lll_reduce;
pub use modular::ModPoly;
pub use options::AlgebraicOptions;
pub use squarefree::squarefree_factorization;
pub use univariate::{
    factor_over_integers, factor_over_integers_batch, FactorStats, IntegerFactor,
    IntegerFactorization, Recombination,
};
