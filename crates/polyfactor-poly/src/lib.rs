//! # polyfactor-poly
//!
//! Dense univariate polynomial arithmetic.
//!
//! This crate provides:
//! - `DensePoly<R>` over any `Ring`, with schoolbook/Karatsuba multiplication
//! - Euclidean division over fields
//! - Z[x] specifics: content, primitive part, exact division, pseudo
//!   remainders and a primitive-PRS gcd
//!
//! Coefficients are stored in ascending degree order.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod dense;
pub mod field;
pub mod integer;

#[cfg(test)]
mod proptests;

pub use dense::DensePoly;
