//! # polyfactor-integers
//!
//! Exact integer and rational arithmetic for the polyfactor engine.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`) with exact root extraction,
//!   floor division and bounded divisor enumeration
//! - Arbitrary precision rationals (`Rational`) in lowest terms
//!
//! Nothing in the factorization engine touches floating point: every
//! "is this a perfect square / cube" question is answered here with an
//! exact root-with-remainder check.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::Rational;
