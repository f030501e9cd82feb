//! # polyfactor-rings
//!
//! Coefficient domains for polyfactor polynomials.
//!
//! ```text
//! Ring
//!  └── Field
//! ```
//!
//! `Ring` is implemented for `Integer` (Z) and `Rational` (Q); `Field` for
//! `Rational`. Finite fields are handled by the algebraic crate with a
//! runtime modulus, since the prime is only known once a polynomial has
//! been inspected.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integers;
pub mod rationals;
pub mod traits;

pub use traits::{Field, Ring};
