//! # polyfactor-core
//!
//! Expression trees for the polyfactor engine.
//!
//! This crate provides:
//! - An immutable expression sum type with `Arc`-shared subtrees
//! - Builders and operator overloads for constructing trees
//! - Canonical forms and commutative-aware equivalence
//! - Plain infix rendering for diagnostic traces
//! - The expand/normalize routine used to verify that two trees are
//!   algebraically identical
//!
//! ## Design Principles
//!
//! - **Immutable values**: every transformation builds a new tree; unchanged
//!   subtrees are shared, never mutated
//! - **Thread-safe by construction**: `Expr` is `Send + Sync`, so independent
//!   inputs can be processed in parallel without locking
//! - **Exact numbers**: literals are arbitrary precision rationals

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod build;
pub mod canonical;
pub mod display;
pub mod expr;
pub mod normalize;

#[cfg(test)]
mod proptests;

pub use canonical::{canonical, equivalent, multiplicative_factors};
pub use expr::{BinaryOp, Expr, SignedTerm, UnaryOp};
pub use normalize::{
    algebraically_equal, algebraically_equal_with, expand, expand_with, normalize, Atom,
    ExpandLimits, Expanded,
};
