//! # polyfactor
//!
//! Factorization of polynomial expression trees over the rationals.
//!
//! Trees are rewritten into products by a fixed list of strategies tried
//! in priority order: common factors, differences of squares, perfect
//! powers, rational roots, grouping, exponent substitution, cyclotomic
//! splitting of `x^n ± 1`, and finally complete factorization over the
//! integers by Hensel lifting with subset or lattice recombination.
//!
//! ## Quick Start
//!
//! ```
//! use polyfactor::prelude::*;
//!
//! let x = Expr::ident("x");
//! let p = x.powi(3) - 6 * x.powi(2) + 11 * x.clone() - 6;
//! let result = factor(&p, "x");
//! assert!(result.changed);
//! assert!(algebraically_equal(&result.ast, &p));
//! assert_eq!(result.ast.to_string(), "(x - 1)*(x - 2)*(x - 3)");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use polyfactor_algebraic as algebraic;
pub use polyfactor_core as core;
pub use polyfactor_integers as integers;
pub use polyfactor_poly as poly;
pub use polyfactor_strategies as strategies;

use polyfactor_core::Expr;
use polyfactor_strategies::{FactorizationResult, Factorizer};

/// Factors `expr` in `var` with the default configuration.
#[must_use]
pub fn factor(expr: &Expr, var: &str) -> FactorizationResult {
    Factorizer::new().factor(expr, var)
}

/// Factors independent inputs in parallel with the default configuration.
#[must_use]
pub fn factor_batch(exprs: &[Expr], var: &str) -> Vec<FactorizationResult> {
    Factorizer::new().factor_batch(exprs, var)
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{factor, factor_batch};
    pub use polyfactor_algebraic::{factor_over_integers, AlgebraicOptions};
    pub use polyfactor_core::{algebraically_equal, equivalent, normalize, Expr};
    pub use polyfactor_integers::{Integer, Rational};
    pub use polyfactor_poly::DensePoly;
    pub use polyfactor_strategies::{
        FactorConfig, FactorError, FactorizationContext, FactorizationResult, Factorizer,
        Strategy, StrategyRegistry,
    };
}
