//! Errors from the integer factorization pipeline.

use thiserror::Error;

/// Reasons [`crate::factor_over_integers`] can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgebraicError {
    /// The zero polynomial has no factorization.
    #[error("cannot factor the zero polynomial")]
    ZeroPolynomial,

    /// Every candidate prime divided the leading coefficient or made the
    /// reduction non-squarefree.
    #[error("no suitable prime for modular factorization")]
    NoSuitablePrime,

    /// The re-multiplied factors did not reproduce the input.
    #[error("factorization failed the re-multiplication check")]
    VerificationFailed,
}
