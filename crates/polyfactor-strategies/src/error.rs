//! Strategy outcomes other than a rewritten tree.

use polyfactor_algebraic::AlgebraicError;
use thiserror::Error;

/// Why a strategy did not produce a new tree.
///
/// None of these escape [`crate::Factorizer::factor`]; the dispatcher
/// renders them into the step trace as `"<strategy>: <error>"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactorError {
    /// A precondition failed; the dispatcher skips the strategy.
    #[error("not applicable: {0}")]
    NotApplicable(String),

    /// The strategy ran but found nothing to rewrite.
    #[error("no progress: {0}")]
    NoProgress(String),

    /// A candidate did not expand back to the input and was discarded.
    #[error("verification failed: {0}")]
    VerificationFailure(String),

    /// The integer factorization certified the input irreducible.
    #[error("irreducible: {0}")]
    Irreducible(String),

    /// An unexpected fault, including a panic caught by the dispatcher.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AlgebraicError> for FactorError {
    fn from(err: AlgebraicError) -> Self {
        match err {
            AlgebraicError::VerificationFailed => FactorError::VerificationFailure(err.to_string()),
            AlgebraicError::ZeroPolynomial | AlgebraicError::NoSuitablePrime => {
                FactorError::Internal(err.to_string())
            }
        }
    }
}

/// Result type for strategy application.
pub type FactorResult<T> = Result<T, FactorError>;
