//! The strategy interface shared by every factorization heuristic.

use std::sync::Arc;

use polyfactor_core::Expr;

use crate::config::FactorConfig;
use crate::error::FactorResult;
use crate::view::{analyze_polynomial_with, PolynomialView};

/// A self-contained factorization heuristic.
///
/// `can_apply` is a pure predicate. `apply` may assume it returned true
/// for the same node and context; neither may mutate the context.
pub trait Strategy: Send + Sync {
    /// Unique kebab-case name, used in traces and for disabling.
    fn name(&self) -> &'static str;

    /// One-line human description.
    fn description(&self) -> &'static str;

    /// Higher priorities are tried first.
    fn priority(&self) -> i32;

    /// Returns true if `apply` should be attempted on `node`.
    fn can_apply(&self, node: &Expr, ctx: &FactorizationContext) -> bool;

    /// Rewrites `node` into a product.
    ///
    /// # Errors
    ///
    /// `NotApplicable` or `NoProgress` when no rewrite was found;
    /// `Irreducible` when the input is certified irreducible.
    fn apply(&self, node: &Expr, ctx: &FactorizationContext) -> FactorResult<FactorizationResult>;
}

/// Per-call state handed to strategies.
#[derive(Debug, Clone)]
pub struct FactorizationContext {
    /// The designated variable.
    pub variable: String,
    /// Dispatch rounds completed on the current node.
    pub current_iteration: usize,
    /// Round cap for the current node.
    pub max_iterations: usize,
    /// Recursion depth; 0 for the caller's tree.
    pub depth: usize,
    /// Shared configuration.
    pub config: Arc<FactorConfig>,
}

impl FactorizationContext {
    /// A fresh context for the top-level tree.
    #[must_use]
    pub fn new(variable: &str, config: Arc<FactorConfig>) -> Self {
        Self {
            variable: variable.to_string(),
            current_iteration: 0,
            max_iterations: config.max_iterations,
            depth: 0,
            config,
        }
    }

    /// A fresh context one level deeper, for a factor of the current node.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            variable: self.variable.clone(),
            current_iteration: 0,
            max_iterations: self.max_iterations,
            depth: self.depth + 1,
            config: Arc::clone(&self.config),
        }
    }

    /// The polynomial view of `node` in the context's variable.
    #[must_use]
    pub fn analyze(&self, node: &Expr) -> Option<PolynomialView> {
        analyze_polynomial_with(node, &self.variable, &self.config.expand)
    }
}

/// Outcome of a strategy or of a whole dispatch.
#[derive(Debug, Clone)]
pub struct FactorizationResult {
    /// True if the tree was rewritten.
    pub success: bool,
    /// True if `ast` differs from the input.
    pub changed: bool,
    /// The resulting tree.
    pub ast: Expr,
    /// Human-readable trace, in order.
    pub steps: Vec<String>,
    /// The strategy that first changed the top-level tree.
    pub strategy_used: Option<String>,
    /// False if the producing strategy should not be tried again on this
    /// node.
    pub can_continue: bool,
    /// True if the input was left unchanged because the integer
    /// factorization certified it irreducible.
    pub irreducible: bool,
}

impl FactorizationResult {
    /// The input, untouched.
    #[must_use]
    pub fn unchanged(ast: Expr) -> Self {
        Self {
            success: false,
            changed: false,
            ast,
            steps: Vec::new(),
            strategy_used: None,
            can_continue: true,
            irreducible: false,
        }
    }

    /// A rewrite of `before` into `after` by the named strategy, with a
    /// trace line recording both.
    #[must_use]
    pub fn rewritten(strategy: &str, before: &Expr, after: Expr) -> Self {
        Self {
            success: true,
            changed: true,
            steps: vec![format!("{strategy}: {before} => {after}")],
            ast: after,
            strategy_used: Some(strategy.to_string()),
            can_continue: true,
            irreducible: false,
        }
    }

    /// Marks the result as final for the producing strategy.
    #[must_use]
    pub fn finished(mut self) -> Self {
        self.can_continue = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_context() {
        let ctx = FactorizationContext::new("x", Arc::new(FactorConfig::default()));
        let child = ctx.child();
        assert_eq!(child.depth, 1);
        assert_eq!(child.current_iteration, 0);
        assert_eq!(child.variable, "x");
        assert!(Arc::ptr_eq(&ctx.config, &child.config));
    }

    #[test]
    fn test_rewritten_trace() {
        let before = Expr::ident("x").powi(2) - 4;
        let after = (Expr::ident("x") + 2) * (Expr::ident("x") - 2);
        let result = FactorizationResult::rewritten("difference-of-squares", &before, after);
        assert!(result.changed && result.success);
        assert_eq!(
            result.steps,
            vec!["difference-of-squares: x^2 - 4 => (x + 2)*(x - 2)".to_string()]
        );
    }
}
