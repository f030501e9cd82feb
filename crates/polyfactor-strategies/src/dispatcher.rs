//! The fixpoint driver.
//!
//! Each round scans the registry in priority order and takes the first
//! verified rewrite, then factors every operand of the resulting product
//! one level deeper. Rounds stop when nothing applies, when a canonical
//! form repeats, or at the iteration and depth limits.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use log::{debug, warn};
use polyfactor_core::{algebraically_equal_with, canonical, BinaryOp, Expr, UnaryOp};
use polyfactor_integers::Rational;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::config::FactorConfig;
use crate::error::FactorError;
use crate::registry::StrategyRegistry;
use crate::strategies::scaled;
use crate::strategy::{FactorizationContext, FactorizationResult, Strategy};

/// Factors expressions with a registry of strategies.
#[derive(Debug)]
pub struct Factorizer {
    registry: StrategyRegistry,
    config: Arc<FactorConfig>,
}

impl Default for Factorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Factorizer {
    /// A factorizer with the default configuration and every built-in
    /// strategy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FactorConfig::default())
    }

    /// A factorizer with custom configuration.
    #[must_use]
    pub fn with_config(config: FactorConfig) -> Self {
        Self {
            registry: StrategyRegistry::with_default_strategies(&config),
            config: Arc::new(config),
        }
    }

    /// Replaces the strategy registry.
    #[must_use]
    pub fn with_registry(mut self, registry: StrategyRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Registers an additional strategy.
    pub fn register(&mut self, strategy: Box<dyn Strategy>) {
        self.registry.register(strategy);
    }

    /// The strategies in trial order.
    #[must_use]
    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &FactorConfig {
        &self.config
    }

    /// Factors `expr` with respect to `var`.
    ///
    /// Never fails: when nothing applies the input comes back with
    /// `changed = false`, and every rejected attempt is listed in `steps`.
    #[must_use]
    pub fn factor(&self, expr: &Expr, var: &str) -> FactorizationResult {
        let ctx = FactorizationContext::new(var, Arc::clone(&self.config));
        let pass = self.run(expr, &ctx);
        FactorizationResult {
            success: pass.changed,
            changed: pass.changed,
            ast: pass.ast,
            steps: pass.steps,
            strategy_used: pass.strategy_used,
            can_continue: !pass.changed,
            irreducible: !pass.changed && pass.irreducible,
        }
    }

    /// Factors independent inputs in parallel.
    #[must_use]
    pub fn factor_batch(&self, exprs: &[Expr], var: &str) -> Vec<FactorizationResult> {
        exprs.par_iter().map(|e| self.factor(e, var)).collect()
    }

    /// One fixpoint pass over `expr`.
    fn run(&self, expr: &Expr, ctx: &FactorizationContext) -> Pass {
        let mut pass = Pass::new(expr.clone());
        if ctx.depth >= ctx.config.max_depth {
            debug!("depth limit {} reached at {expr}", ctx.config.max_depth);
            return pass;
        }
        if is_multiplicative(expr) {
            self.descend(&mut pass, ctx);
        }

        let mut ctx = ctx.clone();
        let mut seen = FxHashSet::default();
        seen.insert(canonical(&pass.ast));
        let mut exhausted: FxHashSet<&'static str> = FxHashSet::default();

        while ctx.current_iteration < ctx.max_iterations {
            let node = pass.ast.clone();
            let Some((name, result)) = self.apply_first(&node, &ctx, &exhausted, &mut pass) else {
                break;
            };
            if !seen.insert(canonical(&result.ast)) {
                debug!("{name} repeated an earlier form of {}", pass.ast);
                pass.steps.push(format!(
                    "{name}: {}",
                    FactorError::NoProgress("form already seen".to_string())
                ));
                break;
            }

            pass.steps.extend(result.steps);
            pass.strategy_used.get_or_insert_with(|| name.to_string());
            pass.changed = true;
            pass.ast = result.ast;
            if !result.can_continue {
                exhausted.insert(name);
            }

            self.descend(&mut pass, &ctx);
            seen.insert(canonical(&pass.ast));
            ctx.current_iteration += 1;
        }
        if ctx.current_iteration == ctx.max_iterations {
            debug!("iteration limit {} reached at {}", ctx.max_iterations, pass.ast);
        }
        pass
    }

    /// Applies the first strategy that yields a verified rewrite of `node`.
    ///
    /// Rejections are recorded on `pass`; `NotApplicable` only goes to
    /// the debug log.
    fn apply_first(
        &self,
        node: &Expr,
        ctx: &FactorizationContext,
        exhausted: &FxHashSet<&'static str>,
        pass: &mut Pass,
    ) -> Option<(&'static str, FactorizationResult)> {
        for strategy in self.registry.iter() {
            let name = strategy.name();
            if exhausted.contains(name) {
                continue;
            }
            let attempt = guarded(|| {
                strategy
                    .can_apply(node, ctx)
                    .then(|| strategy.apply(node, ctx))
            });
            let outcome = match attempt {
                Ok(None) => continue,
                Ok(Some(outcome)) => outcome,
                Err(err) => {
                    warn!("{name} panicked on {node}");
                    Err(err)
                }
            };
            debug!("tried {name} on {node}");

            match outcome {
                Ok(result) if !result.changed => pass.steps.extend(result.steps),
                Ok(result) => {
                    if ctx.config.verify_results
                        && !algebraically_equal_with(&result.ast, node, &ctx.config.expand)
                    {
                        warn!("{name} rewrote {node} into {}, which is not equal", result.ast);
                        let err = FactorError::VerificationFailure(format!(
                            "{} does not expand to {node}",
                            result.ast
                        ));
                        pass.steps.push(format!("{name}: {err}"));
                        continue;
                    }
                    debug!("{name} applied: {node} => {}", result.ast);
                    return Some((name, result));
                }
                Err(FactorError::NotApplicable(reason)) => {
                    debug!("{name} not applicable: {reason}");
                }
                Err(err) => {
                    debug!("{name} rejected {node}: {err}");
                    if matches!(err, FactorError::Irreducible(_)) {
                        pass.irreducible = true;
                    }
                    pass.steps.push(format!("{name}: {err}"));
                }
            }
        }
        None
    }

    /// Factors every operand of the product `pass.ast` one level deeper
    /// and rebuilds it if any operand changed.
    fn descend(&self, pass: &mut Pass, ctx: &FactorizationContext) {
        let child = ctx.child();
        let mut product = Product::default();
        let mut changed = false;
        let ast = pass.ast.clone();
        self.collect(&ast, &child, &mut product, pass, &mut changed);
        if changed {
            pass.ast = product.into_expr();
            pass.changed = true;
        }
    }

    fn collect(
        &self,
        expr: &Expr,
        child: &FactorizationContext,
        product: &mut Product,
        pass: &mut Pass,
        changed: &mut bool,
    ) {
        match expr {
            Expr::Number(q) => product.scale(q),
            Expr::Binary {
                op: BinaryOp::Mul,
                left,
                right,
            } => {
                self.collect(left, child, product, pass, changed);
                self.collect(right, child, product, pass, changed);
            }
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
            } => {
                product.scale(&-Rational::one());
                self.collect(operand, child, product, pass, changed);
            }
            _ => {
                let (base, k) = match expr.as_integer_power() {
                    Some((base, k)) => ((**base).clone(), k),
                    None => (expr.clone(), 1),
                };
                let inner = self.run(&base, child);
                pass.steps.extend(inner.steps);
                if inner.changed {
                    *changed = true;
                    if pass.strategy_used.is_none() {
                        pass.strategy_used = inner.strategy_used;
                    }
                    product.absorb(&inner.ast, k);
                } else {
                    product.push(base, k);
                }
            }
        }
    }
}

/// State of one fixpoint pass.
struct Pass {
    ast: Expr,
    changed: bool,
    steps: Vec<String>,
    strategy_used: Option<String>,
    irreducible: bool,
}

impl Pass {
    fn new(ast: Expr) -> Self {
        Self {
            ast,
            changed: false,
            steps: Vec::new(),
            strategy_used: None,
            irreducible: false,
        }
    }
}

/// A flattened product `coefficient * f1^k1 * f2^k2 * ...` with equal
/// bases merged.
#[derive(Default)]
struct Product {
    coefficient: Option<Rational>,
    factors: Vec<(Expr, u32)>,
}

impl Product {
    fn scale(&mut self, q: &Rational) {
        self.coefficient = Some(match self.coefficient.take() {
            Some(c) => &c * q,
            None => q.clone(),
        });
    }

    fn push(&mut self, base: Expr, k: u32) {
        match self.factors.iter_mut().find(|(b, _)| *b == base) {
            Some((_, m)) => *m += k,
            None => self.factors.push((base, k)),
        }
    }

    /// Adds `expr^k`, flattening `expr` if it is itself a product.
    fn absorb(&mut self, expr: &Expr, k: u32) {
        match expr {
            Expr::Number(q) => self.scale(&q.pow(k)),
            Expr::Binary {
                op: BinaryOp::Mul,
                left,
                right,
            } => {
                self.absorb(left, k);
                self.absorb(right, k);
            }
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
            } => {
                self.scale(&(-Rational::one()).pow(k));
                self.absorb(operand, k);
            }
            _ => match expr.as_integer_power() {
                Some((base, j)) => self.push((**base).clone(), j * k),
                None => self.push(expr.clone(), k),
            },
        }
    }

    fn into_expr(self) -> Expr {
        let coefficient = self.coefficient.unwrap_or_else(Rational::one);
        if self.factors.is_empty() {
            return Expr::Number(coefficient);
        }
        let factors = self
            .factors
            .into_iter()
            .map(|(f, k)| Arc::new(if k == 1 { f } else { f.powi(k) }))
            .collect();
        scaled(&coefficient, Expr::product(factors))
    }
}

fn is_multiplicative(expr: &Expr) -> bool {
    expr.is_product() || expr.as_negation().is_some() || expr.as_integer_power().is_some()
}

/// Runs `f`, turning a panic into an `Internal` error.
fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, FactorError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        FactorError::Internal(format!("strategy panicked: {message}"))
    })
}
