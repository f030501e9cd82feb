//! Expression node types.

use std::collections::BTreeSet;
use std::sync::Arc;

use polyfactor_integers::{Integer, Rational};
use smallvec::SmallVec;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
    /// `a ^ b`
    Pow,
}

impl BinaryOp {
    /// The operator symbol.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    /// Returns true for `+` and `*`.
    #[must_use]
    pub fn is_commutative(self) -> bool {
        matches!(self, BinaryOp::Add | BinaryOp::Mul)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnaryOp {
    /// `-a`
    Neg,
    /// `+a`
    Plus,
}

/// An expression tree node.
///
/// Children are reference counted so that rewriting one branch leaves the
/// others shared with the input tree. The derived `Ord` is an arbitrary
/// but total order; [`crate::canonical`] uses it to sort commutative
/// operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Expr {
    /// An exact numeric literal.
    Number(Rational),

    /// A named symbol.
    Identifier(String),

    /// `left op right`.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: Arc<Expr>,
        /// Right operand.
        right: Arc<Expr>,
    },

    /// `op operand`.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Arc<Expr>,
    },

    /// A function application such as `sqrt(2)` or `sin(x)`.
    Call {
        /// Function name.
        name: String,
        /// Arguments in order.
        args: SmallVec<[Arc<Expr>; 2]>,
    },

    /// A stacked fraction `numerator / denominator`.
    Fraction {
        /// The numerator.
        numerator: Arc<Expr>,
        /// The denominator.
        denominator: Arc<Expr>,
    },
}

/// One additive term of a flattened sum, with its sign pulled out.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignedTerm {
    /// True when the term is subtracted.
    pub negative: bool,
    /// The term without its sign.
    pub expr: Arc<Expr>,
}

impl SignedTerm {
    /// A term that is added.
    pub fn positive(expr: impl Into<Arc<Expr>>) -> Self {
        Self {
            negative: false,
            expr: expr.into(),
        }
    }

    /// A term that is subtracted.
    pub fn negative(expr: impl Into<Arc<Expr>>) -> Self {
        Self {
            negative: true,
            expr: expr.into(),
        }
    }

    /// The same term with its sign flipped.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            negative: !self.negative,
            expr: Arc::clone(&self.expr),
        }
    }
}

impl Expr {
    /// The numeric value of a literal.
    #[must_use]
    pub fn as_number(&self) -> Option<&Rational> {
        match self {
            Expr::Number(q) => Some(q),
            _ => None,
        }
    }

    /// The integer value of an integral literal.
    #[must_use]
    pub fn as_integer(&self) -> Option<Integer> {
        self.as_number().and_then(Rational::to_integer)
    }

    /// The name of an identifier.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Expr::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for a numeric literal.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Expr::Number(_))
    }

    /// Returns true if this node is exactly the literal `value`.
    #[must_use]
    pub fn is_integer_value(&self, value: i64) -> bool {
        self.as_number()
            .is_some_and(|q| q == &Rational::from(value))
    }

    /// Returns true if this is the identifier `name`.
    #[must_use]
    pub fn is_identifier(&self, name: &str) -> bool {
        self.as_identifier() == Some(name)
    }

    /// Splits `base ^ k` with `k` a non-negative integer literal.
    #[must_use]
    pub fn as_integer_power(&self) -> Option<(&Arc<Expr>, u32)> {
        match self {
            Expr::Binary {
                op: BinaryOp::Pow,
                left,
                right,
            } => {
                let k = right.as_integer()?.to_u64()?;
                Some((left, u32::try_from(k).ok()?))
            }
            _ => None,
        }
    }

    /// Splits a binary node with the given operator.
    #[must_use]
    pub fn as_binary(&self, wanted: BinaryOp) -> Option<(&Arc<Expr>, &Arc<Expr>)> {
        match self {
            Expr::Binary { op, left, right } if *op == wanted => Some((left, right)),
            _ => None,
        }
    }

    /// The operand of a unary minus.
    #[must_use]
    pub fn as_negation(&self) -> Option<&Arc<Expr>> {
        match self {
            Expr::Unary {
                op: UnaryOp::Neg,
                operand,
            } => Some(operand),
            _ => None,
        }
    }

    /// Returns true for a `+` or `-` node.
    #[must_use]
    pub fn is_sum(&self) -> bool {
        matches!(
            self,
            Expr::Binary {
                op: BinaryOp::Add | BinaryOp::Sub,
                ..
            }
        )
    }

    /// Returns true for a `*` node.
    #[must_use]
    pub fn is_product(&self) -> bool {
        matches!(
            self,
            Expr::Binary {
                op: BinaryOp::Mul,
                ..
            }
        )
    }

    /// Direct children, left to right.
    #[must_use]
    pub fn children(&self) -> Vec<&Arc<Expr>> {
        match self {
            Expr::Number(_) | Expr::Identifier(_) => Vec::new(),
            Expr::Binary { left, right, .. } => vec![left, right],
            Expr::Unary { operand, .. } => vec![operand],
            Expr::Call { args, .. } => args.iter().collect(),
            Expr::Fraction {
                numerator,
                denominator,
            } => vec![numerator, denominator],
        }
    }

    /// Returns true if the identifier `name` occurs anywhere in the tree.
    #[must_use]
    pub fn contains_identifier(&self, name: &str) -> bool {
        match self {
            Expr::Identifier(n) => n == name,
            _ => self.children().iter().any(|c| c.contains_identifier(name)),
        }
    }

    /// All identifier names in the tree.
    #[must_use]
    pub fn identifiers(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers(&self, names: &mut BTreeSet<String>) {
        if let Expr::Identifier(n) = self {
            names.insert(n.clone());
        }
        for child in self.children() {
            child.collect_identifiers(names);
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|c| c.node_count())
            .sum::<usize>()
    }
}
