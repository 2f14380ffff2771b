// crates/domain/src/matcher.rs
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pattern::SuitePattern;

/// Boolean operator used to fold a collection of matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    And,
    Or,
}

impl BinaryOp {
    pub const fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            Self::And => lhs && rhs,
            Self::Or => lhs || rhs,
        }
    }
}

/// Predicate tree over class names and (class, test) pairs.
///
/// Pure data: no interior state, cheap to share behind an `Arc`, and
/// serializable so a composed selection can be rebuilt in another process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Matcher {
    Leaf(SuitePattern),
    And(Vec<Matcher>),
    Or(Vec<Matcher>),
    Not(Box<Matcher>),
    Const(bool),
}

impl Matcher {
    /// Fold `matchers` with `op`. An empty collection evaluates to
    /// `match_if_empty` whatever the operator.
    pub fn combine(op: BinaryOp, match_if_empty: bool, matchers: impl IntoIterator<Item = Matcher>) -> Self {
        let children: Vec<Matcher> = matchers.into_iter().collect();
        if children.is_empty() {
            return Self::Const(match_if_empty);
        }
        match op {
            BinaryOp::And => Self::And(children),
            BinaryOp::Or => Self::Or(children),
        }
    }

    pub fn and(matchers: impl IntoIterator<Item = Matcher>) -> Self {
        Self::And(matchers.into_iter().collect())
    }

    pub fn or(matchers: impl IntoIterator<Item = Matcher>) -> Self {
        Self::Or(matchers.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(matcher: Matcher) -> Self {
        Self::Not(Box::new(matcher))
    }

    pub fn leaf(pattern: SuitePattern) -> Self {
        Self::Leaf(pattern)
    }

    pub const fn match_all() -> Self {
        Self::Const(true)
    }

    pub const fn match_none() -> Self {
        Self::Const(false)
    }

    /// Whether some test of the class may still be admitted.
    ///
    /// A leaf naming specific tests counts as a class match only where it
    /// is not negated: excluding one test must not exclude its suite.
    pub fn matches_class(&self, class_name: &str) -> bool {
        self.evaluate(true, &|pattern, positive| {
            pattern.matches_class(class_name) && (positive || !pattern.has_test_part())
        })
    }

    pub fn matches_test(&self, class_name: &str, test_name: &str) -> bool {
        self.evaluate(true, &|pattern, _| pattern.matches_test(class_name, test_name))
    }

    /// Every pattern in the tree, depth first.
    pub fn patterns(&self) -> Vec<&SuitePattern> {
        let mut out = Vec::new();
        self.collect_patterns(&mut out);
        out
    }

    fn collect_patterns<'a>(&'a self, out: &mut Vec<&'a SuitePattern>) {
        match self {
            Self::Leaf(pattern) => out.push(pattern),
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_patterns(out);
                }
            }
            Self::Not(child) => child.collect_patterns(out),
            Self::Const(_) => {}
        }
    }

    /// `positive` is false under an odd number of `Not`s.
    fn evaluate(&self, positive: bool, leaf: &dyn Fn(&SuitePattern, bool) -> bool) -> bool {
        match self {
            Self::Leaf(pattern) => leaf(pattern, positive),
            Self::And(children) => children.iter().all(|child| child.evaluate(positive, leaf)),
            Self::Or(children) => children.iter().any(|child| child.evaluate(positive, leaf)),
            Self::Not(child) => !child.evaluate(!positive, leaf),
            Self::Const(value) => *value,
        }
    }
}

impl From<SuitePattern> for Matcher {
    fn from(pattern: SuitePattern) -> Self {
        Self::Leaf(pattern)
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, name: &str, children: &[Matcher]) -> fmt::Result {
            write!(f, "{name}(")?;
            for (idx, child) in children.iter().enumerate() {
                if idx > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{child}")?;
            }
            f.write_str(")")
        }

        match self {
            Self::Leaf(pattern) => write!(f, "'{pattern}'"),
            Self::And(children) => list(f, "all", children),
            Self::Or(children) => list(f, "any", children),
            Self::Not(child) => write!(f, "not({child})"),
            Self::Const(value) => write!(f, "{value}"),
        }
    }
}
