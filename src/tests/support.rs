//! Deterministic stand-ins for the grammar checker and semantic distance.
//!
//! Both stubs answer from a lookup table keyed by the rewritten text (for the
//! distance stub, the right-hand tokens joined by single spaces) and count
//! how often they were consulted.

use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
};

use thiserror::Error;

use crate::providers::{GrammarChecker, GrammarIssue, SemanticDistance};

/// Error raised by a stub configured to fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("stub scorer failed on {0:?}")]
pub struct StubError(pub String);

/// Grammar checker reporting a configured number of issues per text.
#[derive(Debug, Default)]
pub struct StubGrammar {
    issues: HashMap<String, usize>,
    failing: HashSet<String>,
    fail_all: bool,
    calls: AtomicUsize,
}

impl StubGrammar {
    /// Every text is clean.
    #[must_use]
    pub fn clean() -> Self {
        Self::default()
    }

    /// Every check fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_issues(mut self, text: impl Into<String>, issues: usize) -> Self {
        self.issues.insert(text.into(), issues);
        self
    }

    /// Fail only when asked to check `text`.
    #[must_use]
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.failing.insert(text.into());
        self
    }

    /// Number of texts checked so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl GrammarChecker for StubGrammar {
    type Error = StubError;

    fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, Self::Error> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_all || self.failing.contains(text) {
            return Err(StubError(text.to_owned()));
        }
        let count = self.issues.get(text).copied().unwrap_or_default();
        Ok((0..count)
            .map(|offset| GrammarIssue {
                message: "stub issue".to_owned(),
                offset,
                length: 1,
                rule_id: Some("STUB".to_owned()),
            })
            .collect())
    }
}

/// Semantic distance returning a configured value per right-hand text.
#[derive(Debug, Default)]
pub struct StubDistance {
    distances: HashMap<String, f64>,
    fail_all: bool,
    calls: AtomicUsize,
}

impl StubDistance {
    /// Every pair is at distance zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Every call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_distance(mut self, text: impl Into<String>, distance: f64) -> Self {
        self.distances.insert(text.into(), distance);
        self
    }

    /// Number of distances computed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl SemanticDistance for StubDistance {
    type Error = StubError;

    fn distance(&self, _left: &[&str], right: &[&str]) -> Result<f64, Self::Error> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let key = right.join(" ");
        if self.fail_all {
            return Err(StubError(key));
        }
        Ok(self.distances.get(&key).copied().unwrap_or_default())
    }
}

#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
#[must_use]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}
