//! Scorer interfaces used to rank candidate expansions.
//!
//! Disambiguation needs two collaborators: a grammar checker counting issues
//! in a rewritten text, and a semantic distance between the token sequences
//! of the working text and the rewrite. Both are traits so tests can swap in
//! deterministic stubs.

pub mod embedding;
pub mod language_tool;

use serde::{Deserialize, Serialize};

pub use embedding::{EmbeddingError, EmbeddingFormat, WmdError, WordEmbeddings, WordMoversDistance};
pub use language_tool::{LanguageToolChecker, LanguageToolError};

/// A single problem reported by a grammar checker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarIssue {
    /// Human-readable description.
    pub message: String,
    /// Character offset of the flagged span.
    pub offset: usize,
    /// Character length of the flagged span.
    pub length: usize,
    /// Identifier of the rule that fired, when the checker exposes one.
    pub rule_id: Option<String>,
}

/// Counts grammatical problems in a text.
///
/// Errors must implement `std::error::Error` and be `Send + Sync + 'static`
/// so they can be boxed into [`ContractionsError`](crate::ContractionsError).
pub trait GrammarChecker {
    /// Error type returned when checking fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Report every issue found in `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the checker cannot be reached or its answer is
    /// malformed.
    fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, Self::Error>;

    /// Number of issues found in `text`.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`GrammarChecker::check`].
    fn issue_count(&self, text: &str) -> Result<usize, Self::Error> {
        self.check(text).map(|issues| issues.len())
    }
}

/// Measures how far apart two token sequences are in meaning.
pub trait SemanticDistance {
    /// Error type returned when the distance cannot be computed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Non-negative distance; `f64::INFINITY` when either side has nothing
    /// to compare.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model fails.
    fn distance(&self, left: &[&str], right: &[&str]) -> Result<f64, Self::Error>;
}

impl<T: GrammarChecker + ?Sized> GrammarChecker for &T {
    type Error = T::Error;

    fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, Self::Error> {
        (**self).check(text)
    }

    fn issue_count(&self, text: &str) -> Result<usize, Self::Error> {
        (**self).issue_count(text)
    }
}

impl<T: SemanticDistance + ?Sized> SemanticDistance for &T {
    type Error = T::Error;

    fn distance(&self, left: &[&str], right: &[&str]) -> Result<f64, Self::Error> {
        (**self).distance(left, right)
    }
}
