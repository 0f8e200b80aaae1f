//! Error types surfaced by the expansion and contraction pipeline.
//!
//! Configuration problems, dependency load failures, and runtime scorer
//! failures are kept apart so callers can react to each differently: the
//! first two are fatal for the whole run, the last only for the current text.

use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Boxed error from an external collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// External collaborator an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// Word embedding model used for semantic distance.
    Embeddings,
    /// Grammar checker used to count grammar issues.
    GrammarChecker,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embeddings => f.write_str("embedding model"),
            Self::GrammarChecker => f.write_str("grammar checker"),
        }
    }
}

/// Errors raised while building or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The embedding file does not exist.
    #[error("embedding model not found at {}", path.display())]
    MissingEmbedding { path: PathBuf },
    /// A configuration value is out of bounds.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// Layered configuration could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    Load(#[source] Box<figment::Error>),
}

/// Errors returned by [`Contractions`](crate::Contractions).
#[derive(Debug, Error)]
pub enum ContractionsError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    /// A dependency exists but could not be initialised.
    #[error("failed to load {dependency}: {source}")]
    DependencyLoad {
        dependency: Dependency,
        #[source]
        source: BoxError,
    },
    /// A scoring call failed after the dependencies were loaded.
    #[error("{scorer} unavailable: {source}")]
    ScorerUnavailable {
        scorer: Dependency,
        #[source]
        source: BoxError,
    },
}

impl ContractionsError {
    pub(crate) fn load(dependency: Dependency, source: impl Into<BoxError>) -> Self {
        Self::DependencyLoad {
            dependency,
            source: source.into(),
        }
    }

    pub(crate) fn unavailable(scorer: Dependency, source: impl Into<BoxError>) -> Self {
        Self::ScorerUnavailable {
            scorer,
            source: source.into(),
        }
    }
}
