use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading word2vec vectors.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("failed to read embeddings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("embeddings at {path} expected SHA-256 {expected} but found {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
    #[error("malformed word2vec header: {0:?}")]
    Header(String),
    #[error("malformed entry {entry}: {reason}")]
    Entry { entry: usize, reason: String },
    #[error("vector for {word:?} has {actual} dimensions but expected {expected}")]
    Dimensions {
        word: String,
        expected: usize,
        actual: usize,
    },
    #[error("vector for {word:?} contains a non-finite component")]
    NonFinite { word: String },
    #[error("expected {expected} vectors but found {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Errors returned by [`WordMoversDistance`](super::WordMoversDistance).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WmdError {
    #[error("transport solver did not converge after {iterations} augmentations")]
    NoConvergence { iterations: usize },
}
