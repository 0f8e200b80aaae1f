//! word2vec vectors and Word Mover's Distance.
//!
//! A vector file may be pinned by its SHA-256 digest; the digest is checked
//! before any of the file is parsed.
mod errors;
mod wmd;
mod word2vec;

pub use errors::{EmbeddingError, WmdError};
pub use wmd::{WordMoversDistance, earth_movers};
pub use word2vec::{WordEmbeddings, read_binary, read_text};

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

/// On-disk layout of a word2vec file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingFormat {
    /// The original C tool's binary output, as in
    /// `GoogleNews-vectors-negative300.bin`.
    #[default]
    Binary,
    /// One `word v1 v2 ...` line per word.
    Text,
}

/// Load vectors from `path`, verifying `sha256` first when supplied.
///
/// # Errors
///
/// Returns [`EmbeddingError`] when the file cannot be read, fails the
/// checksum, or is malformed.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use contractions::providers::{EmbeddingFormat, WordMoversDistance, embedding};
///
/// # fn main() -> Result<(), contractions::providers::EmbeddingError> {
/// let vectors = embedding::load(
///     Path::new("/models/GoogleNews-vectors-negative300.bin"),
///     EmbeddingFormat::Binary,
///     None,
/// )?;
/// let wmd = WordMoversDistance::new(vectors);
/// # let _ = wmd;
/// # Ok(())
/// # }
/// ```
pub fn load(
    path: &Path,
    format: EmbeddingFormat,
    sha256: Option<&str>,
) -> Result<WordEmbeddings, EmbeddingError> {
    if let Some(expected) = sha256 {
        verify_checksum(path, expected)?;
    }
    let file = File::open(path).map_err(|source| EmbeddingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let embeddings = match format {
        EmbeddingFormat::Binary => read_binary(reader)?,
        EmbeddingFormat::Text => read_text(reader)?,
    };
    info!(
        path = %path.display(),
        words = embeddings.len(),
        dimensions = embeddings.dimensions(),
        "loaded word embeddings"
    );
    Ok(embeddings)
}

/// SHA-256 digest of the file at `path` as lowercase hexadecimal.
///
/// # Errors
///
/// Returns [`EmbeddingError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<String, EmbeddingError> {
    let io_error = |source| EmbeddingError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_error)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).map_err(io_error)?;
    Ok(format!("{:x}", hasher.finalize()))
}

fn verify_checksum(path: &Path, expected: &str) -> Result<(), EmbeddingError> {
    let expected = expected.trim().to_ascii_lowercase();
    let actual = compute_sha256(path)?;
    if actual == expected {
        return Ok(());
    }
    Err(EmbeddingError::ChecksumMismatch {
        path: path.to_path_buf(),
        expected,
        actual,
    })
}
