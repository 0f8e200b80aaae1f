//! Readers for the word2vec binary and text formats.
//!
//! Both formats open with a `"<count> <dimensions>"` header line. Binary
//! entries are `<word><space>` followed by `dimensions` little-endian `f32`
//! values and an optional newline; text entries are one whitespace-separated
//! line per word.

use std::{
    collections::HashMap,
    io::BufRead,
};

use tracing::warn;

use super::EmbeddingError;

/// Word vectors keyed by token.
#[derive(Debug, Clone, Default)]
pub struct WordEmbeddings {
    dimensions: usize,
    index: HashMap<String, usize>,
    vectors: Vec<f32>,
}

impl WordEmbeddings {
    #[must_use]
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            index: HashMap::new(),
            vectors: Vec::new(),
        }
    }

    /// Build a vocabulary from `(word, vector)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError`] when a vector has the wrong length or a
    /// non-finite component.
    ///
    /// # Examples
    ///
    /// ```
    /// use contractions::providers::WordEmbeddings;
    ///
    /// # fn main() -> Result<(), contractions::providers::EmbeddingError> {
    /// let vectors = WordEmbeddings::from_entries(2, [("he", vec![0.0_f32, 1.0]), ("is", vec![1.0, 0.0])])?;
    /// assert_eq!(vectors.len(), 2);
    /// assert_eq!(vectors.get("is"), Some(&[1.0, 0.0][..]));
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_entries<W, V>(
        dimensions: usize,
        entries: impl IntoIterator<Item = (W, V)>,
    ) -> Result<Self, EmbeddingError>
    where
        W: Into<String>,
        V: AsRef<[f32]>,
    {
        let mut embeddings = Self::new(dimensions);
        for (word, vector) in entries {
            embeddings.insert(word, vector.as_ref())?;
        }
        Ok(embeddings)
    }

    /// Add a word. Later duplicates of a word are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::Dimensions`] or [`EmbeddingError::NonFinite`]
    /// for unusable vectors.
    pub fn insert(&mut self, word: impl Into<String>, vector: &[f32]) -> Result<(), EmbeddingError> {
        let word = word.into();
        if vector.len() != self.dimensions {
            return Err(EmbeddingError::Dimensions {
                word,
                expected: self.dimensions,
                actual: vector.len(),
            });
        }
        if !vector.iter().all(|v| v.is_finite()) {
            return Err(EmbeddingError::NonFinite { word });
        }
        if self.index.contains_key(&word) {
            warn!(%word, "duplicate word in embeddings; keeping the first vector");
            return Ok(());
        }
        self.index.insert(word, self.index.len());
        self.vectors.extend_from_slice(vector);
        Ok(())
    }

    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Vector for `word`; lookups are case-sensitive.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<&[f32]> {
        let row = *self.index.get(word)?;
        let start = row.checked_mul(self.dimensions)?;
        self.vectors.get(start..start.checked_add(self.dimensions)?)
    }
}

fn header(reader: &mut impl BufRead) -> Result<(usize, usize), EmbeddingError> {
    let mut line = String::new();
    reader.read_line(&mut line).map_err(|e| EmbeddingError::Header(e.to_string()))?;
    let mut fields = line.split_whitespace().map(str::parse::<usize>);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(count)), Some(Ok(dimensions)), None) if dimensions > 0 => Ok((count, dimensions)),
        _ => Err(EmbeddingError::Header(line.trim_end().to_owned())),
    }
}

fn entry_error(entry: usize, reason: impl Into<String>) -> EmbeddingError {
    EmbeddingError::Entry {
        entry,
        reason: reason.into(),
    }
}

/// Parse the binary format.
///
/// # Errors
///
/// Returns [`EmbeddingError`] for a malformed header, truncated input, invalid
/// UTF-8 words, or unusable vectors.
pub fn read_binary(mut reader: impl BufRead) -> Result<WordEmbeddings, EmbeddingError> {
    let (count, dimensions) = header(&mut reader)?;
    let mut embeddings = WordEmbeddings::new(dimensions);
    // Buffers grow with the data actually read; the header is untrusted.
    let mut vector = Vec::new();
    let mut word = Vec::new();
    let mut value = [0_u8; size_of::<f32>()];
    for entry in 0..count {
        word.clear();
        let read = reader
            .read_until(b' ', &mut word)
            .map_err(|e| entry_error(entry, e.to_string()))?;
        if read == 0 {
            return Err(EmbeddingError::Truncated {
                expected: count,
                actual: entry,
            });
        }
        let token = std::str::from_utf8(&word)
            .map_err(|e| entry_error(entry, e.to_string()))?
            .trim_start_matches(['\n', '\r'])
            .strip_suffix(' ')
            .ok_or_else(|| entry_error(entry, "word is not followed by a space"))?
            .to_owned();
        vector.clear();
        for _ in 0..dimensions {
            reader
                .read_exact(&mut value)
                .map_err(|_| EmbeddingError::Truncated {
                    expected: count,
                    actual: entry,
                })?;
            vector.push(f32::from_le_bytes(value));
        }
        embeddings.insert(token, &vector)?;
    }
    Ok(embeddings)
}

/// Parse the text format.
///
/// # Errors
///
/// Returns [`EmbeddingError`] for a malformed header, unparsable numbers,
/// missing lines, or unusable vectors.
pub fn read_text(mut reader: impl BufRead) -> Result<WordEmbeddings, EmbeddingError> {
    let (count, dimensions) = header(&mut reader)?;
    let mut embeddings = WordEmbeddings::new(dimensions);
    let mut lines = reader.lines();
    let mut vector = Vec::new();
    for entry in 0..count {
        let Some(line) = lines.next() else {
            return Err(EmbeddingError::Truncated {
                expected: count,
                actual: entry,
            });
        };
        let line = line.map_err(|e| entry_error(entry, e.to_string()))?;
        let mut fields = line.split_whitespace();
        let word = fields
            .next()
            .ok_or_else(|| entry_error(entry, "empty line"))?;
        vector.clear();
        for field in fields {
            let value = field
                .parse::<f32>()
                .map_err(|e| entry_error(entry, format!("{field:?}: {e}")))?;
            vector.push(value);
        }
        embeddings.insert(word, &vector)?;
    }
    Ok(embeddings)
}
