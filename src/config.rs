//! Configuration for loading the scorers and its layered sources.
//!
//! Values come from an optional TOML file and from environment variables
//! prefixed with `CONTRACTIONS_`, the environment taking precedence.

use std::{path::PathBuf, time::Duration};

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, providers::EmbeddingFormat};

const ENV_PREFIX: &str = "CONTRACTIONS_";

fn default_language_code() -> String {
    "en-US".to_owned()
}

fn default_language_tool_url() -> String {
    "http://localhost:8081".to_owned()
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Where to find the embedding model and the grammar checker.
///
/// # Examples
///
/// ```
/// use contractions::ContractionsConfig;
///
/// let config = ContractionsConfig::new("/models/GoogleNews-vectors-negative300.bin")
///     .with_language_code("en-GB");
/// assert_eq!(config.language_code, "en-GB");
/// assert_eq!(config.language_tool_url, "http://localhost:8081");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractionsConfig {
    /// word2vec file used for Word Mover's Distance.
    pub embedding_path: PathBuf,
    #[serde(default)]
    pub embedding_format: EmbeddingFormat,
    /// Expected SHA-256 of the embedding file, checked before parsing.
    #[serde(default)]
    pub embedding_sha256: Option<String>,
    /// Language passed to the grammar checker.
    #[serde(default = "default_language_code")]
    pub language_code: String,
    /// Base URL of the LanguageTool server.
    #[serde(default = "default_language_tool_url")]
    pub language_tool_url: String,
    /// Per-request timeout for the grammar checker; must be positive.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ContractionsConfig {
    /// Configuration with defaults for everything but the embedding path.
    #[must_use]
    pub fn new(embedding_path: impl Into<PathBuf>) -> Self {
        Self {
            embedding_path: embedding_path.into(),
            embedding_format: EmbeddingFormat::default(),
            embedding_sha256: None,
            language_code: default_language_code(),
            language_tool_url: default_language_tool_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    #[must_use]
    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = code.into();
        self
    }

    #[must_use]
    pub fn with_language_tool_url(mut self, url: impl Into<String>) -> Self {
        self.language_tool_url = url.into();
        self
    }

    #[must_use]
    pub fn with_embedding_format(mut self, format: EmbeddingFormat) -> Self {
        self.embedding_format = format;
        self
    }

    #[must_use]
    pub fn with_embedding_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.embedding_sha256 = Some(sha256.into());
        self
    }

    #[must_use]
    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Ensure the configuration values are within acceptable bounds.
    ///
    /// The embedding file itself is only looked for when the scorers load.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty language code, a
    /// non-HTTP grammar checker URL, a zero timeout, or a checksum that is
    /// not 64 hexadecimal digits.
    #[must_use = "Validation should not be ignored"]
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.language_code.trim().is_empty() {
            return Err(ConfigError::Invalid("language_code must not be empty".into()));
        }
        let url = self.language_tool_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "language_tool_url must be an http(s) URL, got {url:?}"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }
        if let Some(sha256) = &self.embedding_sha256 {
            let digest = sha256.trim();
            if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConfigError::Invalid(
                    "embedding_sha256 must be 64 hexadecimal digits".into(),
                ));
            }
        }
        Ok(self)
    }

    /// Load configuration solely from `CONTRACTIONS_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable cannot be parsed or the result
    /// fails validation.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        Self::extract(Figment::new().merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or the
    /// result fails validation.
    pub fn load_from_config(path: &str) -> Result<Self, ConfigError> {
        Self::extract(Figment::new().merge(Toml::file(path)))
    }

    /// Load configuration from a TOML file overridden by the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either source contains invalid values.
    pub fn load_from_env_and_config(path: &str) -> Result<Self, ConfigError> {
        Self::extract(
            Figment::new()
                .merge(Toml::file(path))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .extract::<Self>()
            .map_err(|e| ConfigError::Load(Box::new(e)))?
            .validate()
    }
}
