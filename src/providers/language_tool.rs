//! Grammar checker backed by a LanguageTool HTTP server.
//!
//! Texts are posted as form data to `{base}/v2/check` and the JSON `matches`
//! array is read back as [`GrammarIssue`]s. A server is started separately,
//! for example with `docker run -p 8081:8010 erikvl87/languagetool`.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use contractions::providers::{GrammarChecker, LanguageToolChecker};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let checker = LanguageToolChecker::new("http://localhost:8081", "en-US", Duration::from_secs(10))?;
//! checker.verify_language()?;
//! assert_eq!(checker.issue_count("He is late.")?, 0);
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::{GrammarChecker, GrammarIssue};

/// Error returned by [`LanguageToolChecker`].
#[derive(Debug, Error)]
pub enum LanguageToolError {
    /// HTTP request failed or returned an error status.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Response body was not the expected JSON.
    #[error("invalid response")]
    InvalidResponse,
    /// The server does not offer the configured language.
    #[error("language {language:?} is not supported by the server")]
    UnsupportedLanguage { language: String },
}

impl PartialEq for LanguageToolError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Request(_), Self::Request(_))
            | (Self::InvalidResponse, Self::InvalidResponse) => true,
            (
                Self::UnsupportedLanguage { language: a },
                Self::UnsupportedLanguage { language: b },
            ) => a == b,
            _ => false,
        }
    }
}

impl Eq for LanguageToolError {}

#[derive(Deserialize)]
struct CheckResponse {
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct Match {
    #[serde(default)]
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    rule: Option<Rule>,
}

#[derive(Deserialize)]
struct Rule {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Language {
    code: String,
    #[serde(default)]
    long_code: Option<String>,
}

impl From<Match> for GrammarIssue {
    fn from(found: Match) -> Self {
        Self {
            message: found.message,
            offset: found.offset,
            length: found.length,
            rule_id: found.rule.map(|rule| rule.id),
        }
    }
}

/// Grammar checker talking to a LanguageTool server.
#[derive(Debug, Clone)]
pub struct LanguageToolChecker {
    client: Client,
    base_url: String,
    language: String,
}

impl LanguageToolChecker {
    /// Create a checker for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageToolError::Request`] if the HTTP client cannot be
    /// built.
    pub fn new(
        base_url: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LanguageToolError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self {
            client,
            base_url,
            language: language.into(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Confirm the server offers the configured language.
    ///
    /// Either the short `code` or the `longCode` of an advertised language
    /// must equal the configured code, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageToolError::UnsupportedLanguage`] when no advertised
    /// language matches, or a request error when the server is unreachable.
    pub fn verify_language(&self) -> Result<(), LanguageToolError> {
        let languages: Vec<Language> = self
            .client
            .get(format!("{}/v2/languages", self.base_url))
            .send()?
            .error_for_status()?
            .json()
            .map_err(|_| LanguageToolError::InvalidResponse)?;
        let supported = languages.iter().any(|lang| {
            lang.code.eq_ignore_ascii_case(&self.language)
                || lang
                    .long_code
                    .as_deref()
                    .is_some_and(|code| code.eq_ignore_ascii_case(&self.language))
        });
        if supported {
            debug!(language = %self.language, url = %self.base_url, "language tool ready");
            Ok(())
        } else {
            Err(LanguageToolError::UnsupportedLanguage {
                language: self.language.clone(),
            })
        }
    }
}

impl GrammarChecker for LanguageToolChecker {
    type Error = LanguageToolError;

    fn check(&self, text: &str) -> Result<Vec<GrammarIssue>, Self::Error> {
        let resp = self
            .client
            .post(format!("{}/v2/check", self.base_url))
            .form(&[("language", self.language.as_str()), ("text", text)])
            .send()?
            .error_for_status()?;
        let body: CheckResponse = resp
            .json()
            .map_err(|_| LanguageToolError::InvalidResponse)?;
        debug!(issues = body.matches.len(), "grammar check complete");
        Ok(body.matches.into_iter().map(GrammarIssue::from).collect())
    }
}
