//! Expand and contract English contractions.
//!
//! Unambiguous contractions ("can't") are rewritten by pattern substitution.
//! Ambiguous ones ("he's") are resolved by scoring each candidate expansion
//! with a grammar checker and, as a tie-break, Word Mover's Distance.

pub mod api;
pub mod config;
pub mod contractions;
pub mod engine;
pub mod error;
pub mod models;
pub mod patterns;
pub mod providers;
pub mod text;

pub use api::{Candidate, Mode, Score};
pub use config::ContractionsConfig;
pub use contractions::{ContractTexts, Contractions, ExpandTexts};
pub use engine::Disambiguator;
pub use error::{ConfigError, ContractionsError, Dependency};
pub use models::{ModelKey, ModelSource, Preloaded, ScorerSource};
pub use patterns::PatternTable;
pub use providers::{GrammarChecker, GrammarIssue, SemanticDistance};

pub mod tests;
