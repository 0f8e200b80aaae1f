//! Load-once cache of scorer dependencies.
//!
//! Loading word vectors is slow, so loaded scorers are kept for the life of
//! the process and shared between every driver built from an equivalent
//! configuration. The cache lock is held across the check and the load, so
//! concurrent callers never load the same configuration twice.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

use tracing::{debug, info, instrument};

use crate::{
    config::ContractionsConfig,
    engine::Disambiguator,
    error::{ConfigError, ContractionsError, Dependency},
    providers::{
        GrammarChecker, LanguageToolChecker, SemanticDistance, WordMoversDistance, embedding,
    },
};

/// Scorers backed by a LanguageTool server and word2vec vectors.
pub type LoadedModels = Disambiguator<LanguageToolChecker, WordMoversDistance>;

/// Identity of a loaded set of scorers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub embedding_path: PathBuf,
    pub language_code: String,
    pub language_tool_url: String,
}

impl From<&ContractionsConfig> for ModelKey {
    fn from(config: &ContractionsConfig) -> Self {
        Self {
            embedding_path: config.embedding_path.clone(),
            language_code: config.language_code.clone(),
            language_tool_url: config.language_tool_url.clone(),
        }
    }
}

static LOADED: LazyLock<Mutex<HashMap<ModelKey, Arc<LoadedModels>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Scorers for `config`, loading them on first request.
///
/// # Errors
///
/// Returns [`ContractionsError::Configuration`] if the configuration is
/// invalid or the embedding file is missing, and
/// [`ContractionsError::DependencyLoad`] if the vectors or the grammar checker
/// cannot be initialised. Failures are not cached.
pub fn ensure_loaded(config: &ContractionsConfig) -> Result<Arc<LoadedModels>, ContractionsError> {
    let key = ModelKey::from(config);
    let mut loaded = LOADED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(models) = loaded.get(&key) {
        debug!(path = %key.embedding_path.display(), "reusing loaded scorers");
        return Ok(Arc::clone(models));
    }
    let models = Arc::new(load(config)?);
    loaded.insert(key, Arc::clone(&models));
    Ok(models)
}

/// Whether scorers for `config` are already cached.
#[must_use]
pub fn is_loaded(config: &ContractionsConfig) -> bool {
    LOADED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&ModelKey::from(config))
}

#[instrument(
    skip_all,
    fields(path = %config.embedding_path.display(), language = %config.language_code)
)]
fn load(config: &ContractionsConfig) -> Result<LoadedModels, ContractionsError> {
    let config = config.clone().validate()?;
    if !config.embedding_path.is_file() {
        return Err(ConfigError::MissingEmbedding {
            path: config.embedding_path,
        }
        .into());
    }
    info!("loading scorers");
    let vectors = embedding::load(
        &config.embedding_path,
        config.embedding_format,
        config.embedding_sha256.as_deref(),
    )
    .map_err(|e| ContractionsError::load(Dependency::Embeddings, e))?;
    let checker = LanguageToolChecker::new(
        config.language_tool_url.as_str(),
        config.language_code.as_str(),
        config.request_timeout(),
    )
    .map_err(|e| ContractionsError::load(Dependency::GrammarChecker, e))?;
    checker
        .verify_language()
        .map_err(|e| ContractionsError::load(Dependency::GrammarChecker, e))?;
    info!(words = vectors.len(), "scorers ready");
    Ok(Disambiguator::new(checker, WordMoversDistance::new(vectors)))
}

/// Supplies the scorers a driver ranks candidates with.
pub trait ScorerSource {
    type Grammar: GrammarChecker;
    type Distance: SemanticDistance;

    /// Produce the scorers, loading them if needed.
    ///
    /// # Errors
    ///
    /// Returns configuration or dependency load errors.
    fn load(&self) -> Result<Arc<Disambiguator<Self::Grammar, Self::Distance>>, ContractionsError>;
}

/// Scorers described by configuration and drawn from the process cache.
#[derive(Debug, Clone)]
pub struct ModelSource {
    config: ContractionsConfig,
}

impl ModelSource {
    #[must_use]
    pub fn new(config: ContractionsConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ContractionsConfig {
        &self.config
    }
}

impl ScorerSource for ModelSource {
    type Grammar = LanguageToolChecker;
    type Distance = WordMoversDistance;

    fn load(&self) -> Result<Arc<LoadedModels>, ContractionsError> {
        ensure_loaded(&self.config)
    }
}

/// Scorers constructed by the caller.
#[derive(Debug)]
pub struct Preloaded<G, D> {
    scorers: Arc<Disambiguator<G, D>>,
}

impl<G, D> Preloaded<G, D> {
    #[must_use]
    pub fn new(scorers: Arc<Disambiguator<G, D>>) -> Self {
        Self { scorers }
    }
}

impl<G, D> ScorerSource for Preloaded<G, D>
where
    G: GrammarChecker,
    D: SemanticDistance,
{
    type Grammar = G;
    type Distance = D;

    fn load(&self) -> Result<Arc<Disambiguator<G, D>>, ContractionsError> {
        Ok(Arc::clone(&self.scorers))
    }
}
