//! Expansion and contraction over sequences of texts.
//!
//! Expansion first rewrites every unambiguous contraction, then hands each
//! ambiguous contraction still present to the [`Disambiguator`], feeding the
//! updated text to the next rule. Contraction is pure substitution and needs
//! no scorers.

use std::{
    fmt,
    iter::FusedIterator,
    sync::{Arc, OnceLock},
};

use crate::{
    api::Mode,
    config::ContractionsConfig,
    engine::Disambiguator,
    error::ContractionsError,
    models::{ModelSource, Preloaded, ScorerSource},
    patterns::PatternTable,
    providers::{GrammarChecker, SemanticDistance},
};

type Scorers<S> = Disambiguator<<S as ScorerSource>::Grammar, <S as ScorerSource>::Distance>;

/// Expands and contracts English contractions.
///
/// # Examples
///
/// ```
/// use contractions::{Contractions, Mode, tests::support::{StubDistance, StubGrammar}};
///
/// let grammar = StubGrammar::clean().with_issues("He has late.", 1);
/// let contractions = Contractions::with_scorers(grammar, StubDistance::zero());
///
/// let expanded: Result<Vec<String>, _> = contractions
///     .expand_texts(["I can't go.", "He's late."], Mode::Fast)
///     .collect();
/// assert_eq!(expanded.ok(), Some(vec!["I cannot go.".to_owned(), "He is late.".to_owned()]));
///
/// let contracted: Vec<String> = contractions.contract_texts(["I will not go"]).collect();
/// assert_eq!(contracted, ["I won't go"]);
/// ```
pub struct Contractions<S: ScorerSource> {
    source: S,
    scorers: OnceLock<Arc<Scorers<S>>>,
    table: &'static PatternTable,
}

impl<S: ScorerSource + fmt::Debug> fmt::Debug for Contractions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contractions")
            .field("source", &self.source)
            .field("loaded", &self.scorers.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Contractions<ModelSource> {
    /// Driver whose scorers are loaded from `config` on first use.
    #[must_use]
    pub fn new(config: ContractionsConfig) -> Self {
        Self::from_source(ModelSource::new(config))
    }
}

impl<G, D> Contractions<Preloaded<G, D>>
where
    G: GrammarChecker,
    D: SemanticDistance,
{
    /// Driver ranking candidates with the given scorers.
    #[must_use]
    pub fn with_scorers(grammar: G, distance: D) -> Self {
        Self::from_source(Preloaded::new(Arc::new(Disambiguator::new(
            grammar, distance,
        ))))
    }
}

impl<S: ScorerSource> Contractions<S> {
    #[must_use]
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            scorers: OnceLock::new(),
            table: PatternTable::standard(),
        }
    }

    /// Use custom rule tables instead of the built-in English ones.
    #[must_use]
    pub fn with_table(mut self, table: &'static PatternTable) -> Self {
        self.table = table;
        self
    }

    #[must_use]
    pub fn table(&self) -> &'static PatternTable {
        self.table
    }

    /// Load the scorers unless this driver already holds them.
    ///
    /// # Errors
    ///
    /// Returns configuration or dependency load errors; a failed load is
    /// retried on the next call.
    pub fn ensure_loaded(&self) -> Result<Arc<Scorers<S>>, ContractionsError> {
        if let Some(scorers) = self.scorers.get() {
            return Ok(Arc::clone(scorers));
        }
        let loaded = self.source.load()?;
        Ok(Arc::clone(self.scorers.get_or_init(|| loaded)))
    }

    /// Lazily expand each text in order.
    ///
    /// Scorers load on the first pull. A load failure is yielded once and
    /// ends the sequence; a scoring failure affects only its own text.
    pub fn expand_texts<I>(&self, texts: I, mode: Mode) -> ExpandTexts<'_, S, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        ExpandTexts {
            driver: self,
            texts: texts.into_iter(),
            mode,
            scorers: None,
            finished: false,
        }
    }

    /// Expand a single text.
    ///
    /// # Errors
    ///
    /// Returns load errors or [`ContractionsError::ScorerUnavailable`].
    pub fn expand(&self, text: &str, mode: Mode) -> Result<String, ContractionsError> {
        let scorers = self.ensure_loaded()?;
        expand_with(self.table, &scorers, text, mode)
    }

    /// Lazily contract each text in order.
    pub fn contract_texts<I>(&self, texts: I) -> ContractTexts<I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        ContractTexts {
            table: self.table,
            texts: texts.into_iter(),
        }
    }

    #[must_use]
    pub fn contract(&self, text: &str) -> String {
        self.table.contract(text).into_owned()
    }
}

fn expand_with<G, D>(
    table: &PatternTable,
    engine: &Disambiguator<G, D>,
    text: &str,
    mode: Mode,
) -> Result<String, ContractionsError>
where
    G: GrammarChecker,
    D: SemanticDistance,
{
    let mut text = table.expand_unambiguous(text).into_owned();
    for rule in table.ambiguous() {
        if rule.pattern().is_match(&text) {
            text = engine.resolve(&text, rule, mode)?;
        }
    }
    Ok(text)
}

/// Iterator returned by [`Contractions::expand_texts`].
pub struct ExpandTexts<'a, S: ScorerSource, I> {
    driver: &'a Contractions<S>,
    texts: I,
    mode: Mode,
    scorers: Option<Arc<Scorers<S>>>,
    finished: bool,
}

impl<S, I> Iterator for ExpandTexts<'_, S, I>
where
    S: ScorerSource,
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<String, ContractionsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let scorers = match &self.scorers {
            Some(scorers) => Arc::clone(scorers),
            None => match self.driver.ensure_loaded() {
                Ok(scorers) => {
                    self.scorers = Some(Arc::clone(&scorers));
                    scorers
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            },
        };
        let Some(text) = self.texts.next() else {
            self.finished = true;
            return None;
        };
        Some(expand_with(
            self.driver.table,
            &scorers,
            text.as_ref(),
            self.mode,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            (0, Some(0))
        } else {
            let (_, upper) = self.texts.size_hint();
            (0, upper.map(|n| n.saturating_add(1)))
        }
    }
}

impl<S, I> FusedIterator for ExpandTexts<'_, S, I>
where
    S: ScorerSource,
    I: Iterator,
    I::Item: AsRef<str>,
{
}

/// Iterator returned by [`Contractions::contract_texts`].
#[derive(Debug, Clone)]
pub struct ContractTexts<I> {
    table: &'static PatternTable,
    texts: I,
}

impl<I> Iterator for ContractTexts<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.texts
            .next()
            .map(|text| self.table.contract(text.as_ref()).into_owned())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.texts.size_hint()
    }
}
