//! Disambiguation of contractions with several possible expansions.
//!
//! Every hypothesis is scored by the number of grammar issues in the rewritten
//! text and, as a tie-break, by the Word Mover's Distance between the working
//! text and the rewrite. The lowest score wins; exact ties keep the
//! hypothesis generated first.

use tracing::{debug, warn};

use crate::{
    api::{Candidate, Mode, Score},
    error::{ContractionsError, Dependency},
    patterns::AmbiguousRule,
    providers::{GrammarChecker, SemanticDistance},
    text::tokens,
};

/// Most assignments [`Mode::Precise`] will score for one contraction before
/// falling back to [`Mode::Fast`].
pub const MAX_PRECISE_ASSIGNMENTS: usize = 4096;

/// Scores and selects candidate expansions.
///
/// # Examples
///
/// ```
/// use contractions::{Disambiguator, Mode, PatternTable, tests::support::{StubDistance, StubGrammar}};
///
/// # fn main() -> Result<(), contractions::ContractionsError> {
/// let grammar = StubGrammar::clean().with_issues("He has late", 1);
/// let engine = Disambiguator::new(grammar, StubDistance::zero());
/// let rule = PatternTable::standard()
///     .ambiguous()
///     .iter()
///     .find(|rule| rule.form().text() == "he's")
///     .ok_or_else(|| contractions::ConfigError::Invalid("missing rule".into()))?;
/// assert_eq!(engine.resolve("He's late", rule, Mode::Fast)?, "He is late");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Disambiguator<G, D> {
    grammar: G,
    distance: D,
}

impl<G, D> Disambiguator<G, D>
where
    G: GrammarChecker,
    D: SemanticDistance,
{
    #[must_use]
    pub fn new(grammar: G, distance: D) -> Self {
        Self { grammar, distance }
    }

    #[must_use]
    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    #[must_use]
    pub fn distance(&self) -> &D {
        &self.distance
    }

    /// Score `text` against the tokens of the text it was derived from.
    ///
    /// # Errors
    ///
    /// Returns [`ContractionsError::ScorerUnavailable`] if either scorer
    /// fails.
    pub fn score(&self, original: &[&str], text: &str) -> Result<Score, ContractionsError> {
        let grammar_issues = self
            .grammar
            .issue_count(text)
            .map_err(|e| ContractionsError::unavailable(Dependency::GrammarChecker, e))?;
        let distance = self
            .distance
            .distance(original, &tokens(text))
            .map_err(|e| ContractionsError::unavailable(Dependency::Embeddings, e))?;
        Ok(Score::new(grammar_issues, distance))
    }

    /// Score every hypothesis and return the best, or `None` when there are
    /// no hypotheses.
    ///
    /// # Errors
    ///
    /// Returns the first scorer failure.
    pub fn rank(
        &self,
        original: &str,
        hypotheses: impl IntoIterator<Item = String>,
    ) -> Result<Option<Candidate>, ContractionsError> {
        let original = tokens(original);
        let mut best: Option<Candidate> = None;
        for text in hypotheses {
            let score = self.score(&original, &text)?;
            debug!(
                candidate = %text,
                grammar_issues = score.grammar_issues,
                distance = score.distance,
                "scored candidate"
            );
            if best.as_ref().is_none_or(|current| score < current.score) {
                best = Some(Candidate { text, score });
            }
        }
        Ok(best)
    }

    /// Replace the occurrences of `rule` in `text` with the best-scoring
    /// expansion.
    ///
    /// [`Mode::Fast`] tries each candidate on every occurrence at once.
    /// [`Mode::Precise`] tries every assignment of candidates to occurrences,
    /// so a text with `m` occurrences and `k` candidates costs `k^m` scorings.
    /// When `k^m` exceeds [`MAX_PRECISE_ASSIGNMENTS`] the rule is resolved in
    /// fast mode instead and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`ContractionsError::ScorerUnavailable`] if a scorer fails.
    pub fn resolve(
        &self,
        text: &str,
        rule: &AmbiguousRule,
        mode: Mode,
    ) -> Result<String, ContractionsError> {
        let pattern = rule.pattern();
        let occurrences = pattern.count(text);
        if occurrences == 0 {
            return Ok(text.to_owned());
        }
        let candidates = rule.candidates();
        debug!(
            form = rule.form().text(),
            occurrences,
            ?mode,
            "resolving ambiguous contraction"
        );
        let mode = match mode {
            Mode::Precise if !within_precise_limit(candidates.len(), occurrences) => {
                warn!(
                    form = rule.form().text(),
                    occurrences,
                    limit = MAX_PRECISE_ASSIGNMENTS,
                    "too many assignments for precise mode; using fast mode"
                );
                Mode::Fast
            }
            other => other,
        };
        let best = match mode {
            Mode::Fast => self.rank(
                text,
                candidates
                    .iter()
                    .map(|candidate| pattern.replace_all(text, candidate)),
            )?,
            Mode::Precise => self.rank(
                text,
                Assignments::new(candidates.len(), occurrences).map(|assignment| {
                    let chosen: Vec<&str> = assignment
                        .iter()
                        .filter_map(|&index| candidates.get(index).copied())
                        .collect();
                    pattern.replace_each(text, &chosen)
                }),
            )?,
        };
        Ok(best.map_or_else(
            || text.to_owned(),
            |winner| {
                debug!(chosen = %winner.text, "selected candidate");
                winner.text
            },
        ))
    }
}

fn within_precise_limit(choices: usize, slots: usize) -> bool {
    u32::try_from(slots)
        .ok()
        .and_then(|slots| choices.checked_pow(slots))
        .is_some_and(|total| total <= MAX_PRECISE_ASSIGNMENTS)
}

/// Every sequence of `slots` indices below `choices`, in lexicographic order.
#[derive(Debug, Clone)]
pub struct Assignments {
    choices: usize,
    next: Option<Vec<usize>>,
}

impl Assignments {
    /// # Examples
    ///
    /// ```
    /// use contractions::engine::Assignments;
    ///
    /// let all: Vec<Vec<usize>> = Assignments::new(2, 2).collect();
    /// assert_eq!(all, vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]);
    /// ```
    #[must_use]
    pub fn new(choices: usize, slots: usize) -> Self {
        Self {
            choices,
            next: (choices > 0).then(|| vec![0; slots]),
        }
    }
}

impl Iterator for Assignments {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        let mut following = current.clone();
        for digit in following.iter_mut().rev() {
            *digit += 1;
            if *digit < self.choices {
                self.next = Some(following);
                return Some(current);
            }
            *digit = 0;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        patterns::{Form, PatternTable},
        tests::support::{StubDistance, StubGrammar},
    };
    use rstest::rstest;

    fn rule(form: &'static str, candidates: &'static [&'static str]) -> AmbiguousRule {
        AmbiguousRule::new(Form::loose(form), candidates)
            .unwrap_or_else(|e| panic!("rule should compile: {e}"))
    }

    fn standard(form: &str) -> &'static AmbiguousRule {
        PatternTable::standard()
            .ambiguous()
            .iter()
            .find(|rule| rule.form().text() == form)
            .unwrap_or_else(|| panic!("missing rule {form}"))
    }

    #[rstest]
    #[case(3, 2, 9)]
    #[case(2, 1, 2)]
    #[case(5, 3, 125)]
    #[case(2, 0, 1)]
    #[case(0, 2, 0)]
    fn enumerates_all_assignments(
        #[case] choices: usize,
        #[case] slots: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(Assignments::new(choices, slots).count(), expected);
    }

    #[rstest]
    #[case(Mode::Fast)]
    #[case(Mode::Precise)]
    fn equal_scores_keep_first_candidate(#[case] mode: Mode) {
        let engine = Disambiguator::new(StubGrammar::clean(), StubDistance::zero());
        let resolved = engine
            .resolve("x'y here", &rule("x'y", &["A", "B"]), mode)
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(resolved, "A here");
    }

    #[rstest]
    #[case(Mode::Fast)]
    #[case(Mode::Precise)]
    fn grammar_dominates_distance(#[case] mode: Mode) {
        let grammar = StubGrammar::clean().with_issues("he has late", 1);
        let distance = StubDistance::zero()
            .with_distance("he has late", 0.1)
            .with_distance("he is late", 9.0);
        let engine = Disambiguator::new(grammar, distance);
        let resolved = engine
            .resolve("he's late", standard("he's"), mode)
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(resolved, "he is late");
    }

    #[test]
    fn distance_breaks_grammar_ties() {
        let distance = StubDistance::zero()
            .with_distance("he has gone", 0.2)
            .with_distance("he is gone", 0.7);
        let engine = Disambiguator::new(StubGrammar::clean(), distance);
        let resolved = engine
            .resolve("he's gone", standard("he's"), Mode::Fast)
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(resolved, "he has gone");
    }

    #[test]
    fn fast_mode_substitutes_uniformly() {
        let grammar = StubGrammar::clean()
            .with_issues("he is done and he is left", 2)
            .with_issues("he has done and he has left", 1);
        let engine = Disambiguator::new(grammar, StubDistance::zero());
        let resolved = engine
            .resolve("he's done and he's left", standard("he's"), Mode::Fast)
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(resolved, "he has done and he has left");
    }

    #[test]
    fn precise_mode_mixes_candidates() {
        let grammar = StubGrammar::clean()
            .with_issues("he has done and he has left", 1)
            .with_issues("he is done and he is left", 1)
            .with_issues("he is done and he has left", 1);
        let engine = Disambiguator::new(grammar, StubDistance::zero());
        let resolved = engine
            .resolve("he's done and he's left", standard("he's"), Mode::Precise)
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(resolved, "he has done and he is left");
    }

    #[test]
    fn precise_mode_scores_every_assignment() {
        let engine = Disambiguator::new(StubGrammar::clean(), StubDistance::zero());
        engine
            .resolve("ain't it, ain't it", standard("ain't"), Mode::Precise)
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(engine.grammar().calls(), 25);
    }

    #[rstest]
    #[case(2, 12, true)]
    #[case(2, 13, false)]
    #[case(5, 5, true)]
    #[case(5, 6, false)]
    #[case(2, usize::MAX, false)]
    fn precise_limit_bounds_assignment_count(
        #[case] choices: usize,
        #[case] slots: usize,
        #[case] expected: bool,
    ) {
        assert_eq!(within_precise_limit(choices, slots), expected);
    }

    #[test]
    fn oversized_precise_request_falls_back_to_fast_mode() {
        let text = vec!["he's"; 13].join(" and ");
        let engine = Disambiguator::new(StubGrammar::clean(), StubDistance::zero());
        let resolved = engine
            .resolve(&text, standard("he's"), Mode::Precise)
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(resolved, vec!["he has"; 13].join(" and "));
        assert_eq!(engine.grammar().calls(), 2);
    }

    #[rstest]
    #[case("he's here")]
    #[case("He's here, he said")]
    fn single_occurrence_modes_agree(#[case] text: &str) {
        let grammar = StubGrammar::clean().with_issues("he has here", 1);
        let engine = Disambiguator::new(grammar, StubDistance::zero());
        let rule = standard("he's");
        let fast = engine.resolve(text, rule, Mode::Fast);
        let precise = engine.resolve(text, rule, Mode::Precise);
        match (fast, precise) {
            (Ok(fast), Ok(precise)) => assert_eq!(fast, precise),
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn text_without_match_is_untouched() {
        let engine = Disambiguator::new(StubGrammar::clean(), StubDistance::zero());
        let resolved = engine
            .resolve("nothing here", standard("he's"), Mode::Fast)
            .unwrap_or_else(|e| panic!("resolve: {e}"));
        assert_eq!(resolved, "nothing here");
        assert_eq!(engine.grammar().calls(), 0);
    }

    #[test]
    fn grammar_failure_surfaces_as_unavailable() {
        let engine = Disambiguator::new(StubGrammar::failing(), StubDistance::zero());
        let err = engine
            .resolve("he's late", standard("he's"), Mode::Fast)
            .err()
            .unwrap_or_else(|| panic!("expected failure"));
        assert!(matches!(
            err,
            ContractionsError::ScorerUnavailable {
                scorer: Dependency::GrammarChecker,
                ..
            }
        ));
    }

    #[test]
    fn distance_failure_surfaces_as_unavailable() {
        let engine = Disambiguator::new(StubGrammar::clean(), StubDistance::failing());
        let err = engine
            .rank("a", ["b".to_owned()])
            .err()
            .unwrap_or_else(|| panic!("expected failure"));
        assert!(matches!(
            err,
            ContractionsError::ScorerUnavailable {
                scorer: Dependency::Embeddings,
                ..
            }
        ));
    }

    #[test]
    fn rank_of_nothing_is_none() {
        let engine = Disambiguator::new(StubGrammar::clean(), StubDistance::zero());
        let best = engine
            .rank("a", Vec::new())
            .unwrap_or_else(|e| panic!("rank: {e}"));
        assert!(best.is_none());
    }
}
