use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Disambiguation strategy for ambiguous contractions.
///
/// # Examples
///
/// ```
/// use contractions::api::Mode;
///
/// assert_eq!(Mode::default(), Mode::Fast);
/// assert_eq!(Mode::from(true), Mode::Precise);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One candidate per pattern, applied to every occurrence.
    #[default]
    Fast,
    /// Every ordered assignment of candidates to occurrences.
    Precise,
}

impl From<bool> for Mode {
    fn from(precise: bool) -> Self {
        if precise { Self::Precise } else { Self::Fast }
    }
}

/// Ranking key for a rewritten text.
///
/// Scores order lexicographically: fewer grammar issues first, then smaller
/// semantic distance. Distances use IEEE total ordering so an infinite
/// distance ranks after every finite one.
///
/// # Examples
///
/// ```
/// use contractions::api::Score;
///
/// let grammatical = Score::new(0, 3.5);
/// let ungrammatical = Score::new(1, 0.0);
/// assert!(grammatical < ungrammatical);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Score {
    pub grammar_issues: usize,
    pub distance: f64,
}

impl Score {
    #[must_use]
    pub fn new(grammar_issues: usize, distance: f64) -> Self {
        Self {
            grammar_issues,
            distance,
        }
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.grammar_issues
            .cmp(&other.grammar_issues)
            .then_with(|| self.distance.total_cmp(&other.distance))
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

/// A scored rewrite of the working text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub score: Score,
}
