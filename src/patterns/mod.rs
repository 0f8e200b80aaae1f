//! Contraction pattern tables and substitution.
//!
//! Three tables drive the rewrite: unambiguous contractions with a single
//! expansion, ambiguous contractions with several candidate expansions, and
//! reverse rules mapping expanded phrases back to contracted forms. Tables are
//! compiled once and shared read-only for the life of the process.

mod tables;

use std::{borrow::Cow, cmp::Reverse, sync::LazyLock};

use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

use crate::text::match_case;

/// Character class accepted at every elision point.
const APOSTROPHE: &str = "['’]";

/// Errors raised while compiling a [`PatternTable`].
#[derive(Debug, Error)]
pub enum PatternError {
    /// A form or phrase produced an invalid regular expression.
    #[error("invalid pattern for {form:?}: {source}")]
    Regex {
        form: String,
        #[source]
        source: regex::Error,
    },
    /// An ambiguous rule declared fewer than two candidates.
    #[error("ambiguous form {form:?} needs at least two candidates but has {actual}")]
    TooFewCandidates { form: String, actual: usize },
}

/// Whether the apostrophes inside a contraction form may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elision {
    /// `can't` also matches `cant`.
    Optional,
    /// The bare spelling is an ordinary word (`we're` and `were`).
    Required,
}

/// A contraction as written, with `'` marking each elision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Form {
    text: &'static str,
    elision: Elision,
}

impl Form {
    /// A form whose inner apostrophes are optional.
    #[must_use]
    pub const fn loose(text: &'static str) -> Self {
        Self {
            text,
            elision: Elision::Optional,
        }
    }

    /// A form whose inner apostrophes must be present.
    #[must_use]
    pub const fn strict(text: &'static str) -> Self {
        Self {
            text,
            elision: Elision::Required,
        }
    }

    #[must_use]
    pub fn text(&self) -> &'static str {
        self.text
    }

    #[must_use]
    pub fn elision(&self) -> Elision {
        self.elision
    }

    /// Regular expression source matching this form.
    ///
    /// Leading and trailing apostrophes sit outside the word boundaries so
    /// `'cause` and `doin'` consume them; like inner ones, they are optional
    /// only for loose forms.
    ///
    /// # Examples
    ///
    /// ```
    /// use contractions::patterns::Form;
    ///
    /// assert_eq!(Form::loose("can't").regex_source(), r"\bcan['’]?t\b");
    /// assert_eq!(Form::strict("we're").regex_source(), r"\bwe['’]re\b");
    /// assert_eq!(Form::loose("doin'").regex_source(), r"\bdoin\b['’]?");
    /// assert_eq!(Form::strict("'cause").regex_source(), r"['’]\bcause\b");
    /// ```
    #[must_use]
    pub fn regex_source(&self) -> String {
        let leading = self.text.starts_with('\'');
        let trailing = self.text.len() > 1 && self.text.ends_with('\'');
        let elided = match self.elision {
            Elision::Optional => format!("{APOSTROPHE}?"),
            Elision::Required => APOSTROPHE.to_owned(),
        };
        let body = self
            .text
            .trim_matches('\'')
            .split('\'')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(&elided);
        format!(
            r"{}\b{body}\b{}",
            if leading { elided.as_str() } else { "" },
            if trailing { elided.as_str() } else { "" },
        )
    }
}

/// Regular expression source for an expanded phrase; words may be separated
/// by any run of whitespace.
#[must_use]
pub fn phrase_source(phrase: &str) -> String {
    let words: Vec<String> = phrase.split_whitespace().map(regex::escape).collect();
    format!(r"\b{}\b", words.join(r"\s+"))
}

/// Case-insensitive compiled matcher.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern from regular expression source.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for malformed sources.
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map(|regex| Self { regex })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Number of non-overlapping occurrences in `text`.
    #[must_use]
    pub fn count(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Replace every occurrence with `replacement`, matching the case of each
    /// occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use contractions::patterns::{Form, Pattern};
    ///
    /// # fn main() -> Result<(), regex::Error> {
    /// let pattern = Pattern::new(&Form::loose("he's").regex_source())?;
    /// assert_eq!(pattern.replace_all("He's sure he's right", "he is"), "He is sure he is right");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        self.regex
            .replace_all(text, |caps: &Captures<'_>| {
                let matched = caps.get(0).map_or("", |m| m.as_str());
                match_case(matched, replacement).into_owned()
            })
            .into_owned()
    }

    /// Replace the occurrences left to right with successive entries of
    /// `replacements`; occurrences past the end of the slice stay unchanged.
    #[must_use]
    pub fn replace_each(&self, text: &str, replacements: &[&str]) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for (found, replacement) in self.regex.find_iter(text).zip(replacements) {
            out.push_str(text.get(last..found.start()).unwrap_or_default());
            out.push_str(&match_case(found.as_str(), replacement));
            last = found.end();
        }
        out.push_str(text.get(last..).unwrap_or_default());
        out
    }
}

/// Contraction with exactly one expansion.
#[derive(Debug, Clone)]
pub struct UnambiguousRule {
    form: Form,
    expansion: &'static str,
    pattern: Pattern,
}

impl UnambiguousRule {
    #[must_use]
    pub fn form(&self) -> Form {
        self.form
    }

    #[must_use]
    pub fn expansion(&self) -> &'static str {
        self.expansion
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// Contraction whose meaning depends on context.
///
/// The first candidate is the conventional reading and wins exact ties.
#[derive(Debug, Clone)]
pub struct AmbiguousRule {
    form: Form,
    candidates: &'static [&'static str],
    pattern: Pattern,
}

impl AmbiguousRule {
    /// Build a rule, rejecting candidate lists shorter than two.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the form does not compile or has fewer
    /// than two candidates.
    pub fn new(form: Form, candidates: &'static [&'static str]) -> Result<Self, PatternError> {
        if candidates.len() < 2 {
            return Err(PatternError::TooFewCandidates {
                form: form.text().to_owned(),
                actual: candidates.len(),
            });
        }
        Ok(Self {
            form,
            candidates,
            pattern: compile(form.text(), &form.regex_source())?,
        })
    }

    #[must_use]
    pub fn form(&self) -> Form {
        self.form
    }

    #[must_use]
    pub fn candidates(&self) -> &'static [&'static str] {
        self.candidates
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// Which pass of contraction a reverse rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReverseTier {
    /// `will not` to `won't`; applied first.
    Negation,
    /// `I am` to `I'm`; applied to what negation left behind.
    Auxiliary,
}

/// Expanded phrase with a single contracted form.
#[derive(Debug, Clone)]
pub struct ReverseRule {
    phrase: &'static str,
    contraction: &'static str,
    pattern: Pattern,
}

impl ReverseRule {
    #[must_use]
    pub fn phrase(&self) -> &'static str {
        self.phrase
    }

    #[must_use]
    pub fn contraction(&self) -> &'static str {
        self.contraction
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[must_use]
    pub fn tier(&self) -> ReverseTier {
        if self.phrase == "cannot" || self.phrase.ends_with(" not") {
            ReverseTier::Negation
        } else {
            ReverseTier::Auxiliary
        }
    }
}

/// Single-pass alternation over many rules.
///
/// Alternatives are ordered longest source form first so that, at any
/// position, the longest applicable rule wins regardless of table order.
#[derive(Debug)]
struct Substitutions {
    regex: Option<Regex>,
    replacements: Vec<&'static str>,
}

impl Substitutions {
    fn compile<'r>(
        rules: impl IntoIterator<Item = (&'r str, String, &'static str)>,
    ) -> Result<Self, PatternError> {
        let mut rules: Vec<_> = rules.into_iter().collect();
        rules.sort_by_key(|(form, _, _)| Reverse(form.len()));
        if rules.is_empty() {
            return Ok(Self {
                regex: None,
                replacements: Vec::new(),
            });
        }
        let source = rules
            .iter()
            .map(|(_, source, _)| format!("({source})"))
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|source| PatternError::Regex {
                form: "<combined>".to_owned(),
                source,
            })?;
        Ok(Self {
            regex: Some(regex),
            replacements: rules.into_iter().map(|(_, _, rep)| rep).collect(),
        })
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(regex) = &self.regex else {
            return Cow::Borrowed(text);
        };
        regex.replace_all(text, |caps: &Captures<'_>| {
            let matched = caps.get(0).map_or("", |m| m.as_str());
            caps.iter()
                .skip(1)
                .position(|group| group.is_some())
                .and_then(|index| self.replacements.get(index))
                .map_or_else(
                    || matched.to_owned(),
                    |replacement| match_case(matched, replacement).into_owned(),
                )
        })
    }
}

/// The three rule tables plus their compiled single-pass forms.
#[derive(Debug)]
pub struct PatternTable {
    unambiguous: Vec<UnambiguousRule>,
    ambiguous: Vec<AmbiguousRule>,
    reverse: Vec<ReverseRule>,
    expansion: Substitutions,
    negation: Substitutions,
    auxiliary: Substitutions,
}

static STANDARD: LazyLock<PatternTable> = LazyLock::new(|| {
    #[expect(clippy::expect_used, reason = "built-in tables are constant and valid")]
    let table = PatternTable::new(tables::UNAMBIGUOUS, tables::AMBIGUOUS, tables::REVERSE)
        .expect("built-in contraction tables compile");
    table
});

impl PatternTable {
    /// The built-in English tables.
    ///
    /// # Examples
    ///
    /// ```
    /// use contractions::patterns::PatternTable;
    ///
    /// let table = PatternTable::standard();
    /// assert_eq!(table.expand_unambiguous("I can't"), "I cannot");
    /// assert_eq!(table.contract("I will not go"), "I won't go");
    /// ```
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Compile custom tables.
    ///
    /// Ambiguous rules are tried in the order given, so a longer form must be
    /// listed before any shorter form that matches inside it.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] for malformed forms or ambiguous rules with
    /// fewer than two candidates.
    pub fn new(
        unambiguous: &[(Form, &'static str)],
        ambiguous: &[(Form, &'static [&'static str])],
        reverse: &[(&'static str, &'static str)],
    ) -> Result<Self, PatternError> {
        let unambiguous = unambiguous
            .iter()
            .map(|&(form, expansion)| {
                compile(form.text(), &form.regex_source()).map(|pattern| UnambiguousRule {
                    form,
                    expansion,
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let ambiguous = ambiguous
            .iter()
            .map(|&(form, candidates)| AmbiguousRule::new(form, candidates))
            .collect::<Result<Vec<_>, _>>()?;
        let reverse = reverse
            .iter()
            .map(|&(phrase, contraction)| {
                compile(phrase, &phrase_source(phrase)).map(|pattern| ReverseRule {
                    phrase,
                    contraction,
                    pattern,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let expansion = Substitutions::compile(
            unambiguous
                .iter()
                .map(|rule| (rule.form.text(), rule.form.regex_source(), rule.expansion)),
        )?;
        let tier = |tier: ReverseTier| {
            Substitutions::compile(
                reverse
                    .iter()
                    .filter(|rule| rule.tier() == tier)
                    .map(|rule| (rule.phrase, phrase_source(rule.phrase), rule.contraction)),
            )
        };
        let negation = tier(ReverseTier::Negation)?;
        let auxiliary = tier(ReverseTier::Auxiliary)?;

        Ok(Self {
            unambiguous,
            ambiguous,
            reverse,
            expansion,
            negation,
            auxiliary,
        })
    }

    #[must_use]
    pub fn unambiguous(&self) -> &[UnambiguousRule] {
        &self.unambiguous
    }

    #[must_use]
    pub fn ambiguous(&self) -> &[AmbiguousRule] {
        &self.ambiguous
    }

    #[must_use]
    pub fn reverse(&self) -> &[ReverseRule] {
        &self.reverse
    }

    /// Expand every unambiguous contraction in one pass.
    #[must_use]
    pub fn expand_unambiguous<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.expansion.apply(text)
    }

    /// Contract every expanded phrase with a reverse rule, negations first.
    #[must_use]
    pub fn contract<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self.negation.apply(text) {
            Cow::Borrowed(text) => self.auxiliary.apply(text),
            Cow::Owned(text) => Cow::Owned(self.auxiliary.apply(&text).into_owned()),
        }
    }
}

fn compile(form: &str, source: &str) -> Result<Pattern, PatternError> {
    Pattern::new(source).map_err(|source| PatternError::Regex {
        form: form.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table() -> &'static PatternTable {
        PatternTable::standard()
    }

    #[rstest]
    #[case(Form::loose("can't"), "cant", true)]
    #[case(Form::loose("can't"), "can’t", true)]
    #[case(Form::strict("we're"), "were", false)]
    #[case(Form::strict("we're"), "We're", true)]
    #[case(Form::loose("'cause"), "'cause", true)]
    #[case(Form::loose("'cause"), "because", false)]
    #[case(Form::strict("'cause"), "the cause", false)]
    #[case(Form::strict("'cause"), "’cause", true)]
    #[case(Form::loose("doin'"), "doin'", true)]
    #[case(Form::loose("y'all'd've"), "yalldve", true)]
    fn builds_form_patterns(#[case] form: Form, #[case] text: &str, #[case] expected: bool) {
        let pattern = compile(form.text(), &form.regex_source())
            .unwrap_or_else(|e| panic!("pattern should compile: {e}"));
        assert_eq!(pattern.is_match(text), expected);
    }

    #[rstest]
    #[case("I can't believe you've done this.", "I cannot believe you have done this.")]
    #[case("You can't've known", "You cannot have known")]
    #[case("'Cause I'm goin'", "Because I am going")]
    #[case("They're HERE and we're not", "They are HERE and we are not")]
    #[case("They were here", "They were here")]
    #[case("Y'ALL'RE late", "YOU ALL ARE late")]
    fn expands_unambiguous(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(table().expand_unambiguous(input), expected);
    }

    #[test]
    fn unambiguous_pass_borrows_untouched_text() {
        assert!(matches!(
            table().expand_unambiguous("nothing to see"),
            Cow::Borrowed(_)
        ));
    }

    #[rstest]
    #[case("I will not go", "I won't go")]
    #[case("He is sure we would have", "He's sure we'd've")]
    #[case("You cannot do that", "You can't do that")]
    #[case("I will\tnot go", "I won't go")]
    #[case("I am not going", "I'm not going")]
    #[case("It is nine of the clock", "It's nine o'clock")]
    #[case("Nothing here", "Nothing here")]
    fn contracts_phrases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(table().contract(input), expected);
    }

    #[test]
    fn ambiguous_rules_have_alternatives() {
        for rule in table().ambiguous() {
            assert!(
                rule.candidates().len() >= 2,
                "{} has too few candidates",
                rule.form().text()
            );
        }
    }

    #[test]
    fn longer_ambiguous_forms_come_first() {
        let rules = table().ambiguous();
        for (i, earlier) in rules.iter().enumerate() {
            for later in rules.iter().skip(i + 1) {
                assert!(
                    !earlier.pattern().is_match(later.form().text()),
                    "{} shadows {}",
                    earlier.form().text(),
                    later.form().text()
                );
            }
        }
    }

    #[test]
    fn rejects_single_candidate() {
        let err = AmbiguousRule::new(Form::loose("he's"), &["he is"])
            .err()
            .unwrap_or_else(|| panic!("expected rejection"));
        assert!(matches!(err, PatternError::TooFewCandidates { actual: 1, .. }));
    }

    #[rstest]
    #[case("will not", ReverseTier::Negation)]
    #[case("cannot", ReverseTier::Negation)]
    #[case("I am", ReverseTier::Auxiliary)]
    fn classifies_reverse_tiers(#[case] phrase: &str, #[case] expected: ReverseTier) {
        let rule = table()
            .reverse()
            .iter()
            .find(|rule| rule.phrase() == phrase)
            .unwrap_or_else(|| panic!("missing reverse rule {phrase}"));
        assert_eq!(rule.tier(), expected);
    }

    #[test]
    fn replace_each_assigns_in_order() {
        let pattern = compile("he's", &Form::loose("he's").regex_source())
            .unwrap_or_else(|e| panic!("pattern should compile: {e}"));
        let text = "He's here and he's done";
        assert_eq!(pattern.count(text), 2);
        assert_eq!(
            pattern.replace_each(text, &["he is", "he has"]),
            "He is here and he has done"
        );
        assert_eq!(
            pattern.replace_each(text, &["he is"]),
            "He is here and he's done"
        );
    }

    #[test]
    fn empty_tables_are_inert() {
        let table = PatternTable::new(&[], &[], &[])
            .unwrap_or_else(|e| panic!("empty tables should compile: {e}"));
        assert_eq!(table.expand_unambiguous("can't"), "can't");
        assert_eq!(table.contract("will not"), "will not");
    }
}
