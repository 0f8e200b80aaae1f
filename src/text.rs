//! Shared text helpers for substitution and scoring.
//!
//! Tokenisation mirrors plain whitespace splitting so semantic distance sees
//! punctuation attached to words exactly as it appears in the text.

use std::borrow::Cow;

/// Split text on whitespace.
///
/// # Examples
///
/// ```
/// use contractions::text::tokens;
///
/// assert_eq!(tokens("He is  late."), vec!["He", "is", "late."]);
/// ```
#[must_use]
pub fn tokens(input: &str) -> Vec<&str> {
    input.split_whitespace().collect()
}

/// Adapt `replacement` to the letter case of `matched`.
///
/// An all-caps match (at least two letters) yields an all-caps replacement, a
/// capitalised match yields a capitalised replacement, and anything else keeps
/// the replacement as written.
///
/// # Examples
///
/// ```
/// use contractions::text::match_case;
///
/// assert_eq!(match_case("He's", "he is"), "He is");
/// assert_eq!(match_case("CAN'T", "cannot"), "CANNOT");
/// assert_eq!(match_case("i'm", "I am"), "I am");
/// ```
#[must_use]
pub fn match_case<'a>(matched: &str, replacement: &'a str) -> Cow<'a, str> {
    let mut letters = matched.chars().filter(|c| c.is_alphabetic());
    let Some(first) = letters.next() else {
        return Cow::Borrowed(replacement);
    };
    let rest: Vec<char> = letters.collect();
    if first.is_uppercase() && !rest.is_empty() && rest.iter().all(|c| c.is_uppercase()) {
        Cow::Owned(replacement.to_uppercase())
    } else if first.is_uppercase() {
        capitalise(replacement)
    } else {
        Cow::Borrowed(replacement)
    }
}

fn capitalise(word: &str) -> Cow<'_, str> {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if !first.is_uppercase() => {
            Cow::Owned(first.to_uppercase().chain(chars).collect())
        }
        _ => Cow::Borrowed(word),
    }
}
