//! Title normalization and keyword extraction.
//!
//! Both functions are total and deterministic. [`normalize`] is idempotent:
//! a word whose expansion already surrounds it is left untouched, so
//! `normalize(normalize(t)) == normalize(t)`.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Whole-word replacements applied to lowercased titles.
const SYNONYMS: &[(&str, &str)] = &[
    ("trump", "donald trump"),
    ("biden", "joe biden"),
    ("harris", "kamala harris"),
    ("democrats", "democratic party"),
    ("republicans", "republican party"),
    ("gop", "republican party"),
    ("dems", "democratic party"),
    ("senate", "us senate"),
    ("house", "us house"),
    ("congress", "us congress"),
    ("presidency", "president"),
    ("presidential", "president"),
    ("2024", "2024 election"),
    ("next", "upcoming"),
    ("win", "victory"),
    ("wins", "victory"),
    ("elected", "victory"),
    ("control", "majority"),
    ("controls", "majority"),
    ("above", "over"),
    ("exceeds", "over"),
    ("below", "under"),
    ("reaches", "hits"),
];

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "will", "be", "is", "are", "was", "were",
];

/// Keywords this short carry no signal.
const MIN_KEYWORD_CHARS: usize = 3;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s\-?!]").expect("punctuation pattern compiles"));

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("word pattern compiles"));

static SYNONYM: LazyLock<Regex> = LazyLock::new(|| {
    let keys: Vec<String> = SYNONYMS.iter().map(|(key, _)| regex::escape(key)).collect();
    Regex::new(&format!(r"\b(?:{})\b", keys.join("|"))).expect("synonym pattern compiles")
});

fn synonym(word: &str) -> Option<&'static str> {
    SYNONYMS
        .iter()
        .find(|(key, _)| *key == word)
        .map(|(_, phrase)| *phrase)
}

/// True when the words around `text[start..end]` already spell out `phrase`.
fn already_expanded(text: &str, start: usize, end: usize, phrase: &str) -> bool {
    let key = &text[start..end];
    let parts: Vec<&str> = phrase.split(' ').collect();
    let Some(offset) = parts.iter().position(|p| *p == key) else {
        return false;
    };

    let before: Vec<&str> = WORD.find_iter(&text[..start]).map(|m| m.as_str()).collect();
    let Some(first) = before.len().checked_sub(offset) else {
        return false;
    };
    let after = WORD
        .find_iter(&text[end..])
        .map(|m| m.as_str())
        .take(parts.len() - offset - 1);

    let window: Vec<&str> = before[first..]
        .iter()
        .copied()
        .chain(std::iter::once(key))
        .chain(after)
        .collect();
    window == parts
}

/// Canonicalize a listing title for comparison.
///
/// Lowercases and trims, blanks out punctuation other than `-`, `?` and
/// `!`, expands the synonym table on whole words and collapses whitespace.
///
/// ```
/// use unimarket::application::normalize::normalize;
///
/// assert_eq!(
///     normalize("  GOP controls the House!  "),
///     "republican party majority the us house!"
/// );
/// ```
#[must_use]
pub fn normalize(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let cleaned = PUNCTUATION.replace_all(&lowered, " ");

    let expanded = SYNONYM.replace_all(&cleaned, |caps: &Captures<'_>| {
        let Some(m) = caps.get(0) else {
            return String::new();
        };
        match synonym(m.as_str()) {
            Some(phrase) if !already_expanded(&cleaned, m.start(), m.end(), phrase) => {
                phrase.to_string()
            }
            _ => m.as_str().to_string(),
        }
    });

    expanded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Significant words of a title after normalization.
#[must_use]
pub fn keywords(title: &str) -> BTreeSet<String> {
    normalize(title)
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_KEYWORD_CHARS && !STOP_WORDS.contains(w))
        .map(str::to_string)
        .collect()
}
