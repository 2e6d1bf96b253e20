//! Lemma tagging backends.
//!
//! # Responsibility
//! - Define the injectable tagging capability used by the normalizer.
//! - Provide a built-in English backend: exception dictionary + suffix rules.
//!
//! # Invariants
//! - Taggers return every segment of the input, in order, including
//!   whitespace and punctuation segments.
//! - Concatenating all `surface` values reproduces the input exactly.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

static EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| parse_exceptions(include_str!("lemmas.tsv")));

/// One segment of tagged text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaToken {
    /// Segment exactly as it appears in the input.
    pub surface: String,
    /// Dictionary base form, when the backend knows one.
    pub lemma: Option<String>,
}

impl LemmaToken {
    pub fn new(surface: impl Into<String>, lemma: Option<String>) -> Self {
        Self {
            surface: surface.into(),
            lemma,
        }
    }
}

/// Capability that splits text into segments and tags word lemmas.
pub trait LemmaTagger {
    fn tag(&self, text: &str) -> Vec<LemmaToken>;
}

impl<T: LemmaTagger + ?Sized> LemmaTagger for &T {
    fn tag(&self, text: &str) -> Vec<LemmaToken> {
        (**self).tag(text)
    }
}

/// English lemmatizer over Unicode word boundaries (UAX #29).
///
/// Purely alphabetic words (apostrophes and hyphens allowed) always receive a
/// lowercase lemma. Segments containing digits or symbols receive none.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryTagger;

impl DictionaryTagger {
    pub fn new() -> Self {
        Self
    }

    /// Returns the lemma of a single word, or `None` for non-words.
    pub fn lemma(&self, word: &str) -> Option<String> {
        if !is_alphabetic_word(word) {
            return None;
        }
        let lowered = word.to_lowercase();
        Some(lemmatize(strip_possessive(&lowered)))
    }
}

impl LemmaTagger for DictionaryTagger {
    fn tag(&self, text: &str) -> Vec<LemmaToken> {
        text.split_word_bounds()
            .map(|segment| LemmaToken::new(segment, self.lemma(segment)))
            .collect()
    }
}

fn parse_exceptions(source: &'static str) -> HashMap<&'static str, &'static str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('\t'))
        .map(|(form, lemma)| (form.trim(), lemma.trim()))
        .collect()
}

fn is_alphabetic_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphabetic)
        && segment
            .chars()
            .all(|ch| ch.is_alphabetic() || matches!(ch, '\'' | '\u{2019}' | '-'))
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(word)
}

fn lemmatize(word: &str) -> String {
    if let Some(lemma) = EXCEPTIONS.get(word) {
        return (*lemma).to_string();
    }
    if word.chars().count() <= 3 {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies").filter(|stem| stem.chars().count() >= 2) {
        return format!("{stem}y");
    }
    if let Some(stem) = word.strip_suffix("sses") {
        return format!("{stem}ss");
    }
    for suffix in ["ches", "shes", "xes", "zzes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if ["ss", "us", "is"].iter().any(|suffix| word.ends_with(suffix)) {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix('s') {
        return stem.to_string();
    }

    if let Some(stem) = word.strip_suffix("ied") {
        return format!("{stem}y");
    }
    for suffix in ["ing", "ed"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.chars().count() >= 3 && has_vowel(stem) {
                return undouble(stem).to_string();
            }
        }
    }

    word.to_string()
}

fn has_vowel(stem: &str) -> bool {
    stem.chars().any(|ch| matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y'))
}

/// `runn` -> `run`, but `fall`, `miss` and `buzz` keep their double letter.
fn undouble(stem: &str) -> &str {
    let mut tail = stem.chars().rev();
    match (tail.next(), tail.next()) {
        (Some(last), Some(prev))
            if last == prev && !matches!(last, 'a' | 'e' | 'i' | 'o' | 'u' | 'l' | 's' | 'z') =>
        {
            &stem[..stem.len() - last.len_utf8()]
        }
        _ => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::{DictionaryTagger, LemmaTagger, EXCEPTIONS};

    fn lemma(word: &str) -> Option<String> {
        DictionaryTagger::new().lemma(word)
    }

    #[test]
    fn exception_table_is_parsed_without_comments() {
        assert_eq!(EXCEPTIONS.get("went"), Some(&"go"));
        assert!(EXCEPTIONS.keys().all(|key| !key.starts_with('#')));
    }

    #[test]
    fn regular_inflections_reduce_to_base_form() {
        assert_eq!(lemma("dogs").as_deref(), Some("dog"));
        assert_eq!(lemma("running").as_deref(), Some("run"));
        assert_eq!(lemma("parties").as_deref(), Some("party"));
        assert_eq!(lemma("boxes").as_deref(), Some("box"));
        assert_eq!(lemma("walked").as_deref(), Some("walk"));
        assert_eq!(lemma("carried").as_deref(), Some("carry"));
        assert_eq!(lemma("falling").as_deref(), Some("fall"));
    }

    #[test]
    fn short_ies_stems_only_lose_the_plural_s() {
        assert_eq!(lemma("pies").as_deref(), Some("pie"));
        assert_eq!(lemma("ties").as_deref(), Some("tie"));
        assert_eq!(lemma("cities").as_deref(), Some("city"));
    }

    #[test]
    fn irregular_forms_come_from_the_dictionary() {
        assert_eq!(lemma("Went").as_deref(), Some("go"));
        assert_eq!(lemma("children").as_deref(), Some("child"));
        assert_eq!(lemma("was").as_deref(), Some("be"));
    }

    #[test]
    fn short_and_uninflected_words_are_lowercased_only() {
        assert_eq!(lemma("Milk").as_deref(), Some("milk"));
        assert_eq!(lemma("bus").as_deref(), Some("bus"));
        assert_eq!(lemma("need").as_deref(), Some("need"));
        assert_eq!(lemma("class").as_deref(), Some("class"));
    }

    #[test]
    fn possessive_suffix_is_dropped() {
        assert_eq!(lemma("Anna's").as_deref(), Some("anna"));
    }

    #[test]
    fn numbers_and_symbols_have_no_lemma() {
        assert_eq!(lemma("2"), None);
        assert_eq!(lemma("3pm"), None);
        assert_eq!(lemma("!"), None);
        assert_eq!(lemma(" "), None);
    }

    #[test]
    fn tag_covers_every_segment_in_order() {
        let text = "Buy 2 eggs, now!";
        let tokens = DictionaryTagger::new().tag(text);
        let rebuilt: String = tokens.iter().map(|token| token.surface.as_str()).collect();
        assert_eq!(rebuilt, text);
        let eggs = tokens
            .iter()
            .find(|token| token.surface == "eggs")
            .expect("eggs should be a segment");
        assert_eq!(eggs.lemma.as_deref(), Some("egg"));
    }
}
