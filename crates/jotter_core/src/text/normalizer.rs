//! Lemma-based text normalizer.
//!
//! # Invariants
//! - Output never has leading or trailing whitespace.
//! - Segments made only of whitespace or only of punctuation contribute
//!   nothing. Symbols and emoji count as words and keep their surface text.
//! - Word order of the input is preserved.

use crate::text::lemmatizer::{DictionaryTagger, LemmaTagger};

/// Maps text to its lemma sequence using an injected tagger.
#[derive(Debug, Clone, Default)]
pub struct TextNormalizer<T: LemmaTagger = DictionaryTagger> {
    tagger: T,
}

impl TextNormalizer<DictionaryTagger> {
    /// Normalizer over the built-in English dictionary tagger.
    pub fn english() -> Self {
        Self::new(DictionaryTagger::new())
    }
}

impl<T: LemmaTagger> TextNormalizer<T> {
    pub fn new(tagger: T) -> Self {
        Self { tagger }
    }

    /// Returns the lemmas of `text` joined by single spaces.
    ///
    /// Words the tagger has no (or a blank) lemma for keep their surface text.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let words: Vec<String> = self
            .tagger
            .tag(text)
            .into_iter()
            .filter(|token| !is_separator(&token.surface))
            .map(|token| match token.lemma {
                Some(lemma) if !lemma.trim().is_empty() => lemma,
                _ => token.surface,
            })
            .collect();
        words.join(" ").trim().to_string()
    }
}

fn is_separator(segment: &str) -> bool {
    segment.chars().all(char::is_whitespace) || segment.chars().all(is_punctuation)
}

/// Unicode `P*` characters from the ASCII, Latin-1, General Punctuation and
/// CJK blocks. `+`, `$`, `<` and friends are symbols (`S*`), not punctuation.
fn is_punctuation(ch: char) -> bool {
    match ch {
        '!' | '"' | '#' | '%' | '&' | '\'' | '(' | ')' | '*' | ',' | '-' | '.' | '/' | ':'
        | ';' | '?' | '@' | '[' | '\\' | ']' | '_' | '{' | '}' => true,
        '\u{a1}' | '\u{a7}' | '\u{ab}' | '\u{b6}' | '\u{b7}' | '\u{bb}' | '\u{bf}' => true,
        '\u{2044}' | '\u{2052}' => false,
        '\u{2010}'..='\u{2027}' | '\u{2030}'..='\u{205e}' => true,
        '\u{3001}'..='\u{3003}' | '\u{3008}'..='\u{3011}' | '\u{3014}'..='\u{301f}' => true,
        '\u{ff01}'..='\u{ff03}' | '\u{ff05}'..='\u{ff0a}' | '\u{ff0c}'..='\u{ff0f}' => true,
        '\u{ff1a}' | '\u{ff1b}' | '\u{ff1f}' | '\u{ff20}' => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_punctuation, TextNormalizer};
    use crate::text::lemmatizer::{LemmaTagger, LemmaToken};

    /// Tags by whitespace/punctuation runs and only knows the lemma of "mice".
    struct FixedTagger;

    impl LemmaTagger for FixedTagger {
        fn tag(&self, text: &str) -> Vec<LemmaToken> {
            let mut tokens = Vec::new();
            let mut current = String::new();
            for ch in text.chars() {
                if ch.is_alphanumeric() {
                    current.push(ch);
                    continue;
                }
                if !current.is_empty() {
                    tokens.push(word_token(std::mem::take(&mut current)));
                }
                tokens.push(LemmaToken::new(ch.to_string(), None));
            }
            if !current.is_empty() {
                tokens.push(word_token(current));
            }
            tokens
        }
    }

    fn word_token(surface: String) -> LemmaToken {
        let lemma = (surface == "mice").then(|| "mouse".to_string());
        LemmaToken::new(surface, lemma)
    }

    #[test]
    fn missing_lemma_falls_back_to_surface_text() {
        let normalizer = TextNormalizer::new(FixedTagger);
        assert_eq!(normalizer.normalize("Three mice"), "Three mouse");
    }

    #[test]
    fn punctuation_and_whitespace_tokens_are_dropped() {
        let normalizer = TextNormalizer::new(FixedTagger);
        assert_eq!(normalizer.normalize(" -- mice, mice!! "), "mouse mouse");
        assert_eq!(normalizer.normalize("?!"), "");
    }

    #[test]
    fn blank_lemma_falls_back_to_surface_text() {
        struct BlankTagger;

        impl LemmaTagger for BlankTagger {
            fn tag(&self, text: &str) -> Vec<LemmaToken> {
                text.split(' ')
                    .flat_map(|word| {
                        [
                            LemmaToken::new(word, Some(String::new())),
                            LemmaToken::new(" ", None),
                        ]
                    })
                    .collect()
            }
        }

        let normalizer = TextNormalizer::new(BlankTagger);
        assert_eq!(normalizer.normalize("two words"), "two words");
    }

    #[test]
    fn punctuation_is_told_apart_from_symbols() {
        for ch in ['!', ',', '\'', '\u{2014}', '\u{201c}', '\u{3002}', '\u{bf}'] {
            assert!(is_punctuation(ch), "{ch:?} should be punctuation");
        }
        for ch in ['+', '$', '<', '|', '~', '\u{20ac}', '\u{2044}', '\u{1f389}'] {
            assert!(!is_punctuation(ch), "{ch:?} should not be punctuation");
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(TextNormalizer::english().normalize(""), "");
    }
}
