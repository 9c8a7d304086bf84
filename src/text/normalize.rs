// Text normalizer — turns raw scraped text into clean token streams.
//
// Steps: ASCII-only sanitization, lowercasing, punctuation stripping,
// word tokenization, stopword removal. No stemming or lemmatization —
// TF-IDF downweights inflection noise well enough for topic discovery.

use std::collections::HashSet;

use regex_lite::Regex;
use stop_words::{get, LANGUAGE};

/// Stopwords specific to journalistic prose — attribution verbs, honorifics,
/// and hedging words that dominate news text but carry no topical signal.
pub const NEWSROOM_STOPWORDS: [&str; 21] = [
    "said", "would", "like", "many", "also", "could", "mr", "ms", "mrs", "may", "even", "say",
    "much", "going", "might", "dont", "go", "another", "around", "says", "editor",
];

/// Deterministic, side-effect-free text normalizer.
///
/// The stopword set is injected at construction rather than read from a
/// process-wide global, so tests can supply alternate sets.
pub struct Normalizer {
    stopwords: HashSet<String>,
    word: Regex,
}

impl Normalizer {
    /// Standard English stopwords plus the newsroom supplement.
    pub fn new() -> Self {
        let mut stopwords: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
        stopwords.extend(NEWSROOM_STOPWORDS.iter().map(|w| w.to_string()));
        Self::with_stopwords(stopwords)
    }

    /// Build a normalizer with a custom stopword set.
    pub fn with_stopwords(stopwords: HashSet<String>) -> Self {
        Self {
            stopwords,
            // Tokens are runs of letters/digits; everything else is a boundary.
            word: Regex::new(r"[a-z0-9]+").expect("static regex"),
        }
    }

    /// Clean a document into an ordered token sequence.
    ///
    /// Non-ASCII characters become spaces, the text is lowercased,
    /// punctuation is deleted, and stopword tokens are dropped.
    pub fn clean_tokenize(&self, doc: &str) -> Vec<String> {
        let sanitized: String = doc
            .chars()
            .map(|c| if (c as u32) < 128 { c } else { ' ' })
            .collect::<String>()
            .to_lowercase();

        let depunctuated: String = sanitized
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        self.word
            .find_iter(&depunctuated)
            .map(|m| m.as_str().to_string())
            .filter(|token| !self.stopwords.contains(token))
            .collect()
    }

    /// Clean a document and join the tokens with single spaces — the form
    /// persisted as `clean_text`.
    pub fn clean_join(&self, doc: &str) -> String {
        self.clean_tokenize(doc).join(" ")
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_stopwords_and_punctuation() {
        let n = Normalizer::new();
        let tokens = n.clean_tokenize("THE CAT sat. THE dog ran!");
        assert_eq!(tokens, vec!["cat", "sat", "dog", "ran"]);
    }

    #[test]
    fn non_ascii_becomes_boundary() {
        let n = Normalizer::new();
        let tokens = n.clean_tokenize("café—crowd");
        // 'é' and the em dash split the words; "caf" and "crowd" survive
        assert_eq!(tokens, vec!["caf", "crowd"]);
        for t in &tokens {
            assert!(t.is_ascii());
        }
    }

    #[test]
    fn newsroom_supplement_is_applied() {
        let n = Normalizer::new();
        let tokens = n.clean_tokenize("The editor said Mr. Smith might testify");
        assert_eq!(tokens, vec!["smith", "testify"]);
    }

    #[test]
    fn output_never_contains_stopwords() {
        let n = Normalizer::new();
        let stopwords: HashSet<String> = get(LANGUAGE::English).into_iter().collect();
        let tokens =
            n.clean_tokenize("It was the best of times, it was the worst of times — wisdom!");
        for t in &tokens {
            assert!(!stopwords.contains(t), "stopword {t:?} leaked through");
            assert!(!t.chars().any(|c| c.is_ascii_punctuation()));
        }
    }

    #[test]
    fn custom_stopword_set() {
        let custom: HashSet<String> = ["cat".to_string()].into_iter().collect();
        let n = Normalizer::with_stopwords(custom);
        let tokens = n.clean_tokenize("the cat sat");
        assert_eq!(tokens, vec!["the", "sat"]);
    }

    #[test]
    fn deterministic_and_idempotent_on_clean_text() {
        let n = Normalizer::new();
        let once = n.clean_join("Witnesses DESCRIBED the collapse; sirens followed.");
        let twice = n.clean_join(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let n = Normalizer::new();
        assert!(n.clean_tokenize("").is_empty());
        assert!(n.clean_tokenize("!!! ??? ...").is_empty());
    }
}
