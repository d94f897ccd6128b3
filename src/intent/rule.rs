//! Declarative intent rules

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// A single intent definition, immutable once loaded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRule {
    /// Unique dispatch key
    pub tag: String,
    /// Label used when asking the user to pick between two intents
    #[serde(default)]
    pub verb: String,
    /// Every word here must appear before pattern words count at all
    #[serde(rename = "required-words", alias = "required_words", default)]
    pub required_words: AHashSet<String>,
    /// Words that each add one point when present in the input
    #[serde(default)]
    pub patterns: AHashSet<String>,
    /// Candidate replies, one chosen at random per match
    pub responses: Vec<String>,
}

impl IntentRule {
    pub fn new(tag: impl Into<String>, verb: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            verb: verb.into(),
            required_words: AHashSet::new(),
            patterns: AHashSet::new(),
            responses: Vec::new(),
        }
    }

    pub fn with_required<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_words.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_patterns<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(words.into_iter().map(Into::into));
        self
    }

    pub fn with_responses<I, S>(mut self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.responses.extend(responses.into_iter().map(Into::into));
        self
    }

    /// True when the rule can never score above zero
    pub fn is_ungated_blank(&self) -> bool {
        self.required_words.is_empty() && self.patterns.is_empty()
    }

    /// Lowercase and trim every match word so they line up with tokenizer output
    pub(crate) fn normalize(&mut self) {
        self.required_words = normalize_words(&self.required_words);
        self.patterns = normalize_words(&self.patterns);
    }
}

fn normalize_words(words: &AHashSet<String>) -> AHashSet<String> {
    words.iter().map(|w| w.trim().to_lowercase()).collect()
}
