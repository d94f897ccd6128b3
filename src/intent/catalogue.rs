//! The ordered, validated intent catalogue and its swappable handle

use std::sync::Arc;

use ahash::AHashSet;
use parking_lot::RwLock;

use crate::intent::loader::CatalogueError;
use crate::intent::rule::IntentRule;

/// Ordered intent rules.
///
/// The first rule greets the user at session start. The last rule is the
/// fallback: it has no required words and no patterns, so it always scores
/// zero and only answers when nothing else matched.
#[derive(Debug, Clone)]
pub struct IntentCatalogue {
    rules: Vec<IntentRule>,
}

impl IntentCatalogue {
    /// Validate and normalize a list of rules.
    pub fn new(mut rules: Vec<IntentRule>) -> Result<Self, CatalogueError> {
        if rules.len() < 2 {
            return Err(CatalogueError::TooFewIntents(rules.len()));
        }

        let mut seen = AHashSet::with_capacity(rules.len());
        for (index, rule) in rules.iter_mut().enumerate() {
            if rule.tag.trim().is_empty() {
                return Err(CatalogueError::BlankTag(index));
            }
            if !seen.insert(rule.tag.clone()) {
                return Err(CatalogueError::DuplicateTag(rule.tag.clone()));
            }
            if rule.responses.is_empty() {
                return Err(CatalogueError::NoResponses(rule.tag.clone()));
            }

            rule.normalize();
            if rule.required_words.contains("") || rule.patterns.contains("") {
                return Err(CatalogueError::BlankWord(rule.tag.clone()));
            }
        }

        let fallback = &rules[rules.len() - 1];
        if !fallback.is_ungated_blank() {
            return Err(CatalogueError::FallbackNotBlank(fallback.tag.clone()));
        }

        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Always false for a validated catalogue
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn greeting(&self) -> &IntentRule {
        &self.rules[0]
    }

    pub fn fallback(&self) -> &IntentRule {
        &self.rules[self.rules.len() - 1]
    }

    pub fn get(&self, tag: &str) -> Option<&IntentRule> {
        self.rules.iter().find(|rule| rule.tag == tag)
    }
}

/// Shared catalogue that can be replaced wholesale.
///
/// Readers take an `Arc` snapshot and keep it for the whole resolution, so a
/// swap never shows a half-updated catalogue to a call in flight.
#[derive(Debug, Clone)]
pub struct CatalogueHandle {
    current: Arc<RwLock<Arc<IntentCatalogue>>>,
}

impl CatalogueHandle {
    pub fn new(catalogue: IntentCatalogue) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalogue))),
        }
    }

    pub fn snapshot(&self) -> Arc<IntentCatalogue> {
        Arc::clone(&self.current.read())
    }

    /// Replace the catalogue, returning the previous one
    pub fn swap(&self, catalogue: IntentCatalogue) -> Arc<IntentCatalogue> {
        let mut guard = self.current.write();
        std::mem::replace(&mut *guard, Arc::new(catalogue))
    }
}

impl From<IntentCatalogue> for CatalogueHandle {
    fn from(catalogue: IntentCatalogue) -> Self {
        Self::new(catalogue)
    }
}
