//! Part-of-speech pattern classification of candidate phrases.
//!
//! Rules are plain data ([`PatternRegistry`]); [`Classifier`] evaluates them
//! against the tags and cases an oracle assigns to a phrase's words.

pub mod pattern;
pub mod registry;
pub mod tags;

use frazeo_morph::MorphOracle;
use frazeo_protocol::{Case, PartOfSpeech};

pub use crate::pattern::{Atom, CaseConstraint, PatternDefinition};
pub use crate::registry::{PatternRegistry, PatternRule, PatternType};
pub use crate::tags::PhraseTag;

pub struct Classifier<'o, O: ?Sized> {
    oracle: &'o O,
    registry: PatternRegistry,
}

impl<'o, O: MorphOracle + ?Sized> Classifier<'o, O> {
    pub fn new(oracle: &'o O, registry: PatternRegistry) -> Self {
        Self { oracle, registry }
    }

    pub fn standard(oracle: &'o O) -> Self {
        Self::new(oracle, PatternRegistry::standard())
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Tag and case of every word, in order.
    pub fn tag_sequence<S: AsRef<str>>(&self, words: &[S]) -> (Vec<PhraseTag>, Vec<Option<Case>>) {
        words
            .iter()
            .map(|word| {
                let parsed = self.oracle.analyze(word.as_ref());
                (PhraseTag::from(parsed.pos), parsed.case)
            })
            .unzip()
    }

    /// Classifies a phrase given its words as written, so case constraints
    /// see the actual inflections.
    pub fn classify<S: AsRef<str>>(&self, words: &[S]) -> Option<PatternType> {
        if words.is_empty() {
            return None;
        }
        let (tags, cases) = self.tag_sequence(words);
        self.registry.classify_tags(&tags, &cases)
    }

    /// Classifies a phrase seen in several inflections. The earliest
    /// registered rule that any form satisfies wins, whatever the order of the
    /// forms; the index returned is the first form satisfying that rule.
    pub fn classify_forms<S: AsRef<str>>(&self, forms: &[&[S]]) -> Option<(PatternType, usize)> {
        forms
            .iter()
            .enumerate()
            .filter_map(|(idx, words)| Some((self.classify(words)?, idx)))
            .min_by_key(|&(kind, idx)| (self.registry.precedence(kind), idx))
    }

    pub fn classify_phrase(&self, phrase: &str) -> Option<PatternType> {
        let words = phrase.split_whitespace().collect::<Vec<_>>();
        self.classify(&words)
    }

    /// Lemma of the last noun in the phrase, or an empty string.
    pub fn head_noun_lemma<S: AsRef<str>>(&self, words: &[S]) -> String {
        words
            .iter()
            .rev()
            .map(|w| self.oracle.analyze(w.as_ref()))
            .find(|parsed| parsed.pos == PartOfSpeech::Noun)
            .map(|parsed| parsed.lemma)
            .unwrap_or_default()
    }
}
