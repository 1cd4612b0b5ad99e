use std::sync::Arc;

use frazeo_protocol::{Case, PartOfSpeech};

/// What the analyzer knows about one surface word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphAnalysis {
    pub lemma: String,
    pub pos: PartOfSpeech,
    pub case: Option<Case>,
}

impl MorphAnalysis {
    pub fn new(lemma: impl Into<String>, pos: PartOfSpeech, case: Option<Case>) -> Self {
        Self {
            lemma: lemma.into(),
            pos,
            case,
        }
    }

    /// Best guess for a word no dictionary knows: the lowercased word is its own
    /// lemma, digit-only words are numerals, everything else is untagged.
    pub fn guess(word: &str) -> Self {
        let lemma = word.to_lowercase();
        let pos = if !lemma.is_empty() && lemma.chars().all(|c| c.is_numeric()) {
            PartOfSpeech::Numeral
        } else {
            PartOfSpeech::Unknown
        };
        Self { lemma, pos, case: None }
    }
}

/// The morphological analyzer the pipeline is built against.
///
/// Implementations must be deterministic and total: an unknown word gets a
/// best guess, never an error.
pub trait MorphOracle: Send + Sync {
    fn analyze(&self, word: &str) -> MorphAnalysis;

    fn lemma(&self, word: &str) -> String {
        self.analyze(word).lemma
    }

    fn pos(&self, word: &str) -> PartOfSpeech {
        self.analyze(word).pos
    }
}

impl<O: MorphOracle + ?Sized> MorphOracle for &O {
    fn analyze(&self, word: &str) -> MorphAnalysis {
        (**self).analyze(word)
    }
}

impl<O: MorphOracle + ?Sized> MorphOracle for Box<O> {
    fn analyze(&self, word: &str) -> MorphAnalysis {
        (**self).analyze(word)
    }
}

impl<O: MorphOracle + ?Sized> MorphOracle for Arc<O> {
    fn analyze(&self, word: &str) -> MorphAnalysis {
        (**self).analyze(word)
    }
}
