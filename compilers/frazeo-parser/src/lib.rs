pub mod ngram;
pub mod parser;
pub mod token;

use frazeo_morph::MorphOracle;
use tracing::trace;

pub use crate::ngram::{generate_ngrams, NGram, DEFAULT_MAX_N};
pub use crate::parser::{is_word_char, split_sentences, tokenize};
pub use crate::token::{Span, Token, TokenKind};

/// Space-joined lemmas of an n-gram; the unit scoring and classification work on.
pub type LemmatizedPhrase = String;

/// A lemmatized n-gram together with the words it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LemmaNGram<'a> {
    pub phrase: LemmatizedPhrase,
    pub words: Vec<&'a str>,
}

/// Maps words and n-grams to lemmas through an oracle.
pub struct Lemmatizer<'o, O: ?Sized> {
    oracle: &'o O,
}

impl<'o, O: MorphOracle + ?Sized> Lemmatizer<'o, O> {
    pub fn new(oracle: &'o O) -> Self {
        Self { oracle }
    }

    pub fn oracle(&self) -> &'o O {
        self.oracle
    }

    /// Hyphenated words are lemmatized part by part: "красно-белого" → "красно-белый".
    pub fn lemmatize_word(&self, word: &str) -> String {
        if word.contains('-') {
            word.split('-')
                .map(|part| self.oracle.lemma(part))
                .collect::<Vec<_>>()
                .join("-")
        } else {
            self.oracle.lemma(word)
        }
    }

    pub fn lemmatize(&self, ngram: &NGram<'_, '_>) -> LemmatizedPhrase {
        ngram
            .words()
            .map(|w| self.lemmatize_word(w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Primary entry point: Text -> lemmatized n-grams of length 1..=`max_n`.
    pub fn lemma_ngrams<'a>(&self, text: &'a str, max_n: usize) -> Vec<LemmaNGram<'a>> {
        let tokens = tokenize(text);
        let ngrams = generate_ngrams(&tokens, max_n);
        trace!(tokens = tokens.len(), ngrams = ngrams.len(), "generated n-grams");

        ngrams
            .iter()
            .map(|ngram| LemmaNGram {
                phrase: self.lemmatize(ngram),
                words: ngram.words().collect(),
            })
            .collect()
    }

    /// Lemmatizes every word token of `text`, ignoring n-gram boundaries.
    pub fn lemmatize_text(&self, text: &str) -> LemmatizedPhrase {
        tokenize(text)
            .iter()
            .filter(|t| t.is_word())
            .map(|t| self.lemmatize_word(t.text))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
