use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::{DocumentId, ParadigmId, TermId};
use crate::morphology::{Case, PartOfSpeech};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// A fully spelled-out inflected form (irregular words, pronouns, anything
/// not covered by a paradigm).
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct WordForm {
    pub form: String,
    pub lemma: String,
    pub pos: PartOfSpeech,
    #[cfg_attr(feature = "serde", serde(default))]
    pub case: Option<Case>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Ending {
    pub suffix: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub case: Option<Case>,
}

/// Inflection class: every stem attached to it forms its lemma as
/// `stem + lemma_suffix` and its inflections as `stem + ending.suffix`.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Paradigm {
    pub id: ParadigmId,
    pub pos: PartOfSpeech,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lemma_suffix: String,
    pub endings: Vec<Ending>,
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Stem {
    pub stem: String,
    pub paradigm: ParadigmId,
}

#[derive(Debug, Clone, Default, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub forms: Vec<WordForm>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stems: Vec<Stem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub paradigms: Vec<Paradigm>,
}

impl Lexicon {
    pub fn new(version: u32) -> Self {
        Self { version, ..Self::default() }
    }

    pub fn with_form(mut self, form: &str, lemma: &str, pos: PartOfSpeech, case: Option<Case>) -> Self {
        self.forms.push(WordForm {
            form: form.into(),
            lemma: lemma.into(),
            pos,
            case,
        });
        self
    }

    pub fn with_paradigm(mut self, paradigm: Paradigm) -> Self {
        self.paradigms.push(paradigm);
        self
    }

    pub fn with_stem(mut self, stem: &str, paradigm: ParadigmId) -> Self {
        self.stems.push(Stem { stem: stem.into(), paradigm });
        self
    }
}

/// Role of a dictionary record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PhraseKind {
    /// Extracted automatically, not yet promoted into the dictionary.
    Phrase = 0,
    Term = 1,
    Synonym = 2,
    Definition = 3,
}

impl PhraseKind {
    /// Display color used when highlighting a record of this kind.
    pub fn color(self) -> &'static str {
        match self {
            PhraseKind::Phrase => "gray",
            PhraseKind::Term => "black",
            PhraseKind::Synonym => "green",
            PhraseKind::Definition => "orange",
        }
    }
}

/// A persisted dictionary record. `connections` are the ids this record
/// links to (a term links to its synonyms and definitions).
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct TermRecord {
    pub id: TermId,
    pub text: String,
    pub kind: PhraseKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub connections: Vec<TermId>,
}

/// A source document split into sentence-level batches.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Document {
    pub id: DocumentId,
    pub content: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub batches: Vec<String>,
}
