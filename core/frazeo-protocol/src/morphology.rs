use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Grammatical case of a Russian nominal.
///
/// Serialized names follow the OpenCorpora tag set so lexicon sources
/// exported from existing dictionaries load without a mapping step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Case {
    #[cfg_attr(feature = "serde", serde(rename = "nomn"))]
    Nominative = 0,
    #[cfg_attr(feature = "serde", serde(rename = "gent"))]
    Genitive = 1,
    #[cfg_attr(feature = "serde", serde(rename = "datv"))]
    Dative = 2,
    #[cfg_attr(feature = "serde", serde(rename = "accs"))]
    Accusative = 3,
    #[cfg_attr(feature = "serde", serde(rename = "ablt"))]
    Instrumental = 4,
    #[cfg_attr(feature = "serde", serde(rename = "loct"))]
    Prepositional = 5,
    #[cfg_attr(feature = "serde", serde(rename = "voct"))]
    Vocative = 6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PartOfSpeech {
    #[cfg_attr(feature = "serde", serde(rename = "NOUN"))]
    Noun = 0,
    /// Full adjective (ADJF)
    #[cfg_attr(feature = "serde", serde(rename = "ADJF"))]
    Adjective = 1,
    /// Short adjective (ADJS)
    #[cfg_attr(feature = "serde", serde(rename = "ADJS"))]
    ShortAdjective = 2,
    #[cfg_attr(feature = "serde", serde(rename = "COMP"))]
    Comparative = 3,
    #[cfg_attr(feature = "serde", serde(rename = "PRTF"))]
    Participle = 4,
    #[cfg_attr(feature = "serde", serde(rename = "PRTS"))]
    ShortParticiple = 5,
    #[cfg_attr(feature = "serde", serde(rename = "VERB"))]
    Verb = 6,
    #[cfg_attr(feature = "serde", serde(rename = "INFN"))]
    Infinitive = 7,
    #[cfg_attr(feature = "serde", serde(rename = "GRND"))]
    Gerund = 8,
    #[cfg_attr(feature = "serde", serde(rename = "ADVB"))]
    Adverb = 9,
    #[cfg_attr(feature = "serde", serde(rename = "NUMR"))]
    Numeral = 10,
    #[cfg_attr(feature = "serde", serde(rename = "PREP"))]
    Preposition = 11,
    #[cfg_attr(feature = "serde", serde(rename = "CONJ"))]
    Conjunction = 12,
    #[cfg_attr(feature = "serde", serde(rename = "PRCL"))]
    Particle = 13,
    #[cfg_attr(feature = "serde", serde(rename = "NPRO"))]
    Pronoun = 14,
    #[cfg_attr(feature = "serde", serde(rename = "PRED"))]
    Predicative = 15,
    #[cfg_attr(feature = "serde", serde(rename = "INTJ"))]
    Interjection = 16,
    /// Best guess for words the analyzer could not tag.
    #[cfg_attr(feature = "serde", serde(rename = "UNKN"))]
    Unknown = 17,
}

impl PartOfSpeech {
    /// Full and short adjectives and participles all behave as adjectives inside a phrase.
    pub fn is_adjective_like(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Adjective
                | PartOfSpeech::ShortAdjective
                | PartOfSpeech::Participle
                | PartOfSpeech::ShortParticiple
        )
    }
}

bitflags! {
    /// A set of cases, used by classifier rules to constrain a position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct CaseSet: u8 {
        const NOMINATIVE = 1;
        const GENITIVE = 2;
        const DATIVE = 4;
        const ACCUSATIVE = 8;
        const INSTRUMENTAL = 16;
        const PREPOSITIONAL = 32;
        const VOCATIVE = 64;
    }
}

impl CaseSet {
    /// `false` for a missing case: a constrained position needs a tagged word.
    pub fn admits(self, case: Option<Case>) -> bool {
        case.map_or(false, |c| self.contains(CaseSet::from(c)))
    }
}

impl From<Case> for CaseSet {
    fn from(case: Case) -> Self {
        match case {
            Case::Nominative => CaseSet::NOMINATIVE,
            Case::Genitive => CaseSet::GENITIVE,
            Case::Dative => CaseSet::DATIVE,
            Case::Accusative => CaseSet::ACCUSATIVE,
            Case::Instrumental => CaseSet::INSTRUMENTAL,
            Case::Prepositional => CaseSet::PREPOSITIONAL,
            Case::Vocative => CaseSet::VOCATIVE,
        }
    }
}
