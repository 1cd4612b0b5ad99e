use frazeo_protocol::PartOfSpeech;

/// Coarse tag a phrase pattern is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseTag {
    Noun,
    /// Full or short adjective or participle
    Adjective,
    Adverb,
    Preposition,
    /// Anything else; only a wildcard atom accepts it
    Unknown,
}

impl PhraseTag {
    pub fn short(self) -> &'static str {
        match self {
            PhraseTag::Noun => "N",
            PhraseTag::Adjective => "ADJ",
            PhraseTag::Adverb => "ADV",
            PhraseTag::Preposition => "PREP",
            PhraseTag::Unknown => "?",
        }
    }
}

impl From<PartOfSpeech> for PhraseTag {
    fn from(pos: PartOfSpeech) -> Self {
        match pos {
            PartOfSpeech::Noun => PhraseTag::Noun,
            p if p.is_adjective_like() => PhraseTag::Adjective,
            PartOfSpeech::Adverb => PhraseTag::Adverb,
            PartOfSpeech::Preposition => PhraseTag::Preposition,
            _ => PhraseTag::Unknown,
        }
    }
}
