use frazeo_protocol::{Lexicon, Paradigm, ParadigmId};
use rkyv::AlignedVec;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::LexiconError;
use crate::oracle::{MorphAnalysis, MorphOracle};

/// Dictionary-backed oracle.
///
/// Explicit word forms are consulted first, then stem + paradigm ending
/// analysis (longest stem wins). Anything else falls back to
/// [`MorphAnalysis::guess`].
#[derive(Debug, Clone, Default)]
pub struct LexiconOracle {
    version: u32,
    forms: FxHashMap<String, MorphAnalysis>,
    stems: FxHashMap<String, Vec<ParadigmId>>,
    paradigms: FxHashMap<ParadigmId, Paradigm>,
}

impl LexiconOracle {
    pub fn from_lexicon(lexicon: Lexicon) -> Self {
        let mut forms = FxHashMap::default();
        for entry in lexicon.forms {
            // First entry for a form wins, like the first parse of an ambiguous word
            forms
                .entry(entry.form.to_lowercase())
                .or_insert_with(|| MorphAnalysis::new(entry.lemma.to_lowercase(), entry.pos, entry.case));
        }

        let mut stems: FxHashMap<String, Vec<ParadigmId>> = FxHashMap::default();
        for stem in lexicon.stems {
            stems.entry(stem.stem.to_lowercase()).or_default().push(stem.paradigm);
        }

        let paradigms = lexicon
            .paradigms
            .into_iter()
            .map(|p| (p.id, p))
            .collect::<FxHashMap<_, _>>();

        debug!(
            version = lexicon.version,
            forms = forms.len(),
            stems = stems.len(),
            paradigms = paradigms.len(),
            "lexicon loaded"
        );

        Self {
            version: lexicon.version,
            forms,
            stems,
            paradigms,
        }
    }

    /// Loads a lexicon compiled with [`encode_lexicon`]. The archive is
    /// validated before anything is read from it.
    pub fn from_archive(bytes: &[u8]) -> Result<Self, LexiconError> {
        Ok(Self::from_lexicon(decode_lexicon(bytes)?))
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    fn analyze_by_paradigm(&self, word: &str) -> Option<MorphAnalysis> {
        // Candidate stem boundaries, longest stem first
        let boundaries = word
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(word.len()))
            .collect::<Vec<_>>();

        for &split in boundaries.iter().rev() {
            let (stem, ending) = word.split_at(split);
            let Some(paradigm_ids) = self.stems.get(stem) else {
                continue;
            };

            for id in paradigm_ids {
                let Some(paradigm) = self.paradigms.get(id) else {
                    continue;
                };
                if let Some(rule) = paradigm.endings.iter().find(|e| e.suffix == ending) {
                    return Some(MorphAnalysis::new(
                        format!("{}{}", stem, paradigm.lemma_suffix),
                        paradigm.pos,
                        rule.case,
                    ));
                }
            }
        }
        None
    }
}

impl MorphOracle for LexiconOracle {
    fn analyze(&self, word: &str) -> MorphAnalysis {
        let lower = word.to_lowercase();

        if let Some(found) = self.forms.get(&lower) {
            return found.clone();
        }

        self.analyze_by_paradigm(&lower)
            .unwrap_or_else(|| MorphAnalysis::guess(&lower))
    }
}

pub fn encode_lexicon(lexicon: &Lexicon) -> Result<Vec<u8>, LexiconError> {
    let bytes = rkyv::to_bytes::<_, 1024>(lexicon).map_err(|e| LexiconError::Encode(format!("{e:?}")))?;
    Ok(bytes.to_vec())
}

pub fn decode_lexicon(bytes: &[u8]) -> Result<Lexicon, LexiconError> {
    // File contents are not guaranteed to be aligned for the archive
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);

    rkyv::from_bytes::<Lexicon>(aligned.as_slice()).map_err(|e| LexiconError::Corrupt(format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use frazeo_protocol::{Case, Ending, PartOfSpeech};

    fn noun_paradigm() -> Paradigm {
        Paradigm {
            id: ParadigmId(1),
            pos: PartOfSpeech::Noun,
            lemma_suffix: "а".into(),
            endings: vec![
                Ending { suffix: "а".into(), case: Some(Case::Nominative) },
                Ending { suffix: "и".into(), case: Some(Case::Genitive) },
                Ending { suffix: "у".into(), case: Some(Case::Accusative) },
            ],
        }
    }

    fn lexicon() -> Lexicon {
        Lexicon::new(3)
            .with_paradigm(noun_paradigm())
            .with_stem("книг", ParadigmId(1))
            .with_form("в", "в", PartOfSpeech::Preposition, None)
            .with_form("книгу", "книжка", PartOfSpeech::Noun, Some(Case::Accusative))
    }

    #[test]
    fn test_paradigm_analysis() {
        let oracle = LexiconOracle::from_lexicon(lexicon());

        let parsed = oracle.analyze("Книги");
        assert_eq!(parsed.lemma, "книга");
        assert_eq!(parsed.pos, PartOfSpeech::Noun);
        assert_eq!(parsed.case, Some(Case::Genitive));
    }

    #[test]
    fn test_explicit_form_beats_paradigm() {
        let oracle = LexiconOracle::from_lexicon(lexicon());
        assert_eq!(oracle.lemma("книгу"), "книжка");
    }

    #[test]
    fn test_unknown_word_is_guessed() {
        let oracle = LexiconOracle::from_lexicon(lexicon());

        let parsed = oracle.analyze("Hello");
        assert_eq!(parsed, MorphAnalysis::new("hello", PartOfSpeech::Unknown, None));
        assert_eq!(oracle.pos("2024"), PartOfSpeech::Numeral);
    }

    #[test]
    fn test_archive_round_trip() {
        let bytes = encode_lexicon(&lexicon()).expect("encode");
        let oracle = LexiconOracle::from_archive(&bytes).expect("decode");

        assert_eq!(oracle.version(), 3);
        assert_eq!(oracle.lemma("книгой"), "книгой");
        assert_eq!(oracle.lemma("книгу"), "книжка");
    }

    #[test]
    fn test_garbage_archive_rejected() {
        let result = LexiconOracle::from_archive(b"not a lexicon");
        assert!(matches!(result, Err(LexiconError::Corrupt(_))));
    }
}
