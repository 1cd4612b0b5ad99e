use std::collections::BTreeSet;

use frazeo_classifier::{Classifier, PatternType};
use frazeo_morph::MorphOracle;
use frazeo_parser::Lemmatizer;
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::debug;

use crate::config::FrazeoConfig;
use crate::error::AnalysisError;
use crate::scoring::rank_features;
use crate::tfidf::TfidfModel;

/// A ranked phrase that matched one of the grammatical patterns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPhrase {
    /// Lemmatized phrase
    pub text: String,
    #[serde(rename = "type")]
    pub kind: PatternType,
    pub pattern_description: &'static str,
    pub tfidf_score: f64,
    pub length: usize,
    /// Lemma of the last noun
    pub head_noun: String,
    /// The written form the pattern was matched on
    pub surface: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PhraseReport {
    pub phrases: Vec<ScoredPhrase>,
    pub total_phrases: usize,
    pub unique_phrase_types: usize,
}

impl PhraseReport {
    fn from_phrases(phrases: Vec<ScoredPhrase>) -> Self {
        let unique_phrase_types = phrases
            .iter()
            .map(|p| p.kind.label())
            .collect::<BTreeSet<_>>()
            .len();

        Self {
            total_phrases: phrases.len(),
            unique_phrase_types,
            phrases,
        }
    }

    /// Phrases grouped by head noun, alphabetically by text inside a group.
    pub fn by_head_noun(&self) -> Vec<&ScoredPhrase> {
        let mut grouped = self.phrases.iter().collect::<Vec<_>>();
        grouped.sort_by(|a, b| (&a.head_noun, &a.text).cmp(&(&b.head_noun, &b.text)));
        grouped
    }

    pub fn of_type(&self, kind: PatternType) -> impl Iterator<Item = &ScoredPhrase> {
        self.phrases.iter().filter(move |p| p.kind == kind)
    }
}

/// Extracts, ranks and classifies the phrases of a text.
pub struct PhraseAnalyzer<'o, O: ?Sized> {
    oracle: &'o O,
    classifier: Classifier<'o, O>,
    config: FrazeoConfig,
}

impl<'o, O: MorphOracle + ?Sized> PhraseAnalyzer<'o, O> {
    pub fn new(oracle: &'o O, config: FrazeoConfig) -> Self {
        Self {
            oracle,
            classifier: Classifier::new(oracle, config.registry()),
            config,
        }
    }

    pub fn config(&self) -> &FrazeoConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier<'o, O> {
        &self.classifier
    }

    pub fn analyze(&self, text: &str) -> Result<PhraseReport, AnalysisError> {
        if text.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        // 1. Lemmatized n-grams, remembering every distinct way each phrase was written
        let grams = Lemmatizer::new(self.oracle).lemma_ngrams(text, self.config.ngram_max);
        let mut surfaces: FxHashMap<&str, Vec<&[&str]>> = FxHashMap::default();
        for gram in &grams {
            let forms = surfaces.entry(gram.phrase.as_str()).or_default();
            if !forms.contains(&gram.words.as_slice()) {
                forms.push(gram.words.as_slice());
            }
        }

        // 2. TF-IDF over the single document
        let features = grams.iter().map(|g| g.phrase.clone()).collect::<Vec<_>>();
        let model = TfidfModel::fit(std::slice::from_ref(&features));
        if model.is_empty() {
            return Err(AnalysisError::EmptyVocabulary);
        }
        let vector = model.vectorize(&features);
        let ranked = rank_features(&model, std::slice::from_ref(&vector), self.config.top_k);

        // 3. Keep what the classifier recognizes; ranking order carries over
        let phrases = ranked
            .into_iter()
            .filter_map(|scored| {
                let forms = surfaces.get(scored.phrase.as_str())?;
                let (kind, matched) = self.classifier.classify_forms(forms)?;
                let words = forms[matched];
                Some(ScoredPhrase {
                    kind,
                    pattern_description: kind.description(),
                    tfidf_score: scored.weight,
                    length: scored.length,
                    head_noun: self.classifier.head_noun_lemma(words),
                    surface: words.join(" "),
                    text: scored.phrase,
                })
            })
            .collect::<Vec<_>>();

        debug!(
            features = model.len(),
            classified = phrases.len(),
            "analyzed text"
        );
        Ok(PhraseReport::from_phrases(phrases))
    }
}

/// One-shot analysis with the standard settings.
pub fn analyze_text_with_stats<O: MorphOracle + ?Sized>(oracle: &O, text: &str) -> Result<PhraseReport, AnalysisError> {
    PhraseAnalyzer::new(oracle, FrazeoConfig::default()).analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frazeo_morph::LexiconOracle;
    use frazeo_protocol::{Case, Lexicon, PartOfSpeech};

    fn oracle() -> LexiconOracle {
        LexiconOracle::from_lexicon(
            Lexicon::new(1)
                .with_form("быстрый", "быстрый", PartOfSpeech::Adjective, Some(Case::Nominative))
                .with_form("рыжий", "рыжий", PartOfSpeech::Adjective, Some(Case::Nominative))
                .with_form("кот", "кот", PartOfSpeech::Noun, Some(Case::Nominative))
                .with_form("кота", "кот", PartOfSpeech::Noun, Some(Case::Genitive))
                .with_form("хвост", "хвост", PartOfSpeech::Noun, Some(Case::Nominative))
                .with_form("бежит", "бежать", PartOfSpeech::Verb, None),
        )
    }

    fn texts(report: &PhraseReport) -> Vec<&str> {
        report.phrases.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_analyze_ranks_and_classifies() {
        let oracle = oracle();
        let analyzer = PhraseAnalyzer::new(&oracle, FrazeoConfig::default());
        let report = analyzer.analyze("быстрый кот, кот, рыжий кот").unwrap();

        assert_eq!(texts(&report), vec!["кот", "быстрый кот", "рыжий кот"]);
        assert_eq!(report.total_phrases, 3);
        assert_eq!(report.unique_phrase_types, 2);
        assert_eq!(report.phrases[0].kind, PatternType::SingleWord);
        assert_eq!(report.phrases[1].kind, PatternType::Adjectival);
        assert_eq!(report.phrases[1].pattern_description, "Прил + Сущ");
        assert_eq!(report.phrases[1].head_noun, "кот");
    }

    #[test]
    fn test_case_checked_on_surface_form() {
        let oracle = oracle();
        let analyzer = PhraseAnalyzer::new(&oracle, FrazeoConfig::default());
        let report = analyzer.analyze("кота хвост").unwrap();

        let genitive = report.of_type(PatternType::Genitive).collect::<Vec<_>>();
        assert_eq!(genitive.len(), 1);
        assert_eq!(genitive[0].text, "кот хвост");
        assert_eq!(genitive[0].surface, "кота хвост");
    }

    #[test]
    fn test_type_independent_of_occurrence_order() {
        let oracle = oracle();
        let analyzer = PhraseAnalyzer::new(&oracle, FrazeoConfig::default());

        for text in ["кота хвост. кот хвост. кота хвост", "кот хвост. кота хвост. кота хвост"] {
            let report = analyzer.analyze(text).unwrap();
            let genitive = report.of_type(PatternType::Genitive).collect::<Vec<_>>();

            assert_eq!(genitive.len(), 1, "{text}");
            assert_eq!(genitive[0].text, "кот хвост");
            assert_eq!(genitive[0].surface, "кота хвост");
        }
    }

    #[test]
    fn test_unclassified_phrases_are_dropped() {
        let oracle = oracle();
        let analyzer = PhraseAnalyzer::new(&oracle, FrazeoConfig::default());
        let report = analyzer.analyze("кот бежит").unwrap();

        assert_eq!(texts(&report), vec!["кот"]);
    }

    #[test]
    fn test_errors() {
        let oracle = oracle();
        let analyzer = PhraseAnalyzer::new(&oracle, FrazeoConfig::default());

        assert_eq!(analyzer.analyze(""), Err(AnalysisError::EmptyInput));
        assert_eq!(analyzer.analyze("a, b"), Err(AnalysisError::EmptyVocabulary));
    }

    #[test]
    fn test_by_head_noun() {
        let oracle = oracle();
        let analyzer = PhraseAnalyzer::new(&oracle, FrazeoConfig::default());
        let report = analyzer.analyze("рыжий хвост, быстрый кот").unwrap();

        let grouped: Vec<_> = report.by_head_noun().iter().map(|p| p.text.as_str()).collect();
        assert_eq!(grouped, vec!["быстрый кот", "кот", "рыжий хвост", "хвост"]);
    }
}
