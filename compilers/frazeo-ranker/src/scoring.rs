use std::cmp::Ordering;

use frazeo_morph::MorphOracle;
use serde::Serialize;
use tracing::debug;

use crate::error::AnalysisError;
use crate::tfidf::{Analyzer, LemmaAnalyzer, SparseVector, TfidfModel, Vectorizer};

/// A feature with its summed TF-IDF weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFeature {
    pub phrase: String,
    pub weight: f64,
    /// Number of words in the phrase
    pub length: usize,
    /// Discovery order of the feature
    #[serde(skip)]
    pub order: usize,
}

/// Weight descending, then length descending, then discovery order.
pub fn ranking_order(a: &ScoredFeature, b: &ScoredFeature) -> Ordering {
    b.weight
        .total_cmp(&a.weight)
        .then_with(|| b.length.cmp(&a.length))
        .then_with(|| a.order.cmp(&b.order))
}

/// Sorts into ranking order and keeps the first `k`.
pub fn top_k(mut scored: Vec<ScoredFeature>, k: usize) -> Vec<ScoredFeature> {
    scored.sort_by(ranking_order);
    scored.truncate(k);
    scored
}

/// Sums every feature's weight over `vectors` and ranks the positive ones.
pub fn rank_features(model: &TfidfModel, vectors: &[SparseVector], k: usize) -> Vec<ScoredFeature> {
    let mut totals = vec![0.0; model.len()];
    for vector in vectors {
        for &(idx, weight) in vector.entries() {
            totals[idx] += weight;
        }
    }

    let scored = totals
        .into_iter()
        .enumerate()
        .filter(|&(_, weight)| weight > 0.0)
        .map(|(order, weight)| {
            let phrase = model.feature(order).to_string();
            ScoredFeature {
                length: phrase.split_whitespace().count(),
                phrase,
                weight,
                order,
            }
        })
        .collect();

    top_k(scored, k)
}

/// Scores a corpus with any analyzer. Fails on empty input and on input
/// without a single feature.
pub fn score_documents<A: Analyzer, S: AsRef<str>>(
    analyzer: A,
    documents: &[S],
    k: usize,
) -> Result<Vec<ScoredFeature>, AnalysisError> {
    if documents.iter().all(|d| d.as_ref().is_empty()) {
        return Err(AnalysisError::EmptyInput);
    }

    let (vectorizer, vectors) = Vectorizer::fit_transform(analyzer, documents);
    if vectorizer.model().is_empty() {
        return Err(AnalysisError::EmptyVocabulary);
    }

    debug!(
        documents = documents.len(),
        features = vectorizer.model().len(),
        "fitted tf-idf"
    );
    Ok(rank_features(vectorizer.model(), &vectors, k))
}

/// Top `k` lemmatized n-grams of one text.
pub fn extract_top_ngrams<O: MorphOracle + ?Sized>(
    oracle: &O,
    text: &str,
    max_n: usize,
    k: usize,
) -> Result<Vec<ScoredFeature>, AnalysisError> {
    score_documents(LemmaAnalyzer::new(oracle, max_n), &[text], k)
}
