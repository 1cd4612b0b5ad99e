//! TF-IDF weighting over n-gram features.
//!
//! Weights are raw counts times the smoothed idf `ln((1 + n) / (1 + df)) + 1`,
//! L2-normalized per document. Features are numbered in the order they are
//! first seen, which is also the final tie-break when ranking.

use frazeo_morph::MorphOracle;
use frazeo_parser::{is_word_char, Lemmatizer};
use rustc_hash::{FxHashMap, FxHashSet};

/// Turns a text into its list of features (with repeats).
pub trait Analyzer {
    fn features(&self, text: &str) -> Vec<String>;
}

/// Lemmatized n-grams that never cross punctuation.
pub struct LemmaAnalyzer<'o, O: ?Sized> {
    lemmatizer: Lemmatizer<'o, O>,
    max_n: usize,
}

impl<'o, O: MorphOracle + ?Sized> LemmaAnalyzer<'o, O> {
    pub fn new(oracle: &'o O, max_n: usize) -> Self {
        Self {
            lemmatizer: Lemmatizer::new(oracle),
            max_n,
        }
    }
}

impl<'o, O: MorphOracle + ?Sized> Analyzer for LemmaAnalyzer<'o, O> {
    fn features(&self, text: &str) -> Vec<String> {
        self.lemmatizer
            .lemma_ngrams(text, self.max_n)
            .into_iter()
            .map(|g| g.phrase)
            .collect()
    }
}

/// Lowercased surface n-grams over runs of two or more word characters
/// ([`is_word_char`], the tokenizer's rule).
///
/// No lemmatization: used where many short texts have to be comparable to
/// each other rather than linguistically normalized.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceAnalyzer {
    max_n: usize,
}

impl SurfaceAnalyzer {
    pub fn new(max_n: usize) -> Self {
        Self { max_n }
    }
}

impl Analyzer for SurfaceAnalyzer {
    fn features(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let words = lower
            .split(|c: char| !is_word_char(c))
            .filter(|w| w.chars().nth(1).is_some())
            .collect::<Vec<_>>();

        let mut features = Vec::new();
        for n in 1..=self.max_n {
            for window in words.windows(n) {
                features.push(window.join(" "));
            }
        }
        features
    }
}

impl<A: Analyzer + ?Sized> Analyzer for &A {
    fn features(&self, text: &str) -> Vec<String> {
        (**self).features(text)
    }
}

/// Sparse, L2-normalized weight vector keyed by feature index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    /// Sorted by feature index
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_weights(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_unstable_by_key(|&(idx, _)| idx);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, feature: usize) -> f64 {
        self.entries
            .binary_search_by_key(&feature, |&(idx, _)| idx)
            .map_or(0.0, |pos| self.entries[pos].1)
    }

    /// Both vectors are unit length, so this is the cosine similarity.
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut dot = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    dot += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        dot
    }
}

/// Feature vocabulary and idf table fitted on one document set.
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    index: FxHashMap<String, usize>,
    features: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfModel {
    /// Fits on already analyzed documents.
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let mut index: FxHashMap<String, usize> = FxHashMap::default();
        let mut features = Vec::new();
        let mut doc_freq: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen = FxHashSet::default();
            for feature in doc {
                let idx = *index.entry(feature.clone()).or_insert_with(|| {
                    features.push(feature.clone());
                    doc_freq.push(0);
                    features.len() - 1
                });
                if seen.insert(idx) {
                    doc_freq[idx] += 1;
                }
            }
        }

        let n = documents.len() as f64;
        let idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { index, features, idf }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn feature(&self, idx: usize) -> &str {
        &self.features[idx]
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn idf(&self, idx: usize) -> f64 {
        self.idf[idx]
    }

    /// Features outside the fitted vocabulary are ignored.
    pub fn vectorize(&self, features: &[String]) -> SparseVector {
        let mut counts: FxHashMap<usize, f64> = FxHashMap::default();
        for feature in features {
            if let Some(&idx) = self.index.get(feature) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        SparseVector::from_weights(
            counts
                .into_iter()
                .map(|(idx, count)| (idx, count * self.idf[idx]))
                .collect(),
        )
    }
}

/// An analyzer together with a model fitted through it. Built fresh for
/// every call; never shared between document sets.
pub struct Vectorizer<A> {
    analyzer: A,
    model: TfidfModel,
}

impl<A: Analyzer> Vectorizer<A> {
    pub fn fit<S: AsRef<str>>(analyzer: A, documents: &[S]) -> Self {
        Self::fit_transform(analyzer, documents).0
    }

    pub fn fit_transform<S: AsRef<str>>(analyzer: A, documents: &[S]) -> (Self, Vec<SparseVector>) {
        let analyzed = documents
            .iter()
            .map(|d| analyzer.features(d.as_ref()))
            .collect::<Vec<_>>();

        let model = TfidfModel::fit(&analyzed);
        let vectors = analyzed.iter().map(|features| model.vectorize(features)).collect();

        (Self { analyzer, model }, vectors)
    }

    pub fn transform(&self, text: &str) -> SparseVector {
        self.model.vectorize(&self.analyzer.features(text))
    }

    pub fn model(&self) -> &TfidfModel {
        &self.model
    }
}
