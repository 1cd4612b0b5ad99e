//! TF-IDF scoring and ranking of lemmatized n-grams, and the phrase report
//! built on top of it.

pub mod analysis;
pub mod config;
pub mod error;
pub mod scoring;
pub mod tfidf;

pub use crate::analysis::{analyze_text_with_stats, PhraseAnalyzer, PhraseReport, ScoredPhrase};
pub use crate::config::{FrazeoConfig, SearchConfig, DEFAULT_TOP_K};
pub use crate::error::{AnalysisError, ConfigError};
pub use crate::scoring::{extract_top_ngrams, rank_features, ranking_order, score_documents, top_k, ScoredFeature};
pub use crate::tfidf::{Analyzer, LemmaAnalyzer, SparseVector, SurfaceAnalyzer, TfidfModel, Vectorizer};
