//! Cosine-similarity retrieval of terms and sentences, inflection-aware
//! highlighting, and dictionary search across documents.

pub mod dictionary;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod similarity;

pub use crate::dictionary::{DictionarySearch, SentenceMatch, TermMatch};
pub use crate::error::HighlightError;
pub use crate::graph::TermGraph;
pub use crate::highlight::{HighlightSpan, HighlightedSentence, Highlighter};
pub use crate::similarity::{BatchIndex, SearchHit, Searchable, SimilaritySearch};
