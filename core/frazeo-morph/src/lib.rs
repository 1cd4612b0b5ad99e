//! Morphological analysis for the phrase pipeline.
//!
//! The pipeline only ever talks to [`MorphOracle`]; [`LexiconOracle`] is the
//! dictionary-backed implementation and [`CachedOracle`] memoizes any oracle.

pub mod cache;
pub mod error;
pub mod lexicon;
pub mod oracle;

pub use cache::CachedOracle;
pub use error::LexiconError;
pub use lexicon::{decode_lexicon, encode_lexicon, LexiconOracle};
pub use oracle::{MorphAnalysis, MorphOracle};
