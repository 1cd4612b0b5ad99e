use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("lexicon archive is corrupt: {0}")]
    Corrupt(String),
    #[error("failed to encode lexicon: {0}")]
    Encode(String),
}
