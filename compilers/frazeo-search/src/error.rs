use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("could not build highlight pattern: {0}")]
    Pattern(#[from] regex::Error),
}
