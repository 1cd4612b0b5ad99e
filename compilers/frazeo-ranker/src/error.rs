use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Scoring was asked for empty text. Callers check before invoking the pipeline.
    #[error("empty input text")]
    EmptyInput,
    /// The text produced no n-grams (only punctuation or one-letter words).
    #[error("empty vocabulary: text contains no scorable n-grams")]
    EmptyVocabulary,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
