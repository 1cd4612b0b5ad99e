use frazeo_classifier::PatternRegistry;
use frazeo_parser::DEFAULT_MAX_N;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default ranking cut-off: large enough to keep every positive n-gram.
pub const DEFAULT_TOP_K: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrazeoConfig {
    /// Longest n-gram generated for scoring and search
    pub ngram_max: usize,
    /// How many ranked n-grams are classified
    pub top_k: usize,
    /// Also classify the prepositional and adverbial phrase types
    pub extended_patterns: bool,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub top_k: usize,
    /// Hits must score strictly above this
    pub threshold: f64,
    /// Sentences returned per term and document
    pub batch_top_k: usize,
}

impl Default for FrazeoConfig {
    fn default() -> Self {
        Self {
            ngram_max: DEFAULT_MAX_N,
            top_k: DEFAULT_TOP_K,
            extended_patterns: false,
            search: SearchConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            threshold: 0.0,
            batch_top_k: 3,
        }
    }
}

impl FrazeoConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ngram_max == 0 {
            return Err(ConfigError::Invalid("ngram_max must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.search.threshold) {
            return Err(ConfigError::Invalid(format!(
                "search.threshold must be in [0, 1), got {}",
                self.search.threshold
            )));
        }
        Ok(())
    }

    pub fn registry(&self) -> PatternRegistry {
        if self.extended_patterns {
            PatternRegistry::extended()
        } else {
            PatternRegistry::standard()
        }
    }
}
