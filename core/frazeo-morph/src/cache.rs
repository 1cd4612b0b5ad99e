use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::oracle::{MorphAnalysis, MorphOracle};

/// Memoizes another oracle by exact surface form. Analyses never change for a
/// given word, so entries are never invalidated.
pub struct CachedOracle<O> {
    inner: O,
    cache: RwLock<FxHashMap<String, MorphAnalysis>>,
}

impl<O: MorphOracle> CachedOracle<O> {
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            cache: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: MorphOracle> MorphOracle for CachedOracle<O> {
    fn analyze(&self, word: &str) -> MorphAnalysis {
        if let Some(hit) = self.cache.read().get(word) {
            return hit.clone();
        }

        let parsed = self.inner.analyze(word);
        self.cache.write().insert(word.to_string(), parsed.clone());
        parsed
    }
}
