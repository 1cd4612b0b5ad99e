use frazeo_morph::MorphOracle;
use frazeo_parser::Lemmatizer;
use frazeo_protocol::TermRecord;
use frazeo_ranker::{SearchConfig, SparseVector, SurfaceAnalyzer, Vectorizer};
use tracing::debug;

/// Anything whose text can be searched.
pub trait Searchable {
    fn search_text(&self) -> &str;
}

impl Searchable for TermRecord {
    fn search_text(&self) -> &str {
        &self.text
    }
}

impl Searchable for String {
    fn search_text(&self) -> &str {
        self
    }
}

impl Searchable for str {
    fn search_text(&self) -> &str {
        self
    }
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_text(&self) -> &str {
        (**self).search_text()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit<'c, T> {
    /// Position of the candidate in the searched slice
    pub index: usize,
    pub item: &'c T,
    /// Cosine similarity in [0, 1]
    pub score: f64,
}

/// Sentence batches of one document, vectorized once and searched many times.
pub struct BatchIndex {
    vectorizer: Option<Vectorizer<SurfaceAnalyzer>>,
    vectors: Vec<SparseVector>,
}

impl BatchIndex {
    pub fn build<S: AsRef<str>>(batches: &[S], max_n: usize) -> Self {
        if batches.is_empty() {
            return Self {
                vectorizer: None,
                vectors: Vec::new(),
            };
        }

        let (vectorizer, vectors) = Vectorizer::fit_transform(SurfaceAnalyzer::new(max_n), batches);
        Self {
            vectorizer: Some(vectorizer),
            vectors,
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Indices of the `top_k` batches most similar to any of the queries.
    /// A batch scores the maximum similarity over all queries.
    pub fn search<S: AsRef<str>>(&self, queries: &[S], top_k: usize) -> Vec<usize> {
        let Some(vectorizer) = &self.vectorizer else {
            return Vec::new();
        };
        if queries.is_empty() {
            return Vec::new();
        }

        let query_vectors = queries
            .iter()
            .map(|q| vectorizer.transform(q.as_ref()))
            .collect::<Vec<_>>();

        let mut scored = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, batch)| {
                let best = query_vectors
                    .iter()
                    .map(|q| q.cosine(batch))
                    .fold(0.0, f64::max);
                (idx, best)
            })
            .collect::<Vec<_>>();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored
            .into_iter()
            .take(top_k)
            .filter(|&(_, score)| score > 0.0)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Cosine-similarity retrieval over terms and sentences.
pub struct SimilaritySearch<'o, O: ?Sized> {
    lemmatizer: Lemmatizer<'o, O>,
    max_n: usize,
    config: SearchConfig,
}

impl<'o, O: MorphOracle + ?Sized> SimilaritySearch<'o, O> {
    pub fn new(oracle: &'o O, max_n: usize, config: SearchConfig) -> Self {
        Self {
            lemmatizer: Lemmatizer::new(oracle),
            max_n,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn max_n(&self) -> usize {
        self.max_n
    }

    pub fn search_terms<'c, T: Searchable>(&self, query: &str, candidates: &'c [T]) -> Vec<SearchHit<'c, T>> {
        self.search_terms_with(query, candidates, self.config.top_k, self.config.threshold)
    }

    /// Fits one vectorizer on the candidates plus the lemmatized query, then
    /// ranks candidates by cosine similarity to the query.
    pub fn search_terms_with<'c, T: Searchable>(
        &self,
        query: &str,
        candidates: &'c [T],
        top_k: usize,
        threshold: f64,
    ) -> Vec<SearchHit<'c, T>> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let query_text = self.lemmatizer.lemmatize_text(query);
        let mut documents = candidates.iter().map(|c| c.search_text()).collect::<Vec<_>>();
        documents.push(&query_text);

        let (_, vectors) = Vectorizer::fit_transform(SurfaceAnalyzer::new(self.max_n), &documents);
        let Some((query_vector, candidate_vectors)) = vectors.split_last() else {
            return Vec::new();
        };

        let mut hits = candidate_vectors
            .iter()
            .enumerate()
            .map(|(index, vector)| SearchHit {
                index,
                item: &candidates[index],
                score: query_vector.cosine(vector),
            })
            .collect::<Vec<_>>();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        hits.retain(|hit| hit.score > threshold);

        debug!(candidates = candidates.len(), hits = hits.len(), "term search");
        hits
    }

    pub fn index_batches<S: AsRef<str>>(&self, batches: &[S]) -> BatchIndex {
        BatchIndex::build(batches, self.max_n)
    }

    pub fn search_batches<S: AsRef<str>>(&self, queries: &[S], index: &BatchIndex, top_k: usize) -> Vec<usize> {
        index.search(queries, top_k)
    }
}
