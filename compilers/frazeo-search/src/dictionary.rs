use frazeo_morph::MorphOracle;
use frazeo_parser::split_sentences;
use frazeo_protocol::{Document, DocumentId, PhraseKind, TermRecord};
use frazeo_ranker::SearchConfig;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::HighlightError;
use crate::graph::TermGraph;
use crate::highlight::{HighlightedSentence, Highlighter};
use crate::similarity::SimilaritySearch;

#[derive(Debug, Clone, Serialize)]
pub struct SentenceMatch {
    pub document: DocumentId,
    pub sentence: HighlightedSentence,
}

#[derive(Debug, Clone, Serialize)]
pub struct TermMatch<'r> {
    pub term: &'r TermRecord,
    pub score: f64,
    pub sentences: Vec<SentenceMatch>,
}

/// Finds dictionary records similar to a query, then the document sentences
/// that mention them.
pub struct DictionarySearch<'o, O: ?Sized> {
    similarity: SimilaritySearch<'o, O>,
    highlighter: Highlighter<'o, O>,
}

impl<'o, O: MorphOracle + ?Sized> DictionarySearch<'o, O> {
    pub fn new(oracle: &'o O, max_n: usize, config: SearchConfig) -> Self {
        Self {
            similarity: SimilaritySearch::new(oracle, max_n, config),
            highlighter: Highlighter::new(oracle),
        }
    }

    pub fn search<'r>(
        &self,
        query: &str,
        terms: &'r [TermRecord],
        documents: &[Document],
    ) -> Result<Vec<TermMatch<'r>>, HighlightError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let candidates = terms
            .iter()
            .filter(|t| t.kind != PhraseKind::Phrase)
            .collect::<Vec<_>>();
        let graph = TermGraph::new(terms);
        let batch_top_k = self.similarity.config().batch_top_k;

        let mut matches = Vec::new();
        for hit in self.similarity.search_terms(query, &candidates) {
            let term: &'r TermRecord = *hit.item;
            let related = graph.related(term.id);

            let mut phrases = vec![(term.text.as_str(), term.kind.color())];
            phrases.extend(related.iter().map(|r| (r.text.as_str(), r.kind.color())));

            let mut sentences = Vec::new();
            for document in documents {
                if document.content.trim().is_empty() {
                    trace!(document = %document.id, "skipping empty document");
                    continue;
                }

                let batches = if document.batches.is_empty() {
                    split_sentences(&document.content)
                } else {
                    document.batches.iter().map(String::as_str).collect()
                };
                let index = self.similarity.index_batches(&batches);

                let mut found = self.similarity.search_batches(&[term.text.as_str()], &index, batch_top_k);
                if found.len() < batch_top_k && !related.is_empty() {
                    let seeds = related.iter().map(|r| r.text.as_str()).collect::<Vec<_>>();
                    found.extend(self.similarity.search_batches(&seeds, &index, batch_top_k));
                }

                let mut seen = Vec::with_capacity(found.len());
                for idx in found {
                    if seen.contains(&idx) {
                        continue;
                    }
                    seen.push(idx);
                    sentences.push(SentenceMatch {
                        document: document.id,
                        sentence: self.highlighter.highlight(batches[idx], &phrases)?,
                    });
                }
            }

            debug!(term = %term.id, sentences = sentences.len(), "term matched");
            matches.push(TermMatch {
                term,
                score: hit.score,
                sentences,
            });
        }

        Ok(matches)
    }
}
