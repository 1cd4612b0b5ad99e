use std::collections::HashMap;

use frazeo_protocol::{PhraseKind, TermId, TermRecord};
use petgraph::graph::{Graph, NodeIndex};
use petgraph::{Directed, Direction};
use tracing::warn;

/// Directed connections between dictionary records.
///
/// A term points at its synonyms and definitions; a synonym or definition is
/// related to whatever points at it.
pub struct TermGraph<'r> {
    records: &'r [TermRecord],
    // Node weight is the record's position in `records`
    graph: Graph<usize, (), Directed>,
    index_map: HashMap<TermId, NodeIndex>,
}

impl<'r> TermGraph<'r> {
    pub fn new(records: &'r [TermRecord]) -> Self {
        let mut graph = Graph::new();
        let mut index_map = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            index_map
                .entry(record.id)
                .or_insert_with(|| graph.add_node(position));
        }

        for record in records {
            let from = index_map[&record.id];
            for target in &record.connections {
                match index_map.get(target) {
                    Some(&to) => {
                        graph.add_edge(from, to, ());
                    }
                    None => warn!(from = %record.id, to = %target, "connection to unknown record"),
                }
            }
        }

        Self {
            records,
            graph,
            index_map,
        }
    }

    pub fn record(&self, id: TermId) -> Option<&'r TermRecord> {
        let idx = self.index_map.get(&id)?;
        Some(&self.records[self.graph[*idx]])
    }

    /// Outgoing connections for a term, incoming for everything else.
    /// Results keep dictionary order.
    pub fn related(&self, id: TermId) -> Vec<&'r TermRecord> {
        let Some(&idx) = self.index_map.get(&id) else {
            return Vec::new();
        };

        let direction = match self.records[self.graph[idx]].kind {
            PhraseKind::Term => Direction::Outgoing,
            _ => Direction::Incoming,
        };

        let mut positions = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n])
            .collect::<Vec<_>>();
        positions.sort_unstable();
        positions.dedup();

        positions.into_iter().map(|p| &self.records[p]).collect()
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
