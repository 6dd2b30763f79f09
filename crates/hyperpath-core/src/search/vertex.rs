// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Vertex-level engine: Dijkstra over vertices.
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::{expand, members, DistanceMap, Origin};
use crate::error::SearchError;
use crate::metric::{Label, Strategy};
use crate::view::TemporalHypergraphView;

/// Pending candidates plus the best tentative label per unsettled vertex.
struct Frontier<'g, K, V, T> {
    queue: BinaryHeap<Reverse<(Label<K, T>, &'g V)>>,
    tentative: FxHashMap<&'g V, Label<K, T>>,
}

impl<'g, K: Ord + Copy, V: Ord + std::hash::Hash, T: Ord + Copy> Frontier<'g, K, V, T> {
    fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            tentative: FxHashMap::default(),
        }
    }

    /// Queues `candidate` for `vertex` if it beats the best one seen so far.
    fn propose(&mut self, vertex: &'g V, candidate: Label<K, T>) {
        let improves = self
            .tentative
            .get(vertex)
            .is_none_or(|best| candidate < *best);
        if improves {
            self.tentative.insert(vertex, candidate);
            self.queue.push(Reverse((candidate, vertex)));
        }
    }
}

pub(super) fn search<G, S>(
    graph: &G,
    source: &G::Vertex,
    min_timing: Option<G::Timing>,
) -> Result<DistanceMap<G::Vertex, G::Timing>, SearchError>
where
    G: TemporalHypergraphView,
    S: Strategy<G::Timing>,
{
    let mut frontier = Frontier::new();
    let mut settled: FxHashMap<&G::Vertex, Label<S::Key, G::Timing>> = FxHashMap::default();

    for (hyperedge, candidate) in expand::<G, S>(graph, source, Origin::Source(min_timing))? {
        for vertex in members(graph, hyperedge)? {
            if vertex != source {
                frontier.propose(vertex, candidate);
            }
        }
    }

    while let Some(Reverse((label, vertex))) = frontier.queue.pop() {
        // Lazy deletion: the first pop of a vertex carries its best label.
        if settled.contains_key(vertex) {
            continue;
        }
        settled.insert(vertex, label);
        trace!(?vertex, ?label, "settled");

        for (hyperedge, candidate) in expand::<G, S>(graph, vertex, Origin::Settled(label))? {
            for other in members(graph, hyperedge)? {
                if other == source || other == vertex || settled.contains_key(other) {
                    continue;
                }
                frontier.propose(other, candidate);
            }
        }
    }

    debug!(reached = settled.len(), "vertex-level search finished");
    Ok(settled
        .into_iter()
        .map(|(vertex, label)| (vertex.clone(), S::distance(&label)))
        .collect())
}
