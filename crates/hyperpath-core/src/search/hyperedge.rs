// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hyperedge-level engine: Dijkstra over hyperedges.
//!
//! The queue holds hyperedges keyed by the best label obtainable by firing
//! them. Firing settles every unsettled participant with that one label, so a
//! k-participant event is a single relaxation step rather than a clique of
//! pairwise edges.
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use super::{expand, members, DistanceMap, Origin};
use crate::error::SearchError;
use crate::metric::{Label, Strategy};
use crate::view::TemporalHypergraphView;

/// Hyperedges waiting to fire, with the best label offered to each.
struct Agenda<'g, K, H, T> {
    queue: BinaryHeap<Reverse<(Label<K, T>, &'g H)>>,
    best: FxHashMap<&'g H, Label<K, T>>,
    fired: FxHashSet<&'g H>,
}

impl<'g, K: Ord + Copy, H: Ord + Hash, T: Ord + Copy> Agenda<'g, K, H, T> {
    fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            best: FxHashMap::default(),
            fired: FxHashSet::default(),
        }
    }

    /// Queues every offer that improves on what its hyperedge already holds.
    fn offer(&mut self, offers: Vec<(&'g H, Label<K, T>)>) {
        for (hyperedge, candidate) in offers {
            if self.fired.contains(hyperedge) {
                continue;
            }
            let improves = self
                .best
                .get(hyperedge)
                .is_none_or(|seen| candidate < *seen);
            if improves {
                self.best.insert(hyperedge, candidate);
                self.queue.push(Reverse((candidate, hyperedge)));
            }
        }
    }

    /// Next hyperedge to fire. Each hyperedge is returned at most once.
    fn next(&mut self) -> Option<(Label<K, T>, &'g H)> {
        while let Some(Reverse((label, hyperedge))) = self.queue.pop() {
            if self.fired.insert(hyperedge) {
                return Some((label, hyperedge));
            }
        }
        None
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
    let mut agenda = Agenda::new();
    let mut settled: FxHashMap<&G::Vertex, Label<S::Key, G::Timing>> = FxHashMap::default();
    agenda.offer(expand::<G, S>(graph, source, Origin::Source(min_timing))?);

    let mut reached = Vec::new();
    while let Some((label, hyperedge)) = agenda.next() {
        reached.clear();
        for vertex in members(graph, hyperedge)? {
            if vertex == source || settled.contains_key(vertex) {
                continue;
            }
            settled.insert(vertex, label);
            reached.push(vertex);
        }
        trace!(?hyperedge, ?label, settled = reached.len(), "fired");

        for &vertex in &reached {
            agenda.offer(expand::<G, S>(graph, vertex, Origin::Settled(label))?);
        }
    }

    debug!(
        reached = settled.len(),
        fired = agenda.fired.len(),
        "hyperedge-level search finished"
    );
    Ok(settled
        .into_iter()
        .map(|(vertex, label)| (vertex.clone(), S::distance(&label)))
        .collect())
}
