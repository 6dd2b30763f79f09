// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Immutable in-memory store for time-varying hypergraphs.
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::error::{BuildError, LookupError};
use crate::timing::Timing;

/// Time-varying hypergraph: every hyperedge links a non-empty set of vertices
/// at one timing.
///
/// The store is immutable once built. All maps are ordered so iteration (and
/// therefore every search) is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalHypergraph<V, H, T> {
    /// Hyperedge to its sorted, duplicate-free participants.
    pub(crate) participants: BTreeMap<H, Vec<V>>,
    /// Hyperedge to its timing.
    pub(crate) timings: BTreeMap<H, T>,
    /// Reverse index: vertex to the hyperedges it participates in, ascending.
    pub(crate) incident: BTreeMap<V, Vec<H>>,
}

impl<V, H, T> TemporalHypergraph<V, H, T>
where
    V: Ord + Clone + fmt::Debug,
    H: Ord + Clone + fmt::Debug,
    T: Timing,
{
    /// Starts an empty builder.
    pub fn builder() -> HypergraphBuilder<V, H, T> {
        HypergraphBuilder::default()
    }

    /// Builds a hypergraph from a hyperedge → participants listing and a
    /// hyperedge → timing map.
    ///
    /// Timings for ids that name no hyperedge are ignored. Every hyperedge must
    /// have a timing and at least one participant.
    pub fn from_parts<I, P>(hyperedges: I, mut timings: BTreeMap<H, T>) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (H, P)>,
        P: IntoIterator<Item = V>,
    {
        let mut builder = Self::builder();
        for (id, members) in hyperedges {
            let timing = timings
                .remove(&id)
                .ok_or_else(|| BuildError::MissingTiming(format!("{id:?}")))?;
            builder.add_hyperedge(id, members, timing)?;
        }
        if !timings.is_empty() {
            debug!(orphans = timings.len(), "ignoring timings without a hyperedge");
        }
        Ok(builder.build())
    }

    /// Iterate over all vertices in ascending order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.incident.keys()
    }

    /// Iterate over all hyperedges in ascending order.
    pub fn hyperedges(&self) -> impl Iterator<Item = &H> {
        self.participants.keys()
    }

    /// Iterate over `(hyperedge, timing)` pairs in ascending hyperedge order.
    pub fn timings(&self) -> impl Iterator<Item = (&H, &T)> {
        self.timings.iter()
    }

    /// Returns the participants of `hyperedge`.
    pub fn participants<Q>(&self, hyperedge: &Q) -> Result<&[V], LookupError>
    where
        H: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.participants
            .get(hyperedge)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::UnknownHyperedge(format!("{hyperedge:?}")))
    }

    /// Returns the hyperedges `vertex` participates in.
    pub fn incident<Q>(&self, vertex: &Q) -> Result<&[H], LookupError>
    where
        V: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.incident
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or_else(|| LookupError::UnknownVertex(format!("{vertex:?}")))
    }

    /// Returns the timing of `hyperedge`.
    pub fn timing<Q>(&self, hyperedge: &Q) -> Result<T, LookupError>
    where
        H: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.timings
            .get(hyperedge)
            .copied()
            .ok_or_else(|| LookupError::UnknownHyperedge(format!("{hyperedge:?}")))
    }

    /// Returns `true` if `vertex` participates in at least one hyperedge.
    pub fn contains_vertex<Q>(&self, vertex: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.incident.contains_key(vertex)
    }

    /// Number of distinct vertices.
    pub fn vertex_count(&self) -> usize {
        self.incident.len()
    }

    /// Number of hyperedges.
    pub fn hyperedge_count(&self) -> usize {
        self.participants.len()
    }

    /// Earliest and latest timing, or `None` for an empty hypergraph.
    ///
    /// Uses the domain's total order; for mixed [`crate::Timestamp`] kinds the
    /// bounds are only meaningful per kind.
    pub fn timing_range(&self) -> Option<(T, T)> {
        let mut values = self.timings.values().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }
}

impl<V, H, T> Default for TemporalHypergraph<V, H, T> {
    fn default() -> Self {
        Self {
            participants: BTreeMap::new(),
            timings: BTreeMap::new(),
            incident: BTreeMap::new(),
        }
    }
}

/// Incremental, validating constructor for [`TemporalHypergraph`].
#[derive(Debug, Clone)]
pub struct HypergraphBuilder<V, H, T> {
    graph: TemporalHypergraph<V, H, T>,
}

impl<V, H, T> Default for HypergraphBuilder<V, H, T> {
    fn default() -> Self {
        Self {
            graph: TemporalHypergraph::default(),
        }
    }
}

impl<V, H, T> HypergraphBuilder<V, H, T>
where
    V: Ord + Clone + fmt::Debug,
    H: Ord + Clone + fmt::Debug,
    T: Timing,
{
    /// Adds one hyperedge. Repeated participants collapse into one.
    pub fn add_hyperedge<P>(&mut self, id: H, participants: P, timing: T) -> Result<&mut Self, BuildError>
    where
        P: IntoIterator<Item = V>,
    {
        if self.graph.participants.contains_key(&id) {
            return Err(BuildError::DuplicateHyperedge(format!("{id:?}")));
        }
        let mut members: Vec<V> = participants.into_iter().collect();
        members.sort();
        members.dedup();
        if members.is_empty() {
            return Err(BuildError::EmptyHyperedge(format!("{id:?}")));
        }
        for vertex in &members {
            let bucket = self.graph.incident.entry(vertex.clone()).or_default();
            // Keep each bucket sorted regardless of insertion order.
            let at = bucket.partition_point(|h| h < &id);
            bucket.insert(at, id.clone());
        }
        self.graph.timings.insert(id.clone(), timing);
        self.graph.participants.insert(id, members);
        Ok(self)
    }

    /// Chaining variant of [`HypergraphBuilder::add_hyperedge`].
    pub fn with_hyperedge<P>(mut self, id: H, participants: P, timing: T) -> Result<Self, BuildError>
    where
        P: IntoIterator<Item = V>,
    {
        self.add_hyperedge(id, participants, timing)?;
        Ok(self)
    }

    /// Finishes construction.
    pub fn build(self) -> TemporalHypergraph<V, H, T> {
        self.graph
    }
}
