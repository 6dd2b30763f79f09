// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Read-only interface the search engines consume.
//!
//! The engines never see a concrete store. They read vertices, hyperedges,
//! participants, incidence and timings through [`TemporalHypergraphView`],
//! which exposes query methods only. Any immutable structure that can answer
//! these five questions can be searched.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use hyperpath_core::{TemporalHypergraph, TemporalHypergraphView};
//!
//! let graph = TemporalHypergraph::from_parts(
//!     [("h1", ["v1", "v2"])],
//!     BTreeMap::from([("h1", 10_i64)]),
//! )?;
//!
//! fn earliest<G: TemporalHypergraphView>(view: &G) -> Option<G::Timing> {
//!     view.hyperedges().filter_map(|h| view.timing(h).ok()).min()
//! }
//! assert_eq!(earliest(&graph), Some(10));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use std::fmt;
use std::hash::Hash;

use crate::error::LookupError;
use crate::hypergraph::TemporalHypergraph;
use crate::timing::Timing;

/// Read-only temporal hypergraph.
///
/// Keyed accessors fail with [`LookupError`] when handed an unknown id.
/// Implementations must be immutable for the duration of a search.
pub trait TemporalHypergraphView {
    /// Vertex identifier.
    type Vertex: Clone + Ord + Hash + fmt::Debug;
    /// Hyperedge identifier.
    type Hyperedge: Clone + Ord + Hash + fmt::Debug;
    /// Timing domain.
    type Timing: Timing;

    /// All vertices.
    fn vertices(&self) -> impl Iterator<Item = &Self::Vertex>;

    /// All hyperedges.
    fn hyperedges(&self) -> impl Iterator<Item = &Self::Hyperedge>;

    /// Participants of `hyperedge`.
    fn participants(&self, hyperedge: &Self::Hyperedge) -> Result<&[Self::Vertex], LookupError>;

    /// Hyperedges incident to `vertex`.
    fn incident(&self, vertex: &Self::Vertex) -> Result<&[Self::Hyperedge], LookupError>;

    /// Timing of `hyperedge`.
    fn timing(&self, hyperedge: &Self::Hyperedge) -> Result<Self::Timing, LookupError>;

    /// Returns `true` if `vertex` is part of the hypergraph.
    fn contains_vertex(&self, vertex: &Self::Vertex) -> bool {
        self.incident(vertex).is_ok()
    }
}

impl<V, H, T> TemporalHypergraphView for TemporalHypergraph<V, H, T>
where
    V: Clone + Ord + Hash + fmt::Debug,
    H: Clone + Ord + Hash + fmt::Debug,
    T: Timing,
{
    type Vertex = V;
    type Hyperedge = H;
    type Timing = T;

    fn vertices(&self) -> impl Iterator<Item = &V> {
        self.incident.keys()
    }

    fn hyperedges(&self) -> impl Iterator<Item = &H> {
        self.participants.keys()
    }

    fn participants(&self, hyperedge: &H) -> Result<&[V], LookupError> {
        Self::participants(self, hyperedge)
    }

    fn incident(&self, vertex: &V) -> Result<&[H], LookupError> {
        Self::incident(self, vertex)
    }

    fn timing(&self, hyperedge: &H) -> Result<T, LookupError> {
        Self::timing(self, hyperedge)
    }
}
