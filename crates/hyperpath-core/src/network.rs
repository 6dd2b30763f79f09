// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Communication networks: hypergraphs whose hyperedges are channels.
//!
//! A channel is one communication event (an e-mail thread, a chat message, a
//! meeting) that links its participants at a single timing. The type is a
//! thin vocabulary layer over [`TemporalHypergraph`] with `String` ids and an
//! optional human-readable name.
use std::collections::BTreeMap;

use crate::error::{BuildError, LookupError};
use crate::hypergraph::TemporalHypergraph;
use crate::timing::{Timestamp, Timing};
use crate::view::TemporalHypergraphView;

/// Named hypergraph of channels and participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommunicationNetwork<T = Timestamp> {
    graph: TemporalHypergraph<String, String, T>,
    name: Option<String>,
}

impl<T: Timing> CommunicationNetwork<T> {
    /// Wraps an existing hypergraph.
    pub fn new(graph: TemporalHypergraph<String, String, T>, name: Option<String>) -> Self {
        Self { graph, name }
    }

    /// Builds a network from `channel -> participants` and `channel -> timing`
    /// maps.
    ///
    /// Same validation as [`TemporalHypergraph::from_parts`].
    pub fn from_channels<I, P>(
        channels: I,
        timings: BTreeMap<String, T>,
        name: Option<String>,
    ) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (String, P)>,
        P: IntoIterator<Item = String>,
    {
        Ok(Self::new(TemporalHypergraph::from_parts(channels, timings)?, name))
    }

    /// Optional name of the network (for example the dump it was read from).
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Underlying hypergraph.
    pub fn graph(&self) -> &TemporalHypergraph<String, String, T> {
        &self.graph
    }

    /// Channels `participant` took part in.
    pub fn channels(&self, participant: &str) -> Result<&[String], LookupError> {
        self.graph.incident(participant)
    }

    /// Participants of `channel`.
    pub fn participants(&self, channel: &str) -> Result<&[String], LookupError> {
        self.graph.participants(channel)
    }

    /// Timing of `channel`.
    pub fn timing(&self, channel: &str) -> Result<T, LookupError> {
        self.graph.timing(channel)
    }

    /// Number of participants.
    pub fn participant_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Number of channels.
    pub fn channel_count(&self) -> usize {
        self.graph.hyperedge_count()
    }
}

impl<T: Timing> TemporalHypergraphView for CommunicationNetwork<T> {
    type Vertex = String;
    type Hyperedge = String;
    type Timing = T;

    fn vertices(&self) -> impl Iterator<Item = &String> {
        self.graph.vertices()
    }

    fn hyperedges(&self) -> impl Iterator<Item = &String> {
        self.graph.hyperedges()
    }

    fn participants(&self, hyperedge: &String) -> Result<&[String], LookupError> {
        self.graph.participants(hyperedge.as_str())
    }

    fn incident(&self, vertex: &String) -> Result<&[String], LookupError> {
        self.graph.incident(vertex.as_str())
    }

    fn timing(&self, hyperedge: &String) -> Result<T, LookupError> {
        self.graph.timing(hyperedge.as_str())
    }
}
