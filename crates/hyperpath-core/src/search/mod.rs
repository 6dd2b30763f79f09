// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Single-source minimal-path search.
//!
//! Two engines share one contract: given a view, a source vertex, a
//! [`Metric`] and an optional minimum start time, return the distance of
//! every vertex reachable by a temporal path. A temporal path is a sequence of
//! hyperedges with non-decreasing timings whose first hyperedge is not earlier
//! than `min_timing`; `None` places no lower bound on the first hop.
//!
//! Both engines expand a settled vertex through [`expand`], so the eligibility
//! rule and the per-metric arithmetic exist exactly once. They differ only in
//! the unit they queue: vertices ([`vertex`]) or hyperedges ([`hyperedge`]).
use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use tracing::instrument;

use crate::error::{ConfigError, DataError, SearchError};
use crate::metric::{Distance, Fastest, Foremost, Label, Metric, Shortest, Strategy};
use crate::timing::Timing;
use crate::view::TemporalHypergraphView;

mod hyperedge;
mod vertex;

/// Distances keyed by reachable vertex, in ascending vertex order.
///
/// The source is never a key; unreachable vertices are absent.
pub type DistanceMap<V, T> = BTreeMap<V, Distance<T>>;

type ViewResult<G> =
    Result<DistanceMap<<G as TemporalHypergraphView>::Vertex, <G as TemporalHypergraphView>::Timing>, SearchError>;

/// Which engine runs a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum SearchEngine {
    /// Dijkstra over vertices ([`single_source_vertices`]).
    #[default]
    Vertex,
    /// Dijkstra over hyperedges ([`single_source_hyperedges`]).
    Hyperedge,
}

impl SearchEngine {
    /// Both engines, in declaration order.
    pub const ALL: [Self; 2] = [Self::Vertex, Self::Hyperedge];

    /// Lower-case name accepted by [`SearchEngine::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Vertex => "vertex",
            Self::Hyperedge => "hyperedge",
        }
    }

    /// Runs this engine.
    pub fn run<G: TemporalHypergraphView>(
        self,
        graph: &G,
        source: &G::Vertex,
        metric: Metric,
        min_timing: Option<G::Timing>,
    ) -> ViewResult<G> {
        match self {
            Self::Vertex => single_source_vertices(graph, source, metric, min_timing),
            Self::Hyperedge => single_source_hyperedges(graph, source, metric, min_timing),
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchEngine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertex" | "vertices" => Ok(Self::Vertex),
            "hyperedge" | "hyperedges" => Ok(Self::Hyperedge),
            _ => Err(ConfigError::UnknownEngine(s.to_owned())),
        }
    }
}

/// Vertex-level search: settles one vertex per queue pop.
///
/// Fails with [`SearchError::Lookup`] if `source` is not in the view.
#[instrument(level = "debug", skip_all, fields(source = ?source, %metric, engine = "vertex"))]
pub fn single_source_vertices<G: TemporalHypergraphView>(
    graph: &G,
    source: &G::Vertex,
    metric: Metric,
    min_timing: Option<G::Timing>,
) -> ViewResult<G> {
    match metric {
        Metric::Shortest => vertex::search::<G, Shortest>(graph, source, min_timing),
        Metric::Fastest => vertex::search::<G, Fastest>(graph, source, min_timing),
        Metric::Foremost => vertex::search::<G, Foremost>(graph, source, min_timing),
    }
}

/// Hyperedge-level search: fires one hyperedge per queue pop and settles all
/// of its participants at once.
///
/// Fails with [`SearchError::Lookup`] if `source` is not in the view.
#[instrument(level = "debug", skip_all, fields(source = ?source, %metric, engine = "hyperedge"))]
pub fn single_source_hyperedges<G: TemporalHypergraphView>(
    graph: &G,
    source: &G::Vertex,
    metric: Metric,
    min_timing: Option<G::Timing>,
) -> ViewResult<G> {
    match metric {
        Metric::Shortest => hyperedge::search::<G, Shortest>(graph, source, min_timing),
        Metric::Fastest => hyperedge::search::<G, Fastest>(graph, source, min_timing),
        Metric::Foremost => hyperedge::search::<G, Foremost>(graph, source, min_timing),
    }
}

/// Where an expansion starts from.
#[derive(Debug, Clone, Copy)]
enum Origin<K, T> {
    /// The source vertex; first hops must not precede the bound.
    Source(Option<T>),
    /// A settled vertex and its label; continuations must not precede `last`.
    Settled(Label<K, T>),
}

/// Candidate labels offered by the hyperedges incident to `vertex`.
///
/// Only hyperedges whose timing respects the ordering constraint of `origin`
/// are offered. Every incident timing is compared against one reference
/// (the bound, or the first incident timing when there is none), so seeds of
/// two timing domains fail here instead of meeting in the queue.
fn expand<'g, G, S>(
    graph: &'g G,
    vertex: &G::Vertex,
    origin: Origin<S::Key, G::Timing>,
) -> Result<Vec<(&'g G::Hyperedge, Label<S::Key, G::Timing>)>, SearchError>
where
    G: TemporalHypergraphView,
    S: Strategy<G::Timing>,
{
    let bound = match &origin {
        Origin::Source(bound) => *bound,
        Origin::Settled(label) => Some(label.last),
    };
    let mut reference = bound;
    let mut offers = Vec::new();
    for hyperedge in graph.incident(vertex)? {
        let timing = graph.timing(hyperedge)?;
        let reference = *reference.get_or_insert(timing);
        timing.try_compare(&reference)?;
        if !not_before(&timing, bound.as_ref())? {
            continue;
        }
        let candidate = match &origin {
            Origin::Source(_) => S::seed(timing)?,
            Origin::Settled(label) => S::relax(label, timing)?,
        };
        offers.push((hyperedge, candidate));
    }
    Ok(offers)
}

/// `timing >= bound`, with `None` meaning no bound.
fn not_before<T: Timing>(timing: &T, bound: Option<&T>) -> Result<bool, DataError> {
    match bound {
        None => Ok(true),
        Some(bound) => Ok(timing.try_compare(bound)? != Ordering::Less),
    }
}

/// Participants of `hyperedge`, rejecting an empty set.
fn members<'g, G: TemporalHypergraphView>(
    graph: &'g G,
    hyperedge: &G::Hyperedge,
) -> Result<&'g [G::Vertex], SearchError> {
    let members = graph.participants(hyperedge)?;
    if members.is_empty() {
        return Err(DataError::EmptyHyperedge(format!("{hyperedge:?}")).into());
    }
    Ok(members)
}
