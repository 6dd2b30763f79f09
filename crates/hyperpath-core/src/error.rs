// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types for construction, lookup and search.
use thiserror::Error;

/// Error returned while building a [`crate::TemporalHypergraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A hyperedge was declared with no participants.
    #[error("hyperedge {0} has no participants")]
    EmptyHyperedge(String),
    /// The same hyperedge id was declared twice.
    #[error("duplicate hyperedge {0}")]
    DuplicateHyperedge(String),
    /// A hyperedge has no timing entry.
    #[error("hyperedge {0} has no timing")]
    MissingTiming(String),
}

/// An id handed to a keyed accessor is not part of the hypergraph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No vertex with this id.
    #[error("unknown vertex {0}")]
    UnknownVertex(String),
    /// No hyperedge with this id.
    #[error("unknown hyperedge {0}")]
    UnknownHyperedge(String),
}

/// Invalid search configuration, rejected before any search work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The metric name is not one of `shortest`, `fastest`, `foremost`.
    #[error("unknown metric {0:?} (expected shortest, fastest or foremost)")]
    UnknownMetric(String),
    /// The engine name is not one of `vertex`, `hyperedge`.
    #[error("unknown search engine {0:?} (expected vertex or hyperedge)")]
    UnknownEngine(String),
}

/// Data-integrity violation detected while searching.
///
/// Ingestion validation normally prevents these; the engines still refuse to
/// produce distances when they meet one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// Two timings from different domains were compared.
    #[error("timings {left} and {right} are not comparable")]
    IncomparableTimings {
        /// Left operand, debug-formatted.
        left: String,
        /// Right operand, debug-formatted.
        right: String,
    },
    /// The difference between two timings does not fit the span type.
    #[error("span from {earlier} to {later} is not representable")]
    SpanOverflow {
        /// Earlier timing, debug-formatted.
        earlier: String,
        /// Later timing, debug-formatted.
        later: String,
    },
    /// A hyperedge with no participants was reached.
    #[error("hyperedge {0} has no participants")]
    EmptyHyperedge(String),
}

/// A date-time that [`crate::parse_datetime`] cannot turn into a UTC value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    /// Not ISO-8601.
    #[error(transparent)]
    Parse(#[from] time::error::Parse),
    /// The instant falls outside the representable range once moved to UTC.
    #[error("{0} is out of range in UTC")]
    OutOfRange(String),
}

/// Failure of a single-source search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Invalid metric or engine selection.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The source vertex (or an id reported by the view) does not exist.
    #[error("entity not found: {0}")]
    Lookup(#[from] LookupError),
    /// Inconsistent hypergraph data.
    #[error("data error: {0}")]
    Data(#[from] DataError),
}
