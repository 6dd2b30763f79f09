// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! hyperpath-core: minimal temporal paths on time-varying hypergraphs.
//!
//! A time-varying hypergraph is a set of timestamped events ("channels"), each
//! linking a set of participant vertices at a single point in time. This crate
//! computes single-source distances over such graphs under three temporal
//! semantics ([`Metric::Shortest`], [`Metric::Fastest`], [`Metric::Foremost`])
//! with two independent engines:
//!
//! - [`single_source_vertices`] settles one vertex at a time and expands
//!   through incident hyperedges.
//! - [`single_source_hyperedges`] fires one hyperedge at a time and settles
//!   every participant of that event at once.
//!
//! Both engines are driven by the same metric strategy and must return
//! identical mappings for every input.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod error;
mod hypergraph;
mod metric;
mod network;
mod search;
mod timing;
mod view;

/// Error taxonomy: construction, lookup, configuration and data-integrity failures.
pub use error::{BuildError, ConfigError, DataError, DateTimeError, LookupError, SearchError};
/// Immutable temporal hypergraph store and its builder.
pub use hypergraph::{HypergraphBuilder, TemporalHypergraph};
/// Metric selector and the distance values each metric yields.
pub use metric::{Distance, Metric};
/// Channel/participant vocabulary over a named hypergraph.
pub use network::CommunicationNetwork;
/// Search entry points.
pub use search::{single_source_hyperedges, single_source_vertices, DistanceMap, SearchEngine};
/// Timing domains.
pub use timing::{parse_datetime, Elapsed, Timestamp, Timing};
/// Read-only interface consumed by the search engines.
pub use view::TemporalHypergraphView;
