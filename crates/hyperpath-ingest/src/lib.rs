// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! hyperpath-ingest: channel dumps to [`CommunicationNetwork`]s.
//!
//! A dump is a JSON object mapping channel ids to records with a
//! `participants` list and an `end` timing. [`parse_network`] validates and
//! builds from bytes already in memory; [`load_network`] reads a file,
//! decompressing `.zst` and `.bz2` dumps when the `zstd` or `bzip2` feature is enabled.
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
    clippy::dbg_macro
)]
#![allow(clippy::must_use_candidate, clippy::module_name_repetitions)]

mod dump;
mod error;
mod load;

pub use dump::{ChannelDump, ChannelRecord, ParticipantId, RawTiming};
pub use error::IngestError;
pub use load::{load_network, network_name, parse_network};

/// Re-exported so callers can name the loaded type without a direct core dependency.
pub use hyperpath_core::{CommunicationNetwork, Timestamp};
