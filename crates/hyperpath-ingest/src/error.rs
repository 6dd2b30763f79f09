// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::path::PathBuf;

use hyperpath_core::{BuildError, DateTimeError};
use thiserror::Error;

/// Failure while reading or validating a channel dump.
///
/// Record-level variants carry the zero-based position of the record in the
/// dump together with its channel id.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is compressed but this build cannot decode it.
    #[error("{path} is {format}-compressed; rebuild with the `{format}` feature to read it")]
    DecoderUnavailable {
        /// Compressed file.
        path: PathBuf,
        /// Compression format, named like the Cargo feature that decodes it.
        format: &'static str,
    },
    /// Decompression failed.
    #[error("failed to decompress {path}: {source}")]
    Decompress {
        /// Compressed file.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: std::io::Error,
    },
    /// The document is not a valid dump.
    #[error("malformed channel dump: {0}")]
    Json(#[from] serde_json::Error),
    /// A record lists no participants.
    #[error("record {index}, channel {channel}: participants list is empty")]
    EmptyParticipants {
        /// Record position.
        index: usize,
        /// Channel id.
        channel: String,
    },
    /// A record's `end` is not a supported date-time.
    #[error("record {index}, channel {channel}: end {value:?} is not an ISO-8601 date-time")]
    InvalidTimestamp {
        /// Record position.
        index: usize,
        /// Channel id.
        channel: String,
        /// Offending text.
        value: String,
        /// Parser error.
        #[source]
        source: DateTimeError,
    },
    /// The same id is written once as a number and once as a string.
    #[error("record {index}, channel {channel}: participant {id} appears both as a number and as a string")]
    AmbiguousParticipant {
        /// Record position.
        index: usize,
        /// Channel id.
        channel: String,
        /// The shared decimal spelling.
        id: String,
    },
    /// A record's `end` is of a different kind than the records before it.
    #[error("record {index}, channel {channel}: {found} timing in a dump of {expected} timings")]
    MixedTimings {
        /// Record position.
        index: usize,
        /// Channel id.
        channel: String,
        /// Kind established by the first record.
        expected: &'static str,
        /// Kind of this record.
        found: &'static str,
    },
    /// The records do not form a valid hypergraph (for example duplicate ids).
    #[error("invalid network: {0}")]
    Build(#[from] BuildError),
}
