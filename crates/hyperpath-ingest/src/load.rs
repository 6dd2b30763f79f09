// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Validation and construction of networks from dumps.
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use hyperpath_core::{parse_datetime, CommunicationNetwork, TemporalHypergraph, Timestamp};
use tracing::{debug, instrument};

use crate::dump::{ChannelDump, RawTiming};
use crate::error::IngestError;

/// Compressed dump formats, recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compression {
    Zstd,
    Bzip2,
}

impl Compression {
    fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "zst" => Some(Self::Zstd),
            "bz2" => Some(Self::Bzip2),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Zstd => "zstd",
            Self::Bzip2 => "bzip2",
        }
    }
}

/// Reads the dump at `path` and names the network after the file.
///
/// `.zst` and `.bz2` files are decompressed first. A format whose Cargo
/// feature (`zstd`, `bzip2`) is off is rejected with
/// [`IngestError::DecoderUnavailable`].
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_network(path: impl AsRef<Path>) -> Result<CommunicationNetwork, IngestError> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let bytes = match Compression::of(path) {
        Some(compression) => decompress(path, compression, &raw)?,
        None => raw,
    };
    parse_network(&bytes, network_name(path))
}

/// Builds a network from an in-memory JSON dump.
#[instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn parse_network(
    bytes: &[u8],
    name: Option<String>,
) -> Result<CommunicationNetwork, IngestError> {
    let dump: ChannelDump = serde_json::from_slice(bytes)?;
    build(dump, name)
}

/// Network name derived from a dump path: the file name without its
/// compression and `.json` suffixes.
pub fn network_name(path: &Path) -> Option<String> {
    let mut name = path.file_name()?.to_str()?;
    for suffix in [".zst", ".bz2", ".json"] {
        name = name.strip_suffix(suffix).unwrap_or(name);
    }
    (!name.is_empty()).then(|| name.to_owned())
}

fn build(dump: ChannelDump, name: Option<String>) -> Result<CommunicationNetwork, IngestError> {
    let mut builder = TemporalHypergraph::builder();
    let mut kind: Option<&'static str> = None;
    // Vertex id -> whether it was written as a number.
    let mut spellings: BTreeMap<String, bool> = BTreeMap::new();

    for (index, (channel, record)) in dump.records.into_iter().enumerate() {
        if record.participants.is_empty() {
            return Err(IngestError::EmptyParticipants { index, channel });
        }
        let timing = match record.end {
            RawTiming::Tick(tick) => Timestamp::Tick(tick),
            RawTiming::Text(value) => match parse_datetime(&value) {
                Ok(at) => Timestamp::DateTime(at),
                Err(source) => {
                    return Err(IngestError::InvalidTimestamp {
                        index,
                        channel,
                        value,
                        source,
                    })
                }
            },
        };
        match kind {
            None => kind = Some(timing.kind()),
            Some(expected) if expected != timing.kind() => {
                return Err(IngestError::MixedTimings {
                    index,
                    channel,
                    expected,
                    found: timing.kind(),
                });
            }
            Some(_) => {}
        }

        let mut members = Vec::with_capacity(record.participants.len());
        for participant in record.participants {
            let numeric = participant.is_number();
            let vertex = participant.into_vertex();
            match spellings.entry(vertex.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(numeric);
                }
                Entry::Occupied(seen) if *seen.get() != numeric => {
                    return Err(IngestError::AmbiguousParticipant {
                        index,
                        channel,
                        id: vertex,
                    });
                }
                Entry::Occupied(_) => {}
            }
            members.push(vertex);
        }
        builder.add_hyperedge(channel, members, timing)?;
    }

    let graph = builder.build();
    debug!(
        channels = graph.hyperedge_count(),
        participants = graph.vertex_count(),
        timing = kind.unwrap_or("none"),
        "channel dump loaded"
    );
    Ok(CommunicationNetwork::new(graph, name))
}

fn decompress(path: &Path, compression: Compression, bytes: &[u8]) -> Result<Vec<u8>, IngestError> {
    let decoded = match compression {
        Compression::Zstd => decode_zstd(bytes),
        Compression::Bzip2 => decode_bzip2(bytes),
    };
    match decoded {
        Some(result) => result.map_err(|source| IngestError::Decompress {
            path: path.to_path_buf(),
            source,
        }),
        None => Err(IngestError::DecoderUnavailable {
            path: path.to_path_buf(),
            format: compression.name(),
        }),
    }
}

/// `None` when the decoder is compiled out.
#[cfg(feature = "zstd")]
#[allow(clippy::unnecessary_wraps)]
fn decode_zstd(bytes: &[u8]) -> Option<io::Result<Vec<u8>>> {
    Some(zstd::decode_all(bytes))
}

#[cfg(not(feature = "zstd"))]
#[allow(clippy::unnecessary_wraps)]
fn decode_zstd(_bytes: &[u8]) -> Option<io::Result<Vec<u8>>> {
    None
}

#[cfg(feature = "bzip2")]
#[allow(clippy::unnecessary_wraps)]
fn decode_bzip2(bytes: &[u8]) -> Option<io::Result<Vec<u8>>> {
    use std::io::Read;

    let mut out = Vec::new();
    Some(
        bzip2::read::BzDecoder::new(bytes)
            .read_to_end(&mut out)
            .map(|_| out),
    )
}

#[cfg(not(feature = "bzip2"))]
#[allow(clippy::unnecessary_wraps)]
fn decode_bzip2(_bytes: &[u8]) -> Option<io::Result<Vec<u8>>> {
    None
}
