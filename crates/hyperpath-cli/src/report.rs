// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON shapes printed by the CLI.
use std::collections::BTreeMap;

use hyperpath_core::{
    CommunicationNetwork, Distance, DistanceMap, Elapsed, Metric, Timestamp,
};
use serde::Serialize;
use serde_json::{json, Value};

/// Output of `distances`.
#[derive(Debug, Serialize)]
pub struct DistanceReport<'a> {
    /// Network name, if known.
    pub network: Option<&'a str>,
    /// Source vertex.
    pub source: &'a str,
    /// Metric searched with.
    pub metric: Metric,
    /// Engine(s) that produced the mapping.
    pub engine: &'a str,
    /// Lower bound on the first hop, as given.
    pub min_timing: Option<Value>,
    /// Number of reachable vertices.
    pub reached: usize,
    /// Distance per reachable vertex.
    pub distances: BTreeMap<&'a str, Value>,
}

impl<'a> DistanceReport<'a> {
    /// Assembles a report from a search result.
    pub fn new(
        network: &'a CommunicationNetwork,
        source: &'a str,
        metric: Metric,
        engine: &'a str,
        min_timing: Option<Timestamp>,
        distances: &'a DistanceMap<String, Timestamp>,
    ) -> Self {
        Self {
            network: network.name(),
            source,
            metric,
            engine,
            min_timing: min_timing.map(timestamp_json),
            reached: distances.len(),
            distances: distances
                .iter()
                .map(|(vertex, distance)| (vertex.as_str(), distance_json(distance)))
                .collect(),
        }
    }
}

/// Output of `stats`.
#[derive(Debug, Serialize)]
pub struct StatsReport<'a> {
    /// Network name, if known.
    pub network: Option<&'a str>,
    /// Distinct participants.
    pub participants: usize,
    /// Channels.
    pub channels: usize,
    /// Earliest channel timing.
    pub first: Option<Value>,
    /// Latest channel timing.
    pub last: Option<Value>,
}

impl<'a> StatsReport<'a> {
    /// Summarises `network`.
    pub fn new(network: &'a CommunicationNetwork) -> Self {
        let range = network.graph().timing_range();
        Self {
            network: network.name(),
            participants: network.participant_count(),
            channels: network.channel_count(),
            first: range.map(|(lo, _)| timestamp_json(lo)),
            last: range.map(|(_, hi)| timestamp_json(hi)),
        }
    }
}

/// Ticks as numbers, date-times as text.
pub fn timestamp_json(at: Timestamp) -> Value {
    match at {
        Timestamp::Tick(tick) => json!(tick),
        Timestamp::DateTime(_) => json!(at.to_string()),
    }
}

/// Hops and tick spans as integers, wall-clock spans in seconds.
pub fn distance_json(distance: &Distance<Timestamp>) -> Value {
    match distance {
        Distance::Hops(hops) => json!(hops),
        Distance::Arrival(at) => timestamp_json(*at),
        Distance::Duration(Elapsed::Ticks(ticks)) => json!(ticks),
        Distance::Duration(Elapsed::Time(span)) => json!(span.as_seconds_f64()),
    }
}
