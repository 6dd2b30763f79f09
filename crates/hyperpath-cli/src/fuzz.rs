// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Engine equivalence drill on random pairwise networks.
//!
//! Each run builds a network of 10 to 200 channels. Channel `h{i}` links
//! `v{i}` with a randomly drawn partner; an unordered pair is never used
//! twice. Timings are drawn from `1..=200`. Both engines then search from
//! `v1` with min_timing 0 under every metric.
use std::collections::BTreeSet;

use anyhow::Result;
use hyperpath_core::{
    single_source_hyperedges, single_source_vertices, Metric, TemporalHypergraph,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, error};

/// Network shape used by the drill.
pub type DrillNetwork = TemporalHypergraph<String, String, i64>;

const SOURCE: &str = "v1";

/// One disagreement between the engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// Zero-based run index.
    pub run: u32,
    /// Metric that disagreed.
    pub metric: Metric,
    /// Channels in the offending network.
    pub channels: usize,
}

/// Summary of a drill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FuzzReport {
    /// Runs performed.
    pub runs: u32,
    /// Seed that reproduces the drill.
    pub seed: u64,
    /// Disagreements found.
    pub mismatches: Vec<Mismatch>,
}

/// Draws one drill network.
pub fn random_network<R: Rng>(rng: &mut R) -> Result<DrillNetwork> {
    let length: usize = rng.gen_range(10..=200);
    let mut used = BTreeSet::new();
    let mut builder = DrillNetwork::builder();
    for i in 0..length {
        let other = loop {
            let mut other = rng.gen_range(0..=length);
            if other == i {
                other += 1;
            }
            if used.insert((i.min(other), i.max(other))) {
                break other;
            }
        };
        builder.add_hyperedge(
            format!("h{i}"),
            [format!("v{i}"), format!("v{other}")],
            rng.gen_range(1..=200),
        )?;
    }
    Ok(builder.build())
}

/// Runs the drill `runs` times from `seed`.
///
/// Search errors abort the drill; disagreements are collected.
pub fn drill(runs: u32, seed: u64) -> Result<FuzzReport> {
    let mut rng = StdRng::seed_from_u64(seed);
    let source = SOURCE.to_owned();
    let mut mismatches = Vec::new();

    for run in 0..runs {
        let network = random_network(&mut rng)?;
        for metric in Metric::ALL {
            let by_vertex = single_source_vertices(&network, &source, metric, Some(0))?;
            let by_hyperedge = single_source_hyperedges(&network, &source, metric, Some(0))?;
            if by_vertex != by_hyperedge {
                error!(
                    run,
                    %metric,
                    ?by_vertex,
                    ?by_hyperedge,
                    "engines disagree"
                );
                mismatches.push(Mismatch {
                    run,
                    metric,
                    channels: network.hyperedge_count(),
                });
            }
        }
        debug!(run, channels = network.hyperedge_count(), "run complete");
    }

    Ok(FuzzReport {
        runs,
        seed,
        mismatches,
    })
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn networks_follow_the_drill_shape() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..20 {
            let network = random_network(&mut rng).expect("network");
            let channels = network.hyperedge_count();
            assert!((10..=200).contains(&channels));
            assert!(network.contains_vertex(SOURCE));

            let mut pairs = BTreeSet::new();
            for channel in network.hyperedges() {
                let members = network.participants(channel).expect("known");
                assert_eq!(members.len(), 2);
                assert!(pairs.insert(members.to_vec()), "repeated pair {members:?}");
                let at = network.timing(channel).expect("timed");
                assert!((1..=200).contains(&at));
            }
        }
    }

    #[test]
    fn drill_is_reproducible_and_clean() {
        let first = drill(5, 42).expect("drill");
        assert_eq!(first, drill(5, 42).expect("drill"));
        assert!(first.mismatches.is_empty());
        assert_eq!(first.runs, 5);
    }
}
