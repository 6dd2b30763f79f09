// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use hyperpath_core::{
    single_source_hyperedges, single_source_vertices, DistanceMap, Metric, TemporalHypergraph,
};

pub type Graph = TemporalHypergraph<String, String, i64>;

/// Tiny deterministic RNG (xorshift64*) so tests don't need `rand`.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a new PRNG with the given seed. A zero seed is replaced with 1.
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Returns a pseudo-random value in `[0, upper)` (modulo bias is fine here).
    pub fn gen_range_usize(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        (self.next_u64() as usize) % upper
    }

    /// Returns a pseudo-random value in `[lo, hi]`.
    pub fn gen_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        lo + self.gen_range_usize((hi - lo + 1) as usize) as i64
    }
}

pub fn strings<const N: usize>(ids: [&str; N]) -> Vec<String> {
    ids.iter().map(|s| (*s).to_owned()).collect()
}

/// Builds a graph from `(id, participants, timing)` triples.
pub fn graph(edges: &[(&str, &[&str], i64)]) -> Graph {
    let mut builder = Graph::builder();
    for (id, members, at) in edges {
        builder
            .add_hyperedge(
                (*id).to_owned(),
                members.iter().map(|m| (*m).to_owned()),
                *at,
            )
            .expect("valid hyperedge");
    }
    builder.build()
}

/// Ten pairwise channels plus an orphan timing `h8@82`.
pub fn literal_fixture() -> Graph {
    let channels: [(&str, [&str; 2]); 10] = [
        ("h0", ["v0", "v1"]),
        ("h1", ["v1", "v9"]),
        ("h2", ["v2", "v6"]),
        ("h3", ["v3", "v8"]),
        ("h4", ["v4", "v3"]),
        ("h5", ["v5", "v6"]),
        ("h6", ["v6", "v7"]),
        ("h7", ["v7", "v0"]),
        ("h9", ["v9", "v8"]),
        ("h10", ["v10", "v8"]),
    ];
    let timings: BTreeMap<String, i64> = [
        ("h0", 176),
        ("h1", 68),
        ("h2", 187),
        ("h3", 163),
        ("h4", 57),
        ("h5", 160),
        ("h6", 111),
        ("h7", 174),
        ("h8", 82),
        ("h9", 49),
        ("h10", 7),
    ]
    .into_iter()
    .map(|(h, t)| (h.to_owned(), t))
    .collect();
    Graph::from_parts(
        channels.map(|(h, members)| (h.to_owned(), strings(members))),
        timings,
    )
    .expect("fixture is valid")
}

/// Random pairwise network in the shape of the `hyperpath fuzz` drill:
/// `length` channels `h{i}` linking `v{i}` with a random other vertex, no
/// repeated unordered pair (redrawn until fresh), timings in `1..=200`.
pub fn random_pairwise(rng: &mut XorShift64, length: usize) -> Graph {
    let mut seen = BTreeSet::new();
    let mut builder = Graph::builder();
    for i in 0..length {
        let other = loop {
            let mut other = rng.gen_range_usize(length + 1);
            if other == i {
                other += 1;
            }
            if seen.insert((i.min(other), i.max(other))) {
                break other;
            }
        };
        builder
            .add_hyperedge(
                format!("h{i}"),
                [format!("v{i}"), format!("v{other}")],
                rng.gen_inclusive(1, 200),
            )
            .expect("fresh channel id");
    }
    builder.build()
}

/// Random network with hyperedges of 1..=`max_arity` participants drawn from
/// `vertices` ids, timings in `0..=horizon`.
pub fn random_hypergraph(
    rng: &mut XorShift64,
    vertices: usize,
    hyperedges: usize,
    max_arity: usize,
    horizon: i64,
) -> Graph {
    let mut builder = Graph::builder();
    for i in 0..hyperedges {
        let arity = 1 + rng.gen_range_usize(max_arity);
        let members: Vec<String> = (0..arity)
            .map(|_| format!("v{}", rng.gen_range_usize(vertices)))
            .collect();
        builder
            .add_hyperedge(format!("h{i}"), members, rng.gen_inclusive(0, horizon))
            .expect("fresh channel id");
    }
    builder.build()
}

/// Runs both engines and asserts they agree, returning the shared mapping.
pub fn agreed(
    g: &Graph,
    source: &str,
    metric: Metric,
    min_timing: Option<i64>,
) -> DistanceMap<String, i64> {
    let source = source.to_owned();
    let by_vertex = single_source_vertices(g, &source, metric, min_timing).expect("vertex engine");
    let by_hyperedge =
        single_source_hyperedges(g, &source, metric, min_timing).expect("hyperedge engine");
    assert_eq!(
        by_vertex, by_hyperedge,
        "engines disagree from {source} under {metric} (min_timing {min_timing:?})"
    );
    by_vertex
}
