// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The vertex-level and hyperedge-level engines must agree on every input.
//!
//! To re-run the property with a different seed locally, edit `SEED_BYTES`
//! or set `PROPTEST_SEED` for the macro-driven variant.
#![allow(missing_docs)]

mod common;

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use common::{agreed, random_pairwise, Graph, XorShift64};
use hyperpath_core::{single_source_hyperedges, single_source_vertices, Metric};

/// `(members, timing)` lists over a small vertex pool so paths actually form.
fn hypergraph_strategy() -> impl Strategy<Value = Graph> {
    let hyperedge = (prop::collection::vec(0_u8..12, 1..5), 0_i64..40);
    prop::collection::vec(hyperedge, 1..40).prop_map(|edges| {
        let mut builder = Graph::builder();
        for (i, (members, at)) in edges.into_iter().enumerate() {
            builder
                .add_hyperedge(
                    format!("h{i}"),
                    members.into_iter().map(|m| format!("v{m}")),
                    at,
                )
                .expect("non-empty, fresh id");
        }
        builder.build()
    })
}

fn metric_strategy() -> impl Strategy<Value = Metric> {
    prop::sample::select(Metric::ALL.to_vec())
}

#[test]
fn engines_agree_with_pinned_seed() {
    const SEED_BYTES: [u8; 32] = [
        0x48, 0x59, 0x50, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0,
    ];

    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(
        PropConfig {
            cases: 512,
            ..PropConfig::default()
        },
        rng,
    );

    let case = (
        hypergraph_strategy(),
        any::<prop::sample::Index>(),
        metric_strategy(),
        prop::option::of(0_i64..40),
    );

    runner
        .run(&case, |(g, pick, metric, min_timing)| {
            let vertices: Vec<&String> = g.vertices().collect();
            let source = vertices[pick.index(vertices.len())];
            let by_vertex = single_source_vertices(&g, source, metric, min_timing)
                .expect("vertex engine");
            let by_hyperedge = single_source_hyperedges(&g, source, metric, min_timing)
                .expect("hyperedge engine");
            prop_assert_eq!(by_vertex, by_hyperedge);
            Ok(())
        })
        .expect("engines agree on pinned-seed cases");
}

proptest! {
    #[test]
    fn engines_agree(
        g in hypergraph_strategy(),
        pick in any::<prop::sample::Index>(),
        metric in metric_strategy(),
        min_timing in prop::option::of(0_i64..40),
    ) {
        let vertices: Vec<&String> = g.vertices().collect();
        let source = vertices[pick.index(vertices.len())];
        prop_assert_eq!(
            single_source_vertices(&g, source, metric, min_timing),
            single_source_hyperedges(&g, source, metric, min_timing)
        );
    }
}

/// Same shape as `hyperpath fuzz`: pairwise channels, source `v1`,
/// min_timing 0, all metrics.
#[test]
fn pairwise_fuzz_drill() {
    let mut rng = XorShift64::new(0x00C0_FFEE);
    for _ in 0..200 {
        let length = 10 + rng.gen_range_usize(191);
        let g = random_pairwise(&mut rng, length);
        assert!(g.contains_vertex("v1"));
        for metric in Metric::ALL {
            agreed(&g, "v1", metric, Some(0));
        }
    }
}
