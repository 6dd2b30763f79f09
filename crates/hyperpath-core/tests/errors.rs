// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]

mod common;

use common::{graph, literal_fixture};
use hyperpath_core::{
    parse_datetime, single_source_hyperedges, single_source_vertices, ConfigError, DataError,
    LookupError, Metric, SearchEngine, SearchError, TemporalHypergraph, TemporalHypergraphView,
    Timestamp,
};

#[test]
fn unknown_source_is_a_lookup_error() {
    let g = literal_fixture();
    for engine in SearchEngine::ALL {
        let err = engine
            .run(&g, &"x1".to_owned(), Metric::Shortest, Some(0))
            .expect_err("x1 is not a vertex");
        assert_eq!(
            err,
            SearchError::Lookup(LookupError::UnknownVertex("\"x1\"".into()))
        );
        assert!(err.to_string().starts_with("entity not found"));
    }
}

#[test]
fn unknown_metric_is_rejected_before_searching() {
    let err = "slowest".parse::<Metric>().expect_err("not a metric");
    assert_eq!(err, ConfigError::UnknownMetric("slowest".into()));
    assert!(matches!(SearchError::from(err), SearchError::Config(_)));
}

#[test]
fn mixed_timestamp_kinds_are_data_errors() {
    let at = parse_datetime("2020-02-05 12:49:39").expect("datetime");
    let g = TemporalHypergraph::<&str, &str, Timestamp>::builder()
        .with_hyperedge("h1", ["a", "b"], Timestamp::Tick(5))
        .and_then(|b| b.with_hyperedge("h2", ["b", "c"], Timestamp::DateTime(at)))
        .expect("construction does not compare timings")
        .build();

    let err = single_source_vertices(&g, &"a", Metric::Foremost, None)
        .expect_err("b cannot continue from a tick to a date-time");
    assert!(matches!(
        err,
        SearchError::Data(DataError::IncomparableTimings { .. })
    ));
    let err = single_source_hyperedges(&g, &"a", Metric::Foremost, None)
        .expect_err("same failure through hyperedges");
    assert!(matches!(
        err,
        SearchError::Data(DataError::IncomparableTimings { .. })
    ));
}

#[test]
fn mixed_kinds_on_separate_first_hops_are_data_errors() {
    let at = parse_datetime("2020-02-05T12:49:39").expect("datetime");
    let g = TemporalHypergraph::<&str, &str, Timestamp>::builder()
        .with_hyperedge("h1", ["a", "b"], Timestamp::Tick(5))
        .and_then(|b| b.with_hyperedge("h2", ["a", "c"], Timestamp::DateTime(at)))
        .expect("construction does not compare timings")
        .build();

    for engine in SearchEngine::ALL {
        for metric in Metric::ALL {
            let err = engine
                .run(&g, &"a", metric, None)
                .expect_err("a starts in two timing domains");
            assert!(
                matches!(err, SearchError::Data(DataError::IncomparableTimings { .. })),
                "{engine} under {metric}: {err}"
            );
        }
    }
}

#[test]
fn min_timing_of_the_wrong_kind_is_a_data_error() {
    let g = TemporalHypergraph::<&str, &str, Timestamp>::builder()
        .with_hyperedge("h1", ["a", "b"], Timestamp::Tick(5))
        .expect("valid")
        .build();
    let bound = Timestamp::DateTime(parse_datetime("2020-01-01T00:00:00").expect("datetime"));
    assert!(matches!(
        single_source_hyperedges(&g, &"a", Metric::Shortest, Some(bound)),
        Err(SearchError::Data(_))
    ));
}

#[test]
fn fastest_span_overflow_is_a_data_error() {
    let g = graph(&[("h1", &["a", "b"], i64::MIN), ("h2", &["b", "c"], i64::MAX)]);
    let err = single_source_vertices(&g, &"a".to_owned(), Metric::Fastest, None)
        .expect_err("span does not fit in i64");
    assert!(matches!(err, SearchError::Data(DataError::SpanOverflow { .. })));
}

/// A view whose only hyperedge claims no participants.
struct Hollow;

const HOLLOW_VERTICES: &[u32] = &[0];
const HOLLOW_HYPEREDGES: &[u32] = &[7];

impl TemporalHypergraphView for Hollow {
    type Vertex = u32;
    type Hyperedge = u32;
    type Timing = u64;

    fn vertices(&self) -> impl Iterator<Item = &u32> {
        HOLLOW_VERTICES.iter()
    }

    fn hyperedges(&self) -> impl Iterator<Item = &u32> {
        HOLLOW_HYPEREDGES.iter()
    }

    fn participants(&self, hyperedge: &u32) -> Result<&[u32], LookupError> {
        match hyperedge {
            7 => Ok(&[]),
            other => Err(LookupError::UnknownHyperedge(other.to_string())),
        }
    }

    fn incident(&self, vertex: &u32) -> Result<&[u32], LookupError> {
        match vertex {
            0 => Ok(HOLLOW_HYPEREDGES),
            other => Err(LookupError::UnknownVertex(other.to_string())),
        }
    }

    fn timing(&self, hyperedge: &u32) -> Result<u64, LookupError> {
        match hyperedge {
            7 => Ok(1),
            other => Err(LookupError::UnknownHyperedge(other.to_string())),
        }
    }
}

#[test]
fn empty_participant_sets_are_data_errors() {
    for engine in SearchEngine::ALL {
        let err = engine
            .run(&Hollow, &0, Metric::Shortest, None)
            .expect_err("hyperedge 7 is empty");
        assert_eq!(err, SearchError::Data(DataError::EmptyHyperedge("7".into())));
    }
}
