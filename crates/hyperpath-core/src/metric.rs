// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Distance metrics and the strategy both engines relax labels with.
//!
//! | Metric   | Seed (first hop at `t`) | Relax from `R` via hyperedge at `t` |
//! |----------|-------------------------|-------------------------------------|
//! | SHORTEST | 1 hop                   | `R.hops + 1`                        |
//! | FOREMOST | arrival `t`             | arrival `t`                         |
//! | FASTEST  | duration 0, anchor `t`  | `t - R.anchor`, anchor kept         |
//!
//! Relaxation is only attempted when `t >= R.last`, so every relaxed label is
//! at least as large as its predecessor. That monotonicity is what lets both
//! engines settle a vertex the first time it is reached.
use core::fmt;
use core::str::FromStr;

use crate::error::{ConfigError, DataError};
use crate::timing::Timing;

/// Temporal distance semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Metric {
    /// Fewest hyperedges on the path.
    #[default]
    Shortest,
    /// Smallest time between the first and last hyperedge of the path.
    Fastest,
    /// Earliest timing of the last hyperedge of the path.
    Foremost,
}

impl Metric {
    /// All metrics, in declaration order.
    pub const ALL: [Self; 3] = [Self::Shortest, Self::Fastest, Self::Foremost];

    /// Lower-case name accepted by [`Metric::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Shortest => "shortest",
            Self::Fastest => "fastest",
            Self::Foremost => "foremost",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shortest" => Ok(Self::Shortest),
            "fastest" => Ok(Self::Fastest),
            "foremost" => Ok(Self::Foremost),
            _ => Err(ConfigError::UnknownMetric(s.to_owned())),
        }
    }
}

/// Distance of one reachable vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance<T: Timing> {
    /// SHORTEST: number of hyperedges, at least 1.
    Hops(u64),
    /// FOREMOST: timing of the last hyperedge.
    Arrival(T),
    /// FASTEST: last timing minus the timing of the first hyperedge.
    Duration(T::Span),
}

impl<T: Timing> Distance<T> {
    /// Hop count for SHORTEST distances.
    pub fn hops(&self) -> Option<u64> {
        match self {
            Self::Hops(hops) => Some(*hops),
            _ => None,
        }
    }

    /// Arrival timing for FOREMOST distances.
    pub fn arrival(&self) -> Option<T> {
        match self {
            Self::Arrival(at) => Some(*at),
            _ => None,
        }
    }

    /// Duration for FASTEST distances.
    pub fn duration(&self) -> Option<T::Span> {
        match self {
            Self::Duration(span) => Some(*span),
            _ => None,
        }
    }
}

/// Search-local distance record.
///
/// Labels are totally ordered by `(key, last, anchor)`. Ties on the metric
/// value go to the label whose path ended earlier, since it leaves more
/// hyperedges eligible for continuation. Equal labels are identical, so the
/// order in which equal candidates are found cannot change the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Label<K, T> {
    /// Metric value.
    pub(crate) key: K,
    /// Timing of the last hyperedge on the path.
    pub(crate) last: T,
    /// Timing of the first hyperedge on the path.
    pub(crate) anchor: T,
}

/// Seed, relax and report rules of one metric.
pub(crate) trait Strategy<T: Timing> {
    /// Metric value carried by labels.
    type Key: Copy + Ord + fmt::Debug;

    /// Label of a vertex reached by a first hop at `timing`.
    fn seed(timing: T) -> Result<Label<Self::Key, T>, DataError>;

    /// Label of a vertex reached from `pred` by a hyperedge at `timing`.
    ///
    /// Callers guarantee `timing >= pred.last`.
    fn relax(pred: &Label<Self::Key, T>, timing: T) -> Result<Label<Self::Key, T>, DataError>;

    /// Public distance value of a settled label.
    fn distance(label: &Label<Self::Key, T>) -> Distance<T>;
}

pub(crate) struct Shortest;
pub(crate) struct Fastest;
pub(crate) struct Foremost;

impl<T: Timing> Strategy<T> for Shortest {
    type Key = u64;

    fn seed(timing: T) -> Result<Label<u64, T>, DataError> {
        Ok(Label {
            key: 1,
            last: timing,
            anchor: timing,
        })
    }

    fn relax(pred: &Label<u64, T>, timing: T) -> Result<Label<u64, T>, DataError> {
        Ok(Label {
            key: pred.key.saturating_add(1),
            last: timing,
            anchor: pred.anchor,
        })
    }

    fn distance(label: &Label<u64, T>) -> Distance<T> {
        Distance::Hops(label.key)
    }
}

impl<T: Timing> Strategy<T> for Foremost {
    type Key = T;

    fn seed(timing: T) -> Result<Label<T, T>, DataError> {
        Ok(Label {
            key: timing,
            last: timing,
            anchor: timing,
        })
    }

    fn relax(pred: &Label<T, T>, timing: T) -> Result<Label<T, T>, DataError> {
        Ok(Label {
            key: timing,
            last: timing,
            anchor: pred.anchor,
        })
    }

    fn distance(label: &Label<T, T>) -> Distance<T> {
        Distance::Arrival(label.key)
    }
}

impl<T: Timing> Strategy<T> for Fastest {
    type Key = T::Span;

    fn seed(timing: T) -> Result<Label<T::Span, T>, DataError> {
        Ok(Label {
            // Zero in the span type of this timing's own domain.
            key: timing.span_since(&timing)?,
            last: timing,
            anchor: timing,
        })
    }

    fn relax(pred: &Label<T::Span, T>, timing: T) -> Result<Label<T::Span, T>, DataError> {
        Ok(Label {
            key: timing.span_since(&pred.anchor)?,
            last: timing,
            anchor: pred.anchor,
        })
    }

    fn distance(label: &Label<T::Span, T>) -> Distance<T> {
        Distance::Duration(label.key)
    }
}
