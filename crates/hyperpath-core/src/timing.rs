// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Timing domains attached to hyperedges.
//!
//! Every hyperedge carries one scalar timing drawn from a totally ordered
//! domain. The engines need two operations on it: a comparison (to enforce
//! non-decreasing timings along a path) and a difference (to measure FASTEST
//! durations). Both are fallible so that heterogeneous domains such as
//! [`Timestamp`] can report incomparable values instead of silently ordering
//! them.
use core::cmp::Ordering;
use core::fmt;
use std::borrow::Cow;

use time::format_description::well_known::Iso8601;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::error::{DataError, DateTimeError};

/// Scalar time value attached to a hyperedge.
///
/// `Ord` gives the engines a deterministic queue order; [`Timing::try_compare`]
/// is what they use whenever the temporal-ordering rule is checked.
pub trait Timing: Copy + Ord + fmt::Debug {
    /// Difference between two timings (FASTEST durations).
    type Span: Copy + Ord + fmt::Debug;

    /// Compares two timings, failing when they belong to different domains.
    fn try_compare(&self, other: &Self) -> Result<Ordering, DataError> {
        Ok(self.cmp(other))
    }

    /// Returns `self - earlier`.
    fn span_since(&self, earlier: &Self) -> Result<Self::Span, DataError>;
}

fn span_overflow<T: fmt::Debug>(earlier: &T, later: &T) -> DataError {
    DataError::SpanOverflow {
        earlier: format!("{earlier:?}"),
        later: format!("{later:?}"),
    }
}

macro_rules! integer_timing {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Timing for $ty {
                type Span = $ty;

                fn span_since(&self, earlier: &Self) -> Result<Self::Span, DataError> {
                    self.checked_sub(*earlier)
                        .ok_or_else(|| span_overflow(earlier, self))
                }
            }
        )*
    };
}

integer_timing!(i32, i64, u32, u64);

impl Timing for PrimitiveDateTime {
    type Span = Duration;

    fn span_since(&self, earlier: &Self) -> Result<Self::Span, DataError> {
        Ok(*self - *earlier)
    }
}

/// Timing read from channel dumps: either an integer tick or a calendar
/// date-time.
///
/// A single hypergraph is expected to use one kind throughout. Mixing them is
/// a data error reported by [`Timing::try_compare`] and [`Timing::span_since`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timestamp {
    /// Integer tick.
    Tick(i64),
    /// Calendar date-time without offset.
    DateTime(PrimitiveDateTime),
}

/// Difference between two [`Timestamp`]s of the same kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Elapsed {
    /// Tick difference.
    Ticks(i64),
    /// Wall-clock difference.
    Time(Duration),
}

impl Timestamp {
    /// Short name of the timing kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Tick(_) => "tick",
            Self::DateTime(_) => "datetime",
        }
    }

    fn incomparable(&self, other: &Self) -> DataError {
        DataError::IncomparableTimings {
            left: format!("{self:?}"),
            right: format!("{other:?}"),
        }
    }
}

impl Timing for Timestamp {
    type Span = Elapsed;

    fn try_compare(&self, other: &Self) -> Result<Ordering, DataError> {
        match (self, other) {
            (Self::Tick(a), Self::Tick(b)) => Ok(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Ok(a.cmp(b)),
            _ => Err(self.incomparable(other)),
        }
    }

    fn span_since(&self, earlier: &Self) -> Result<Self::Span, DataError> {
        match (self, earlier) {
            (Self::Tick(a), Self::Tick(b)) => a.span_since(b).map(Elapsed::Ticks),
            (Self::DateTime(a), Self::DateTime(b)) => a.span_since(b).map(Elapsed::Time),
            _ => Err(self.incomparable(earlier)),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(tick: i64) -> Self {
        Self::Tick(tick)
    }
}

impl From<PrimitiveDateTime> for Timestamp {
    fn from(at: PrimitiveDateTime) -> Self {
        Self::DateTime(at)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tick(tick) => write!(f, "{tick}"),
            Self::DateTime(at) => write!(f, "{at}"),
        }
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ticks(ticks) => write!(f, "{ticks}"),
            Self::Time(duration) => write!(f, "{duration}"),
        }
    }
}

/// Parses an ISO-8601 date-time (`2020-02-05T12:49:39`).
///
/// A single space is accepted in place of the `T` separator. A UTC offset
/// (`Z`, `+02:00`) is applied and the result is expressed in UTC, so values
/// written with different offsets order by the instant they name. A date
/// alone means midnight of that date.
pub fn parse_datetime(input: &str) -> Result<PrimitiveDateTime, DateTimeError> {
    let trimmed = input.trim();
    let text = if trimmed.len() > 10 && trimmed.as_bytes()[10] == b' ' {
        Cow::Owned(format!("{}T{}", &trimmed[..10], &trimmed[11..]))
    } else {
        Cow::Borrowed(trimmed)
    };

    if let Ok(at) = OffsetDateTime::parse(&text, &Iso8601::DEFAULT) {
        return at
            .checked_to_offset(UtcOffset::UTC)
            .map(|utc| PrimitiveDateTime::new(utc.date(), utc.time()))
            .ok_or_else(|| DateTimeError::OutOfRange(trimmed.to_owned()));
    }
    match PrimitiveDateTime::parse(&text, &Iso8601::DEFAULT) {
        Ok(at) => Ok(at),
        Err(err) => Date::parse(&text, &Iso8601::DEFAULT)
            .map(Date::midnight)
            .map_err(|_| err.into()),
    }
}
