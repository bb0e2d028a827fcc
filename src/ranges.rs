//! Compression of codepoint sequences into closed intervals.

use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::{fmt, ops::RangeInclusive};

/// A closed interval of codepoints.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    /// First codepoint.
    pub start: u32,
    /// Last codepoint, inclusive.
    pub end: u32,
}

impl Interval {
    /// An interval holding one codepoint.
    pub const fn singleton(cp: u32) -> Self {
        Interval { start: cp, end: cp }
    }

    /// Returns `true` if the interval holds exactly one codepoint.
    pub fn is_singleton(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `cp` lies within the interval.
    pub fn contains(&self, cp: u32) -> bool {
        self.start <= cp && cp <= self.end
    }

    /// The codepoints of the interval, in ascending order.
    pub fn codepoints(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// `0x37F` for a singleton, `(0x370, 0x373)` otherwise.
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_singleton() {
            write!(f, "0x{:X}", self.start)
        } else {
            write!(f, "(0x{:X}, 0x{:X})", self.start, self.end)
        }
    }
}

/// A number for a singleton, a two element array otherwise.
impl Serialize for Interval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_singleton() {
            serializer.serialize_u32(self.start)
        } else {
            let mut pair = serializer.serialize_tuple(2)?;
            pair.serialize_element(&self.start)?;
            pair.serialize_element(&self.end)?;
            pair.end()
        }
    }
}

/// An interval whose codepoints share a payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run<P> {
    /// The codepoints covered.
    pub interval: Interval,
    /// The shared payload.
    pub payload: P,
}

/// Merges a strictly ascending set of codepoints into maximal intervals.
///
/// A new interval starts wherever a value is not the successor of the previous one.
pub fn compress_set<I>(values: I) -> Vec<Interval>
where
    I: IntoIterator<Item = u32>,
{
    let mut intervals: Vec<Interval> = Vec::new();
    for cp in values {
        if let Some(last) = intervals.last_mut() {
            if last.end.checked_add(1) == Some(cp) {
                last.end = cp;
                continue;
            }
            debug_assert!(last.end < cp, "input not ascending");
        }
        intervals.push(Interval::singleton(cp));
    }
    intervals
}

/// Merges an ascending, gapless sequence of classified codepoints into runs.
///
/// A new run starts wherever the payload differs from the previous codepoint's,
/// so the runs cover the input exactly and adjacent runs never share a payload.
pub fn compress_runs<P, I>(items: I) -> Vec<Run<P>>
where
    P: PartialEq,
    I: IntoIterator<Item = (u32, P)>,
{
    let mut runs: Vec<Run<P>> = Vec::new();
    for (cp, payload) in items {
        if let Some(last) = runs.last_mut() {
            if last.payload == payload {
                last.interval.end = cp;
                continue;
            }
        }
        runs.push(Run {
            interval: Interval::singleton(cp),
            payload,
        });
    }
    runs
}

/// The intervals of the runs carrying `payload`, in order.
pub fn intervals_of<P: PartialEq>(runs: &[Run<P>], payload: &P) -> Vec<Interval> {
    runs.iter()
        .filter(|run| run.payload == *payload)
        .map(|run| run.interval)
        .collect()
}

/// Expands intervals back into their codepoints.
pub fn expand(intervals: &[Interval]) -> impl Iterator<Item = u32> + '_ {
    intervals.iter().flat_map(Interval::codepoints)
}
