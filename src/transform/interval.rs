//! Correspondence intervals.
//!
//! An interval splits a sequence into `k` equal parts; beat `i` corresponds
//! to beat `i + len / k`. It is serialized as the bare divisor `k`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::GRID_POINTS;

/// How many equal parts a sequence is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Interval {
    /// Two parts: the second half mirrors the first.
    Halved,
    /// Four parts.
    Quartered,
    /// Any other divisor. Only [`Interval::from_divisor`] builds one.
    Parts(PartCount),
}

/// Divisor of an [`Interval::Parts`]: at least 3 and never 4, so every
/// divisor has exactly one spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartCount(usize);

impl PartCount {
    pub fn get(self) -> usize {
        self.0
    }
}

impl Interval {
    /// Canonical interval for a divisor. `None` below 2.
    pub fn from_divisor(k: usize) -> Option<Self> {
        match k {
            0 | 1 => None,
            2 => Some(Interval::Halved),
            4 => Some(Interval::Quartered),
            k => Some(Interval::Parts(PartCount(k))),
        }
    }

    /// Number of parts.
    pub fn divisor(self) -> usize {
        match self {
            Interval::Halved => 2,
            Interval::Quartered => 4,
            Interval::Parts(k) => k.get(),
        }
    }

    /// Beat offset between corresponding beats, or `None` when the interval
    /// does not divide `len`.
    pub fn period(self, len: usize) -> Option<usize> {
        let k = self.divisor();
        (len > 0 && len % k == 0).then(|| len / k)
    }

    /// Rotation step in 45° units for one period: a full turn spread over
    /// `k` parts. `None` when the step falls between grid points.
    pub fn rotation_eighths(self) -> Option<u8> {
        let k = self.divisor();
        let points = GRID_POINTS as usize;
        (points % k == 0).then(|| (points / k) as u8)
    }
}

impl TryFrom<usize> for Interval {
    type Error = String;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        Interval::from_divisor(k).ok_or_else(|| format!("interval divisor must be at least 2, got {k}"))
    }
}

impl From<Interval> for usize {
    fn from(interval: Interval) -> Self {
        interval.divisor()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Halved => f.write_str("halved"),
            Interval::Quartered => f.write_str("quartered"),
            Interval::Parts(k) => write!(f, "1/{}", k.get()),
        }
    }
}
