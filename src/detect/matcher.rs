//! Beat-pair matcher: tests one hypothesis against a run of beats.
//!
//! Matching is cyclic: for period `p`, every beat `i` is compared with beat
//! `(i + p) % len`. Forward checks (`i + p < len`) produce the reported
//! pairs; the wrap-around checks decide stability, i.e. whether the last
//! period maps back onto the first and the loop closes.

use crate::grid::GridMode;
use crate::sequence::Beat;
use crate::transform::{CompositeTransformation, Operation};

use super::result::BeatPair;

/// What one hypothesis achieved.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub pairs: Vec<BeatPair>,
    /// Checks that succeeded, forward and wrap-around.
    pub matched: usize,
    /// Checks performed; equals the number of beats.
    pub total: usize,
    pub stable: bool,
}

impl MatchOutcome {
    pub fn completeness(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.matched == self.total
    }
}

/// Check `map(beat[i]) == beat[(i + period) % len]` for every `i`.
///
/// `map` returns `None` for beats it cannot transform; those count as misses.
pub fn match_period(beats: &[Beat], period: usize, map: impl Fn(&Beat) -> Option<Beat>) -> MatchOutcome {
    let len = beats.len();
    let mut pairs = Vec::new();
    let mut matched = 0;
    let mut stable = true;

    if len == 0 || period == 0 || period >= len {
        return MatchOutcome {
            pairs,
            matched,
            total: len,
            stable: false,
        };
    }

    for (i, beat) in beats.iter().enumerate() {
        let j = (i + period) % len;
        let hit = map(beat).is_some_and(|mapped| mapped.same_motion(&beats[j]));
        if hit {
            matched += 1;
        }
        if i + period < len {
            if hit {
                pairs.push(BeatPair::new(i, j));
            }
        } else if !hit {
            stable = false;
        }
    }

    MatchOutcome {
        pairs,
        matched,
        total: len,
        stable: stable && len > 0,
    }
}

/// Match a composite at its own interval. `None` when the composite is not
/// applicable: no interval, an interval that does not divide the run, or a
/// component the interval cannot express.
pub fn match_composite(
    beats: &[Beat],
    grid: GridMode,
    composite: &CompositeTransformation,
) -> Option<MatchOutcome> {
    let period = composite.interval()?.period(beats.len())?;
    let ops = composite.operations(grid)?;
    Some(match_period(beats, period, |b| Some(apply_all(&ops, b))))
}

/// Match the time-reversal hypothesis: beat `len - 1 - i` is beat `i` played
/// backwards. The middle beat of an odd run pairs with itself.
pub fn match_rewound(beats: &[Beat]) -> MatchOutcome {
    let len = beats.len();
    let mut pairs = Vec::new();
    let mut matched = 0;
    let mut stable = true;

    for (i, beat) in beats.iter().enumerate() {
        let j = len - 1 - i;
        let hit = Operation::Rewind.apply(beat).same_motion(&beats[j]);
        if hit {
            matched += 1;
        }
        if i <= j {
            if hit {
                pairs.push(BeatPair::new(i, j));
            }
        } else if !hit {
            stable = false;
        }
    }

    MatchOutcome {
        pairs,
        matched,
        total: len,
        stable: stable && len > 0,
    }
}

pub(crate) fn apply_all(ops: &[Operation], beat: &Beat) -> Beat {
    ops.iter().fold(*beat, |b, op| op.apply(&b))
}
