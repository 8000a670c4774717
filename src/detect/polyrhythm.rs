//! Polyrhythmic detector: independent periods for each hand.
//!
//! Each hand is matched on its own against identity, rotation, mirror, flip
//! and invert (swap needs both hands). The sequence is polyrhythmic when both
//! hands repeat but at different periods; equal periods would already have
//! surfaced as an ordinary whole-sequence candidate.

use tracing::debug;

use crate::grid::{GridMode, Hand, MotionState};
use crate::sequence::Beat;
use crate::transform::{resolve, Component, Interval, Operation};

use super::result::HandPeriods;

/// Components that act on a single hand.
const SINGLE_HAND: [Component; 4] = [
    Component::Rotated,
    Component::Mirrored,
    Component::Flipped,
    Component::Inverted,
];

/// Periods of both hands when they differ.
pub fn detect_polyrhythmic(beats: &[Beat], grid: GridMode) -> Option<HandPeriods> {
    let blue = hand_period(beats, grid, Hand::Blue)?;
    let red = hand_period(beats, grid, Hand::Red)?;
    debug!(blue, red, "per-hand periods");
    (blue != red).then_some(HandPeriods { blue, red })
}

/// Smallest proper period at which `hand` repeats under some single-hand
/// transformation.
pub fn hand_period(beats: &[Beat], grid: GridMode, hand: Hand) -> Option<usize> {
    let len = beats.len();
    let states: Vec<MotionState> = beats
        .iter()
        .map(|b| b.hand(hand).copied())
        .collect::<Option<_>>()?;

    (1..len).filter(|p| len % p == 0).find(|&period| {
        let interval = Interval::from_divisor(len / period);
        hand_hypotheses(interval, grid)
            .iter()
            .any(|ops| repeats(&states, period, ops))
    })
}

/// Every subset of the single-hand components, the empty one being identity.
fn hand_hypotheses(interval: Option<Interval>, grid: GridMode) -> Vec<Vec<Operation>> {
    (0u32..1 << SINGLE_HAND.len())
        .filter_map(|mask| {
            SINGLE_HAND
                .iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, &c)| resolve(c, interval, grid))
                .collect::<Option<Vec<_>>>()
        })
        .collect()
}

fn repeats(states: &[MotionState], period: usize, ops: &[Operation]) -> bool {
    let len = states.len();
    states.iter().enumerate().all(|(i, &m)| {
        ops.iter()
            .try_fold(m, |acc, op| op.apply_state(acc))
            .is_some_and(|mapped| mapped == states[(i + period) % len])
    })
}
