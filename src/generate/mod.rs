//! Circular sequence generator.
//!
//! Draws the first period of a sequence as a continuous random path, then
//! fills the rest by applying the requested transformation period by period.
//! Randomness comes from a seeded `ChaCha8Rng`, so a seed always yields the
//! same sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::designation;
use crate::detect::matcher::apply_all;
use crate::error::DetectError;
use crate::grid::{GridMode, Hand, Location, MotionKind, MotionState, Orientation, RotationDirection, Turns};
use crate::sequence::{Beat, Sequence};
use crate::transform::{Component, CompositeTransformation, Interval, Operation};

/// Random draws tried before giving up on a transformation that only closes
/// for special paths.
const MAX_ATTEMPTS: usize = 64;

/// Largest half-turn count drawn for a motion.
const MAX_HALF_TURNS: i8 = 3;

type Point = (Location, Orientation);

/// Seeded generator of circular sequences.
pub struct SequenceGenerator {
    rng: ChaCha8Rng,
    grid: GridMode,
}

impl SequenceGenerator {
    pub fn new(grid: GridMode, seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            grid,
        }
    }

    pub fn grid(&self) -> GridMode {
        self.grid
    }

    /// Build a `len`-beat circular sequence that `composite` explains at its
    /// own interval.
    pub fn circular(
        &mut self,
        word: &str,
        len: usize,
        composite: &CompositeTransformation,
    ) -> Result<Sequence, DetectError> {
        if let Some(&c) = composite
            .components()
            .iter()
            .find(|c| matches!(c, Component::Rewound | Component::Modular))
        {
            return Err(DetectError::Unsupported(c.to_string()));
        }
        let interval = composite
            .interval()
            .ok_or_else(|| DetectError::Unsupported(format!("{composite} without an interval")))?;
        let incompatible = || DetectError::IncompatibleInterval {
            divisor: interval.divisor(),
            len,
        };
        let period = interval.period(len).ok_or_else(incompatible)?;
        let ops = composite.operations(self.grid).ok_or_else(incompatible)?;

        for attempt in 0..MAX_ATTEMPTS {
            let sequence = self.attempt(word, len, period, &ops);
            if sequence.is_circular() && wraps(sequence.beats(), period, &ops) {
                debug!(word, len, attempt, "generated circular sequence");
                return Ok(sequence);
            }
        }
        Err(incompatible())
    }

    /// Parse `label` (table label or component list) and generate at `interval`.
    pub fn from_label(
        &mut self,
        word: &str,
        len: usize,
        label: &str,
        interval: Interval,
    ) -> Result<Sequence, DetectError> {
        let components = designation::parse_label(label)?;
        self.circular(word, len, &CompositeTransformation::new(components, Some(interval)))
    }

    fn attempt(&mut self, word: &str, len: usize, period: usize, ops: &[Operation]) -> Sequence {
        let start = [self.point(), self.point()];

        // Operations act on start points independently of the motion, so a
        // throwaway first beat is enough to learn where the next period begins.
        let probe = Beat::new(0, self.motion(start[0], start[0]), self.motion(start[1], start[1]));
        let mapped = apply_all(ops, &probe);
        let target = Hand::ALL.map(|hand| {
            mapped
                .hand(hand)
                .map(MotionState::start_point)
                .unwrap_or(start[0])
        });

        let mut beats = Vec::with_capacity(len);
        let mut current = start;
        for i in 0..period {
            let next = if i + 1 == period {
                target
            } else {
                [self.point(), self.point()]
            };
            let blue = self.motion(current[0], next[0]);
            let red = self.motion(current[1], next[1]);
            beats.push(Beat::new(i + 1, blue, red));
            current = next;
        }
        for i in period..len {
            let beat = apply_all(ops, &beats[i - period]).at(i + 1);
            beats.push(beat);
        }

        let hold = |(loc, ori): Point| MotionState {
            motion: MotionKind::Static,
            rotation: RotationDirection::NoRotation,
            start_loc: loc,
            end_loc: loc,
            start_ori: ori,
            end_ori: ori,
            turns: Turns::ZERO,
        };
        Sequence::new(word, self.grid, beats).with_start_position(Beat::new(0, hold(start[0]), hold(start[1])))
    }

    fn point(&mut self) -> Point {
        let points = self.grid.hand_points();
        let loc = self.pick(&points);
        (loc, self.pick(&Orientation::ALL))
    }

    fn motion(&mut self, (start_loc, start_ori): Point, (end_loc, end_ori): Point) -> MotionState {
        let kinds: &[MotionKind] = if start_loc == end_loc {
            &MotionKind::ALL
        } else {
            &[MotionKind::Pro, MotionKind::Anti, MotionKind::Float, MotionKind::Dash]
        };
        let motion = self.pick(kinds);
        let rotation = match motion {
            MotionKind::Static => RotationDirection::NoRotation,
            _ => self.pick(&[RotationDirection::Clockwise, RotationDirection::CounterClockwise]),
        };
        let turns = match motion {
            MotionKind::Float => Turns::Float,
            _ => Turns::Half(self.rng.gen_range(0..=MAX_HALF_TURNS)),
        };
        MotionState {
            motion,
            rotation,
            start_loc,
            end_loc,
            start_ori,
            end_ori,
            turns,
        }
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.rng.gen_range(0..items.len())]
    }
}

/// Whether the last period maps back onto the first.
fn wraps(beats: &[Beat], period: usize, ops: &[Operation]) -> bool {
    let len = beats.len();
    (0..period).all(|j| apply_all(ops, &beats[len - period + j]).same_motion(&beats[j]))
}
