//! Beats and sequences: the immutable input the detector works on.
//!
//! A [`Sequence`] is an ordered list of [`Beat`]s plus the metadata needed to
//! interpret it (grid mode, optional start position). Circularity is decided
//! once, when the sequence is built, and never recomputed.

pub mod document;

pub use document::{BeatRecord, MotionRecord, SequenceDocument};

use serde::{Deserialize, Serialize};

use crate::grid::{GridMode, Hand, MotionState};

/// One beat: the motion of both hands at one position in the sequence.
///
/// A hand is `None` when its source record was incomplete; such beats never
/// take part in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Beat {
    /// 1-based position in the sequence, start position excluded.
    pub index: usize,
    pub blue: Option<MotionState>,
    pub red: Option<MotionState>,
}

impl Beat {
    pub fn new(index: usize, blue: MotionState, red: MotionState) -> Self {
        Self {
            index,
            blue: Some(blue),
            red: Some(red),
        }
    }

    /// A beat where either hand may be missing.
    pub fn partial(index: usize, blue: Option<MotionState>, red: Option<MotionState>) -> Self {
        Self { index, blue, red }
    }

    pub fn hand(&self, hand: Hand) -> Option<&MotionState> {
        match hand {
            Hand::Blue => self.blue.as_ref(),
            Hand::Red => self.red.as_ref(),
        }
    }

    /// Whether both hands carry motion data.
    pub fn is_complete(&self) -> bool {
        self.blue.is_some() && self.red.is_some()
    }

    /// Semantic equality: both hands present and equal. The index is ignored.
    pub fn same_motion(&self, other: &Beat) -> bool {
        self.is_complete() && other.is_complete() && self.blue == other.blue && self.red == other.red
    }

    /// Apply `f` to each hand that is present.
    pub fn map_hands(self, f: impl Fn(MotionState) -> MotionState) -> Self {
        Self {
            index: self.index,
            blue: self.blue.map(&f),
            red: self.red.map(&f),
        }
    }

    /// Exchange the two hands.
    pub fn swapped(self) -> Self {
        Self {
            index: self.index,
            blue: self.red,
            red: self.blue,
        }
    }

    /// A copy carrying a different position.
    pub fn at(self, index: usize) -> Self {
        Self { index, ..self }
    }
}

/// An ordered, immutable beat sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    word: String,
    grid: GridMode,
    beats: Vec<Beat>,
    start_position: Option<Beat>,
    circular: bool,
}

impl Sequence {
    /// Build a sequence and derive its circularity from the beats.
    pub fn new(word: impl Into<String>, grid: GridMode, beats: Vec<Beat>) -> Self {
        let circular = closes_loop(&beats, None);
        Self {
            word: word.into(),
            grid,
            beats,
            start_position: None,
            circular,
        }
    }

    /// Attach a start position and re-derive circularity against it.
    pub fn with_start_position(mut self, start: Beat) -> Self {
        self.circular = closes_loop(&self.beats, Some(&start));
        self.start_position = Some(start);
        self
    }

    /// Override circularity with the value supplied by the data source.
    pub fn with_circularity(mut self, circular: bool) -> Self {
        self.circular = circular;
        self
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn grid(&self) -> GridMode {
        self.grid
    }

    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }

    pub fn start_position(&self) -> Option<&Beat> {
        self.start_position.as_ref()
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Number of beats with at least one hand missing.
    pub fn incomplete_beats(&self) -> usize {
        self.beats.iter().filter(|b| !b.is_complete()).count()
    }
}

/// Whether the state after the last beat equals the state before the first.
///
/// The reference state is the start position's end point when present,
/// otherwise the first beat's start point. Missing hands never close.
fn closes_loop(beats: &[Beat], start: Option<&Beat>) -> bool {
    let (Some(first), Some(last)) = (beats.first(), beats.last()) else {
        return false;
    };
    Hand::ALL.iter().all(|&hand| {
        let reference = match start {
            Some(s) => s.hand(hand).map(|m| m.end_point()),
            None => first.hand(hand).map(|m| m.start_point()),
        };
        match (reference, last.hand(hand)) {
            (Some(r), Some(l)) => r == l.end_point(),
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Location, MotionKind, Orientation, RotationDirection, Turns};

    fn shift(from: Location, to: Location) -> MotionState {
        MotionState {
            motion: MotionKind::Pro,
            rotation: RotationDirection::Clockwise,
            start_loc: from,
            end_loc: to,
            start_ori: Orientation::In,
            end_ori: Orientation::In,
            turns: Turns::ZERO,
        }
    }

    fn stay(at: Location) -> MotionState {
        MotionState {
            motion: MotionKind::Static,
            rotation: RotationDirection::NoRotation,
            ..shift(at, at)
        }
    }

    #[test]
    fn closed_path_is_circular() {
        let beats = vec![
            Beat::new(1, shift(Location::N, Location::E), shift(Location::S, Location::W)),
            Beat::new(2, shift(Location::E, Location::N), shift(Location::W, Location::S)),
        ];
        let seq = Sequence::new("AB", GridMode::Diamond, beats);
        assert!(seq.is_circular());
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn open_path_is_not_circular() {
        let beats = vec![Beat::new(
            1,
            shift(Location::N, Location::E),
            shift(Location::S, Location::W),
        )];
        let seq = Sequence::new("A", GridMode::Diamond, beats);
        assert!(!seq.is_circular());
    }

    #[test]
    fn start_position_is_the_reference_when_present() {
        let beats = vec![Beat::new(
            1,
            shift(Location::E, Location::N),
            shift(Location::W, Location::S),
        )];
        let open = Sequence::new("A", GridMode::Diamond, beats.clone());
        assert!(!open.is_circular());

        let start = Beat::new(0, stay(Location::N), stay(Location::S));
        let closed = Sequence::new("A", GridMode::Diamond, beats).with_start_position(start);
        assert!(closed.is_circular());
    }

    #[test]
    fn missing_hand_never_closes() {
        let beats = vec![Beat::partial(1, Some(stay(Location::N)), None)];
        let seq = Sequence::new("A", GridMode::Diamond, beats);
        assert!(!seq.is_circular());
        assert_eq!(seq.incomplete_beats(), 1);
    }

    #[test]
    fn empty_sequence_is_not_circular() {
        let seq = Sequence::new("", GridMode::Box, Vec::new());
        assert!(seq.is_empty());
        assert!(!seq.is_circular());
    }

    #[test]
    fn circularity_override() {
        let seq = Sequence::new("", GridMode::Diamond, Vec::new()).with_circularity(true);
        assert!(seq.is_circular());
    }

    #[test]
    fn same_motion_ignores_index() {
        let a = Beat::new(1, stay(Location::N), stay(Location::S));
        let b = a.at(7);
        assert!(a.same_motion(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn incomplete_beats_never_match() {
        let a = Beat::partial(1, Some(stay(Location::N)), None);
        assert!(!a.same_motion(&a));
    }

    #[test]
    fn swapped_exchanges_hands() {
        let a = Beat::new(1, stay(Location::N), stay(Location::S));
        let s = a.swapped();
        assert_eq!(s.blue, a.red);
        assert_eq!(s.red, a.blue);
    }
}
