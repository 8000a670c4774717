//! Per-hand motion state and the small enums it is made of.
//!
//! Each transformation primitive lives here as a method on the value type it
//! touches, so [`crate::transform`] only has to decide which ones to call.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::location::{Location, MirrorAxis};

/// Orientation of the prop relative to the hand's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    In,
    Out,
    Clock,
    Counter,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::In,
        Orientation::Out,
        Orientation::Clock,
        Orientation::Counter,
    ];

    /// Mirror image: clock and counter trade places, in/out are unchanged.
    pub fn mirrored(self) -> Self {
        match self {
            Orientation::Clock => Orientation::Counter,
            Orientation::Counter => Orientation::Clock,
            other => other,
        }
    }
}

/// The kind of motion a hand performs during one beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionKind {
    Pro,
    Anti,
    Float,
    Dash,
    Static,
}

impl MotionKind {
    pub const ALL: [MotionKind; 5] = [
        MotionKind::Pro,
        MotionKind::Anti,
        MotionKind::Float,
        MotionKind::Dash,
        MotionKind::Static,
    ];

    /// Pro and anti trade places; the rest have no spin relation to flip.
    pub fn flipped(self) -> Self {
        match self {
            MotionKind::Pro => MotionKind::Anti,
            MotionKind::Anti => MotionKind::Pro,
            other => other,
        }
    }
}

/// Rotation sense of the prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RotationDirection {
    #[serde(rename = "cw")]
    Clockwise,
    #[serde(rename = "ccw")]
    CounterClockwise,
    #[serde(rename = "none")]
    NoRotation,
}

impl RotationDirection {
    pub const ALL: [RotationDirection; 3] = [
        RotationDirection::Clockwise,
        RotationDirection::CounterClockwise,
        RotationDirection::NoRotation,
    ];

    pub fn reversed(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
            RotationDirection::NoRotation => RotationDirection::NoRotation,
        }
    }
}

/// Extra turns applied during a motion, counted in signed half turns.
/// `Float` is the turn-less float motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TurnsRecord", into = "TurnsRecord")]
pub enum Turns {
    Half(i8),
    Float,
}

impl Turns {
    pub const ZERO: Turns = Turns::Half(0);

    /// Build from a turn count such as `1.5`. Returns `None` for anything that
    /// is not a whole number of half turns in range.
    pub fn from_f64(turns: f64) -> Option<Self> {
        let halves = turns * 2.0;
        if halves.fract() != 0.0 || halves.abs() > i8::MAX as f64 {
            return None;
        }
        Some(Turns::Half(halves as i8))
    }

    /// Turn count as a float; `None` for float motions.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Turns::Half(h) => Some(h as f64 / 2.0),
            Turns::Float => None,
        }
    }

    /// Opposite sign. Float has no sign. `i8::MIN` saturates to `i8::MAX`;
    /// documents never produce it since `from_f64` stops at `±i8::MAX`.
    pub fn negated(self) -> Self {
        match self {
            Turns::Half(h) => Turns::Half(h.saturating_neg()),
            Turns::Float => Turns::Float,
        }
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_f64() {
            Some(t) => write!(f, "{t}"),
            None => f.write_str("fl"),
        }
    }
}

/// Serialized form of [`Turns`]: a number, or the word `fl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TurnsRecord {
    Count(f64),
    Word(String),
}

impl TryFrom<TurnsRecord> for Turns {
    type Error = String;

    fn try_from(record: TurnsRecord) -> Result<Self, Self::Error> {
        match record {
            TurnsRecord::Count(t) => {
                Turns::from_f64(t).ok_or_else(|| format!("{t} is not a whole number of half turns"))
            }
            TurnsRecord::Word(w) if w == "fl" => Ok(Turns::Float),
            TurnsRecord::Word(w) => Err(format!("unknown turns value `{w}`")),
        }
    }
}

impl From<Turns> for TurnsRecord {
    fn from(turns: Turns) -> Self {
        match turns.as_f64() {
            Some(t) => TurnsRecord::Count(t),
            None => TurnsRecord::Word("fl".to_string()),
        }
    }
}

/// One hand's motion during one beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MotionState {
    pub motion: MotionKind,
    pub rotation: RotationDirection,
    pub start_loc: Location,
    pub end_loc: Location,
    pub start_ori: Orientation,
    pub end_ori: Orientation,
    pub turns: Turns,
}

impl MotionState {
    /// Rotate the path clockwise by `eighths` steps of 45°.
    pub fn rotated(self, eighths: u8) -> Self {
        Self {
            start_loc: self.start_loc.rotated(eighths),
            end_loc: self.end_loc.rotated(eighths),
            ..self
        }
    }

    /// Reflect the path across `axis`; the reflection also reverses spin.
    pub fn mirrored(self, axis: MirrorAxis) -> Self {
        Self {
            start_loc: self.start_loc.reflected(axis),
            end_loc: self.end_loc.reflected(axis),
            start_ori: self.start_ori.mirrored(),
            end_ori: self.end_ori.mirrored(),
            rotation: self.rotation.reversed(),
            ..self
        }
    }

    /// Spin the prop the other way along the same path.
    pub fn flipped(self) -> Self {
        Self {
            motion: self.motion.flipped(),
            rotation: self.rotation.reversed(),
            ..self
        }
    }

    /// Negate the rotation sense and the sign of the turns.
    pub fn inverted(self) -> Self {
        Self {
            rotation: self.rotation.reversed(),
            turns: self.turns.negated(),
            ..self
        }
    }

    /// Play the motion backwards in time.
    pub fn rewound(self) -> Self {
        Self {
            start_loc: self.end_loc,
            end_loc: self.start_loc,
            start_ori: self.end_ori,
            end_ori: self.start_ori,
            rotation: self.rotation.reversed(),
            ..self
        }
    }

    /// Where the hand rests before the beat.
    pub fn start_point(&self) -> (Location, Orientation) {
        (self.start_loc, self.start_ori)
    }

    /// Where the hand rests after the beat.
    pub fn end_point(&self) -> (Location, Orientation) {
        (self.end_loc, self.end_ori)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pro_north_to_east() -> MotionState {
        MotionState {
            motion: MotionKind::Pro,
            rotation: RotationDirection::Clockwise,
            start_loc: Location::N,
            end_loc: Location::E,
            start_ori: Orientation::In,
            end_ori: Orientation::Clock,
            turns: Turns::Half(2),
        }
    }

    #[test]
    fn turns_from_f64_accepts_half_turns() {
        assert_eq!(Turns::from_f64(1.5), Some(Turns::Half(3)));
        assert_eq!(Turns::from_f64(-0.5), Some(Turns::Half(-1)));
        assert_eq!(Turns::from_f64(0.25), None);
    }

    #[test]
    fn negating_the_extreme_count_saturates() {
        assert_eq!(Turns::Half(i8::MIN).negated(), Turns::Half(i8::MAX));
        assert_eq!(Turns::Half(i8::MAX).negated(), Turns::Half(-i8::MAX));
        assert_eq!(Turns::Float.negated(), Turns::Float);
        assert_eq!(Turns::from_f64(-64.0), None);
    }

    #[test]
    fn turns_yaml_forms() {
        let t: Turns = serde_yaml::from_str("1.5").unwrap();
        assert_eq!(t, Turns::Half(3));
        let t: Turns = serde_yaml::from_str("fl").unwrap();
        assert_eq!(t, Turns::Float);
        assert!(serde_yaml::from_str::<Turns>("0.3").is_err());
        assert!(serde_yaml::from_str::<Turns>("spin").is_err());
    }

    #[test]
    fn rotation_keeps_spin_and_turns() {
        let m = pro_north_to_east().rotated(4);
        assert_eq!(m.start_loc, Location::S);
        assert_eq!(m.end_loc, Location::W);
        assert_eq!(m.rotation, RotationDirection::Clockwise);
        assert_eq!(m.motion, MotionKind::Pro);
        assert_eq!(m.turns, Turns::Half(2));
    }

    #[test]
    fn mirror_reverses_spin_and_chirality() {
        let m = pro_north_to_east().mirrored(MirrorAxis::Vertical);
        assert_eq!(m.end_loc, Location::W);
        assert_eq!(m.rotation, RotationDirection::CounterClockwise);
        assert_eq!(m.end_ori, Orientation::Counter);
        assert_eq!(m.start_ori, Orientation::In);
        assert_eq!(m.motion, MotionKind::Pro);
    }

    #[test]
    fn flip_trades_pro_for_anti_in_place() {
        let m = pro_north_to_east().flipped();
        assert_eq!(m.motion, MotionKind::Anti);
        assert_eq!(m.rotation, RotationDirection::CounterClockwise);
        assert_eq!(m.start_loc, Location::N);
        assert_eq!(m.turns, Turns::Half(2));
    }

    #[test]
    fn invert_negates_turns_in_place() {
        let m = pro_north_to_east().inverted();
        assert_eq!(m.turns, Turns::Half(-2));
        assert_eq!(m.rotation, RotationDirection::CounterClockwise);
        assert_eq!(m.motion, MotionKind::Pro);
        assert_eq!(m.end_loc, Location::E);
    }

    #[test]
    fn rewind_swaps_endpoints() {
        let m = pro_north_to_east().rewound();
        assert_eq!(m.start_point(), (Location::E, Orientation::Clock));
        assert_eq!(m.end_point(), (Location::N, Orientation::In));
    }

    #[test]
    fn primitives_are_involutions() {
        let m = pro_north_to_east();
        assert_eq!(m.mirrored(MirrorAxis::Diagonal).mirrored(MirrorAxis::Diagonal), m);
        assert_eq!(m.flipped().flipped(), m);
        assert_eq!(m.inverted().inverted(), m);
        assert_eq!(m.rewound().rewound(), m);
        assert_eq!(m.rotated(2).rotated(6), m);
    }
}
