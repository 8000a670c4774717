//! Grid & motion model: the value types every beat is built from.
//!
//! Two hands (blue and red) move between eight compass points. Each hand's
//! motion for one beat is a [`MotionState`]; a beat pairs the two.

pub mod location;
pub mod motion;

pub use location::{GridMode, Location, MirrorAxis, GRID_POINTS};
pub use motion::{MotionKind, MotionState, Orientation, RotationDirection, Turns};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which hand a motion state belongs to. Blue is color A, red is color B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Blue,
    Red,
}

impl Hand {
    pub const ALL: [Hand; 2] = [Hand::Blue, Hand::Red];

    pub fn name(self) -> &'static str {
        match self {
            Hand::Blue => "blue",
            Hand::Red => "red",
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
