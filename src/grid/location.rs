//! Grid locations on the eight-point compass and the symmetries of the grid.
//!
//! Locations are indexed clockwise from north in 45° steps, so rotations and
//! reflections reduce to modular arithmetic on that index.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of points on the compass grid.
pub const GRID_POINTS: u8 = 8;

/// A point on the grid where a hand can start or end a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Location {
    /// All locations in clockwise order starting at north.
    pub const ALL: [Location; 8] = [
        Location::N,
        Location::Ne,
        Location::E,
        Location::Se,
        Location::S,
        Location::Sw,
        Location::W,
        Location::Nw,
    ];

    /// Clockwise index from north, in 45° steps.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Location at a clockwise index; wraps modulo [`GRID_POINTS`].
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % GRID_POINTS) as usize]
    }

    /// Rotate clockwise by `eighths` steps of 45°.
    pub fn rotated(self, eighths: u8) -> Self {
        Self::from_index(self.index() + eighths % GRID_POINTS)
    }

    /// Reflect across a mirror axis through the grid center.
    pub fn reflected(self, axis: MirrorAxis) -> Self {
        let doubled = 2 * axis.anchor().index();
        Self::from_index(doubled + GRID_POINTS - self.index())
    }

    pub fn name(self) -> &'static str {
        match self {
            Location::N => "n",
            Location::Ne => "ne",
            Location::E => "e",
            Location::Se => "se",
            Location::S => "s",
            Location::Sw => "sw",
            Location::W => "w",
            Location::Nw => "nw",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reflection axis through the grid center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorAxis {
    /// Through N and S.
    Vertical,
    /// Through E and W.
    Horizontal,
    /// Through NE and SW.
    Diagonal,
    /// Through SE and NW.
    AntiDiagonal,
}

impl MirrorAxis {
    pub const ALL: [MirrorAxis; 4] = [
        MirrorAxis::Vertical,
        MirrorAxis::Horizontal,
        MirrorAxis::Diagonal,
        MirrorAxis::AntiDiagonal,
    ];

    /// The point in the first half-turn (N..=SE) that the axis passes through.
    fn anchor(self) -> Location {
        match self {
            MirrorAxis::Vertical => Location::N,
            MirrorAxis::Diagonal => Location::Ne,
            MirrorAxis::Horizontal => Location::E,
            MirrorAxis::AntiDiagonal => Location::Se,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MirrorAxis::Vertical => "vertical",
            MirrorAxis::Horizontal => "horizontal",
            MirrorAxis::Diagonal => "diagonal",
            MirrorAxis::AntiDiagonal => "anti_diagonal",
        }
    }
}

impl fmt::Display for MirrorAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the grid is drawn. Box mode is the diamond turned by 45°, so its own
/// symmetry axis is the diagonal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    #[default]
    Diamond,
    Box,
}

impl GridMode {
    /// The axis `Mirrored` reflects across in this mode.
    pub fn mirror_axis(self) -> MirrorAxis {
        match self {
            GridMode::Diamond => MirrorAxis::Vertical,
            GridMode::Box => MirrorAxis::Diagonal,
        }
    }

    /// The four points hands rest on in this mode.
    pub fn hand_points(self) -> [Location; 4] {
        match self {
            GridMode::Diamond => [Location::N, Location::E, Location::S, Location::W],
            GridMode::Box => [Location::Ne, Location::Se, Location::Sw, Location::Nw],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip() {
        for loc in Location::ALL {
            assert_eq!(Location::from_index(loc.index()), loc);
        }
    }

    #[test]
    fn rotation_by_quarter_turn() {
        assert_eq!(Location::N.rotated(2), Location::E);
        assert_eq!(Location::W.rotated(2), Location::N);
        assert_eq!(Location::Nw.rotated(4), Location::Se);
    }

    #[test]
    fn full_rotation_is_identity() {
        for loc in Location::ALL {
            assert_eq!(loc.rotated(8), loc);
            assert_eq!(loc.rotated(3).rotated(5), loc);
        }
    }

    #[test]
    fn vertical_reflection_swaps_east_and_west() {
        assert_eq!(Location::E.reflected(MirrorAxis::Vertical), Location::W);
        assert_eq!(Location::N.reflected(MirrorAxis::Vertical), Location::N);
        assert_eq!(Location::Ne.reflected(MirrorAxis::Vertical), Location::Nw);
    }

    #[test]
    fn horizontal_reflection_swaps_north_and_south() {
        assert_eq!(Location::N.reflected(MirrorAxis::Horizontal), Location::S);
        assert_eq!(Location::E.reflected(MirrorAxis::Horizontal), Location::E);
    }

    #[test]
    fn diagonal_reflections_fix_their_anchor_points() {
        assert_eq!(Location::Ne.reflected(MirrorAxis::Diagonal), Location::Ne);
        assert_eq!(Location::Sw.reflected(MirrorAxis::Diagonal), Location::Sw);
        assert_eq!(Location::N.reflected(MirrorAxis::Diagonal), Location::E);
        assert_eq!(Location::Nw.reflected(MirrorAxis::AntiDiagonal), Location::Nw);
        assert_eq!(Location::N.reflected(MirrorAxis::AntiDiagonal), Location::W);
    }

    #[test]
    fn reflection_is_an_involution() {
        for axis in MirrorAxis::ALL {
            for loc in Location::ALL {
                assert_eq!(loc.reflected(axis).reflected(axis), loc);
            }
        }
    }

    #[test]
    fn grid_mode_points() {
        assert!(GridMode::Diamond.hand_points().iter().all(|l| l.index() % 2 == 0));
        assert!(GridMode::Box.hand_points().iter().all(|l| l.index() % 2 == 1));
        assert_eq!(GridMode::default(), GridMode::Diamond);
    }
}
