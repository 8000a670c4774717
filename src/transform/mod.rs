//! Transformation functions: pure, stateless beat mappers.
//!
//! A [`Component`] plus an [`Interval`] and the [`GridMode`] resolves to a
//! concrete [`Operation`]. Composites apply their operations in canonical
//! order; inverses run in reverse order so `apply_inverse(apply(b)) == b`
//! even though rotation and reflection do not commute.

pub mod component;
pub mod interval;

pub use component::Component;
pub use interval::{Interval, PartCount};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::designation::canonical_label;
use crate::grid::{GridMode, MirrorAxis, MotionState, GRID_POINTS};
use crate::sequence::Beat;

/// A concrete beat mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Identity,
    /// Clockwise rotation in 45° steps.
    Rotate(u8),
    Mirror(MirrorAxis),
    Swap,
    Flip,
    Invert,
    Rewind,
}

impl Operation {
    /// The operation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Operation::Rotate(e) => Operation::Rotate((GRID_POINTS - e % GRID_POINTS) % GRID_POINTS),
            other => other,
        }
    }

    /// Map one hand's motion. `None` for [`Operation::Swap`], which needs both.
    pub fn apply_state(self, m: MotionState) -> Option<MotionState> {
        match self {
            Operation::Identity => Some(m),
            Operation::Rotate(e) => Some(m.rotated(e)),
            Operation::Mirror(axis) => Some(m.mirrored(axis)),
            Operation::Flip => Some(m.flipped()),
            Operation::Invert => Some(m.inverted()),
            Operation::Rewind => Some(m.rewound()),
            Operation::Swap => None,
        }
    }

    /// Map a beat. Missing hands stay missing.
    pub fn apply(self, beat: &Beat) -> Beat {
        match self {
            Operation::Swap => beat.swapped(),
            Operation::Identity => *beat,
            Operation::Rotate(e) => beat.map_hands(|m| m.rotated(e)),
            Operation::Mirror(axis) => beat.map_hands(|m| m.mirrored(axis)),
            Operation::Flip => beat.map_hands(MotionState::flipped),
            Operation::Invert => beat.map_hands(MotionState::inverted),
            Operation::Rewind => beat.map_hands(MotionState::rewound),
        }
    }
}

/// Resolve a component to its concrete operation.
///
/// `None` when the component has no beat mapping (`Modular`) or the interval
/// cannot express it (a rotation that falls between grid points, or an
/// interval-bearing rotation without an interval).
pub fn resolve(component: Component, interval: Option<Interval>, grid: GridMode) -> Option<Operation> {
    match component {
        Component::Rotated => interval?.rotation_eighths().map(Operation::Rotate),
        Component::Mirrored => Some(Operation::Mirror(grid.mirror_axis())),
        Component::Swapped => Some(Operation::Swap),
        Component::Flipped => Some(Operation::Flip),
        Component::Inverted => Some(Operation::Invert),
        Component::Rewound => Some(Operation::Rewind),
        Component::Repeated => Some(Operation::Identity),
        Component::Modular => None,
    }
}

/// Apply a single component to a beat.
pub fn apply(component: Component, interval: Option<Interval>, grid: GridMode, beat: &Beat) -> Option<Beat> {
    resolve(component, interval, grid).map(|op| op.apply(beat))
}

/// The operation undoing `component` at `interval`.
pub fn invert(component: Component, interval: Option<Interval>, grid: GridMode) -> Option<Operation> {
    resolve(component, interval, grid).map(Operation::inverse)
}

/// A sorted, deduplicated set of components sharing one interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "CompositeRecord", into = "CompositeRecord")]
pub struct CompositeTransformation {
    components: Vec<Component>,
    interval: Option<Interval>,
}

impl CompositeTransformation {
    pub fn new(components: impl IntoIterator<Item = Component>, interval: Option<Interval>) -> Self {
        let mut components: Vec<Component> = components.into_iter().collect();
        components.sort();
        components.dedup();
        Self {
            components,
            interval,
        }
    }

    pub fn single(component: Component, interval: Option<Interval>) -> Self {
        Self::new([component], interval)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn interval(&self) -> Option<Interval> {
        self.interval
    }

    pub fn contains(&self, component: Component) -> bool {
        self.components.binary_search(&component).is_ok()
    }

    /// The canonical label of the component set.
    pub fn label(&self) -> String {
        canonical_label(&self.components)
    }

    /// Concrete operations in application order, or `None` if any component
    /// is inapplicable at this interval.
    pub fn operations(&self, grid: GridMode) -> Option<Vec<Operation>> {
        self.components
            .iter()
            .map(|&c| resolve(c, self.interval, grid))
            .collect()
    }

    pub fn apply(&self, grid: GridMode, beat: &Beat) -> Option<Beat> {
        let ops = self.operations(grid)?;
        Some(ops.iter().fold(*beat, |b, op| op.apply(&b)))
    }

    pub fn apply_inverse(&self, grid: GridMode, beat: &Beat) -> Option<Beat> {
        let ops = self.operations(grid)?;
        Some(ops.iter().rev().fold(*beat, |b, op| op.inverse().apply(&b)))
    }
}

impl fmt::Display for CompositeTransformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.interval {
            Some(interval) => write!(f, "{} ({interval})", self.label()),
            None => f.write_str(&self.label()),
        }
    }
}

/// Persisted form; normalized through [`CompositeTransformation::new`] on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CompositeRecord {
    components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interval: Option<Interval>,
}

impl From<CompositeRecord> for CompositeTransformation {
    fn from(record: CompositeRecord) -> Self {
        CompositeTransformation::new(record.components, record.interval)
    }
}

impl From<CompositeTransformation> for CompositeRecord {
    fn from(composite: CompositeTransformation) -> Self {
        Self {
            components: composite.components,
            interval: composite.interval,
        }
    }
}
