//! Detection vocabulary: pairs, candidates, motif groups and the final
//! immutable [`DetectionResult`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::designation::{self, AXIS_ALTERNATING, FREEFORM, POLYRHYTHMIC};
use crate::grid::MirrorAxis;
use crate::transform::{Component, CompositeTransformation};

/// `second` is `first` transformed under the hypothesis. Zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BeatPair {
    pub first: usize,
    pub second: usize,
}

impl BeatPair {
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }

    /// A beat paired with itself (fixed point of a rewind).
    pub fn is_fixed_point(&self) -> bool {
        self.first == self.second
    }

    /// Shift both indices by `offset`.
    pub fn offset(self, offset: usize) -> Self {
        Self::new(self.first + offset, self.second + offset)
    }
}

/// A hypothesis and how well it explains the sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateDesignation {
    pub transformation: CompositeTransformation,
    pub pairs: Vec<BeatPair>,
    /// Matched beats over total beats.
    pub completeness: f64,
    /// The hypothesis also holds from the last period back to the first.
    pub stable: bool,
    pub confidence: f64,
}

impl CandidateDesignation {
    /// Weight applied to the confidence of a hypothesis that does not close.
    pub const UNSTABLE_WEIGHT: f64 = 0.75;

    pub fn new(
        transformation: CompositeTransformation,
        pairs: Vec<BeatPair>,
        completeness: f64,
        stable: bool,
    ) -> Self {
        let confidence = if stable {
            completeness
        } else {
            completeness * Self::UNSTABLE_WEIGHT
        };
        Self {
            transformation,
            pairs,
            completeness,
            stable,
            confidence,
        }
    }

    /// Every beat matched.
    pub fn is_complete(&self) -> bool {
        self.completeness >= 1.0
    }

    pub fn label(&self) -> String {
        self.transformation.label()
    }

    pub fn components(&self) -> &[Component] {
        self.transformation.components()
    }

    /// Tie-break order: fewer components, then the coarser interval (smaller
    /// divisor, interval-free first), then canonical names, then divisor.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.rank_key().cmp(&other.rank_key())
    }

    fn rank_key(&self) -> (usize, usize, String) {
        let divisor = self.transformation.interval().map_or(1, |i| i.divisor());
        (
            self.components().len(),
            divisor,
            designation::joined_names(self.components()),
        )
    }
}

impl fmt::Display for CandidateDesignation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.0}% matched, {} pairs",
            self.transformation,
            self.completeness * 100.0,
            self.pairs.len()
        )
    }
}

/// One contiguous motif of a modular sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotifGroup {
    /// Zero-based index of the first beat.
    pub start: usize,
    pub len: usize,
    /// Best candidate inside the group; pair indices are sequence-relative.
    pub designation: CandidateDesignation,
}

impl MotifGroup {
    /// Exclusive end index.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Independent period of each hand, in beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPeriods {
    pub blue: usize,
    pub red: usize,
}

/// Mirror axes alternating between motifs of `motif_len` beats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisPattern {
    pub motif_len: usize,
    /// Axis of motifs 0, 2, 4, ...
    pub even_axis: MirrorAxis,
    /// Axis of motifs 1, 3, 5, ...
    pub odd_axis: MirrorAxis,
}

impl AxisPattern {
    pub fn describe(&self) -> String {
        format!(
            "{}/{} every {} beats",
            self.even_axis, self.odd_axis, self.motif_len
        )
    }
}

/// Which branch of the assembler governs the visible classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Designated(String),
    Modular,
    Structured {
        polyrhythmic: bool,
        axis_alternating: bool,
    },
    Freeform,
}

impl Classification {
    /// Display label, always taken from the designator.
    pub fn label(&self) -> String {
        match self {
            Classification::Designated(label) => label.clone(),
            Classification::Modular => designation::canonical_label(&[Component::Modular]),
            Classification::Structured {
                polyrhythmic: true,
                axis_alternating: true,
            } => format!("{POLYRHYTHMIC}+{AXIS_ALTERNATING}"),
            Classification::Structured {
                polyrhythmic: true, ..
            } => POLYRHYTHMIC.to_string(),
            Classification::Structured { .. } => AXIS_ALTERNATING.to_string(),
            Classification::Freeform => FREEFORM.to_string(),
        }
    }
}

/// The immutable outcome of one detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    word: String,
    detector_version: u32,
    is_circular: bool,
    is_freeform: bool,
    is_modular: bool,
    motif_groups: Vec<MotifGroup>,
    is_polyrhythmic: bool,
    hand_periods: Option<HandPeriods>,
    is_axis_alternating: bool,
    axis_pattern: Option<AxisPattern>,
    candidates: Vec<CandidateDesignation>,
    partial_candidates: Vec<CandidateDesignation>,
    cap_type: Option<String>,
}

impl DetectionResult {
    pub(crate) fn freeform(word: &str, detector_version: u32, is_circular: bool) -> Self {
        Self {
            word: word.to_string(),
            detector_version,
            is_circular,
            is_freeform: true,
            is_modular: false,
            motif_groups: Vec::new(),
            is_polyrhythmic: false,
            hand_periods: None,
            is_axis_alternating: false,
            axis_pattern: None,
            candidates: Vec::new(),
            partial_candidates: Vec::new(),
            cap_type: None,
        }
    }

    pub(crate) fn designated(mut self, candidates: Vec<CandidateDesignation>) -> Self {
        self.cap_type = candidates.first().map(CandidateDesignation::label);
        self.is_freeform = candidates.is_empty();
        self.candidates = candidates;
        self
    }

    pub(crate) fn modular(mut self, groups: Vec<MotifGroup>) -> Self {
        self.is_freeform = false;
        self.is_modular = true;
        self.motif_groups = groups;
        self
    }

    pub(crate) fn structured(mut self, periods: Option<HandPeriods>, axis: Option<AxisPattern>) -> Self {
        self.is_polyrhythmic = periods.is_some();
        self.hand_periods = periods;
        self.is_axis_alternating = axis.is_some();
        self.axis_pattern = axis;
        self.is_freeform = !(self.is_polyrhythmic || self.is_axis_alternating);
        self
    }

    pub(crate) fn with_partials(mut self, partials: Vec<CandidateDesignation>) -> Self {
        self.partial_candidates = partials;
        self
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn detector_version(&self) -> u32 {
        self.detector_version
    }

    pub fn is_circular(&self) -> bool {
        self.is_circular
    }

    pub fn is_freeform(&self) -> bool {
        self.is_freeform
    }

    pub fn is_modular(&self) -> bool {
        self.is_modular
    }

    pub fn motif_groups(&self) -> &[MotifGroup] {
        &self.motif_groups
    }

    pub fn is_polyrhythmic(&self) -> bool {
        self.is_polyrhythmic
    }

    pub fn hand_periods(&self) -> Option<HandPeriods> {
        self.hand_periods
    }

    pub fn is_axis_alternating(&self) -> bool {
        self.is_axis_alternating
    }

    pub fn axis_pattern(&self) -> Option<AxisPattern> {
        self.axis_pattern
    }

    /// Accepted candidates, best first.
    pub fn candidates(&self) -> &[CandidateDesignation] {
        &self.candidates
    }

    /// Near misses above the configured threshold, most complete first.
    pub fn partial_candidates(&self) -> &[CandidateDesignation] {
        &self.partial_candidates
    }

    /// Label of the top accepted candidate.
    pub fn cap_type(&self) -> Option<&str> {
        self.cap_type.as_deref()
    }

    /// Alias of [`cap_type`](Self::cap_type) used by loop-oriented callers.
    pub fn loop_type(&self) -> Option<&str> {
        self.cap_type()
    }

    pub fn top_candidate(&self) -> Option<&CandidateDesignation> {
        self.candidates.first()
    }

    pub fn classification(&self) -> Classification {
        if let Some(label) = &self.cap_type {
            Classification::Designated(label.clone())
        } else if self.is_modular {
            Classification::Modular
        } else if self.is_polyrhythmic || self.is_axis_alternating {
            Classification::Structured {
                polyrhythmic: self.is_polyrhythmic,
                axis_alternating: self.is_axis_alternating,
            }
        } else {
            Classification::Freeform
        }
    }
}
