//! Pattern detection: turns a [`Sequence`] into a [`DetectionResult`].
//!
//! Stages run in priority order and the first one that finds structure
//! governs the result:
//! 1. not circular (or empty): freeform, nothing else runs
//! 2. whole-sequence candidates: designated, `cap_type` set
//! 3. modular motifs
//! 4. polyrhythmic and axis-alternating (may both hold)
//! 5. otherwise freeform

pub mod axis;
pub mod candidates;
pub mod matcher;
pub mod modular;
pub mod polyrhythm;
pub mod result;

pub use axis::detect_axis_alternating;
pub use candidates::{generate, search, CandidateSearch};
pub use matcher::{match_composite, match_period, match_rewound, MatchOutcome};
pub use modular::detect_modular;
pub use polyrhythm::{detect_polyrhythmic, hand_period};
pub use result::{
    AxisPattern, BeatPair, CandidateDesignation, Classification, DetectionResult, HandPeriods,
    MotifGroup,
};

use tracing::{debug, debug_span, warn};

use crate::config::DetectorConfig;
use crate::error::DetectError;
use crate::sequence::Sequence;

/// Bumped whenever a change to the detector can change its output, so cached
/// results keyed by version go stale.
pub const DETECTOR_VERSION: u32 = 1;

/// Stateless detector. Holds only its configuration.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn version(&self) -> u32 {
        DETECTOR_VERSION
    }

    /// Analyse one sequence.
    pub fn detect(&self, sequence: &Sequence) -> DetectionResult {
        let span = debug_span!("detect", word = sequence.word(), beats = sequence.len());
        let _enter = span.enter();

        let result = DetectionResult::freeform(sequence.word(), DETECTOR_VERSION, sequence.is_circular());
        if sequence.is_empty() || !sequence.is_circular() {
            let error = DetectError::InvalidSequence {
                word: sequence.word().to_string(),
                reason: if sequence.is_empty() {
                    "no beats".into()
                } else {
                    "does not return to its starting state".into()
                },
            };
            warn!(%error, "classifying as freeform");
            return result;
        }

        let incomplete = sequence.incomplete_beats();
        if incomplete > 0 {
            warn!(incomplete, "beats with a missing hand cannot match");
        }

        let found = candidates::generate(sequence, &self.config);
        let result = result.with_partials(found.partial);
        if !found.accepted.is_empty() {
            debug!(
                accepted = found.accepted.len(),
                top = %found.accepted[0],
                "designated"
            );
            return result.designated(found.accepted);
        }

        let beats = sequence.beats();
        if let Some(groups) = modular::detect_modular(beats, sequence.grid(), &self.config) {
            return result.modular(groups);
        }

        let periods = polyrhythm::detect_polyrhythmic(beats, sequence.grid());
        let axis = axis::detect_axis_alternating(beats);
        if periods.is_none() && axis.is_none() {
            debug!("no structure found");
        }
        result.structured(periods, axis)
    }
}
