//! Sequence documents: the YAML shape sequences arrive in.
//!
//! Every motion field is optional at parse time. Validation turns a record
//! into a [`MotionState`]; a record with a missing field becomes an absent
//! hand and a logged `MissingMotionData` warning instead of a load failure.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Beat, Sequence};
use crate::error::DetectError;
use crate::grid::{GridMode, Hand, Location, MotionKind, MotionState, Orientation, RotationDirection, Turns};

/// One hand's motion as written in a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RotationDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_loc: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_loc: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_ori: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_ori: Option<Orientation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<Turns>,
}

impl MotionRecord {
    /// Check that every field is present.
    pub fn validate(&self, beat: usize, hand: Hand) -> Result<MotionState, DetectError> {
        let missing = |field| DetectError::MissingMotionData { beat, hand, field };
        Ok(MotionState {
            motion: self.motion.ok_or_else(|| missing("motion"))?,
            rotation: self.rotation.ok_or_else(|| missing("rotation"))?,
            start_loc: self.start_loc.ok_or_else(|| missing("start_loc"))?,
            end_loc: self.end_loc.ok_or_else(|| missing("end_loc"))?,
            start_ori: self.start_ori.ok_or_else(|| missing("start_ori"))?,
            end_ori: self.end_ori.ok_or_else(|| missing("end_ori"))?,
            turns: self.turns.ok_or_else(|| missing("turns"))?,
        })
    }
}

impl From<&MotionState> for MotionRecord {
    fn from(m: &MotionState) -> Self {
        Self {
            motion: Some(m.motion),
            rotation: Some(m.rotation),
            start_loc: Some(m.start_loc),
            end_loc: Some(m.end_loc),
            start_ori: Some(m.start_ori),
            end_ori: Some(m.end_ori),
            turns: Some(m.turns),
        }
    }
}

/// One beat as written in a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatRecord {
    /// Explicit 1-based beat number; defaults to the list position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beat: Option<usize>,
    #[serde(default)]
    pub blue: Option<MotionRecord>,
    #[serde(default)]
    pub red: Option<MotionRecord>,
}

impl BeatRecord {
    /// Validate one hand. A hand with no record at all is reported under the
    /// hand's own key.
    pub fn validate_hand(&self, beat: usize, hand: Hand) -> Result<MotionState, DetectError> {
        let record = match hand {
            Hand::Blue => self.blue.as_ref(),
            Hand::Red => self.red.as_ref(),
        };
        match record {
            Some(r) => r.validate(beat, hand),
            None => Err(DetectError::MissingMotionData {
                beat,
                hand,
                field: hand.name(),
            }),
        }
    }

    fn to_beat(&self, index: usize) -> Beat {
        let index = self.beat.unwrap_or(index);
        let validate = |hand| {
            self.validate_hand(index, hand)
                .map_err(|error| tracing::warn!(%error, "excluding hand from matching"))
                .ok()
        };
        Beat::partial(index, validate(Hand::Blue), validate(Hand::Red))
    }
}

impl From<&Beat> for BeatRecord {
    fn from(beat: &Beat) -> Self {
        Self {
            beat: Some(beat.index),
            blue: beat.blue.as_ref().map(MotionRecord::from),
            red: beat.red.as_ref().map(MotionRecord::from),
        }
    }
}

/// A sequence document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceDocument {
    #[serde(default)]
    pub word: String,
    /// Grid the beats were written for. Absent means "use the default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_mode: Option<GridMode>,
    /// Circularity as known by the data source. Derived when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circular: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_position: Option<BeatRecord>,
    #[serde(default)]
    pub beats: Vec<BeatRecord>,
}

impl SequenceDocument {
    pub fn from_yaml(source: &str) -> Result<Self, DetectError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Read a document from disk.
    pub fn load(path: &Path) -> Result<Self, DetectError> {
        let content = std::fs::read_to_string(path).map_err(|e| DetectError::io(path, e))?;
        Self::from_yaml(&content)
    }

    pub fn to_yaml(&self) -> Result<String, DetectError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate into a [`Sequence`], reading an unnamed grid as diamond.
    pub fn to_sequence(&self) -> Sequence {
        self.to_sequence_on(GridMode::default())
    }

    /// Validate into a [`Sequence`], reading an unnamed grid as
    /// `default_grid`. Incomplete hands are dropped with a warning.
    pub fn to_sequence_on(&self, default_grid: GridMode) -> Sequence {
        let beats = self
            .beats
            .iter()
            .enumerate()
            .map(|(i, record)| record.to_beat(i + 1))
            .collect();
        let grid = self.grid_mode.unwrap_or(default_grid);
        let mut sequence = Sequence::new(self.word.clone(), grid, beats);
        if let Some(start) = &self.start_position {
            sequence = sequence.with_start_position(start.to_beat(0));
        }
        match self.circular {
            Some(circular) => sequence.with_circularity(circular),
            None => sequence,
        }
    }

    /// Write a sequence back out. Circularity is recorded explicitly.
    pub fn from_sequence(sequence: &Sequence) -> Self {
        Self {
            word: sequence.word().to_string(),
            grid_mode: Some(sequence.grid()),
            circular: Some(sequence.is_circular()),
            start_position: sequence.start_position().map(BeatRecord::from),
            beats: sequence.beats().iter().map(BeatRecord::from).collect(),
        }
    }
}
