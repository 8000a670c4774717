//! Modular motif detector.
//!
//! Splits the sequence into `K` equal contiguous groups and asks whether every
//! group is self-similar on its own. Groups may use different
//! transformations. The smallest `K` that covers every group wins.

use tracing::debug;

use crate::config::DetectorConfig;
use crate::grid::GridMode;
use crate::sequence::Beat;

use super::candidates::{divisors, search};
use super::result::{CandidateDesignation, MotifGroup};

/// Shortest motif worth reporting.
pub const MIN_MOTIF_LEN: usize = 2;

/// Canonical modular decomposition, or `None` if no grouping is covered.
pub fn detect_modular(beats: &[Beat], grid: GridMode, config: &DetectorConfig) -> Option<Vec<MotifGroup>> {
    let len = beats.len();
    for k in divisors(len) {
        let motif_len = len / k;
        if motif_len < MIN_MOTIF_LEN {
            break;
        }
        if let Some(groups) = cover(beats, motif_len, grid, config) {
            debug!(groups = k, motif_len, "modular decomposition found");
            return Some(groups);
        }
    }
    None
}

/// Best candidate for every group of `motif_len` beats, or `None` as soon as
/// one group has none.
fn cover(beats: &[Beat], motif_len: usize, grid: GridMode, config: &DetectorConfig) -> Option<Vec<MotifGroup>> {
    beats
        .chunks(motif_len)
        .enumerate()
        .map(|(g, chunk)| {
            let start = g * motif_len;
            let best = search(chunk, grid, config).accepted.into_iter().next()?;
            Some(MotifGroup {
                start,
                len: motif_len,
                designation: shifted(best, start),
            })
        })
        .collect()
}

/// Re-express group-relative pair indices relative to the whole sequence.
fn shifted(mut candidate: CandidateDesignation, offset: usize) -> CandidateDesignation {
    for pair in &mut candidate.pairs {
        *pair = pair.offset(offset);
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::result::BeatPair;
    use crate::grid::{Location, MirrorAxis, MotionKind, MotionState, Orientation, RotationDirection, Turns};

    fn state(from: Location, to: Location, turns: i8) -> MotionState {
        MotionState {
            motion: MotionKind::Pro,
            rotation: RotationDirection::Clockwise,
            start_loc: from,
            end_loc: to,
            start_ori: Orientation::In,
            end_ori: Orientation::Clock,
            turns: Turns::Half(turns),
        }
    }

    /// Two beats, the second a vertical mirror of the first.
    fn mirror_motif(turns: i8, first_index: usize) -> [Beat; 2] {
        let a = Beat::new(
            first_index,
            state(Location::N, Location::E, turns),
            state(Location::S, Location::E, turns),
        );
        let b = a.map_hands(|m| m.mirrored(MirrorAxis::Vertical)).at(first_index + 1);
        [a, b]
    }

    #[test]
    fn three_mirror_motifs() {
        let beats: Vec<Beat> = (0..3).flat_map(|g| mirror_motif(g as i8 + 1, 2 * g + 1)).collect();
        let groups = detect_modular(&beats, GridMode::Diamond, &DetectorConfig::default()).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].start, 2);
        assert_eq!(groups[1].end(), 4);
        assert_eq!(groups[2].designation.pairs, vec![BeatPair::new(4, 5)]);
    }

    #[test]
    fn unrelated_beats_are_not_modular() {
        let beats: Vec<Beat> = (0..4)
            .map(|i| {
                Beat::new(
                    i + 1,
                    state(Location::N, Location::E, i as i8 + 1),
                    state(Location::S, Location::W, i as i8 + 11),
                )
            })
            .collect();
        assert!(detect_modular(&beats, GridMode::Diamond, &DetectorConfig::default()).is_none());
    }

    #[test]
    fn single_beat_groups_are_never_considered() {
        let beats = vec![Beat::new(
            1,
            state(Location::N, Location::N, 0),
            state(Location::S, Location::S, 0),
        )];
        assert!(detect_modular(&beats, GridMode::Diamond, &DetectorConfig::default()).is_none());
    }
}
