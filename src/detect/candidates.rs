//! Candidate generator: enumerates hypotheses and keeps the ones that hold.
//!
//! The search space is every non-empty subset of the five interval-bearing
//! components (up to the configured size) at every divisor of the run
//! length, plus the two motif tests: rewound and repeated.

use tracing::trace;

use crate::config::DetectorConfig;
use crate::error::DetectError;
use crate::grid::GridMode;
use crate::sequence::{Beat, Sequence};
use crate::transform::{Component, CompositeTransformation, Interval};

use super::matcher::{match_composite, match_period, match_rewound, MatchOutcome};
use super::result::CandidateDesignation;

/// Ranked outcome of one search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSearch {
    /// Complete matches, best first.
    pub accepted: Vec<CandidateDesignation>,
    /// Incomplete matches at or above the partial threshold, most complete first.
    pub partial: Vec<CandidateDesignation>,
}

impl CandidateSearch {
    pub fn best(&self) -> Option<&CandidateDesignation> {
        self.accepted.first()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Run the search over a whole sequence.
pub fn generate(sequence: &Sequence, config: &DetectorConfig) -> CandidateSearch {
    search(sequence.beats(), sequence.grid(), config)
}

/// Run the search over a run of beats, e.g. one motif group.
pub fn search(beats: &[Beat], grid: GridMode, config: &DetectorConfig) -> CandidateSearch {
    let len = beats.len();
    let mut found = CandidateSearch::default();
    if len == 0 {
        return found;
    }

    let subsets = component_subsets(config.component_limit());
    for k in divisors(len) {
        let Some(interval) = Interval::from_divisor(k) else {
            continue;
        };
        for subset in &subsets {
            let composite = CompositeTransformation::new(subset.iter().copied(), Some(interval));
            match match_composite(beats, grid, &composite) {
                Some(outcome) => record(&mut found, composite, outcome, config),
                None => trace!(
                    %composite,
                    error = %DetectError::IncompatibleInterval { divisor: k, len },
                    "hypothesis not applicable"
                ),
            }
        }
    }

    if config.detect_repeated {
        search_repeated(beats, &mut found, config);
    }
    if config.detect_rewound {
        let composite = CompositeTransformation::single(Component::Rewound, None);
        record(&mut found, composite, match_rewound(beats), config);
    }

    found.accepted.sort_by(|a, b| a.rank_cmp(b));
    found.partial.sort_by(|a, b| {
        b.completeness
            .total_cmp(&a.completeness)
            .then_with(|| a.rank_cmp(b))
    });
    found
}

/// Verbatim repetition at the coarsest divisor that holds.
fn search_repeated(beats: &[Beat], found: &mut CandidateSearch, config: &DetectorConfig) {
    let len = beats.len();
    let mut best_partial: Option<(CompositeTransformation, MatchOutcome)> = None;

    for k in divisors(len) {
        let composite = CompositeTransformation::single(Component::Repeated, Interval::from_divisor(k));
        let outcome = match_period(beats, len / k, |b| Some(*b));
        if outcome.is_complete() {
            record(found, composite, outcome, config);
            return;
        }
        let better = best_partial
            .as_ref()
            .map_or(true, |(_, best)| outcome.matched > best.matched);
        if better {
            best_partial = Some((composite, outcome));
        }
    }

    if let Some((composite, outcome)) = best_partial {
        record(found, composite, outcome, config);
    }
}

fn record(
    found: &mut CandidateSearch,
    composite: CompositeTransformation,
    outcome: MatchOutcome,
    config: &DetectorConfig,
) {
    let completeness = outcome.completeness();
    let candidate = CandidateDesignation::new(composite, outcome.pairs, completeness, outcome.stable);
    if outcome.matched == outcome.total && outcome.total > 0 {
        trace!(candidate = %candidate, "accepted");
        found.accepted.push(candidate);
    } else if config
        .partial_threshold
        .is_some_and(|t| outcome.matched > 0 && completeness >= t)
    {
        found.partial.push(candidate);
    }
}

/// Divisors `k >= 2` of `len`, ascending.
pub fn divisors(len: usize) -> Vec<usize> {
    (2..=len).filter(|k| len % k == 0).collect()
}

/// Non-empty subsets of the interval-bearing components with at most `limit`
/// members, each in canonical order.
pub fn component_subsets(limit: usize) -> Vec<Vec<Component>> {
    let all = Component::INTERVAL_BEARING;
    (1u32..1 << all.len())
        .map(|mask| {
            all.iter()
                .enumerate()
                .filter(|(bit, _)| mask & (1 << bit) != 0)
                .map(|(_, &c)| c)
                .collect::<Vec<_>>()
        })
        .filter(|subset| subset.len() <= limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Location, MotionKind, MotionState, Orientation, RotationDirection, Turns};

    fn state(from: Location, to: Location, turns: i8) -> MotionState {
        MotionState {
            motion: MotionKind::Pro,
            rotation: RotationDirection::Clockwise,
            start_loc: from,
            end_loc: to,
            start_ori: Orientation::In,
            end_ori: Orientation::In,
            turns: Turns::Half(turns),
        }
    }

    #[test]
    fn divisors_of_twelve() {
        assert_eq!(divisors(12), vec![2, 3, 4, 6, 12]);
        assert_eq!(divisors(1), Vec::<usize>::new());
        assert_eq!(divisors(7), vec![7]);
    }

    #[test]
    fn powerset_sizes() {
        assert_eq!(component_subsets(5).len(), 31);
        assert_eq!(component_subsets(1).len(), 5);
        assert_eq!(component_subsets(2).len(), 15);
        for subset in component_subsets(5) {
            let mut sorted = subset.clone();
            sorted.sort();
            assert_eq!(subset, sorted);
        }
    }

    #[test]
    fn empty_run_has_no_candidates() {
        let found = search(&[], GridMode::Diamond, &DetectorConfig::default());
        assert!(found.is_empty());
        assert!(found.partial.is_empty());
    }

    #[test]
    fn rotated_halves_are_found_and_ranked_first() {
        let a = Beat::new(1, state(Location::N, Location::E, 1), state(Location::E, Location::S, 3));
        let b = Beat::new(2, state(Location::E, Location::S, 2), state(Location::S, Location::W, 5));
        let rotate = |beat: Beat, i| beat.map_hands(|m| m.rotated(4)).at(i);
        let beats = vec![a, b, rotate(a, 3), rotate(b, 4)];

        let found = search(&beats, GridMode::Diamond, &DetectorConfig::default());
        let best = found.best().unwrap();
        assert_eq!(best.label(), "STRICT_ROTATED");
        assert_eq!(best.transformation.interval(), Some(Interval::Halved));
        assert!(best.stable);
    }

    #[test]
    fn ranking_is_deterministic() {
        let a = Beat::new(1, state(Location::N, Location::N, 0), state(Location::S, Location::S, 0));
        let beats = vec![a, a.at(2), a.at(3), a.at(4)];
        let config = DetectorConfig::default();
        let first = search(&beats, GridMode::Diamond, &config);
        let second = search(&beats, GridMode::Diamond, &config);
        assert_eq!(first, second);
        assert!(first.accepted.windows(2).all(|w| w[0].rank_cmp(&w[1]).is_lt()));
    }

    #[test]
    fn partials_respect_threshold() {
        let a = Beat::new(1, state(Location::N, Location::E, 1), state(Location::S, Location::W, 2));
        let b = Beat::new(2, state(Location::E, Location::S, 3), state(Location::W, Location::N, 4));
        let c = Beat::new(3, state(Location::S, Location::W, 5), state(Location::N, Location::E, 6));
        let beats = vec![a, b, a.at(3), c];

        let none = search(&beats, GridMode::Diamond, &DetectorConfig::default());
        assert!(none.is_empty());
        assert!(none.partial.is_empty());

        let config = DetectorConfig {
            partial_threshold: Some(0.5),
            ..DetectorConfig::default()
        };
        let some = search(&beats, GridMode::Diamond, &config);
        assert!(some.is_empty());
        assert!(!some.partial.is_empty());
        assert!(some.partial.iter().all(|c| c.completeness >= 0.5 && !c.is_complete()));
        assert!(some
            .partial
            .windows(2)
            .all(|w| w[0].completeness >= w[1].completeness));
    }

    #[test]
    fn component_limit_bounds_the_search() {
        let a = Beat::new(1, state(Location::N, Location::E, 1), state(Location::S, Location::W, 2));
        let b = a.map_hands(|m| m.rotated(4).mirrored(crate::grid::MirrorAxis::Vertical)).swapped().at(2);
        let beats = vec![a, b];
        let one = DetectorConfig {
            max_components: 1,
            ..DetectorConfig::default()
        };
        let found = search(&beats, GridMode::Diamond, &one);
        assert!(found.accepted.iter().all(|c| c.components().len() <= 1));
    }
}
