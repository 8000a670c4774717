//! Axis-alternating detector.
//!
//! Motifs that are each a mirror image of themselves, but across axes that
//! alternate from one motif to the next (e.g. vertical, diagonal, vertical,
//! diagonal). All four axes are tried regardless of grid mode, since the
//! alternation is exactly what a single `Mirrored` component cannot express.

use std::collections::BTreeSet;

use tracing::debug;

use crate::grid::MirrorAxis;
use crate::sequence::Beat;
use crate::transform::Operation;

use super::candidates::divisors;
use super::matcher::match_period;
use super::result::AxisPattern;

/// First grouping whose even and odd motifs mirror across disjoint axes.
pub fn detect_axis_alternating(beats: &[Beat]) -> Option<AxisPattern> {
    let len = beats.len();
    divisors(len)
        .into_iter()
        .map(|k| len / k)
        .filter(|m| m % 2 == 0)
        .find_map(|motif_len| alternation(beats, motif_len))
}

fn alternation(beats: &[Beat], motif_len: usize) -> Option<AxisPattern> {
    let mut even: Option<BTreeSet<MirrorAxis>> = None;
    let mut odd: Option<BTreeSet<MirrorAxis>> = None;

    for (g, group) in beats.chunks(motif_len).enumerate() {
        let axes = self_mirror_axes(group);
        let slot = if g % 2 == 0 { &mut even } else { &mut odd };
        *slot = Some(match slot.take() {
            Some(acc) => acc.intersection(&axes).copied().collect(),
            None => axes,
        });
    }

    let (even, odd) = (even?, odd?);
    if even.is_empty() || odd.is_empty() || !even.is_disjoint(&odd) {
        return None;
    }
    let pattern = AxisPattern {
        motif_len,
        even_axis: *even.first()?,
        odd_axis: *odd.first()?,
    };
    debug!(pattern = %pattern.describe(), "axis alternation found");
    Some(pattern)
}

/// Axes across which the second half of `group` mirrors the first.
fn self_mirror_axes(group: &[Beat]) -> BTreeSet<MirrorAxis> {
    let half = group.len() / 2;
    MirrorAxis::ALL
        .into_iter()
        .filter(|&axis| {
            match_period(group, half, |b| Some(Operation::Mirror(axis).apply(b))).is_complete()
        })
        .collect()
}
