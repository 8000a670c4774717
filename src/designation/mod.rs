//! Designator: the single naming table for component sets.
//!
//! [`canonical_label`] is a total, pure function of the sorted, deduplicated
//! component set. It never looks at sequence data. Every display path in the
//! crate goes through it; there is no second table.

use crate::error::DetectError;
use crate::transform::Component;

use Component::{Flipped, Inverted, Mirrored, Modular, Repeated, Rewound, Rotated, Swapped};

/// Label of a freeform sequence.
pub const FREEFORM: &str = "FREEFORM";
/// Label of a sequence with independent per-hand periods.
pub const POLYRHYTHMIC: &str = "POLYRHYTHMIC";
/// Label of a sequence whose mirror axis alternates between motifs.
pub const AXIS_ALTERNATING: &str = "AXIS_ALTERNATING";

/// Prefix of generated labels for combinations not in the table.
pub const CUSTOM_PREFIX: &str = "custom_";

/// Named combinations. Keys are in canonical order.
const TABLE: &[(&[Component], &str)] = &[
    (&[Rotated], "STRICT_ROTATED"),
    (&[Mirrored], "STRICT_MIRRORED"),
    (&[Swapped], "STRICT_SWAPPED"),
    (&[Flipped], "STRICT_FLIPPED"),
    (&[Inverted], "STRICT_INVERTED"),
    (&[Rewound], "STRICT_REWOUND"),
    (&[Repeated], "STRICT_REPEATED"),
    (&[Modular], "MODULAR"),
    (&[Rotated, Mirrored], "MIRRORED_ROTATED"),
    (&[Rotated, Swapped], "ROTATED_SWAPPED"),
    (&[Rotated, Flipped], "ROTATED_FLIPPED"),
    (&[Rotated, Inverted], "ROTATED_INVERTED"),
    (&[Mirrored, Swapped], "MIRRORED_SWAPPED"),
    (&[Mirrored, Flipped], "MIRRORED_FLIPPED"),
    (&[Mirrored, Inverted], "MIRRORED_INVERTED"),
    (&[Swapped, Flipped], "SWAPPED_FLIPPED"),
    (&[Swapped, Inverted], "SWAPPED_INVERTED"),
    (&[Flipped, Inverted], "FLIPPED_INVERTED"),
    (&[Rotated, Mirrored, Swapped], "MIRRORED_ROTATED_SWAPPED"),
    (&[Rotated, Mirrored, Inverted], "MIRRORED_ROTATED_INVERTED"),
    (&[Rotated, Swapped, Inverted], "ROTATED_SWAPPED_INVERTED"),
    (&[Mirrored, Swapped, Inverted], "MIRRORED_SWAPPED_INVERTED"),
];

fn normalized(components: &[Component]) -> Vec<Component> {
    let mut sorted = components.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
}

/// Table entry for a component set, if it has one.
pub fn lookup(components: &[Component]) -> Option<&'static str> {
    let key = normalized(components);
    TABLE
        .iter()
        .find(|(entry, _)| *entry == key.as_slice())
        .map(|(_, label)| *label)
}

/// Canonical label for a component set, in any input order.
///
/// Unmapped sets get `custom_<names>` with names in canonical order.
pub fn canonical_label(components: &[Component]) -> String {
    if let Some(label) = lookup(components) {
        return label.to_string();
    }
    let names: Vec<&str> = normalized(components).iter().map(|c| c.name()).collect();
    format!("{CUSTOM_PREFIX}{}", names.join("_"))
}

/// Component names joined in canonical order; the lexicographic ranking key.
pub fn joined_names(components: &[Component]) -> String {
    normalized(components)
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join("_")
}

/// Reverse lookup: a table label, a `custom_` label, or a single component
/// name back to its component set.
pub fn parse_label(label: &str) -> Result<Vec<Component>, DetectError> {
    let trimmed = label.trim();
    if let Some((entry, _)) = TABLE
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(trimmed))
    {
        return Ok(entry.to_vec());
    }
    let body = trimmed.strip_prefix(CUSTOM_PREFIX).unwrap_or(trimmed);
    let components = body
        .split('_')
        .map(str::parse::<Component>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| DetectError::UnknownLabel(label.to_string()))?;
    Ok(normalized(&components))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keys_are_sorted_and_unique() {
        for (entry, label) in TABLE {
            assert_eq!(normalized(entry).as_slice(), *entry, "{label} key not canonical");
        }
        for (i, (a, _)) in TABLE.iter().enumerate() {
            for (b, _) in &TABLE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn single_components_are_strict() {
        assert_eq!(canonical_label(&[Inverted]), "STRICT_INVERTED");
        assert_eq!(canonical_label(&[Swapped]), "STRICT_SWAPPED");
        assert_eq!(canonical_label(&[Modular]), "MODULAR");
    }

    #[test]
    fn input_order_does_not_matter() {
        let forward = canonical_label(&[Rotated, Mirrored, Swapped]);
        let reversed = canonical_label(&[Swapped, Mirrored, Rotated]);
        let duplicated = canonical_label(&[Mirrored, Swapped, Rotated, Mirrored]);
        assert_eq!(forward, "MIRRORED_ROTATED_SWAPPED");
        assert_eq!(forward, reversed);
        assert_eq!(forward, duplicated);
    }

    #[test]
    fn unmapped_sets_get_a_custom_label() {
        assert_eq!(
            canonical_label(&[Flipped, Swapped, Rotated]),
            "custom_rotated_swapped_flipped"
        );
        assert_eq!(canonical_label(&[]), "custom_");
    }

    #[test]
    fn parse_label_inverts_canonical_label() {
        let sets: [&[Component]; 4] = [
            &[Inverted],
            &[Rotated, Mirrored],
            &[Rotated, Swapped, Flipped],
            &[Mirrored, Swapped, Flipped, Inverted],
        ];
        for set in sets {
            assert_eq!(parse_label(&canonical_label(set)).unwrap(), set.to_vec());
        }
    }

    #[test]
    fn parse_label_accepts_bare_component_lists() {
        assert_eq!(parse_label("swapped_rotated").unwrap(), vec![Rotated, Swapped]);
        assert_eq!(parse_label("strict_rotated").unwrap(), vec![Rotated]);
        assert!(parse_label("TWIRLED").is_err());
    }

    #[test]
    fn joined_names_are_canonical() {
        assert_eq!(joined_names(&[Inverted, Rotated]), "rotated_inverted");
    }
}
