//! Transformation components: the vocabulary labels are built from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DetectError;

/// One named transformation.
///
/// The declaration order is the canonical order: composites always apply
/// rotate → mirror → swap → flip → invert, and sorted component sets list
/// the interval-free components after those five.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Component {
    Rotated,
    Mirrored,
    Swapped,
    Flipped,
    Inverted,
    Rewound,
    /// Verbatim repetition. Unlike `Rewound`, a `Repeated` designation keeps
    /// the interval it repeats at, so persisted results carry one.
    Repeated,
    Modular,
}

impl Component {
    pub const ALL: [Component; 8] = [
        Component::Rotated,
        Component::Mirrored,
        Component::Swapped,
        Component::Flipped,
        Component::Inverted,
        Component::Rewound,
        Component::Repeated,
        Component::Modular,
    ];

    /// Components whose correspondence repeats at an [`Interval`](super::Interval).
    pub const INTERVAL_BEARING: [Component; 5] = [
        Component::Rotated,
        Component::Mirrored,
        Component::Swapped,
        Component::Flipped,
        Component::Inverted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Component::Rotated => "rotated",
            Component::Mirrored => "mirrored",
            Component::Swapped => "swapped",
            Component::Flipped => "flipped",
            Component::Inverted => "inverted",
            Component::Rewound => "rewound",
            Component::Repeated => "repeated",
            Component::Modular => "modular",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Component {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Component::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| DetectError::UnknownLabel(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_is_rotate_mirror_swap_flip_invert() {
        let mut shuffled = vec![
            Component::Inverted,
            Component::Swapped,
            Component::Rotated,
            Component::Flipped,
            Component::Mirrored,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Component::INTERVAL_BEARING.to_vec());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Rotated".parse::<Component>().unwrap(), Component::Rotated);
        assert_eq!(" swapped ".parse::<Component>().unwrap(), Component::Swapped);
        assert!("spun".parse::<Component>().is_err());
    }

    #[test]
    fn name_round_trip() {
        for c in Component::ALL {
            assert_eq!(c.name().parse::<Component>().unwrap(), c);
        }
    }

    #[test]
    fn interval_free_components() {
        let bearing = Component::INTERVAL_BEARING;
        assert!(!bearing.contains(&Component::Rewound));
        assert!(!bearing.contains(&Component::Repeated));
        assert!(!bearing.contains(&Component::Modular));
        assert!(bearing.contains(&Component::Flipped));
    }
}
