//! Detector configuration: loaded from ~/.loopsmith/detector.yaml.
//!
//! Every field has a default, so a partial file (or no file) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DetectError;
use crate::grid::GridMode;

/// Upper bound on composite size: the five interval-bearing components.
pub const MAX_COMPONENTS: usize = 5;

/// Detector configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Largest composite the candidate search tries (1..=5).
    #[serde(default = "DetectorConfig::default_max_components")]
    pub max_components: usize,
    /// Report incomplete matches at or above this completeness. None = never.
    #[serde(default)]
    pub partial_threshold: Option<f64>,
    /// Run the time-reversal motif test.
    #[serde(default = "default_true")]
    pub detect_rewound: bool,
    /// Run the verbatim-repetition motif test.
    #[serde(default = "default_true")]
    pub detect_repeated: bool,
    /// Grid mode for documents that do not name one.
    #[serde(default)]
    pub default_grid: GridMode,
}

/// Hashable summary of a [`DetectorConfig`], used as a cache key.
/// `default_grid` is left out: it only applies while loading documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigFingerprint {
    max_components: usize,
    partial_threshold: Option<u64>,
    detect_rewound: bool,
    detect_repeated: bool,
}

fn default_true() -> bool {
    true
}

impl DetectorConfig {
    fn default_max_components() -> usize {
        MAX_COMPONENTS
    }

    /// Standard config path (~/.loopsmith/detector.yaml).
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".loopsmith").join("detector.yaml"))
    }

    /// Load from the standard path. Returns None if the file doesn't exist or
    /// cannot be parsed.
    pub fn load() -> Option<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path).ok()
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, DetectError> {
        let content = std::fs::read_to_string(path).map_err(|e| DetectError::io(path, e))?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config.clamped())
    }

    /// Composite size limited to 1..=5.
    pub fn component_limit(&self) -> usize {
        self.max_components.clamp(1, MAX_COMPONENTS)
    }

    /// The settings that can change a detection result, in hashable form.
    /// Two configs with equal fingerprints detect identically.
    pub fn fingerprint(&self) -> ConfigFingerprint {
        ConfigFingerprint {
            max_components: self.component_limit(),
            partial_threshold: self.partial_threshold.map(f64::to_bits),
            detect_rewound: self.detect_rewound,
            detect_repeated: self.detect_repeated,
        }
    }

    fn clamped(mut self) -> Self {
        self.max_components = self.component_limit();
        self.partial_threshold = self.partial_threshold.map(|t| t.clamp(0.0, 1.0));
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_components: MAX_COMPONENTS,
            partial_threshold: None,
            detect_rewound: true,
            detect_repeated: true,
            default_grid: GridMode::Diamond,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn default_config() {
        let config = DetectorConfig::default();
        assert_eq!(config.max_components, 5);
        assert!(config.partial_threshold.is_none());
        assert!(config.detect_rewound);
        assert!(config.detect_repeated);
    }

    #[test]
    fn partial_yaml_config() {
        let config: DetectorConfig = serde_yaml::from_str("partial_threshold: 0.5\n").unwrap();
        assert_eq!(config.partial_threshold, Some(0.5));
        assert_eq!(config.max_components, 5);
        assert!(config.detect_rewound);
        assert_eq!(config.default_grid, GridMode::Diamond);
    }

    #[test]
    fn serialize_deserialize() {
        let config = DetectorConfig {
            max_components: 2,
            default_grid: GridMode::Box,
            ..DetectorConfig::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: DetectorConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn load_from_clamps_out_of_range_values() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "max_components: 9\npartial_threshold: 1.7\n").unwrap();
        let config = DetectorConfig::load_from(file.path()).unwrap();
        assert_eq!(config.max_components, 5);
        assert_eq!(config.partial_threshold, Some(1.0));
    }

    #[test]
    fn component_limit_never_zero() {
        let config = DetectorConfig {
            max_components: 0,
            ..DetectorConfig::default()
        };
        assert_eq!(config.component_limit(), 1);
    }

    #[test]
    fn fingerprint_tracks_detection_settings() {
        let base = DetectorConfig::default();
        let boxed = DetectorConfig {
            default_grid: GridMode::Box,
            ..DetectorConfig::default()
        };
        assert_eq!(base.fingerprint(), boxed.fingerprint());

        let narrow = DetectorConfig {
            max_components: 1,
            ..DetectorConfig::default()
        };
        let partial = DetectorConfig {
            partial_threshold: Some(0.5),
            ..DetectorConfig::default()
        };
        assert_ne!(base.fingerprint(), narrow.fingerprint());
        assert_ne!(base.fingerprint(), partial.fingerprint());

        let oversized = DetectorConfig {
            max_components: 9,
            ..DetectorConfig::default()
        };
        assert_eq!(base.fingerprint(), oversized.fingerprint());
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DetectorConfig::load_from(&dir.path().join("detector.yaml")).is_err());
    }

    #[test]
    fn load_standard_path_does_not_panic() {
        // The file usually doesn't exist on test machines; just verify no panic.
        let _ = DetectorConfig::load();
    }
}
