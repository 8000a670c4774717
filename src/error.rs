//! Error types for sequence loading, generation and detection.
//!
//! None of the detection variants is fatal: the detector logs them and
//! recovers locally (freeform short-circuit, skipped candidate, excluded beat).

use std::path::PathBuf;

use crate::grid::Hand;

/// An error raised while loading, generating or analysing a sequence.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("invalid sequence `{word}`: {reason}")]
    InvalidSequence { word: String, reason: String },

    #[error("an interval of {divisor} parts does not fit a {len}-beat sequence")]
    IncompatibleInterval { divisor: usize, len: usize },

    #[error("beat {beat} ({hand} hand) is missing `{field}`")]
    MissingMotionData {
        beat: usize,
        hand: Hand,
        field: &'static str,
    },

    #[error("unknown label or component: {0}")]
    UnknownLabel(String),

    #[error("transformation {0} cannot be realized by the generator")]
    Unsupported(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DetectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
