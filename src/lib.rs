//! Loopsmith: transformation detection and canonical labeling for circular
//! beat sequences.

pub mod config;
pub mod designation;
pub mod detect;
pub mod error;
pub mod generate;
pub mod grid;
pub mod memo;
pub mod sequence;
pub mod transform;

pub use config::DetectorConfig;
pub use detect::{Classification, DetectionResult, Detector, DETECTOR_VERSION};
pub use error::DetectError;
pub use generate::SequenceGenerator;
pub use sequence::{Beat, Sequence, SequenceDocument};
pub use transform::{Component, CompositeTransformation, Interval};
