//! Caller-side result cache.
//!
//! Detection is pure, so a result can be reused for as long as the sequence
//! behind its word, the detector version and the detector's settings stay the
//! same. The cache never looks at beats; callers that edit a sequence must
//! [`invalidate`] it.
//!
//! [`invalidate`]: ResultCache::invalidate

use std::collections::HashMap;

use tracing::trace;

use crate::config::ConfigFingerprint;
use crate::detect::{DetectionResult, Detector};
use crate::sequence::Sequence;

/// Cache key: word, detector version, detector settings.
type Key = (String, u32, ConfigFingerprint);

fn key(word: &str, detector: &Detector) -> Key {
    (word.to_string(), detector.version(), detector.config().fingerprint())
}

/// Results keyed by word and by the detector that produced them.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: HashMap<Key, DetectionResult>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `sequence`, computing it with `detector` on a miss.
    pub fn get_or_detect(&mut self, detector: &Detector, sequence: &Sequence) -> &DetectionResult {
        self.entries.entry(key(sequence.word(), detector)).or_insert_with(|| {
            trace!(word = sequence.word(), "cache miss");
            detector.detect(sequence)
        })
    }

    /// Result `detector` already produced for `word`, if any.
    pub fn get(&self, detector: &Detector, word: &str) -> Option<&DetectionResult> {
        self.entries.get(&key(word, detector))
    }

    /// Drop every cached result for `word`, whatever detector produced it.
    pub fn invalidate(&mut self, word: &str) {
        self.entries.retain(|(w, _, _), _| w != word);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
