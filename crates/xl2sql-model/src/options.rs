//! Per-run processing policies.

use serde::{Deserialize, Serialize};

/// The two independent row policies of a run.
///
/// `enforce_quality` decides whether data-quality defects skip a row or are
/// coerced through with best-effort defaults. `skip_arabic_text` is a content
/// filter on text cells containing Arabic script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    pub skip_arabic_text: bool,
    pub enforce_quality: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            skip_arabic_text: true,
            enforce_quality: true,
        }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_skip_arabic_text(mut self, enable: bool) -> Self {
        self.skip_arabic_text = enable;
        self
    }

    #[must_use]
    pub fn with_enforce_quality(mut self, enable: bool) -> Self {
        self.enforce_quality = enable;
        self
    }
}
