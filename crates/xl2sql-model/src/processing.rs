use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A value ready for template substitution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormattedValue {
    /// Already quote-escaped text, or the raw fallback of an unparseable number.
    Text(String),
    Number(f64),
}

/// Formatted values of one row, keyed by parameter name.
pub type FormattedParameters = BTreeMap<String, FormattedValue>;

/// Why a row produced no statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Empty,
    InvalidValue,
    Arabic,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::InvalidValue => "invalid_value",
            Self::Arabic => "arabic",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(FormattedParameters),
    Skipped {
        reason: SkipReason,
        /// Parameter whose value triggered the skip.
        parameter: String,
    },
}

/// Per-category row counters of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_rows: usize,
    pub processed_rows: usize,
    pub skipped_empty: usize,
    pub skipped_invalid_value: usize,
    pub skipped_arabic: usize,
    pub processing_time: Duration,
}

impl ValidationStats {
    pub fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Empty => self.skipped_empty += 1,
            SkipReason::InvalidValue => self.skipped_invalid_value += 1,
            SkipReason::Arabic => self.skipped_arabic += 1,
        }
    }

    pub fn record_processed(&mut self) {
        self.processed_rows += 1;
    }

    pub fn skipped_total(&self) -> usize {
        self.skipped_empty + self.skipped_invalid_value + self.skipped_arabic
    }

    /// Processed and skipped rows add up to the rows seen.
    pub fn is_balanced(&self) -> bool {
        self.processed_rows + self.skipped_total() == self.total_rows
    }
}

/// Everything a completed run hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub output_path: PathBuf,
    pub source: String,
    pub procedure: String,
    pub statements: Vec<String>,
    pub stats: ValidationStats,
}

impl ProcessingResult {
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }
}
