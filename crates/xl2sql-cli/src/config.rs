//! Run configuration from a TOML file and command-line flags.
//!
//! ```toml
//! procedure = "Update Items Prices"
//! sheet = "Prices"
//! output = "prices.sql"
//! skip_arabic_text = true
//! enforce_quality = true
//!
//! [columns]
//! item = "Item Number"
//! new_Showroom = "Showroom Price"
//! ```
//!
//! Flags given on the command line take precedence over the file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use xl2sql_model::{ColumnAssignment, DEFAULT_PROCEDURE, RunOptions};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub procedure: Option<String>,
    pub sheet: Option<String>,
    pub output: Option<PathBuf>,
    pub skip_arabic_text: Option<bool>,
    pub enforce_quality: Option<bool>,
    /// Parameter name to column header.
    #[serde(default)]
    pub columns: BTreeMap<String, String>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse config: {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Layers `over` on top of `self`; values set in `over` win.
    #[must_use]
    pub fn overlay(mut self, over: Self) -> Self {
        self.procedure = over.procedure.or(self.procedure);
        self.sheet = over.sheet.or(self.sheet);
        self.output = over.output.or(self.output);
        self.skip_arabic_text = over.skip_arabic_text.or(self.skip_arabic_text);
        self.enforce_quality = over.enforce_quality.or(self.enforce_quality);
        self.columns.extend(over.columns);
        self
    }

    pub fn procedure_name(&self) -> &str {
        self.procedure.as_deref().unwrap_or(DEFAULT_PROCEDURE)
    }

    pub fn run_options(&self) -> RunOptions {
        let defaults = RunOptions::default();
        RunOptions::new()
            .with_skip_arabic_text(self.skip_arabic_text.unwrap_or(defaults.skip_arabic_text))
            .with_enforce_quality(self.enforce_quality.unwrap_or(defaults.enforce_quality))
    }

    pub fn assignment(&self) -> ColumnAssignment {
        self.columns
            .iter()
            .map(|(parameter, column)| (parameter.clone(), column.clone()))
            .collect()
    }
}

/// Parses a `PARAM=COLUMN` argument; the column may contain `=` and spaces.
pub fn parse_column_mapping(value: &str) -> std::result::Result<(String, String), String> {
    let (parameter, column) = value
        .split_once('=')
        .ok_or_else(|| format!("expected PARAM=COLUMN, got '{value}'"))?;
    let parameter = parameter.trim();
    let column = column.trim();
    if parameter.is_empty() || column.is_empty() {
        return Err(format!("expected PARAM=COLUMN, got '{value}'"));
    }
    Ok((parameter.to_string(), column.to_string()))
}
