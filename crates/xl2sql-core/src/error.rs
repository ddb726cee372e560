//! Fatal, run-aborting errors.
//!
//! Per-row data defects are not errors; they are counted in
//! [`ValidationStats`](xl2sql_model::ValidationStats) and the row is skipped.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessError {
    /// No column was assigned to a required parameter.
    #[error("no column assigned to required parameter '{parameter}'")]
    MissingAssignment { parameter: String },

    /// The assigned column header does not exist in the table.
    #[error(
        "column '{column}' assigned to parameter '{parameter}' not found; available columns: {}",
        available.join(", ")
    )]
    ColumnNotFound {
        parameter: String,
        column: String,
        available: Vec<String>,
    },

    /// A template placeholder had no formatted value.
    #[error("missing value for template placeholder '{placeholder}' (row {row}); check column mappings")]
    TemplateParameterMissing { placeholder: String, row: usize },

    /// The output artifact could not be written.
    #[error("failed to write script {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A run was requested while another is still active.
    #[error("a script generation is already in progress")]
    RunInProgress,

    /// The worker thread ended without reporting a result.
    #[error("processing worker stopped without a result")]
    WorkerDisconnected,
}

impl ProcessError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_not_found_lists_available_columns() {
        let err = ProcessError::ColumnNotFound {
            parameter: "qty".into(),
            column: "Quantity".into(),
            available: vec!["Item".into(), "Qty".into()],
        };
        assert_eq!(
            err.to_string(),
            "column 'Quantity' assigned to parameter 'qty' not found; available columns: Item, Qty"
        );
    }
}
