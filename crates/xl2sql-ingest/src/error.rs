//! Error types for spreadsheet loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading tables from an input file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Malformed CSV record.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The workbook could not be opened or a worksheet could not be read.
    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// File extension not handled by any loader.
    #[error("unsupported file type '{extension}' for {path}; expected .csv, .xlsx, .xlsm, .xlsb, .xls or .ods")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Table Selection Errors ===
    /// Every sheet was empty.
    #[error("no sheet with data found in {path}")]
    NoTables { path: PathBuf },

    /// Requested sheet is not among the loaded tables.
    #[error("sheet '{sheet}' not found; available sheets: {}", available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;
