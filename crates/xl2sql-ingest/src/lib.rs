//! Spreadsheet loading.
//!
//! Turns an input file into named [`DataTable`]s for the processing pipeline:
//!
//! - **CSV**: one table named after the file stem, every cell kept as text
//! - **Workbooks** (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`): one table per
//!   worksheet, numeric cells kept as numbers
//!
//! Tables without data rows are dropped, so every returned table can be
//! offered for selection.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use xl2sql_ingest::{find_table, load_tables};
//!
//! let tables = load_tables(Path::new("items.xlsx"))?;
//! let prices = find_table(&tables, Some("Prices"))?;
//! ```

mod csv_table;
mod error;
mod table;
mod workbook;

use std::path::Path;

use tracing::info;
use xl2sql_model::DataTable;

pub use error::{IngestError, Result};

/// Rows shown by [`preview`] when no count is given.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;
/// Largest accepted preview size.
pub const MAX_PREVIEW_ROWS: usize = 100;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Loads every non-empty table from `path`, choosing the reader by extension.
pub fn load_tables(path: &Path) -> Result<Vec<DataTable>> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let tables = if extension == "csv" {
        csv_table::read_csv_table(path)?.into_iter().collect()
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        workbook::read_workbook_tables(path)?
    } else {
        return Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        });
    };

    if tables.is_empty() {
        return Err(IngestError::NoTables {
            path: path.to_path_buf(),
        });
    }
    info!(
        path = %path.display(),
        tables = tables.len(),
        "loaded input"
    );
    Ok(tables)
}

/// Selects a table by name, or the first table when `sheet` is None.
pub fn find_table<'a>(tables: &'a [DataTable], sheet: Option<&str>) -> Result<&'a DataTable> {
    let found = match sheet {
        Some(sheet) => tables.iter().find(|table| table.name == sheet),
        None => tables.first(),
    };
    found.ok_or_else(|| IngestError::SheetNotFound {
        sheet: sheet.unwrap_or_default().to_string(),
        available: tables.iter().map(|table| table.name.clone()).collect(),
    })
}

/// Copy of `table` holding only its first `rows` rows.
///
/// The row count is clamped to `1..=MAX_PREVIEW_ROWS`.
pub fn preview(table: &DataTable, rows: usize) -> DataTable {
    let rows = rows.clamp(1, MAX_PREVIEW_ROWS);
    DataTable {
        name: table.name.clone(),
        columns: table.columns.clone(),
        rows: table.rows.iter().take(rows).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use xl2sql_model::CellValue;

    use super::*;

    fn table(name: &str, rows: usize) -> DataTable {
        let mut table = DataTable::new(name, vec!["Item".into()]);
        for index in 0..rows {
            table.push_row(vec![CellValue::from(format!("I{index}"))]);
        }
        table
    }

    #[test]
    fn find_table_defaults_to_first() {
        let tables = vec![table("A", 1), table("B", 1)];
        assert_eq!(find_table(&tables, None).unwrap().name, "A");
        assert_eq!(find_table(&tables, Some("B")).unwrap().name, "B");
    }

    #[test]
    fn find_table_reports_available_sheets() {
        let tables = vec![table("A", 1), table("B", 1)];
        match find_table(&tables, Some("C")).unwrap_err() {
            IngestError::SheetNotFound { sheet, available } => {
                assert_eq!(sheet, "C");
                assert_eq!(available, ["A", "B"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn preview_is_clamped() {
        let source = table("A", 150);
        assert_eq!(preview(&source, 0).row_count(), 1);
        assert_eq!(preview(&source, DEFAULT_PREVIEW_ROWS).row_count(), 10);
        assert_eq!(preview(&source, 500).row_count(), MAX_PREVIEW_ROWS);
        assert_eq!(preview(&table("B", 3), 10).row_count(), 3);
    }
}
