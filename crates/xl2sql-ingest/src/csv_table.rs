//! CSV loading.
//!
//! A CSV file yields one table named after the file stem. Cells stay text so
//! numeric values keep the spelling the user typed (`"1,234.50"`, `"$5"`).

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;
use xl2sql_model::{CellValue, DataTable};

use crate::error::{IngestError, Result};
use crate::table::{build_table, normalize_text};

fn to_cell(raw: &str) -> CellValue {
    let text = normalize_text(raw);
    if text.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(text.to_string())
    }
}

/// Reads `path` as a single table; None if it holds no data rows.
pub(crate) fn read_csv_table(path: &Path) -> Result<Option<DataTable>> {
    let parse_error = |source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(parse_error)?;

    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        match &header {
            None => {
                if record.iter().all(|value| normalize_text(value).is_empty()) {
                    continue;
                }
                header = Some(
                    record
                        .iter()
                        .map(|value| normalize_text(value).to_string())
                        .collect(),
                );
            }
            Some(_) => rows.push(record.iter().map(to_cell).collect()),
        }
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string());
    debug!(path = %path.display(), rows = rows.len(), "read csv");
    Ok(build_table(&name, header.as_deref().unwrap_or_default(), rows))
}
