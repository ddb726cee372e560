//! Excel and OpenDocument workbook loading via calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use tracing::{debug, warn};
use xl2sql_model::{CellValue, DataTable};

use crate::error::{IngestError, Result};
use crate::table::build_table;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts a 1900-system date serial to a timestamp.
fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    // Day zero is 1899-12-30 once the 1900 leap-year bug is folded in.
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * SECONDS_PER_DAY).round();
    if !seconds.is_finite() {
        return None;
    }
    epoch.checked_add_signed(TimeDelta::try_seconds(seconds as i64)?)
}

fn date_text(serial: f64) -> Option<String> {
    let datetime = serial_to_datetime(serial)?;
    let format = if serial.fract() == 0.0 {
        "%Y-%m-%d"
    } else {
        "%Y-%m-%d %H:%M:%S"
    };
    Some(datetime.format(format).to_string())
}

pub(crate) fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(text) if text.is_empty() => CellValue::Empty,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            CellValue::Text(text.clone())
        }
        Data::Float(number) => CellValue::Number(*number),
        Data::Int(number) => CellValue::Number(*number as f64),
        Data::Bool(flag) => CellValue::from(if *flag { "TRUE" } else { "FALSE" }),
        Data::DateTime(datetime) => {
            let serial = datetime.as_f64();
            date_text(serial).map_or(CellValue::Number(serial), CellValue::Text)
        }
    }
}

/// Reads every worksheet of the workbook at `path`, in workbook order.
///
/// The first row of each sheet's used range is its header. Sheets without
/// data rows are left out.
pub(crate) fn read_workbook_tables(path: &Path) -> Result<Vec<DataTable>> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;

    let mut tables = Vec::new();
    for sheet_name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| workbook_error(format!("sheet '{sheet_name}': {e}")))?;
        let mut rows = range.rows();
        let header: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|data| to_cell(data).to_display_string()).collect())
            .unwrap_or_default();
        let data_rows: Vec<Vec<CellValue>> = rows
            .map(|row| row.iter().map(to_cell).collect())
            .collect();

        match build_table(&sheet_name, &header, data_rows) {
            Some(table) => {
                debug!(
                    sheet = %sheet_name,
                    rows = table.row_count(),
                    columns = table.column_count(),
                    "read worksheet"
                );
                tables.push(table);
            }
            None => warn!(sheet = %sheet_name, "skipping sheet without data"),
        }
    }
    Ok(tables)
}
