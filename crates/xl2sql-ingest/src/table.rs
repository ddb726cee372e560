//! Assembly of loaded rows into a [`DataTable`].

use xl2sql_model::{CellValue, DataTable};

/// Trims whitespace and a leading byte-order mark.
pub(crate) fn normalize_text(raw: &str) -> &str {
    raw.trim().trim_start_matches('\u{feff}').trim()
}

/// Header text for column `index`; blank headers get a positional name.
fn header_name(raw: Option<&str>, index: usize) -> String {
    match raw.map(normalize_text) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("Unnamed: {index}"),
    }
}

/// Builds a table from a header row and data rows.
///
/// The column count is the widest of the header and the data, so no value is
/// dropped. Returns None for tables without rows or columns.
pub(crate) fn build_table(
    name: &str,
    header: &[String],
    rows: Vec<Vec<CellValue>>,
) -> Option<DataTable> {
    let width = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    if width == 0 || rows.is_empty() {
        return None;
    }
    let columns = (0..width)
        .map(|index| header_name(header.get(index).map(String::as_str), index))
        .collect();
    let mut table = DataTable::new(name, columns);
    for row in rows {
        table.push_row(row);
    }
    Some(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_whitespace() {
        assert_eq!(normalize_text("\u{feff}Item Number "), "Item Number");
        assert_eq!(normalize_text("  "), "");
    }

    #[test]
    fn pads_header_to_widest_row() {
        let table = build_table(
            "S",
            &["Item".to_string(), " ".to_string()],
            vec![vec!["A".into(), "1".into(), "x".into()], vec!["B".into()]],
        )
        .unwrap();
        assert_eq!(table.columns, ["Item", "Unnamed: 1", "Unnamed: 2"]);
        assert_eq!(table.rows[1], [CellValue::from("B"), CellValue::Empty, CellValue::Empty]);
    }

    #[test]
    fn header_only_is_not_a_table() {
        assert!(build_table("S", &["Item".to_string()], Vec::new()).is_none());
    }
}
