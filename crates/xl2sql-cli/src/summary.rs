use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use xl2sql_core::MappingIssue;
use xl2sql_model::ProcessingResult;

pub fn print_summary(result: &ProcessingResult) {
    println!("Output: {}", result.output_path.display());
    println!("{}", summary_table(result));
}

pub fn summary_table(result: &ProcessingResult) -> Table {
    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Source Excel Sheet"), Cell::new(&result.source)]);
    table.add_row(vec![Cell::new("Stored Procedure/SQL Type"), Cell::new(&result.procedure)]);
    table.add_row(vec![Cell::new("Total Rows"), Cell::new(stats.total_rows)]);
    table.add_row(vec![
        Cell::new("Processed").add_attribute(Attribute::Bold),
        count_cell(stats.processed_rows, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Skipped (Empty/Invalid)"),
        count_cell(stats.skipped_empty + stats.skipped_invalid_value, Color::Yellow),
    ]);
    table.add_row(vec![dim_cell("  -> Empty"), count_cell(stats.skipped_empty, Color::Yellow)]);
    table.add_row(vec![
        dim_cell("  -> Invalid"),
        count_cell(stats.skipped_invalid_value, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Skipped Arabic"), count_cell(stats.skipped_arabic, Color::Yellow)]);
    table.add_row(vec![
        Cell::new("Processing Time"),
        Cell::new(format!("{:.2} seconds", stats.processing_time.as_secs_f64())),
    ]);
    table
}

pub fn print_mapping_issues(issues: &[MappingIssue]) {
    if issues.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column Mapping Warning")]);
    apply_table_style(&mut table);
    for issue in issues {
        table.add_row(vec![Cell::new(issue).fg(Color::Yellow)]);
    }
    eprintln!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
