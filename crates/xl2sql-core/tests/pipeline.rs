use std::sync::Arc;

use xl2sql_core::{
    BatchProcessor, ProcessError, RunRequest, RunState, ScriptHeader, generate_statements,
    write_script,
};
use xl2sql_model::{
    CellValue, ColumnAssignment, ColumnMapping, DataTable, ProcedureCatalog, ProcedureDefinition,
    RunOptions,
};

fn procedure(name: &str) -> ProcedureDefinition {
    ProcedureCatalog::builtin()
        .expect("builtin catalog")
        .get(name)
        .expect("procedure")
        .clone()
}

fn table(columns: &[&str], rows: &[&[CellValue]]) -> Arc<DataTable> {
    let mut table = DataTable::new(
        "Sheet1",
        columns.iter().map(|column| (*column).to_string()).collect(),
    );
    for row in rows {
        table.push_row(row.to_vec());
    }
    Arc::new(table)
}

fn text(value: &str) -> CellValue {
    CellValue::from(value)
}

fn dropship(rows: &[&[CellValue]], options: RunOptions) -> (tempfile::TempDir, RunRequest) {
    let dir = tempfile::tempdir().expect("tempdir");
    let request = RunRequest {
        table: table(&["Item Number", "Quantity"], rows),
        procedure: procedure("Update Items Dropship Quantities"),
        assignment: ColumnAssignment::new()
            .with("item", "Item Number")
            .with("qty", "Quantity"),
        output_path: dir.path().join("dropship.sql"),
        options,
    };
    (dir, request)
}

#[test]
fn renders_formatted_quantity() {
    let (_dir, request) = dropship(&[&[text("ABC123"), text("1,234.50")]], RunOptions::default());
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");

    assert_eq!(
        result.statements,
        ["EXEC [dbo].[Hyou_UPDATE_EVS_ItemAddational_DROPSHIP_QTY_Excel] @ITEMNMBR = 'ABC123', @QTY = 1234.500, @F1 = NULL, @F2 = NULL"]
    );
    assert_eq!(result.stats.processed_rows, 1);
}

#[test]
fn arabic_item_is_skipped() {
    let (_dir, request) = dropship(&[&[text("منتج"), text("5")]], RunOptions::default());
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");

    assert!(result.statements.is_empty());
    assert_eq!(result.stats.skipped_arabic, 1);
    assert_eq!(result.stats.processed_rows, 0);
}

#[test]
fn negative_quantity_is_invalid() {
    let (_dir, request) = dropship(&[&[text("X1"), text("-5")]], RunOptions::default());
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");

    assert!(result.statements.is_empty());
    assert_eq!(result.stats.skipped_invalid_value, 1);
}

#[test]
fn missing_assignment_aborts_before_any_row() {
    let (_dir, mut request) = dropship(&[&[text("X1"), text("5")]], RunOptions::default());
    request.assignment = ColumnAssignment::new().with("item", "Item Number");
    let output = request.output_path.clone();
    let mut processor = BatchProcessor::new(request);

    let err = processor.run(&mut ()).expect_err("missing qty");
    match err {
        ProcessError::MissingAssignment { parameter } => assert_eq!(parameter, "qty"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(processor.state(), RunState::Aborted);
    assert!(!output.exists());
}

#[test]
fn first_defective_field_decides_reason() {
    // item is empty and qty is negative: item is declared first.
    let (_dir, request) = dropship(&[&[CellValue::Empty, text("-5")]], RunOptions::default());
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");
    assert_eq!(result.stats.skipped_empty, 1);
    assert_eq!(result.stats.skipped_invalid_value, 0);
}

#[test]
fn quotes_are_escaped_in_text_parameters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let request = RunRequest {
        table: table(&["Item", "Status"], &[&[text(" O'Brien's "), text("Discontinued")]]),
        procedure: procedure("Update Items Status"),
        assignment: ColumnAssignment::new()
            .with("item", "Item")
            .with("Status", "Status"),
        output_path: dir.path().join("status.sql"),
        options: RunOptions::default(),
    };
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");

    assert_eq!(
        result.statements,
        ["UPDATE IV00101 SET USCATVLS_6 = 'Discontinued', INACTIVE = 1, ITEMTYPE = 2 WHERE ITEMNMBR = 'O''Brien''s'"]
    );
}

#[test]
fn lenient_mode_keeps_defective_rows() {
    let options = RunOptions::default()
        .with_enforce_quality(false)
        .with_skip_arabic_text(false);
    let (_dir, request) = dropship(
        &[
            &[text("X1"), text("-5")],
            &[text("X2"), CellValue::Empty],
            &[text("منتج"), text("abc")],
        ],
        options,
    );
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");

    assert_eq!(result.stats.processed_rows, 3);
    assert!(result.statements[0].contains("@QTY = -5.000"));
    assert!(result.statements[1].contains("@QTY = 0,"));
    assert!(result.statements[2].contains("@ITEMNMBR = 'منتج', @QTY = abc,"));
}

#[test]
fn lenient_numeric_text_keeps_quotes_balanced() {
    let options = RunOptions::default().with_enforce_quality(false);
    let (_dir, request) = dropship(
        &[
            &[text("X1"), text("5'; DROP TABLE IV00101; --")],
            &[text("X2"), text("   ")],
        ],
        options,
    );
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");

    assert_eq!(
        result.statements,
        [
            "EXEC [dbo].[Hyou_UPDATE_EVS_ItemAddational_DROPSHIP_QTY_Excel] @ITEMNMBR = 'X1', @QTY = 5''; DROP TABLE IV00101; --, @F1 = NULL, @F2 = NULL",
            "EXEC [dbo].[Hyou_UPDATE_EVS_ItemAddational_DROPSHIP_QTY_Excel] @ITEMNMBR = 'X2', @QTY = 0, @F1 = NULL, @F2 = NULL",
        ]
    );
    for statement in &result.statements {
        assert_eq!(statement.matches('\'').count() % 2, 0, "{statement}");
    }
}

#[test]
fn render_failure_aborts_the_batch() {
    let procedure = procedure("Update Items Dropship Quantities");
    let mut mapping = ColumnMapping::new();
    mapping.insert("item", 0);

    let rows = table(&["Item Number", "Quantity"], &[&[text("A1"), text("5")]]);
    let err = generate_statements(&rows, &procedure, &mapping, RunOptions::default(), &mut ())
        .expect_err("qty is never formatted");
    assert!(matches!(
        err,
        ProcessError::TemplateParameterMissing { ref placeholder, row: 1 } if placeholder == "qty"
    ));

    // A skipped row first: the abort comes from the first accepted row.
    let rows = table(
        &["Item Number", "Quantity"],
        &[
            &[CellValue::Empty, text("5")],
            &[text("A2"), text("6")],
            &[text("A3"), text("7")],
        ],
    );
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("partial.sql");
    let err = generate_statements(&rows, &procedure, &mapping, RunOptions::default(), &mut ())
        .and_then(|(statements, _)| {
            write_script(
                &output,
                ScriptHeader {
                    source: &rows.name,
                    procedure: procedure.display_name(),
                },
                &statements,
            )
        })
        .expect_err("render failure");
    assert!(matches!(
        err,
        ProcessError::TemplateParameterMissing { row: 2, .. }
    ));
    assert!(!output.exists());
    assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
}

#[test]
fn numeric_cells_from_workbooks_render_like_text() {
    let (_dir, request) = dropship(
        &[&[CellValue::Number(1001.0), CellValue::Number(12.0)]],
        RunOptions::default(),
    );
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");
    assert!(result.statements[0].contains("@ITEMNMBR = '1001', @QTY = 12.000,"));
}

#[test]
fn script_on_disk_matches_result() {
    let (_dir, request) = dropship(
        &[
            &[text("A1"), text("1")],
            &[text("A2"), text("n/a")],
            &[text("A3"), text("$3")],
        ],
        RunOptions::default(),
    );
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");
    let script = std::fs::read_to_string(&result.output_path).expect("read script");

    assert!(script.contains("-- Source Excel Sheet: Sheet1\n"));
    assert!(script.contains("-- Stored Procedure/SQL Type: Update Items Dropship Quantities\n"));
    assert!(script.contains("-- Total statements: 2\n\n"));
    assert_eq!(script.matches("\nGO\n").count(), 2);
    for statement in &result.statements {
        assert!(script.contains(&format!("{statement}\nGO\n")));
    }
    assert_eq!(result.stats.skipped_invalid_value, 1);
}

#[test]
fn empty_table_writes_header_only() {
    let (_dir, request) = dropship(&[], RunOptions::default());
    let result = BatchProcessor::new(request).run(&mut ()).expect("run");
    let script = std::fs::read_to_string(&result.output_path).expect("read script");

    assert_eq!(result.stats.total_rows, 0);
    assert!(script.ends_with("-- Total statements: 0\n\n"));
}
