//! Batch processing of one table into one SQL script.
//!
//! A run moves through `Idle → Resolving → Iterating → Writing` and ends in
//! `Completed` or `Aborted`. Bad rows are skipped and counted; only
//! configuration defects and I/O failures abort, and an aborted run writes
//! no artifact.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, info_span};
use xl2sql_model::{
    ColumnAssignment, ColumnMapping, DataTable, ProcedureDefinition, ProcessingResult, RowOutcome,
    RunOptions, ValidationStats,
};

use crate::error::Result;
use crate::progress::{ProgressSink, STATUS_INTERVAL, percent_complete};
use crate::renderer::render_statement;
use crate::resolver::resolve_columns;
use crate::validator::RowValidator;
use crate::writer::{ScriptHeader, write_script};

/// Everything needed to run one batch.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub table: Arc<DataTable>,
    pub procedure: ProcedureDefinition,
    pub assignment: ColumnAssignment,
    pub output_path: PathBuf,
    pub options: RunOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Resolving,
    Iterating,
    Writing,
    Completed,
    Aborted,
}

/// Drives a single run; strictly sequential.
#[derive(Debug)]
pub struct BatchProcessor {
    request: RunRequest,
    state: RunState,
}

impl BatchProcessor {
    pub fn new(request: RunRequest) -> Self {
        Self {
            request,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn request(&self) -> &RunRequest {
        &self.request
    }

    /// Runs the batch to completion or fatal abort.
    pub fn run(&mut self, sink: &mut dyn ProgressSink) -> Result<ProcessingResult> {
        let span = info_span!(
            "run",
            source = %self.request.table.name,
            procedure = %self.request.procedure.display_name()
        );
        let _guard = span.enter();
        let started = Instant::now();

        let result = self.execute(sink, started);
        match &result {
            Ok(result) => {
                self.state = RunState::Completed;
                info!(
                    total = result.stats.total_rows,
                    processed = result.stats.processed_rows,
                    skipped_empty = result.stats.skipped_empty,
                    skipped_invalid_value = result.stats.skipped_invalid_value,
                    skipped_arabic = result.stats.skipped_arabic,
                    elapsed_ms = result.stats.processing_time.as_millis(),
                    output = %result.output_path.display(),
                    "run completed"
                );
            }
            Err(error) => {
                self.state = RunState::Aborted;
                error!(%error, "run aborted");
            }
        }
        result
    }

    fn execute(&mut self, sink: &mut dyn ProgressSink, started: Instant) -> Result<ProcessingResult> {
        let RunRequest {
            table,
            procedure,
            assignment,
            output_path,
            options,
        } = &self.request;

        self.state = RunState::Resolving;
        let mapping = resolve_columns(&table.columns, procedure, assignment)?;

        self.state = RunState::Iterating;
        info!(rows = table.row_count(), "processing rows");
        let (statements, mut stats) =
            generate_statements(table, procedure, &mapping, *options, sink)?;

        self.state = RunState::Writing;
        write_script(
            output_path,
            ScriptHeader {
                source: &table.name,
                procedure: procedure.display_name(),
            },
            &statements,
        )?;

        stats.processing_time = started.elapsed();
        Ok(ProcessingResult {
            output_path: output_path.clone(),
            source: table.name.clone(),
            procedure: procedure.display_name().to_string(),
            statements,
            stats,
        })
    }
}

/// Validates and renders every row of `table`, in input order.
///
/// Returns the statements and the row counters; the first rendering failure
/// aborts and discards everything produced so far.
pub fn generate_statements(
    table: &DataTable,
    procedure: &ProcedureDefinition,
    mapping: &ColumnMapping,
    options: RunOptions,
    sink: &mut dyn ProgressSink,
) -> Result<(Vec<String>, ValidationStats)> {
    let total_rows = table.row_count();
    let validator = RowValidator::new(procedure, mapping, options);
    let mut statements = Vec::new();
    let mut stats = ValidationStats {
        total_rows,
        ..ValidationStats::default()
    };

    for (offset, row) in table.rows.iter().enumerate() {
        let row_number = offset + 1;
        sink.progress(percent_complete(row_number, total_rows));
        if row_number % STATUS_INTERVAL == 0 {
            sink.status(&format!("Processing row {row_number} of {total_rows}"));
        }

        match validator.validate(row) {
            RowOutcome::Skipped { reason, parameter } => {
                debug!(row = row_number, %parameter, %reason, "row skipped");
                stats.record_skip(reason);
            }
            RowOutcome::Accepted(params) => {
                let statement = render_statement(procedure.template(), &params, row_number)?;
                statements.push(statement);
                stats.record_processed();
            }
        }
    }

    Ok((statements, stats))
}

#[cfg(test)]
mod tests {
    use xl2sql_model::{CellValue, ProcedureCatalog};

    use super::*;
    use crate::error::ProcessError;

    fn dropship_request(rows: &[[&str; 2]], output_path: PathBuf) -> RunRequest {
        let mut table = DataTable::new("Sheet1", vec!["Item".into(), "Qty".into()]);
        for row in rows {
            table.push_row(row.iter().map(|value| CellValue::from(*value)).collect());
        }
        let catalog = ProcedureCatalog::builtin().unwrap();
        RunRequest {
            table: Arc::new(table),
            procedure: catalog
                .get("Update Items Dropship Quantities")
                .unwrap()
                .clone(),
            assignment: ColumnAssignment::new().with("item", "Item").with("qty", "Qty"),
            output_path,
            options: RunOptions::default(),
        }
    }

    #[test]
    fn run_completes_and_balances() {
        let dir = tempfile::tempdir().unwrap();
        let request = dropship_request(
            &[["A1", "1"], ["", "2"], ["A3", "-1"], ["منتج", "5"], ["A5", "5"]],
            dir.path().join("out.sql"),
        );
        let mut processor = BatchProcessor::new(request);
        assert_eq!(processor.state(), RunState::Idle);

        let result = processor.run(&mut ()).unwrap();
        assert_eq!(processor.state(), RunState::Completed);
        assert_eq!(result.stats.total_rows, 5);
        assert_eq!(result.stats.processed_rows, 2);
        assert_eq!(result.stats.skipped_empty, 1);
        assert_eq!(result.stats.skipped_invalid_value, 1);
        assert_eq!(result.stats.skipped_arabic, 1);
        assert!(result.stats.is_balanced());
        assert_eq!(result.statement_count(), 2);
    }

    #[test]
    fn resolution_failure_aborts_before_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = dropship_request(&[["A1", "1"]], dir.path().join("out.sql"));
        request.assignment = ColumnAssignment::new().with("item", "Item");
        let output = request.output_path.clone();
        let mut processor = BatchProcessor::new(request);

        let mut progress_calls = 0;
        let mut sink = crate::progress::FnSink::new(|_| progress_calls += 1, |_| {});
        let err = processor.run(&mut sink).unwrap_err();

        assert!(matches!(err, ProcessError::MissingAssignment { ref parameter } if parameter == "qty"));
        assert_eq!(processor.state(), RunState::Aborted);
        assert_eq!(progress_calls, 0);
        assert!(!output.exists());
    }

    #[test]
    fn write_failure_aborts_after_iterating() {
        let dir = tempfile::tempdir().unwrap();
        let request = dropship_request(
            &[["A1", "1"]],
            dir.path().join("no-such-dir").join("out.sql"),
        );
        let mut processor = BatchProcessor::new(request);
        let err = processor.run(&mut ()).unwrap_err();
        assert!(matches!(err, ProcessError::Write { .. }));
        assert_eq!(processor.state(), RunState::Aborted);
    }

    #[test]
    fn status_every_hundred_rows() {
        let mut table = DataTable::new("S", vec!["Item".into(), "Qty".into()]);
        for index in 0..250 {
            table.push_row(vec![CellValue::from(format!("I{index}")), CellValue::Number(1.0)]);
        }
        let catalog = ProcedureCatalog::builtin().unwrap();
        let procedure = catalog.get("Update Items Dropship Quantities").unwrap();
        let mut mapping = ColumnMapping::new();
        mapping.insert("item", 0);
        mapping.insert("qty", 1);

        let mut percents = Vec::new();
        let mut messages = Vec::new();
        let mut sink = crate::progress::FnSink::new(
            |p| percents.push(p),
            |m: &str| messages.push(m.to_string()),
        );
        let (statements, stats) =
            generate_statements(&table, procedure, &mapping, RunOptions::default(), &mut sink)
                .unwrap();

        assert_eq!(statements.len(), 250);
        assert_eq!(stats.processed_rows, 250);
        assert_eq!(
            messages,
            ["Processing row 100 of 250", "Processing row 200 of 250"]
        );
        assert_eq!(percents.len(), 250);
        assert!(percents.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(percents.last(), Some(&100));
    }
}
