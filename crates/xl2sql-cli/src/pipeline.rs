//! Glue between loaded tables, the procedure catalog and the batch runner.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{info, warn};

use xl2sql_core::{MappingIssue, ProgressSink, RunRequest, Runner, check_mapping};
use xl2sql_ingest::{find_table, load_tables};
use xl2sql_model::{ProcedureCatalog, ProcessingResult, ValidationStats};

use crate::config::RunConfig;

/// A run ready to start, with the advisory findings of the mapping check.
#[derive(Debug)]
pub struct PreparedRun {
    pub request: RunRequest,
    pub issues: Vec<MappingIssue>,
}

/// `<input stem>_<sheet>.sql` next to the input file.
pub fn default_output_path(input: &Path, sheet: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_{sheet}.sql"))
}

/// Loads the input and builds the run request described by `config`.
pub fn prepare(input: &Path, config: &RunConfig, catalog: &ProcedureCatalog) -> Result<PreparedRun> {
    let procedure = catalog
        .find(config.procedure_name())
        .ok_or_else(|| {
            anyhow!(
                "unknown procedure '{}'; available: {}",
                config.procedure_name(),
                catalog.names().collect::<Vec<_>>().join(", ")
            )
        })?
        .clone();

    let tables = load_tables(input).with_context(|| format!("load {}", input.display()))?;
    let table = find_table(&tables, config.sheet.as_deref())?.clone();

    let assignment = config.assignment();
    let issues = check_mapping(&table, &procedure, &assignment);
    for issue in &issues {
        warn!(%issue, "mapping check");
    }

    let output_path = config
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input, &table.name));
    info!(
        sheet = %table.name,
        procedure = %procedure.display_name(),
        output = %output_path.display(),
        "prepared run"
    );
    Ok(PreparedRun {
        request: RunRequest {
            table: Arc::new(table),
            procedure,
            assignment,
            output_path,
            options: config.run_options(),
        },
        issues,
    })
}

/// Runs `request` on a background worker and waits for it.
pub fn execute(request: RunRequest, sink: &mut dyn ProgressSink) -> Result<ProcessingResult> {
    let handle = Runner::new().start(request)?;
    Ok(handle.wait(sink)?)
}

/// Machine-readable run report; statements are counted, not included.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub output_path: &'a Path,
    pub source: &'a str,
    pub procedure: &'a str,
    pub statements: usize,
    pub stats: &'a ValidationStats,
    pub processing_seconds: f64,
}

impl<'a> RunSummary<'a> {
    pub fn new(result: &'a ProcessingResult) -> Self {
        Self {
            output_path: &result.output_path,
            source: &result.source,
            procedure: &result.procedure,
            statements: result.statement_count(),
            stats: &result.stats,
            processing_seconds: result.stats.processing_time.as_secs_f64(),
        }
    }
}

pub fn write_summary_json(path: &Path, result: &ProcessingResult) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &RunSummary::new(result))
        .map_err(io::Error::from)
        .and_then(|()| writer.flush())
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
