use std::io::{self, IsTerminal};

use anyhow::{Context, Result, bail};
use comfy_table::{Cell, Table};
use tracing::{info, info_span};

use xl2sql_cli::config::RunConfig;
use xl2sql_cli::pipeline::{execute, prepare, write_summary_json};
use xl2sql_ingest::{find_table, load_tables, preview};
use xl2sql_model::{CellValue, ProcedureCatalog, ProcessingResult};

use crate::cli::{GenerateArgs, PreviewArgs, SheetsArgs};
use crate::progress::BarSink;
use crate::summary::{apply_table_style, dim_cell, header_cell, print_mapping_issues};

/// Flags of `generate` expressed as a config layer.
fn flag_config(args: &GenerateArgs) -> RunConfig {
    RunConfig {
        procedure: args.procedure.clone(),
        sheet: args.sheet.clone(),
        output: args.output.clone(),
        skip_arabic_text: args.allow_arabic.then_some(false),
        enforce_quality: args.no_quality_checks.then_some(false),
        columns: args.map.iter().cloned().collect(),
    }
}

pub fn run_generate(args: &GenerateArgs) -> Result<ProcessingResult> {
    let span = info_span!("generate", input = %args.input.display());
    let _guard = span.enter();

    let file_config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let config = file_config.overlay(flag_config(args));
    let catalog = ProcedureCatalog::builtin().context("load procedure catalog")?;

    let prepared = prepare(&args.input, &config, &catalog)?;
    if !prepared.issues.is_empty() {
        print_mapping_issues(&prepared.issues);
        if !args.ignore_mapping_warnings {
            bail!(
                "column mapping looks wrong ({} warning(s)); fix the mapping or pass --ignore-mapping-warnings",
                prepared.issues.len()
            );
        }
        info!(count = prepared.issues.len(), "continuing despite mapping warnings");
    }

    let mut bar = BarSink::new(io::stderr().is_terminal());
    let result = execute(prepared.request, &mut bar);
    bar.finish();
    let result = result?;

    if let Some(path) = &args.summary_json {
        write_summary_json(path, &result)?;
    }
    Ok(result)
}

pub fn run_procedures() -> Result<()> {
    let catalog = ProcedureCatalog::builtin().context("load procedure catalog")?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Procedure"), header_cell("Parameters")]);
    apply_table_style(&mut table);
    for procedure in catalog.iter() {
        let parameters = procedure
            .parameters()
            .iter()
            .map(|parameter| {
                if parameter.kind.is_numeric() {
                    format!("{} (number)", parameter.name)
                } else {
                    parameter.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![Cell::new(procedure.display_name()), Cell::new(parameters)]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_sheets(args: &SheetsArgs) -> Result<()> {
    let tables = load_tables(&args.input)?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Sheet"), header_cell("Rows"), header_cell("Columns")]);
    apply_table_style(&mut table);
    for data in &tables {
        table.add_row(vec![
            Cell::new(&data.name),
            Cell::new(data.row_count()),
            Cell::new(data.column_count()),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let tables = load_tables(&args.input)?;
    let source = find_table(&tables, args.sheet.as_deref())?;
    let head = preview(source, args.rows);

    let mut table = Table::new();
    table.set_header(head.columns.iter().map(|column| header_cell(column)));
    apply_table_style(&mut table);
    for row in &head.rows {
        table.add_row(row.iter().map(|value| match value {
            CellValue::Empty => dim_cell(""),
            value => Cell::new(value.to_display_string()),
        }));
    }
    println!("Sheet: {} ({} rows)", source.name, source.row_count());
    println!("{table}");
    Ok(())
}
