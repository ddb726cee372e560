//! Row validation and SQL statement rendering pipeline.
//!
//! For each row of a spreadsheet table, decide whether the row is usable,
//! coerce and escape its values, and render one statement from a procedure
//! template. The statements are written as a `GO`-separated script.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use xl2sql_core::{BatchProcessor, RunRequest};
//! use xl2sql_model::{ColumnAssignment, ProcedureCatalog, RunOptions};
//!
//! let catalog = ProcedureCatalog::builtin()?;
//! let request = RunRequest {
//!     table: Arc::new(table),
//!     procedure: catalog.get("Update Items Prices").unwrap().clone(),
//!     assignment: ColumnAssignment::new()
//!         .with("item", "Item Number")
//!         .with("new_Showroom", "Showroom Price"),
//!     output_path: "prices.sql".into(),
//!     options: RunOptions::default(),
//! };
//! let result = BatchProcessor::new(request).run(&mut ())?;
//! ```

pub mod error;
pub mod mapping_check;
pub mod numeric;
pub mod processor;
pub mod progress;
pub mod renderer;
pub mod resolver;
pub mod runner;
pub mod validator;
pub mod writer;

pub use error::{ProcessError, Result};
pub use mapping_check::{MappingIssue, check_mapping};
pub use processor::{BatchProcessor, RunRequest, RunState, generate_statements};
pub use progress::{FnSink, ProgressSink};
pub use renderer::render_statement;
pub use resolver::resolve_columns;
pub use runner::{RunEvent, RunHandle, Runner};
pub use validator::{RowValidator, contains_arabic, escape_sql_text};
pub use writer::{BATCH_SEPARATOR, ScriptHeader, render_script, write_script};
