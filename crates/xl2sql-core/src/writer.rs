//! SQL script artifact writer.
//!
//! Layout:
//!
//! ```text
//! -- Generated on 2025-01-31 09:15:00
//! -- Source Excel Sheet: <source>
//! -- Stored Procedure/SQL Type: <procedure>
//! -- Total statements: <n>
//!
//! <statement>
//! GO
//! ```

use std::io::Write;
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ProcessError, Result};

/// Batch separator written after every statement.
pub const BATCH_SEPARATOR: &str = "GO";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Identifies where the statements came from.
#[derive(Debug, Clone, Copy)]
pub struct ScriptHeader<'a> {
    pub source: &'a str,
    pub procedure: &'a str,
}

/// Renders the full script text.
pub fn render_script(
    header: ScriptHeader<'_>,
    statements: &[String],
    generated_at: NaiveDateTime,
) -> String {
    let body_len: usize = statements.iter().map(|s| s.len() + 4).sum();
    let mut script = String::with_capacity(body_len + 160);
    script.push_str(&format!(
        "-- Generated on {}\n",
        generated_at.format(TIMESTAMP_FORMAT)
    ));
    script.push_str(&format!("-- Source Excel Sheet: {}\n", header.source));
    script.push_str(&format!(
        "-- Stored Procedure/SQL Type: {}\n",
        header.procedure
    ));
    script.push_str(&format!("-- Total statements: {}\n\n", statements.len()));
    for statement in statements {
        script.push_str(statement);
        script.push('\n');
        script.push_str(BATCH_SEPARATOR);
        script.push('\n');
    }
    script
}

/// Writes the script to `path` as UTF-8.
///
/// The text goes to a temporary file beside `path` that replaces the
/// destination only once fully written, so a failed write leaves no artifact.
pub fn write_script(path: &Path, header: ScriptHeader<'_>, statements: &[String]) -> Result<()> {
    let script = render_script(header, statements, Local::now().naive_local());
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| ProcessError::write(path, e))?;
    file.write_all(script.as_bytes())
        .and_then(|()| file.flush())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| ProcessError::write(path, e))?;
    file.persist(path)
        .map_err(|e| ProcessError::write(path, e.error))?;
    debug!(path = %path.display(), bytes = script.len(), "wrote script");
    Ok(())
}
