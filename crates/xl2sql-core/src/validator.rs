//! Per-row validation and value coercion.
//!
//! Fields are checked in the procedure's declared parameter order and the first
//! defective field decides the row's single skip reason. For each field:
//!
//! 1. emptiness (only when quality checks are enforced),
//! 2. Arabic script in text cells (only when the content filter is on),
//! 3. kind-specific formatting: text is trimmed and quote-escaped, numbers are
//!    cleaned and parsed.

use xl2sql_model::{
    CellValue, ColumnMapping, FormattedParameters, FormattedValue, ParameterKind,
    ProcedureDefinition, RowOutcome, RunOptions, SkipReason,
};

use crate::numeric::{clean_numeric_text, is_empty_token, is_null_token};

/// Substitute for an absent numeric value when quality checks are off.
pub const NUMERIC_DEFAULT: &str = "0";

/// Validates rows of one table against one procedure.
#[derive(Debug, Clone, Copy)]
pub struct RowValidator<'a> {
    procedure: &'a ProcedureDefinition,
    mapping: &'a ColumnMapping,
    options: RunOptions,
}

impl<'a> RowValidator<'a> {
    pub fn new(
        procedure: &'a ProcedureDefinition,
        mapping: &'a ColumnMapping,
        options: RunOptions,
    ) -> Self {
        Self {
            procedure,
            mapping,
            options,
        }
    }

    /// Validates one row, returning formatted parameters or the skip reason.
    ///
    /// Parameters absent from the column mapping are left out of the result;
    /// rendering then reports them as missing placeholders.
    pub fn validate(&self, row: &[CellValue]) -> RowOutcome {
        let mut formatted = FormattedParameters::new();
        for parameter in self.procedure.parameters() {
            let Some(index) = self.mapping.index_of(&parameter.name) else {
                continue;
            };
            let value = row.get(index).unwrap_or(&CellValue::Empty);
            match self.format_field(value, parameter.kind) {
                Ok(formatted_value) => {
                    formatted.insert(parameter.name.clone(), formatted_value);
                }
                Err(reason) => {
                    return RowOutcome::Skipped {
                        reason,
                        parameter: parameter.name.clone(),
                    };
                }
            }
        }
        RowOutcome::Accepted(formatted)
    }

    fn format_field(
        &self,
        value: &CellValue,
        kind: ParameterKind,
    ) -> Result<FormattedValue, SkipReason> {
        if self.options.enforce_quality && is_empty_cell(value) {
            return Err(SkipReason::Empty);
        }
        if self.options.skip_arabic_text && value.as_text().is_some_and(contains_arabic) {
            return Err(SkipReason::Arabic);
        }
        match kind {
            ParameterKind::Text => Ok(FormattedValue::Text(escape_sql_text(
                &value.to_display_string(),
            ))),
            ParameterKind::Numeric { non_negative } => {
                coerce_numeric(value, non_negative, self.options.enforce_quality)
                    .ok_or(SkipReason::InvalidValue)
            }
        }
    }
}

/// True if the cell is absent, NaN, or text that reads as empty/NaN/None.
pub fn is_empty_cell(value: &CellValue) -> bool {
    value.is_missing() || value.as_text().is_some_and(is_empty_token)
}

/// True if any character falls in the Arabic block (U+0600..=U+06FF).
pub fn contains_arabic(text: &str) -> bool {
    text.trim()
        .chars()
        .any(|ch| ('\u{0600}'..='\u{06FF}').contains(&ch))
}

/// Trims and doubles single quotes for use inside an SQL string literal.
pub fn escape_sql_text(value: &str) -> String {
    value.trim().replace('\'', "''")
}

/// Coerces a numeric field, or returns None when the row must be skipped.
///
/// Without quality enforcement nothing is rejected. Absent values and text that
/// is blank after clean-up become [`NUMERIC_DEFAULT`]; other unparseable text is
/// kept with its single quotes doubled.
fn coerce_numeric(value: &CellValue, non_negative: bool, enforce: bool) -> Option<FormattedValue> {
    let (parsed, fallback) = match value {
        CellValue::Text(text) => {
            let cleaned = clean_numeric_text(text);
            if enforce && is_null_token(&cleaned) {
                return None;
            }
            let fallback = (!cleaned.is_empty()).then(|| escape_sql_text(text));
            (cleaned.parse::<f64>().ok(), fallback)
        }
        CellValue::Number(number) if !number.is_nan() => (Some(*number), None),
        CellValue::Number(_) | CellValue::Empty => (None, None),
    };
    match parsed {
        Some(number) if enforce && non_negative && number < 0.0 => None,
        Some(number) => Some(FormattedValue::Number(number)),
        None if enforce => None,
        None => Some(FormattedValue::Text(
            fallback.unwrap_or_else(|| NUMERIC_DEFAULT.to_string()),
        )),
    }
}
