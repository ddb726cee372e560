//! Template substitution.

use std::fmt::Write as _;

use xl2sql_model::{FormattedParameters, FormattedValue, Template, TemplateSegment, format_numeric};

use crate::error::{ProcessError, Result};

/// Fills `template` with `params`, producing one statement.
///
/// Numbers use the placeholder's fixed precision (`{qty:.3f}` renders
/// `1234.500`). Text is inserted verbatim; quoting belongs to the template.
/// `row` is the 1-based source row reported when a placeholder has no value,
/// which is a configuration defect and aborts the run.
pub fn render_statement(
    template: &Template,
    params: &FormattedParameters,
    row: usize,
) -> Result<String> {
    let mut statement = String::with_capacity(template.source().len() + 16);
    for segment in template.segments() {
        match segment {
            TemplateSegment::Literal(text) => statement.push_str(text),
            TemplateSegment::Placeholder { name, precision } => {
                let value =
                    params
                        .get(name)
                        .ok_or_else(|| ProcessError::TemplateParameterMissing {
                            placeholder: name.clone(),
                            row,
                        })?;
                push_value(&mut statement, value, *precision);
            }
        }
    }
    Ok(statement)
}

fn push_value(statement: &mut String, value: &FormattedValue, precision: Option<usize>) {
    match (value, precision) {
        (FormattedValue::Number(number), Some(places)) => {
            // Writing into a String cannot fail.
            let _ = write!(statement, "{number:.places$}");
        }
        (FormattedValue::Number(number), None) => statement.push_str(&format_numeric(*number)),
        (FormattedValue::Text(text), _) => statement.push_str(text),
    }
}
