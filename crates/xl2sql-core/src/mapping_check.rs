//! Pre-flight plausibility check of a column assignment.
//!
//! Looks at a sample of the table to catch obviously wrong assignments, such
//! as a description column feeding a quantity. Findings are advisory; they do
//! not change how a run validates rows.

use std::fmt;

use xl2sql_model::{CellValue, ColumnAssignment, DataTable, ParameterKind, ProcedureDefinition};

use crate::numeric::parse_numeric;

/// Leading rows inspected.
pub const SAMPLE_ROWS: usize = 100;
/// Non-empty values probed for numeric parameters.
pub const NUMERIC_PROBE: usize = 20;
/// Non-empty values probed for text parameters.
pub const TEXT_PROBE: usize = 10;
/// Minimum share of parseable values in a numeric column.
pub const NUMERIC_RATIO: f64 = 0.7;

const MAX_EXAMPLES: usize = 3;
const EXAMPLE_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingIssue {
    ColumnNotFound {
        parameter: String,
        column: String,
    },
    OnlyEmptyValues {
        parameter: String,
        column: String,
    },
    NotNumeric {
        parameter: String,
        column: String,
        examples: Vec<String>,
    },
    NoTextValues {
        parameter: String,
        column: String,
    },
}

impl fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnNotFound { column, .. } => {
                write!(f, "column '{column}' not found in sheet")
            }
            Self::OnlyEmptyValues { parameter, column } => write!(
                f,
                "column '{column}' mapped to '{parameter}' contains only empty values"
            ),
            Self::NotNumeric {
                parameter,
                column,
                examples,
            } => {
                let examples = examples
                    .iter()
                    .map(|example| format!("'{example}'"))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "parameter '{parameter}' expects numeric values, but column '{column}' \
                     contains non-numeric data. Examples: {examples}"
                )
            }
            Self::NoTextValues { parameter, column } => write!(
                f,
                "parameter '{parameter}' expects text values, but column '{column}' \
                 appears to be empty or invalid"
            ),
        }
    }
}

/// Checks every assigned parameter of `procedure` against a table sample.
pub fn check_mapping(
    table: &DataTable,
    procedure: &ProcedureDefinition,
    assignment: &ColumnAssignment,
) -> Vec<MappingIssue> {
    let mut issues = Vec::new();
    for parameter in procedure.parameters() {
        let Some(column) = assignment.column_for(&parameter.name) else {
            continue;
        };
        let Some(index) = table.column_index(column) else {
            issues.push(MappingIssue::ColumnNotFound {
                parameter: parameter.name.clone(),
                column: column.to_string(),
            });
            continue;
        };
        let values: Vec<&CellValue> = table
            .rows
            .iter()
            .take(SAMPLE_ROWS)
            .filter_map(|row| row.get(index))
            .filter(|value| !value.is_missing())
            .collect();
        if values.is_empty() {
            issues.push(MappingIssue::OnlyEmptyValues {
                parameter: parameter.name.clone(),
                column: column.to_string(),
            });
            continue;
        }
        let issue = match parameter.kind {
            ParameterKind::Numeric { .. } => check_numeric(&values).map(|examples| {
                MappingIssue::NotNumeric {
                    parameter: parameter.name.clone(),
                    column: column.to_string(),
                    examples,
                }
            }),
            ParameterKind::Text => {
                let has_text = values
                    .iter()
                    .take(TEXT_PROBE)
                    .any(|value| !value.to_display_string().trim().is_empty());
                (!has_text).then(|| MappingIssue::NoTextValues {
                    parameter: parameter.name.clone(),
                    column: column.to_string(),
                })
            }
        };
        issues.extend(issue);
    }
    issues
}

/// Returns non-numeric examples when too few probed values parse.
fn check_numeric(values: &[&CellValue]) -> Option<Vec<String>> {
    let probe: Vec<&CellValue> = values.iter().take(NUMERIC_PROBE).copied().collect();
    let mut numeric = 0usize;
    let mut examples = Vec::new();
    for value in &probe {
        let parses = match value {
            CellValue::Number(_) => true,
            CellValue::Text(text) => parse_numeric(text).is_some(),
            CellValue::Empty => false,
        };
        if parses {
            numeric += 1;
        } else if examples.len() < MAX_EXAMPLES {
            examples.push(value.to_display_string().chars().take(EXAMPLE_CHARS).collect());
        }
    }
    ((numeric as f64) < probe.len() as f64 * NUMERIC_RATIO).then_some(examples)
}

#[cfg(test)]
mod tests {
    use xl2sql_model::ProcedureCatalog;

    use super::*;

    fn table(rows: &[[&str; 2]]) -> DataTable {
        let mut table = DataTable::new("S", vec!["Item".into(), "Qty".into()]);
        for row in rows {
            table.push_row(
                row.iter()
                    .map(|value| {
                        if value.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::from(*value)
                        }
                    })
                    .collect(),
            );
        }
        table
    }

    fn procedure() -> ProcedureDefinition {
        ProcedureCatalog::builtin()
            .unwrap()
            .get("Update Items Dropship Quantities")
            .unwrap()
            .clone()
    }

    #[test]
    fn clean_assignment_has_no_issues() {
        let assignment = ColumnAssignment::new().with("item", "Item").with("qty", "Qty");
        let issues = check_mapping(&table(&[["A", "1"], ["B", "$2.50"]]), &procedure(), &assignment);
        assert!(issues.is_empty(), "{issues:?}");
    }

    #[test]
    fn swapped_columns_are_flagged() {
        let assignment = ColumnAssignment::new().with("item", "Qty").with("qty", "Item");
        let issues = check_mapping(
            &table(&[["Widget", "1"], ["Gadget's long description here", "2"]]),
            &procedure(),
            &assignment,
        );
        assert_eq!(
            issues,
            [MappingIssue::NotNumeric {
                parameter: "qty".into(),
                column: "Item".into(),
                examples: vec!["Widget".into(), "Gadget's long descri".into()],
            }]
        );
        assert!(issues[0].to_string().contains("Examples: 'Widget'"));
    }

    #[test]
    fn tolerates_a_minority_of_bad_values() {
        let assignment = ColumnAssignment::new().with("item", "Item").with("qty", "Qty");
        let issues = check_mapping(
            &table(&[["A", "1"], ["B", "2"], ["C", "3"], ["D", "n/a"]]),
            &procedure(),
            &assignment,
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn reports_missing_and_empty_columns() {
        let assignment = ColumnAssignment::new().with("item", "SKU").with("qty", "Qty");
        let issues = check_mapping(&table(&[["A", ""], ["B", ""]]), &procedure(), &assignment);
        assert_eq!(
            issues,
            [
                MappingIssue::ColumnNotFound {
                    parameter: "item".into(),
                    column: "SKU".into()
                },
                MappingIssue::OnlyEmptyValues {
                    parameter: "qty".into(),
                    column: "Qty".into()
                },
            ]
        );
    }

    #[test]
    fn blank_text_column_is_flagged() {
        let assignment = ColumnAssignment::new().with("item", "Item").with("qty", "Qty");
        let issues = check_mapping(&table(&[["  ", "1"], [" ", "2"]]), &procedure(), &assignment);
        assert!(matches!(issues[..], [MappingIssue::NoTextValues { .. }]));
    }
}
