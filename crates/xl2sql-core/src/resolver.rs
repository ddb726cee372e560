//! Column resolution.
//!
//! Assigned column headers are turned into positional indices exactly once per
//! run; rows are only ever accessed by index afterwards.

use tracing::debug;
use xl2sql_model::{ColumnAssignment, ColumnMapping, ProcedureDefinition};

use crate::error::{ProcessError, Result};

/// Maps every parameter of `procedure` to the index of its assigned column.
///
/// Fails on the first parameter, in declared order, that has no assignment or
/// whose assigned header is absent from `columns`. Duplicate headers resolve to
/// their first occurrence.
pub fn resolve_columns(
    columns: &[String],
    procedure: &ProcedureDefinition,
    assignment: &ColumnAssignment,
) -> Result<ColumnMapping> {
    let mut mapping = ColumnMapping::new();
    for parameter in procedure.parameter_names() {
        let column =
            assignment
                .column_for(parameter)
                .ok_or_else(|| ProcessError::MissingAssignment {
                    parameter: parameter.to_string(),
                })?;
        let index = columns
            .iter()
            .position(|header| header == column)
            .ok_or_else(|| ProcessError::ColumnNotFound {
                parameter: parameter.to_string(),
                column: column.to_string(),
                available: columns.to_vec(),
            })?;
        debug!(parameter, column, index, "resolved column");
        mapping.insert(parameter, index);
    }
    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use xl2sql_model::ProcedureCatalog;

    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn resolves_in_parameter_order() {
        let catalog = ProcedureCatalog::builtin().unwrap();
        let procedure = catalog.get("Update Items Dropship Quantities").unwrap();
        let assignment = ColumnAssignment::new()
            .with("qty", "Qty (pcs)")
            .with("item", "Item #");
        let mapping =
            resolve_columns(&headers(&["Notes", "Item #", "Qty (pcs)"]), procedure, &assignment)
                .unwrap();
        assert_eq!(mapping.iter().collect::<Vec<_>>(), [("item", 1), ("qty", 2)]);
    }

    #[test]
    fn missing_assignment_names_parameter() {
        let catalog = ProcedureCatalog::builtin().unwrap();
        let procedure = catalog.get("Update Items Current Cost").unwrap();
        let assignment = ColumnAssignment::new().with("item", "Item");
        let err = resolve_columns(&headers(&["Item", "Cost"]), procedure, &assignment).unwrap_err();
        assert!(matches!(
            err,
            ProcessError::MissingAssignment { ref parameter } if parameter == "New_Current_Cost"
        ));
    }

    #[test]
    fn absent_column_reports_available_headers() {
        let catalog = ProcedureCatalog::builtin().unwrap();
        let procedure = catalog.get("Update Items Status").unwrap();
        let assignment = ColumnAssignment::new()
            .with("item", "Item")
            .with("Status", "State");
        let err =
            resolve_columns(&headers(&["Item", "Status"]), procedure, &assignment).unwrap_err();
        match err {
            ProcessError::ColumnNotFound {
                parameter,
                column,
                available,
            } => {
                assert_eq!(parameter, "Status");
                assert_eq!(column, "State");
                assert_eq!(available, ["Item", "Status"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_headers_use_first_occurrence() {
        let catalog = ProcedureCatalog::builtin().unwrap();
        let procedure = catalog.get("Update Items Prices").unwrap();
        let assignment = ColumnAssignment::new()
            .with("item", "Item")
            .with("new_Showroom", "Price");
        let mapping =
            resolve_columns(&headers(&["Price", "Item", "Price"]), procedure, &assignment)
                .unwrap();
        assert_eq!(mapping.index_of("new_Showroom"), Some(0));
    }
}
