pub mod error;
pub mod mapping;
pub mod options;
pub mod procedure;
pub mod processing;
pub mod table;
pub mod template;

pub use error::{ModelError, Result};
pub use mapping::{ColumnAssignment, ColumnMapping};
pub use options::RunOptions;
pub use procedure::{
    DEFAULT_PROCEDURE, ParameterKind, ParameterSpec, ProcedureCatalog, ProcedureDefinition,
    classify_parameter,
};
pub use processing::{
    FormattedParameters, FormattedValue, ProcessingResult, RowOutcome, SkipReason,
    ValidationStats,
};
pub use table::{CellValue, DataTable, format_numeric};
pub use template::{Template, TemplateSegment};
