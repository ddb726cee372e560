use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("procedure display name must not be empty")]
    EmptyDisplayName,
    #[error("procedure '{procedure}' declares no parameters")]
    NoParameters { procedure: String },
    #[error("procedure '{procedure}' declares parameter '{parameter}' more than once")]
    DuplicateParameter {
        procedure: String,
        parameter: String,
    },
    #[error("duplicate procedure display name: {0}")]
    DuplicateProcedure(String),
    #[error("malformed template at byte {position}: {template}")]
    MalformedTemplate { template: String, position: usize },
    #[error("unsupported format spec '{spec}' for placeholder '{placeholder}'")]
    UnsupportedFormatSpec { placeholder: String, spec: String },
    #[error("template of '{procedure}' references undeclared parameter '{placeholder}'")]
    UndeclaredPlaceholder {
        procedure: String,
        placeholder: String,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
