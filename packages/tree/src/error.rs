use crate::path::Path;
use thiserror::Error;

pub type TreeResult<T> = Result<T, TreeError>;

/// Errors raised by the tree model itself, independent of any editor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Cannot set the \"{0}\" property of nodes")]
    StructuralProperty(String),

    #[error("Cannot remove the \"{0}\" property of nodes")]
    RequiredProperty(String),

    #[error("The \"{0}\" property of nodes must be a string")]
    InvalidPropertyValue(String),

    #[error("Cannot apply a \"{operation}\" operation at the root path")]
    RootPath { operation: &'static str },

    #[error("Cannot move a path {path} to new path {new_path} because the destination is inside itself")]
    MoveIntoSelf { path: Path, new_path: Path },

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl From<serde_json::Error> for TreeError {
    fn from(e: serde_json::Error) -> Self {
        TreeError::InvalidOperation(e.to_string())
    }
}
