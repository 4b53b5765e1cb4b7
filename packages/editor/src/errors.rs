//! Error types for the editor
//!
//! Every fallible step reports an [`EditorError`] through the editor's
//! [`ErrorHandler`]. The handler decides whether the error is recovered (the
//! call returns a neutral value and does nothing) or raised to the caller.

use serde_json::Value;
use std::fmt;
use thiserror::Error;
use trunk_tree::TreeError;

pub type EditorResult<T> = Result<T, EditorError>;

/// What went wrong, independent of where
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A query could not resolve a path, parent or node
    Lookup,
    /// A mutating call could not resolve a path, parent or node
    Structural,
    /// The request would break the tree's shape or identity rules
    Invariant,
    /// A multi-step transform ran out of addresses part way through
    Exhausted,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Lookup => "lookup",
            ErrorKind::Structural => "structural",
            ErrorKind::Invariant => "invariant",
            ErrorKind::Exhausted => "exhausted",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} ({key})")]
pub struct EditorError {
    pub kind: ErrorKind,

    /// Stable namespaced key, e.g. `apply.insert_node.index`
    pub key: &'static str,

    pub message: String,

    pub data: Option<Value>,
}

impl EditorError {
    pub fn new(kind: ErrorKind, key: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            key,
            message: message.into(),
            data: None,
        }
    }

    pub fn lookup(key: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Lookup, key, message)
    }

    pub fn structural(key: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Structural, key, message)
    }

    pub fn invariant(key: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Invariant, key, message)
    }

    pub fn exhausted(key: &'static str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Exhausted, key, message)
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<TreeError> for EditorError {
    fn from(e: TreeError) -> Self {
        let key = match &e {
            TreeError::StructuralProperty(_) => "apply.set_node.children",
            TreeError::RequiredProperty(_) => "apply.set_node.required",
            TreeError::InvalidPropertyValue(_) => "apply.set_node.value",
            TreeError::RootPath { .. } => "apply.root",
            TreeError::MoveIntoSelf { .. } => "apply.move_node.ancestor",
            TreeError::InvalidOperation(_) => "apply.operation",
        };
        EditorError::invariant(key, e.to_string())
    }
}

/// Outcome chosen by an [`ErrorHandler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Recover,
    Raise,
}

/// Policy hook consulted for every reported error.
///
/// Invariant errors are raised before the handler is consulted, and a strict
/// editor raises everything.
pub trait ErrorHandler {
    fn handle(&self, error: &EditorError) -> Resolution;
}

impl<F> ErrorHandler for F
where
    F: Fn(&EditorError) -> Resolution,
{
    fn handle(&self, error: &EditorError) -> Resolution {
        self(error)
    }
}

/// Recovers lookup misses, raises everything else
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn handle(&self, error: &EditorError) -> Resolution {
        match error.kind {
            ErrorKind::Lookup => Resolution::Recover,
            _ => Resolution::Raise,
        }
    }
}
