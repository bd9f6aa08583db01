//! Error types for the query engine.
//!
//! Lexing and parsing failures always carry a character offset into the
//! query text. Planning failures occur after the AST has been detached from
//! source positions, so they carry a message only. Execution does not fail
//! recoverably at all: an execution-time inconsistency (a table the planner
//! validated disappearing from the catalog) is an internal invariant
//! violation and panics instead of surfacing here.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed query text, positioned at a character (not byte) offset.
    #[error("{message} (offset {offset})")]
    Syntax { offset: usize, message: String },

    #[error("table not found: {0}")]
    TableNotFound(String),

    #[error("table already exists: {0}")]
    DuplicateTable(String),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("ambiguous column name: {0}")]
    AmbiguousColumn(String),

    #[error("duplicate output column: {0}")]
    DuplicateColumn(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("unsupported join type: {0}")]
    UnsupportedJoin(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

impl Error {
    /// A syntax error at the given character offset.
    pub(crate) fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            offset,
            message: message.into(),
        }
    }

    /// The character offset of a syntax error, if this is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
