//! Error types for colcrate

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for colcrate operations
#[derive(Error, Debug)]
pub enum Error {
    /// A `TRI` line could not be parsed. `line` is 1-based, 0 when unknown.
    #[error("malformed triangle record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The mesh editor rejected a modifier for one group.
    #[error("{modifier} modifier failed: {reason}")]
    ModifierApply { modifier: &'static str, reason: String },

    /// Triangulation left a face that is not a triangle.
    #[error("face {face} has {vertex_count} vertices after triangulation")]
    PipelineContractViolation { face: usize, vertex_count: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a `MalformedRecord` without line information.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedRecord {
            line: 0,
            reason: reason.into(),
        }
    }

    /// Attach a line number to a `MalformedRecord`; other errors pass through.
    pub fn at_line(self, line_no: usize) -> Self {
        match self {
            Error::MalformedRecord { reason, .. } => Error::MalformedRecord {
                line: line_no,
                reason,
            },
            other => other,
        }
    }

    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error only invalidates the current group.
    pub fn is_group_local(&self) -> bool {
        matches!(self, Error::ModifierApply { .. })
    }
}

/// Result type alias for colcrate operations
pub type Result<T> = std::result::Result<T, Error>;
