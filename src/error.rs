use std::fmt;

use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// A single failing field within a rejected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Column name of the failing field.
    pub column: String,
    /// Offending value as it appeared in the row (`<missing>` when the column is absent).
    pub raw: String,
    /// Why the value was rejected.
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column '{}': {} (raw='{}')", self.column, self.message, self.raw)
    }
}

/// Error type returned by every pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error (malformed delimited text, or I/O surfaced through the csv crate).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A row failed validation; the whole batch is rejected.
    #[error("validation failed at row {row}: {}", join_issues(.issues))]
    Validation { row: usize, issues: Vec<FieldIssue> },

    /// Calendar arithmetic could not be performed (e.g. the cutoff date underflowed).
    #[error("date arithmetic error: {message}")]
    DateArithmetic { message: String },

    /// The caller supplied an unusable argument (e.g. an input path with no file name).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl PipelineError {
    /// Returns `true` when the error originates from the filesystem.
    pub fn is_io(&self) -> bool {
        match self {
            PipelineError::Io(_) => true,
            PipelineError::Csv(err) => matches!(err.kind(), csv::ErrorKind::Io(_)),
            _ => false,
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
