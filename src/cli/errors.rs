//! CLI error types

use thiserror::Error;

use crate::record::RecordError;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors.
///
/// Record-layer failures pass through untouched so the exact error code
/// and frame offset reach the user.
#[derive(Debug, Error)]
pub enum CliError {
    /// Record container failure (I/O or corruption)
    #[error("{0}")]
    Record(#[from] RecordError),

    /// stdout write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
