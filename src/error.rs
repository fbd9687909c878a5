//! Error types for the gridload transformation engine.
//!
//! - [`SourceError`] - row-source reader errors (CSV / spreadsheet)
//! - [`KindError`] - kind dispatch errors
//! - [`BatchError`] - top-level batch driver errors
//!
//! Error conversion is automatic via `From` implementations, allowing `?`
//! to work across module boundaries. Row-level failures are never errors:
//! the batch driver collects them as warnings and keeps going.

use thiserror::Error;

// =============================================================================
// Row-Source Errors
// =============================================================================

/// Errors while reading an input artifact into rows.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read the file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Input file is empty.
    #[error("Input file is empty")]
    EmptyFile,

    /// No usable header row.
    #[error("No headers found in input")]
    NoHeaders,

    /// Malformed CSV content.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Spreadsheet could not be opened or read.
    #[error("Invalid spreadsheet: {0}")]
    Sheet(String),

    /// File extension maps to no supported reader.
    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),
}

// =============================================================================
// Kind Dispatch Errors
// =============================================================================

/// Errors resolving a record kind.
#[derive(Debug, Error)]
pub enum KindError {
    /// Explicitly supplied kind is not in the catalog.
    #[error("Unknown kind: {0}")]
    Unknown(String),

    /// No registered kind identifier matches the file name.
    #[error("Cannot detect kind from file name: {0}")]
    Undetectable(String),
}

// =============================================================================
// Batch Errors (top-level)
// =============================================================================

/// Top-level batch driver errors.
///
/// This is the main error type returned by [`crate::batch::run`]. Only a
/// source that cannot be read or a kind that cannot be resolved is fatal to
/// a batch; rejected rows are reported as warnings instead.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Row-source error.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Kind dispatch error.
    #[error("Kind error: {0}")]
    Kind(#[from] KindError),

    /// Failed to write the output artifact.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Output serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for row-source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Result type for kind dispatch.
pub type KindResult<T> = Result<T, KindError>;

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
