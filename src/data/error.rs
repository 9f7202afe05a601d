use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load-time errors (fatal at startup)
// ---------------------------------------------------------------------------

/// Everything that can go wrong turning a source file into a [`LaunchDataset`].
///
/// Row numbers are zero-based and count data rows only (the CSV header is not
/// a row).
///
/// [`LaunchDataset`]: super::model::LaunchDataset
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed parquet: {0}")]
    Parquet(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': {reason}")]
    InvalidCell {
        row: usize,
        column: &'static str,
        reason: String,
    },

    #[error("source contains no launch records")]
    Empty,
}

impl LoadError {
    pub(crate) fn cell(row: usize, column: &'static str, reason: impl Into<String>) -> Self {
        LoadError::InvalidCell {
            row,
            column,
            reason: reason.into(),
        }
    }
}

impl From<parquet::errors::ParquetError> for LoadError {
    fn from(err: parquet::errors::ParquetError) -> Self {
        LoadError::Parquet(err.to_string())
    }
}

impl From<arrow::error::ArrowError> for LoadError {
    fn from(err: arrow::error::ArrowError) -> Self {
        LoadError::Parquet(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Query errors (per aggregation call)
// ---------------------------------------------------------------------------

/// Rejected inputs to the aggregation functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("invalid selection: unknown launch site '{0}'")]
    InvalidSite(String),

    #[error("invalid payload range: {low} > {high}")]
    InvalidRange { low: f64, high: f64 },
}
