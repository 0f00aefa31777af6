use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for the preparation pipeline.
pub type PrepareResult<T> = Result<T, PrepareError>;

/// Error type returned by ingestion functions.
///
/// This is a single error enum shared across CSV and (optional) Excel ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel ingestion error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not conform to the provided schema (missing required fields/columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// Error type returned by [`crate::prepare`] and the CSV writer in [`crate::export`].
#[derive(Debug, Error)]
pub enum PrepareError {
    /// Reading an input failed.
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    /// Writing the output failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the output failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the pipeline needs is not in the table.
    #[error("column not found: '{column}'. columns={available:?}")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// A positional row exclusion points past the end of the table.
    #[error("row {row} out of range (table has {row_count} rows)")]
    RowOutOfRange { row: usize, row_count: usize },

    /// A float column holds a value that has no exact integer representation.
    #[error("cannot convert column '{column}' to integer at row {row}: {reason}")]
    LossyIntegerCast {
        row: usize,
        column: String,
        reason: String,
    },

    /// A date cell does not match the expected format.
    #[error("failed to parse date at row {row} column '{column}' with format '{format}' (raw='{raw}')")]
    DateParse {
        row: usize,
        column: String,
        raw: String,
        format: String,
    },

    /// The country-code lookup table was not supplied.
    #[error("country code lookup table is required to prepare events")]
    MissingLookup,
}
