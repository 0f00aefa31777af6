//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - reads with a caller-supplied schema, or infers one from the cells
//! - optionally reports success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under [`csv`] and, with the `excel` feature,
//! `excel`.

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod observability;
pub mod unified;

pub use csv::{CsvReadOptions, TextDecoding};
pub use observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, StdErrObserver};
pub use unified::{ingest_from_path, IngestionFormat, IngestionOptions};
