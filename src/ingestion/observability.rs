//! Outcome reporting for file reads.
//!
//! [`super::ingest_from_path`] hands every result to an optional [`IngestionObserver`]. Failures
//! are graded by [`IngestionSeverity::of`]; a failure at or above the caller's threshold is also
//! raised through [`IngestionObserver::on_alert`].

use std::path::PathBuf;

use crate::error::{IngestionError, IngestionResult};
use crate::types::DataSet;

use super::unified::IngestionFormat;

/// How bad a failed read is. Ordered, so thresholds compare with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// The file was read but its content is unusable (bad header, bad cell, bad bytes).
    Error,
    /// The file could not be read at all (missing, unreadable).
    Critical,
}

impl IngestionSeverity {
    /// Grade an ingestion error.
    pub fn of(error: &IngestionError) -> Self {
        match error {
            IngestionError::Io(_) => Self::Critical,
            IngestionError::Csv(e) if matches!(e.kind(), ::csv::ErrorKind::Io(_)) => Self::Critical,
            _ => Self::Error,
        }
    }
}

/// Which file was read, and how.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    pub path: PathBuf,
    pub format: IngestionFormat,
}

/// Shape of a table that was read successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    pub rows: usize,
    pub columns: usize,
}

/// Receives the outcome of each read. All callbacks default to no-ops except
/// [`on_alert`](Self::on_alert), which forwards to [`on_failure`](Self::on_failure).
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Writes one line per read outcome to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StdErrObserver {
    fn line(tag: &str, ctx: &IngestionContext, detail: std::fmt::Arguments<'_>) {
        eprintln!("[{tag}] format={:?} path={} {detail}", ctx.format, ctx.path.display());
    }
}

impl IngestionObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        Self::line("ingest][ok", ctx, format_args!("rows={} columns={}", stats.rows, stats.columns));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        Self::line(&format!("ingest][{severity:?}"), ctx, format_args!("err={error}"));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        Self::line(&format!("ALERT][ingest][{severity:?}"), ctx, format_args!("err={error}"));
    }
}

/// Tell `observer` about `result`, raising an alert when a failure reaches `alert_at_or_above`.
pub(crate) fn report(
    observer: &dyn IngestionObserver,
    alert_at_or_above: IngestionSeverity,
    ctx: &IngestionContext,
    result: &IngestionResult<DataSet>,
) {
    match result {
        Ok(ds) => observer.on_success(
            ctx,
            IngestionStats {
                rows: ds.row_count(),
                columns: ds.column_count(),
            },
        ),
        Err(e) => {
            let severity = IngestionSeverity::of(e);
            observer.on_failure(ctx, severity, e);
            if severity >= alert_at_or_above {
                observer.on_alert(ctx, severity, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_failures_are_critical() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(IngestionSeverity::of(&IngestionError::Io(missing)), IngestionSeverity::Critical);

        let bad = IngestionError::SchemaMismatch {
            message: "no header".to_string(),
        };
        assert_eq!(IngestionSeverity::of(&bad), IngestionSeverity::Error);
        assert!(IngestionSeverity::Critical > IngestionSeverity::Error);
    }
}
