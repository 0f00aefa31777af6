//! One entry point for every supported input file.
//!
//! [`ingest_from_path`] picks the reader from [`IngestionOptions`]: the format comes from the
//! options or the file extension, and the schema is either the caller's or inferred from the
//! cells. The outcome is reported to the configured observer, if any.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Schema};

use super::csv::{self, CsvReadOptions};
use super::observability::{self, IngestionContext, IngestionObserver, IngestionSeverity};

/// Input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    Csv,
    /// Any workbook `calamine` opens. Reading one needs the `excel` feature.
    Excel,
}

impl IngestionFormat {
    /// Format for a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    fn from_path(path: &Path) -> IngestionResult<Self> {
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            return Err(IngestionError::SchemaMismatch {
                message: format!("cannot infer format: '{}' has no extension", path.display()),
            });
        };
        Self::from_extension(ext).ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!("cannot infer format from extension '{ext}' ({})", path.display()),
        })
    }
}

/// How [`ingest_from_path`] reads a file.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Overrides the extension.
    pub format: Option<IngestionFormat>,
    /// Read exactly these columns with these types. `None` infers every column.
    pub schema: Option<Schema>,
    /// Column subset and byte decoding for inferred CSV reads.
    pub csv: CsvReadOptions,
    /// Workbook sheet; `None` is the first sheet.
    pub sheet: Option<String>,
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Failures at or above this severity also go to [`IngestionObserver::on_alert`].
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("schema", &self.schema)
            .field("csv", &self.csv)
            .field("sheet", &self.sheet)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            schema: None,
            csv: CsvReadOptions::default(),
            sheet: None,
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Read the file at `path` into a [`DataSet`].
///
/// A path whose extension names no known format is a [`IngestionError::SchemaMismatch`] unless
/// [`IngestionOptions::format`] is set. A missing file is an I/O error, graded
/// [`IngestionSeverity::Critical`] for the observer.
///
/// ```no_run
/// use std::sync::Arc;
///
/// use paralympics_prep::ingestion::{ingest_from_path, CsvReadOptions, IngestionOptions, StdErrObserver};
///
/// # fn main() -> Result<(), paralympics_prep::IngestionError> {
/// let opts = IngestionOptions {
///     csv: CsvReadOptions::default().with_columns(["Code", "Name"]).lossy(),
///     observer: Some(Arc::new(StdErrObserver)),
///     ..Default::default()
/// };
/// let codes = ingest_from_path("data/npc_codes.csv", &opts)?;
/// println!("rows={}", codes.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let format = match options.format {
        Some(format) => format,
        None => IngestionFormat::from_path(path)?,
    };

    let result = match format {
        IngestionFormat::Csv => match &options.schema {
            Some(schema) => csv::ingest_csv_from_path(path, schema),
            None => csv::ingest_csv_inferred_from_path(path, &options.csv),
        },
        IngestionFormat::Excel => read_workbook(path, options),
    };

    if let Some(observer) = &options.observer {
        let ctx = IngestionContext {
            path: path.to_path_buf(),
            format,
        };
        observability::report(&**observer, options.alert_at_or_above, &ctx, &result);
    }
    result
}

#[cfg(feature = "excel")]
fn read_workbook(path: &Path, options: &IngestionOptions) -> IngestionResult<DataSet> {
    use super::excel;

    let sheet = options.sheet.as_deref();
    match &options.schema {
        Some(schema) => excel::ingest_excel_from_path(path, sheet, schema),
        None => excel::ingest_excel_inferred_from_path(path, sheet),
    }
}

#[cfg(not(feature = "excel"))]
fn read_workbook(_path: &Path, _options: &IngestionOptions) -> IngestionResult<DataSet> {
    Err(IngestionError::SchemaMismatch {
        message: "excel ingestion not enabled (enable cargo feature 'excel')".to_string(),
    })
}
