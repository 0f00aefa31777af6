//! CSV ingestion implementation.
//!
//! Two entry styles:
//!
//! - schema-first ([`ingest_csv_from_path`]): the caller supplies the [`Schema`]
//! - inferred ([`ingest_csv_inferred_from_path`]): column types are inferred from the cells, the
//!   way a dataframe reader would

use std::path::Path;

use chrono::NaiveDate;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// ISO date layout recognised by schema-first parsing and by inference.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// How to turn raw field bytes into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecoding {
    /// Invalid UTF-8 is an error.
    #[default]
    Strict,
    /// Invalid UTF-8 byte sequences are dropped.
    Lossy,
}

/// Options for [`ingest_csv_inferred_from_path`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvReadOptions {
    /// Keep only these columns (in file order). `None` keeps every column.
    pub columns: Option<Vec<String>>,
    /// Byte decoding policy.
    pub decoding: TextDecoding,
}

impl CsvReadOptions {
    /// Keep only the named columns.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Drop invalid byte sequences instead of failing.
    pub fn lossy(mut self) -> Self {
        self.decoding = TextDecoding::Lossy;
        self
    }
}

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ).
/// - Each value is parsed according to the schema field type.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Ingest a CSV file, inferring the column types.
///
/// Inference per column, first match wins:
///
/// - `Int64`: every cell is an integer and none is empty
/// - `Float64`: every non-empty cell is numeric (an integer column with gaps lands here)
/// - `Bool`: every cell is a bool literal and none is empty
/// - `Date`: every non-empty cell is an ISO `YYYY-MM-DD` date
/// - `Utf8`: anything else
///
/// A column with no non-empty cells is `Float64` (all null).
pub fn ingest_csv_inferred_from_path(
    path: impl AsRef<Path>,
    options: &CsvReadOptions,
) -> IngestionResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_inferred_from_reader(&mut rdr, options)
}

/// Inferred ingestion from an existing CSV reader. See [`ingest_csv_inferred_from_path`].
pub fn ingest_csv_inferred_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &CsvReadOptions,
) -> IngestionResult<DataSet> {
    let header_bytes = rdr.byte_headers()?.clone();
    let mut headers = Vec::with_capacity(header_bytes.len());
    for (idx, h) in header_bytes.iter().enumerate() {
        headers.push(decode_field(1, &format!("#{idx}"), h, options.decoding)?);
    }

    let col_idxs: Vec<usize> = match &options.columns {
        None => (0..headers.len()).collect(),
        Some(wanted) => {
            for name in wanted {
                if !headers.iter().any(|h| h == name) {
                    return Err(IngestionError::SchemaMismatch {
                        message: format!("missing required column '{name}'. headers={headers:?}"),
                    });
                }
            }
            (0..headers.len())
                .filter(|&i| wanted.iter().any(|w| *w == headers[i]))
                .collect()
        }
    };

    let mut cells: Vec<Vec<String>> = Vec::new();
    for (row_idx0, result) in rdr.byte_records().enumerate() {
        let user_row = row_idx0 + 2;
        let record = result?;
        let mut row = Vec::with_capacity(col_idxs.len());
        for &i in &col_idxs {
            let raw = record.get(i).unwrap_or(b"");
            row.push(decode_field(user_row, &headers[i], raw, options.decoding)?);
        }
        cells.push(row);
    }

    let fields: Vec<Field> = col_idxs
        .iter()
        .enumerate()
        .map(|(out_idx, &i)| {
            let column = cells.iter().map(|row| row[out_idx].as_str());
            Field::new(headers[i].clone(), infer_data_type(column))
        })
        .collect();

    let mut rows = Vec::with_capacity(cells.len());
    for (row_idx0, raw_row) in cells.iter().enumerate() {
        let user_row = row_idx0 + 2;
        let mut row = Vec::with_capacity(fields.len());
        for (field, raw) in fields.iter().zip(raw_row) {
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(Schema::new(fields), rows))
}

/// Infer a column type from its raw cells. Shared with workbook ingestion.
pub(crate) fn infer_data_type<'a>(cells: impl Iterator<Item = &'a str>) -> DataType {
    let mut any_value = false;
    let mut any_empty = false;
    let (mut all_int, mut all_float, mut all_bool, mut all_date) = (true, true, true, true);

    for cell in cells {
        let s = cell.trim();
        if s.is_empty() {
            any_empty = true;
            continue;
        }
        any_value = true;
        all_int &= s.parse::<i64>().is_ok();
        all_float &= s.parse::<f64>().is_ok();
        all_bool &= parse_bool(s).is_ok();
        all_date &= NaiveDate::parse_from_str(s, ISO_DATE_FORMAT).is_ok();
    }

    if !any_value {
        return DataType::Float64;
    }
    if all_int && !any_empty {
        DataType::Int64
    } else if all_float {
        DataType::Float64
    } else if all_bool && !any_empty {
        DataType::Bool
    } else if all_date {
        DataType::Date
    } else {
        DataType::Utf8
    }
}

fn decode_field(
    row: usize,
    column: &str,
    raw: &[u8],
    decoding: TextDecoding,
) -> IngestionResult<String> {
    match decoding {
        TextDecoding::Strict => std::str::from_utf8(raw).map(str::to_owned).map_err(|e| {
            IngestionError::ParseError {
                row,
                column: column.to_owned(),
                raw: String::from_utf8_lossy(raw).into_owned(),
                message: e.to_string(),
            }
        }),
        TextDecoding::Lossy => Ok(raw.utf8_chunks().map(|chunk| chunk.valid()).collect()),
    }
}

pub(crate) fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> IngestionResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_err = |message: String| IngestionError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_err(e.to_string())),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(parse_err),
        DataType::Date => NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
            .map(Value::Date)
            .map_err(|e| parse_err(e.to_string())),
    }
}

pub(crate) fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" => Ok(true),
        "false" | "f" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/yes/no)".to_string()),
    }
}
