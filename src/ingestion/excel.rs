#![cfg(feature = "excel")]

use std::path::Path;

use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::{NaiveDateTime, NaiveTime};

use super::csv::{infer_data_type, parse_typed_value, ISO_DATE_FORMAT};
use crate::error::{IngestionError, IngestionResult};
use crate::types::{DataSet, Field, Schema, Value};

/// List the sheet names of a workbook, in workbook order.
pub fn sheet_names(path: impl AsRef<Path>) -> IngestionResult<Vec<String>> {
    let workbook = open_workbook_auto(path)?;
    Ok(workbook.sheet_names().to_vec())
}

/// Ingest one sheet of a workbook (`.xlsx`, `.xls`, `.ods`, etc.) using a caller-supplied schema.
///
/// Behavior:
/// - Picks `sheet_name` if provided; otherwise uses the first sheet in the workbook
/// - Detects the first non-empty row as the header row
/// - Validates that all schema fields exist as headers
/// - Reads remaining rows and converts cells into typed `Value`s
pub fn ingest_excel_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    schema: &Schema,
) -> IngestionResult<DataSet> {
    let (sheet, table) = read_sheet_text(path, sheet_name)?;

    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for f in &schema.fields {
        match table.headers.iter().position(|h| h.trim() == f.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(IngestionError::SchemaMismatch {
                    message: format!(
                        "sheet '{sheet}': missing required column '{}'. headers={:?}",
                        f.name, table.headers
                    ),
                });
            }
        }
    }

    let mut rows = Vec::with_capacity(table.cells.len());
    for (user_row, cells) in &table.cells {
        let mut row = Vec::with_capacity(schema.fields.len());
        for (field, &idx) in schema.fields.iter().zip(&col_idxs) {
            let label = format!("{sheet}:{}", field.name);
            let raw = cells.get(idx).map(String::as_str).unwrap_or("");
            row.push(parse_typed_value(*user_row, &label, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

/// Ingest one sheet of a workbook, inferring the column types the same way as
/// [`super::csv::ingest_csv_inferred_from_path`].
pub fn ingest_excel_inferred_from_path(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
) -> IngestionResult<DataSet> {
    let (sheet, table) = read_sheet_text(path, sheet_name)?;

    let fields: Vec<Field> = table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let column = table
                .cells
                .iter()
                .map(move |(_, cells)| cells.get(idx).map(String::as_str).unwrap_or(""));
            Field::new(name.trim(), infer_data_type(column))
        })
        .collect();

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(table.cells.len());
    for (user_row, cells) in &table.cells {
        let mut row = Vec::with_capacity(fields.len());
        for (idx, field) in fields.iter().enumerate() {
            let label = format!("{sheet}:{}", field.name);
            let raw = cells.get(idx).map(String::as_str).unwrap_or("");
            row.push(parse_typed_value(*user_row, &label, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(Schema::new(fields), rows))
}

/// A sheet rendered to text: header cells plus (1-based row number, cells) for every data row.
struct SheetText {
    headers: Vec<String>,
    cells: Vec<(usize, Vec<String>)>,
}

fn read_sheet_text(
    path: impl AsRef<Path>,
    sheet_name: Option<&str>,
) -> IngestionResult<(String, SheetText)> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = match sheet_name {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestionError::SchemaMismatch {
                message: "workbook has no sheets".to_string(),
            })?,
    };
    let range = workbook.worksheet_range(&sheet)?;

    let mut header: Option<(usize, Vec<String>)> = None;
    let mut cells = Vec::new();
    for (idx0, row) in range.rows().enumerate() {
        match header {
            None => {
                if row.iter().any(|c| !matches!(c, Data::Empty)) {
                    header = Some((idx0, row.iter().map(cell_to_text).collect()));
                }
            }
            // Report 1-based row number (Excel-like).
            Some(_) => cells.push((idx0 + 1, row.iter().map(cell_to_text).collect())),
        }
    }

    let (_, headers) = header.ok_or_else(|| IngestionError::SchemaMismatch {
        message: format!("sheet '{sheet}': sheet has no non-empty rows (no header row found)"),
    })?;

    Ok((sheet, SheetText { headers, cells }))
}

fn cell_to_text(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_datetime_to_text(dt),
        Data::DateTimeIso(s) => match NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
            Ok(ndt) => datetime_to_text(ndt),
            Err(_) => s.clone(),
        },
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
        Data::Empty => String::new(),
    }
}

/// Date-formatted cells become ISO text so inference sees dates, not serial numbers.
fn excel_datetime_to_text(dt: &ExcelDateTime) -> String {
    match dt.as_datetime() {
        Some(ndt) if dt.is_datetime() => datetime_to_text(ndt),
        _ => dt.as_f64().to_string(),
    }
}

/// Midnight renders as a bare `YYYY-MM-DD` date.
fn datetime_to_text(ndt: NaiveDateTime) -> String {
    if ndt.time() == NaiveTime::MIN {
        ndt.date().format(ISO_DATE_FORMAT).to_string()
    } else {
        ndt.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}
