//! The events preparation pipeline.
//!
//! [`prepare_events`] turns the raw events table plus the NPC code lookup into the analysis-ready
//! table. Steps run in a fixed order and each completes before the next starts:
//!
//! 1. drop rows at the excluded positions (default `{0, 17, 31}`) and renumber the rest
//! 2. convert every `Float64` column to `Int64`
//! 3. parse `start` and `end` as `day/month/year` dates
//! 4. canonicalize `country` through [`CountryReplacements`]
//! 5. left-join the lookup on `country` = `Name`
//! 6. drop `URL`, `disabilities_included`, `highlights` and `Name`
//! 7. insert `duration` (days from `start` to `end`) right after `end`
//!
//! [`prepare_events_to_path`] additionally writes the result as CSV. Any failure aborts the run
//! before the destination is touched.
//!
//! ```no_run
//! use paralympics_prep::ingestion::{ingest_from_path, CsvReadOptions, IngestionOptions};
//! use paralympics_prep::prepare::{normalize_event_types, prepare_events_to_path, PrepareOptions};
//!
//! # fn main() -> Result<(), paralympics_prep::PrepareError> {
//! let raw = ingest_from_path("data/paralympics_events_raw.csv", &IngestionOptions::default())?;
//! let lookup = ingest_from_path(
//!     "data/npc_codes.csv",
//!     &IngestionOptions {
//!         csv: CsvReadOptions::default().with_columns(["Code", "Name"]).lossy(),
//!         ..Default::default()
//!     },
//! )?;
//!
//! let raw = normalize_event_types(&raw)?;
//! let prepared = prepare_events_to_path(
//!     &raw,
//!     Some(&lookup),
//!     &PrepareOptions::default(),
//!     "data/paralympics_events_prepared.csv",
//! )?;
//! println!("rows={}", prepared.row_count());
//! # Ok(())
//! # }
//! ```

mod countries;
mod observer;

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::{PrepareError, PrepareResult};
use crate::export::write_csv_to_path;
use crate::processing::{left_join, map_column};
use crate::types::{DataSet, DataType, Field, Value};

pub use countries::{CountryReplacements, DEFAULT_COUNTRY_REPLACEMENTS};
pub use observer::{PrepareEvent, PrepareObserver, PrepareStep, StdErrPrepareObserver};

pub const COUNTRY: &str = "country";
pub const EVENT_TYPE: &str = "type";
pub const START: &str = "start";
pub const END: &str = "end";
pub const DURATION: &str = "duration";
/// Key column of the NPC code lookup.
pub const LOOKUP_NAME: &str = "Name";

/// Row positions of the known non-data rows in the raw events file.
pub const DEFAULT_EXCLUDED_ROWS: [usize; 3] = [0, 17, 31];

/// Layout of `start`/`end` in the raw events file.
pub const RAW_DATE_FORMAT: &str = "%d/%m/%Y";

/// Columns removed after the join.
pub const DROPPED_COLUMNS: [&str; 4] = ["URL", "disabilities_included", "highlights", LOOKUP_NAME];

const REQUIRED_COLUMNS: [&str; 4] = [COUNTRY, EVENT_TYPE, START, END];

/// Options for [`prepare_events`].
#[derive(Clone)]
pub struct PrepareOptions {
    /// Row positions (0-based, before any other step) to remove.
    pub excluded_rows: BTreeSet<usize>,
    /// `chrono` format for `start` and `end`.
    pub date_format: String,
    pub country_replacements: CountryReplacements,
    /// Optional observer for step-by-step logging.
    pub observer: Option<Arc<dyn PrepareObserver>>,
}

impl fmt::Debug for PrepareOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrepareOptions")
            .field("excluded_rows", &self.excluded_rows)
            .field("date_format", &self.date_format)
            .field("country_replacements", &self.country_replacements.len())
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            excluded_rows: DEFAULT_EXCLUDED_ROWS.into_iter().collect(),
            date_format: RAW_DATE_FORMAT.to_string(),
            country_replacements: CountryReplacements::default(),
            observer: None,
        }
    }
}

impl PrepareOptions {
    fn emit(&self, event: PrepareEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }

    fn step_done(&self, step: PrepareStep, ds: &DataSet) {
        self.emit(PrepareEvent::StepFinished {
            step,
            rows: ds.row_count(),
            columns: ds.column_count(),
        });
    }
}

/// Run the preparation steps and return the prepared table.
///
/// Fails fast with [`PrepareError::MissingLookup`] when `lookup` is `None`, before looking at
/// `raw`.
pub fn prepare_events(
    raw: &DataSet,
    lookup: Option<&DataSet>,
    options: &PrepareOptions,
) -> PrepareResult<DataSet> {
    let lookup = lookup.ok_or(PrepareError::MissingLookup)?;
    for column in REQUIRED_COLUMNS {
        column_index(raw, column)?;
    }
    options.emit(PrepareEvent::Started {
        rows: raw.row_count(),
        columns: raw.column_count(),
    });

    let ds = exclude_rows(raw, &options.excluded_rows)?;
    options.step_done(PrepareStep::ExcludeRows, &ds);

    let ds = coerce_float_columns(&ds)?;
    options.step_done(PrepareStep::CoerceIntegers, &ds);

    let mut ds = ds;
    for column in [START, END] {
        ds = parse_date_column(&ds, column, &options.date_format)?;
    }
    options.step_done(PrepareStep::ParseDates, &ds);

    let ds = map_column(&ds, COUNTRY, |v| options.country_replacements.apply(v))
        .ok_or_else(|| column_not_found(&ds, COUNTRY))?;
    options.step_done(PrepareStep::ReplaceCountries, &ds);

    column_index(lookup, LOOKUP_NAME)?;
    let ds = left_join(&ds, lookup, COUNTRY, LOOKUP_NAME).ok_or_else(|| column_not_found(&ds, COUNTRY))?;
    options.step_done(PrepareStep::JoinLookup, &ds);

    for column in DROPPED_COLUMNS {
        column_index(&ds, column)?;
    }
    let ds = ds.without_columns(&DROPPED_COLUMNS);
    options.step_done(PrepareStep::DropColumns, &ds);

    let ds = insert_duration(ds)?;
    options.step_done(PrepareStep::InsertDuration, &ds);

    Ok(ds)
}

/// [`prepare_events`], then write the result as CSV to `path`.
///
/// Nothing is written when preparation fails. Identical inputs produce byte-identical files.
pub fn prepare_events_to_path(
    raw: &DataSet,
    lookup: Option<&DataSet>,
    options: &PrepareOptions,
    path: impl AsRef<Path>,
) -> PrepareResult<DataSet> {
    let prepared = prepare_events(raw, lookup, options)?;
    write_csv_to_path(&prepared, path.as_ref())?;
    options.emit(PrepareEvent::Written {
        path: path.as_ref().to_path_buf(),
        rows: prepared.row_count(),
    });
    Ok(prepared)
}

/// Trim and lowercase the `type` column (`" Summer "` becomes `"summer"`).
pub fn normalize_event_types(raw: &DataSet) -> PrepareResult<DataSet> {
    map_column(raw, EVENT_TYPE, |v| match v {
        Value::Utf8(s) => Value::Utf8(s.trim().to_lowercase()),
        other => other.clone(),
    })
    .ok_or_else(|| column_not_found(raw, EVENT_TYPE))
}

fn exclude_rows(ds: &DataSet, positions: &BTreeSet<usize>) -> PrepareResult<DataSet> {
    if let Some(&row) = positions.iter().find(|&&p| p >= ds.row_count()) {
        return Err(PrepareError::RowOutOfRange {
            row,
            row_count: ds.row_count(),
        });
    }
    Ok(ds.without_rows(positions))
}

/// Every `Float64` column becomes `Int64` by a plain cast. Nulls, fractions and values outside
/// the `i64` range are errors.
fn coerce_float_columns(ds: &DataSet) -> PrepareResult<DataSet> {
    let float_idxs: Vec<usize> = ds
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.data_type == DataType::Float64)
        .map(|(i, _)| i)
        .collect();

    let mut out = ds.clone();
    for &idx in &float_idxs {
        let column = &ds.schema.fields[idx].name;
        for (row, values) in out.rows.iter_mut().enumerate() {
            let cast = float_to_int(&values[idx]).map_err(|reason| PrepareError::LossyIntegerCast {
                row,
                column: column.clone(),
                reason,
            })?;
            values[idx] = Value::Int64(cast);
        }
        out.schema.fields[idx].data_type = DataType::Int64;
    }
    Ok(out)
}

fn float_to_int(value: &Value) -> Result<i64, String> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    match value {
        Value::Float64(f) if !f.is_finite() => Err(format!("non-finite value {f}")),
        Value::Float64(f) if f.fract() != 0.0 => Err(format!("fractional value {f}")),
        Value::Float64(f) if *f >= LIMIT || *f < -LIMIT => Err(format!("value {f} out of range")),
        Value::Float64(f) => Ok(*f as i64),
        Value::Null => Err("missing value".to_string()),
        other => Err(format!("unexpected value {other:?}")),
    }
}

fn parse_date_column(ds: &DataSet, column: &str, format: &str) -> PrepareResult<DataSet> {
    let idx = column_index(ds, column)?;

    let mut out = ds.clone();
    for (row, values) in out.rows.iter_mut().enumerate() {
        let parsed = match &values[idx] {
            Value::Utf8(s) => NaiveDate::parse_from_str(s, format).ok(),
            _ => None,
        };
        match parsed {
            Some(d) => values[idx] = Value::Date(d),
            None => {
                return Err(PrepareError::DateParse {
                    row,
                    column: column.to_string(),
                    raw: values[idx].to_string(),
                    format: format.to_string(),
                });
            }
        }
    }
    out.schema.fields[idx].data_type = DataType::Date;
    Ok(out)
}

fn insert_duration(mut ds: DataSet) -> PrepareResult<DataSet> {
    let start = column_index(&ds, START)?;
    let end = column_index(&ds, END)?;

    let days: Vec<Value> = ds
        .rows
        .iter()
        .map(|row| match (&row[start], &row[end]) {
            (Value::Date(s), Value::Date(e)) => Value::Int64(e.signed_duration_since(*s).num_days()),
            _ => Value::Null,
        })
        .collect();

    ds.insert_column(end + 1, Field::new(DURATION, DataType::Int64), days);
    Ok(ds)
}

fn column_index(ds: &DataSet, column: &str) -> PrepareResult<usize> {
    ds.schema.index_of(column).ok_or_else(|| column_not_found(ds, column))
}

fn column_not_found(ds: &DataSet, column: &str) -> PrepareError {
    PrepareError::ColumnNotFound {
        column: column.to_string(),
        available: ds.schema.field_names().map(str::to_owned).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Schema;

    fn raw(rows: &[(&str, &str, &str, Option<f64>)]) -> DataSet {
        let schema = Schema::new(vec![
            Field::new("type", DataType::Utf8),
            Field::new("country", DataType::Utf8),
            Field::new("start", DataType::Utf8),
            Field::new("end", DataType::Utf8),
            Field::new("participants", DataType::Float64),
            Field::new("URL", DataType::Utf8),
            Field::new("disabilities_included", DataType::Utf8),
            Field::new("highlights", DataType::Utf8),
        ]);
        let rows = rows
            .iter()
            .map(|(country, start, end, n)| {
                vec![
                    Value::Utf8("summer".into()),
                    Value::Utf8(country.to_string()),
                    Value::Utf8(start.to_string()),
                    Value::Utf8(end.to_string()),
                    n.map(Value::Float64).unwrap_or(Value::Null),
                    Value::Null,
                    Value::Null,
                    Value::Null,
                ]
            })
            .collect();
        DataSet::new(schema, rows)
    }

    fn lookup() -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("Code", DataType::Utf8),
                Field::new("Name", DataType::Utf8),
            ]),
            vec![
                vec![Value::Utf8("GBR".into()), Value::Utf8("Great Britain".into())],
                vec![Value::Utf8("BRA".into()), Value::Utf8("Brazil".into())],
            ],
        )
    }

    fn keep_all() -> PrepareOptions {
        PrepareOptions {
            excluded_rows: BTreeSet::new(),
            ..Default::default()
        }
    }

    #[test]
    fn missing_lookup_fails_before_anything_else() {
        let err = prepare_events(&raw(&[]), None, &PrepareOptions::default()).unwrap_err();
        assert!(matches!(err, PrepareError::MissingLookup));
    }

    #[test]
    fn prepares_a_single_row() {
        let ds = raw(&[("UK", "01/03/2012", "15/03/2012", Some(4237.0))]);
        let out = prepare_events(&ds, Some(&lookup()), &keep_all()).unwrap();

        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["type", "country", "start", "end", "duration", "participants", "Code"]
        );
        let row = &out.rows[0];
        assert_eq!(row[1], Value::Utf8("Great Britain".into()));
        assert_eq!(row[2], Value::Date(NaiveDate::from_ymd_opt(2012, 3, 1).unwrap()));
        assert_eq!(row[4], Value::Int64(14));
        assert_eq!(row[5], Value::Int64(4237));
        assert_eq!(row[6], Value::Utf8("GBR".into()));
        assert_eq!(out.schema.fields[5].data_type, DataType::Int64);
    }

    #[test]
    fn fractional_or_missing_float_is_an_error() {
        let ds = raw(&[("Brazil", "01/03/2012", "15/03/2012", Some(1.5))]);
        let err = prepare_events(&ds, Some(&lookup()), &keep_all()).unwrap_err();
        assert!(matches!(err, PrepareError::LossyIntegerCast { row: 0, .. }));

        let ds = raw(&[("Brazil", "01/03/2012", "15/03/2012", None)]);
        let err = prepare_events(&ds, Some(&lookup()), &keep_all()).unwrap_err();
        assert!(err.to_string().contains("missing value"));
    }

    #[test]
    fn excluded_row_past_the_end_is_an_error() {
        let ds = raw(&[("Brazil", "01/03/2012", "15/03/2012", Some(1.0))]);
        let err = prepare_events(&ds, Some(&lookup()), &PrepareOptions::default()).unwrap_err();
        assert!(matches!(err, PrepareError::RowOutOfRange { row: 17, row_count: 1 }));
    }

    #[test]
    fn iso_dates_are_rejected() {
        let ds = raw(&[("Brazil", "2012-03-01", "15/03/2012", Some(1.0))]);
        let err = prepare_events(&ds, Some(&lookup()), &keep_all()).unwrap_err();
        match err {
            PrepareError::DateParse { column, raw, .. } => {
                assert_eq!(column, "start");
                assert_eq!(raw, "2012-03-01");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lookup_without_name_column_is_column_not_found() {
        let ds = raw(&[("Brazil", "01/03/2012", "15/03/2012", Some(1.0))]);
        let bad = DataSet::new(Schema::new(vec![Field::new("Code", DataType::Utf8)]), vec![]);
        let err = prepare_events(&ds, Some(&bad), &keep_all()).unwrap_err();
        assert!(matches!(err, PrepareError::ColumnNotFound { ref column, .. } if column == "Name"));
    }

    #[test]
    fn normalize_event_types_trims_and_lowercases() {
        let mut ds = raw(&[("Brazil", "01/03/2012", "15/03/2012", Some(1.0))]);
        ds.rows[0][0] = Value::Utf8("  Winter ".into());
        let out = normalize_event_types(&ds).unwrap();
        assert_eq!(out.rows[0][0], Value::Utf8("winter".into()));
    }
}
