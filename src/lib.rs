//! `paralympics-prep` cleans the Paralympics events dataset for analysis.
//!
//! Files are ingested into an in-memory [`types::DataSet`]; [`prepare::prepare_events`] then runs
//! a fixed sequence of cleaning steps and a join against the NPC country-code table, and
//! [`prepare::prepare_events_to_path`] writes the result as CSV.
//!
//! ## Inputs
//!
//! All under one data directory ([`paths::DataPaths`], default `data/` in this package):
//!
//! - `paralympics_events_raw.csv`: one row per Games, with `type`, `country`, `start`, `end`
//!   (`day/month/year`), participant counts and free-text columns
//! - `npc_codes.csv`: `Code`, `Name` of each National Paralympic Committee
//! - `paralympics_all_raw.xlsx`: the same events plus a `medal_standings` sheet (Cargo feature
//!   `excel`)
//!
//! ## Output
//!
//! `paralympics_events_prepared.csv`: the raw columns minus `URL`, `disabilities_included` and
//! `highlights`, with dates in ISO form, integer counts, the NPC `Code` appended and a `duration`
//! column (days) right after `end`.
//!
//! ## Quick example
//!
//! ```rust
//! use paralympics_prep::prepare::{prepare_events, PrepareOptions};
//! use paralympics_prep::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let text = |s: &str| Value::Utf8(s.to_string());
//! let raw = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("type", DataType::Utf8),
//!         Field::new("country", DataType::Utf8),
//!         Field::new("start", DataType::Utf8),
//!         Field::new("end", DataType::Utf8),
//!         Field::new("URL", DataType::Utf8),
//!         Field::new("disabilities_included", DataType::Utf8),
//!         Field::new("highlights", DataType::Utf8),
//!     ]),
//!     vec![vec![
//!         text("summer"),
//!         text("UK"),
//!         text("29/08/2012"),
//!         text("09/09/2012"),
//!         Value::Null,
//!         Value::Null,
//!         Value::Null,
//!     ]],
//! );
//! let codes = DataSet::new(
//!     Schema::new(vec![Field::new("Code", DataType::Utf8), Field::new("Name", DataType::Utf8)]),
//!     vec![vec![text("GBR"), text("Great Britain")]],
//! );
//!
//! let options = PrepareOptions {
//!     excluded_rows: Default::default(),
//!     ..Default::default()
//! };
//! let prepared = prepare_events(&raw, Some(&codes), &options).unwrap();
//!
//! let duration = prepared.schema.index_of("duration").unwrap();
//! assert_eq!(prepared.rows[0][duration], Value::Int64(11));
//! assert_eq!(prepared.rows[0][1], text("Great Britain"));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV / workbook readers with schema inference and observer hooks
//! - [`types`]: schema + in-memory dataset types
//! - [`processing`]: filter / map / reduce / left join / sort
//! - [`prepare`]: the events preparation pipeline
//! - [`export`]: CSV writer
//! - [`inspect`]: text descriptions of a dataset
//! - [`charts`]: histogram, box-plot and timeseries series
//! - [`paths`]: data directory layout
//! - [`error`]: error types

pub mod charts;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod inspect;
pub mod paths;
pub mod prepare;
pub mod processing;
pub mod types;

pub use error::{IngestionError, IngestionResult, PrepareError, PrepareResult};
