//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//! Every function returns a new dataset and leaves its input untouched.
//!
//! - [`filter()`] / [`filter_eq()`]: row filtering
//! - [`map()`] / [`map_column()`]: row and single-column mapping
//! - [`reduce()`]: single-column reductions (count/sum/mean/min/max)
//! - [`left_join()`]: left-outer join on one key column per side
//! - [`sort_by()`]: stable ascending sort on one column
//!
//! ## Example: filter → sort → reduce
//!
//! ```rust
//! use paralympics_prep::processing::{filter_eq, reduce, sort_by, ReduceOp};
//! use paralympics_prep::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let ds = DataSet::new(
//!     Schema::new(vec![
//!         Field::new("type", DataType::Utf8),
//!         Field::new("year", DataType::Int64),
//!         Field::new("participants", DataType::Int64),
//!     ]),
//!     vec![
//!         vec![Value::Utf8("summer".into()), Value::Int64(1964), Value::Int64(375)],
//!         vec![Value::Utf8("winter".into()), Value::Int64(1976), Value::Int64(196)],
//!         vec![Value::Utf8("summer".into()), Value::Int64(1960), Value::Int64(209)],
//!     ],
//! );
//!
//! let summer = filter_eq(&ds, "type", "summer").unwrap();
//! let ordered = sort_by(&summer, "year").unwrap();
//! assert_eq!(ordered.rows[0][1], Value::Int64(1960));
//!
//! let total = reduce(&ordered, "participants", ReduceOp::Sum).unwrap();
//! assert_eq!(total, Value::Int64(584));
//! ```

pub mod filter;
pub mod join;
pub mod map;
pub mod reduce;
pub mod sort;

pub use filter::{filter, filter_eq};
pub use join::left_join;
pub use map::{map, map_column};
pub use reduce::{reduce, ReduceOp};
pub use sort::{compare_values, sort_by};
