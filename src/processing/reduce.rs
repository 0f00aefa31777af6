//! Single-column reductions for [`crate::types::DataSet`].

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Count non-null values.
    CountNonNull,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Arithmetic mean of numeric values as `Float64`, ignoring nulls.
    Mean,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - `Count`/`CountNonNull` always return `Some(Value::Int64(_))`.
/// - `Sum`/`Min`/`Max` keep the column type (`Int64` or `Float64`); `Mean` is always `Float64`.
/// - Numeric ops return `Some(Value::Null)` when the column has no non-null values or is not
///   numeric.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;
    let data_type = dataset.schema.fields[idx].data_type;

    let result = match op {
        ReduceOp::Count => Value::Int64(dataset.row_count() as i64),
        ReduceOp::CountNonNull => {
            Value::Int64(dataset.column_values(idx).filter(|v| !v.is_null()).count() as i64)
        }
        _ if !data_type.is_numeric() => Value::Null,
        ReduceOp::Mean => {
            let (sum, n) = dataset
                .column_values(idx)
                .filter_map(Value::as_f64)
                .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
            if n == 0 {
                Value::Null
            } else {
                Value::Float64(sum / n as f64)
            }
        }
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => fold_numeric(dataset, idx, data_type, op),
    };
    Some(result)
}

fn fold_numeric(dataset: &DataSet, idx: usize, data_type: DataType, op: ReduceOp) -> Value {
    let combine_i = |a: i64, v: i64| match op {
        ReduceOp::Sum => a + v,
        ReduceOp::Min => a.min(v),
        _ => a.max(v),
    };
    let combine_f = |a: f64, v: f64| match op {
        ReduceOp::Sum => a + v,
        ReduceOp::Min => a.min(v),
        _ => a.max(v),
    };

    if data_type == DataType::Int64 {
        dataset
            .column_values(idx)
            .filter_map(|v| match v {
                Value::Int64(x) => Some(*x),
                _ => None,
            })
            .reduce(combine_i)
            .map(Value::Int64)
            .unwrap_or(Value::Null)
    } else {
        dataset
            .column_values(idx)
            .filter_map(Value::as_f64)
            .reduce(combine_f)
            .map(Value::Float64)
            .unwrap_or(Value::Null)
    }
}
