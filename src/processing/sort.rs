//! Row ordering for [`crate::types::DataSet`].

use std::cmp::Ordering;

use crate::types::{DataSet, Value};

/// Returns a new [`DataSet`] with rows stably sorted by `column`, ascending.
///
/// Nulls sort last. Values of different variants in the same column compare equal, so they keep
/// their relative order.
///
/// Returns `None` if `column` does not exist in the schema.
pub fn sort_by(dataset: &DataSet, column: &str) -> Option<DataSet> {
    let idx = dataset.schema.index_of(column)?;
    let mut rows = dataset.rows.clone();
    rows.sort_by(|a, b| compare_values(&a[idx], &b[idx]));
    Some(DataSet::new(dataset.schema.clone(), rows))
}

/// Total order used for sorting: nulls last, numbers numerically (NaN last), others naturally.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Int64(x), Value::Int64(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Utf8(x), Value::Utf8(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        (x, y) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::sort_by;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn sorts_by_date_with_nulls_last() {
        let ds = DataSet::new(
            Schema::new(vec![
                Field::new("start", DataType::Date),
                Field::new("participants", DataType::Int64),
            ]),
            vec![
                vec![date(1976, 8, 3), Value::Int64(1657)],
                vec![Value::Null, Value::Int64(0)],
                vec![date(1960, 9, 18), Value::Int64(209)],
            ],
        );

        let out = sort_by(&ds, "start").unwrap();
        assert_eq!(out.rows[0][1], Value::Int64(209));
        assert_eq!(out.rows[1][1], Value::Int64(1657));
        assert_eq!(out.rows[2][0], Value::Null);
        assert!(sort_by(&ds, "end").is_none());
    }
}
