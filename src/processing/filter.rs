//! Row filtering for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Rows of `dataset` for which `predicate` holds, in their original order. Same as
/// [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Rows whose `column` holds exactly the text `value`.
///
/// Returns `None` if `column` does not exist in the schema.
pub fn filter_eq(dataset: &DataSet, column: &str, value: &str) -> Option<DataSet> {
    let idx = dataset.schema.index_of(column)?;
    Some(filter(dataset, |row| row.get(idx).and_then(Value::as_str) == Some(value)))
}

#[cfg(test)]
mod tests {
    use super::{filter, filter_eq};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn games() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("type", DataType::Utf8),
            Field::new("year", DataType::Int64),
        ]);
        let rows = vec![
            vec![Value::Utf8("summer".into()), Value::Int64(1960)],
            vec![Value::Utf8("winter".into()), Value::Int64(1976)],
            vec![Value::Utf8("summer".into()), Value::Int64(1964)],
            vec![Value::Null, Value::Int64(2000)],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn filter_by_numeric_predicate_leaves_input_untouched() {
        let ds = games();
        let out = filter(&ds, |row| matches!(row[1], Value::Int64(y) if y >= 1970));
        assert_eq!(out.schema, ds.schema);
        assert_eq!(out.row_count(), 2);
        assert_eq!(ds.row_count(), 4);
    }

    #[test]
    fn filter_eq_matches_text_exactly() {
        let ds = games();
        let summer = filter_eq(&ds, "type", "summer").unwrap();
        assert_eq!(summer.row_count(), 2);
        assert_eq!(summer.rows[1][1], Value::Int64(1964));
        assert_eq!(filter_eq(&ds, "type", "Summer").unwrap().row_count(), 0);
        assert!(filter_eq(&ds, "season", "summer").is_none());
    }
}
