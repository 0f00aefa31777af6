//! Row and column mapping for [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Apply `mapper` to every row. Same as [`DataSet::map_rows`], including its panic when a mapped
/// row has the wrong length.
pub fn map<F>(dataset: &DataSet, mapper: F) -> DataSet
where
    F: FnMut(&[Value]) -> Vec<Value>,
{
    dataset.map_rows(mapper)
}

/// Returns a new [`DataSet`] with `mapper` applied to every value of `column`.
///
/// Returns `None` if `column` does not exist in the schema. The field type is unchanged, so
/// `mapper` should return values of the same type.
pub fn map_column<F>(dataset: &DataSet, column: &str, mut mapper: F) -> Option<DataSet>
where
    F: FnMut(&Value) -> Value,
{
    let idx = dataset.schema.index_of(column)?;
    Some(map(dataset, |row| {
        let mut out = row.to_vec();
        out[idx] = mapper(&row[idx]);
        out
    }))
}
