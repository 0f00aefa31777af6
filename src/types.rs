//! Core data model types.
//!
//! Files are ingested into an in-memory [`DataSet`], described by a [`Schema`] (a list of typed
//! [`Field`]s) that is either supplied by the caller or inferred from the file.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

/// Logical data type for a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
    /// Calendar date without a time zone.
    Date,
}

impl DataType {
    /// Whether values of this type take part in numeric summaries.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int64 => "int64",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Utf8 => "utf8",
            Self::Date => "date",
        };
        f.write_str(name)
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A list of fields describing the shape of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed value in a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
    /// Calendar date.
    Date(NaiveDate),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// Text form used by the CSV writer and the inspection report.
///
/// Nulls render as an empty string, whole floats keep a trailing `.0`, dates use ISO `YYYY-MM-DD`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Utf8(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// In-memory tabular dataset.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. Row position
/// is the row index: there is no separate index column, so removing rows renumbers the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    /// Create a dataset from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the dataset.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the dataset.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Iterate the values of column `idx`, top to bottom.
    pub fn column_values(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }

    /// Create a new dataset containing only rows that match `predicate`.
    ///
    /// The returned dataset preserves the original schema.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Create a new dataset by applying `mapper` to every row.
    ///
    /// The returned dataset preserves the original schema.
    ///
    /// # Panics
    ///
    /// Panics if `mapper` returns a row with a different length than the schema field count.
    pub fn map_rows<F>(&self, mut mapper: F) -> Self
    where
        F: FnMut(&[Value]) -> Vec<Value>,
    {
        let expected_len = self.schema.fields.len();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let out = mapper(row.as_slice());
                assert!(
                    out.len() == expected_len,
                    "mapped row length {} does not match schema length {}",
                    out.len(),
                    expected_len
                );
                out
            })
            .collect();

        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Remove the rows at the given positions. Positions past the end are ignored.
    pub fn without_rows(&self, positions: &BTreeSet<usize>) -> Self {
        let rows = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| !positions.contains(i))
            .map(|(_, row)| row.clone())
            .collect();
        Self {
            schema: self.schema.clone(),
            rows,
        }
    }

    /// Remove the named columns. Names not in the schema are ignored.
    pub fn without_columns(&self, names: &[&str]) -> Self {
        let keep: Vec<usize> = self
            .schema
            .fields
            .iter()
            .enumerate()
            .filter(|(_, f)| !names.contains(&f.name.as_str()))
            .map(|(i, _)| i)
            .collect();

        let fields = keep.iter().map(|&i| self.schema.fields[i].clone()).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| keep.iter().map(|&i| row.get(i).cloned().unwrap_or(Value::Null)).collect())
            .collect();

        Self::new(Schema::new(fields), rows)
    }

    /// Insert a column at position `at`, shifting later columns right.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the row count or `at` exceeds the column count.
    pub fn insert_column(&mut self, at: usize, field: Field, values: Vec<Value>) {
        assert!(
            values.len() == self.rows.len(),
            "column length {} does not match row count {}",
            values.len(),
            self.rows.len()
        );
        self.schema.fields.insert(at, field);
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(at, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("a", DataType::Int64),
                Field::new("b", DataType::Utf8),
                Field::new("c", DataType::Float64),
            ]),
            (0..4)
                .map(|i| {
                    vec![
                        Value::Int64(i),
                        Value::Utf8(format!("r{i}")),
                        Value::Float64(i as f64 / 2.0),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn without_rows_renumbers_remaining_rows() {
        let ds = sample();
        let out = ds.without_rows(&BTreeSet::from([0, 2, 99]));
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows[0][0], Value::Int64(1));
        assert_eq!(out.rows[1][0], Value::Int64(3));
    }

    #[test]
    fn without_columns_keeps_order_of_the_rest() {
        let out = sample().without_columns(&["b", "missing"]);
        assert_eq!(out.schema.field_names().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(out.rows[3], vec![Value::Int64(3), Value::Float64(1.5)]);
    }

    #[test]
    fn insert_column_places_values_at_position() {
        let mut ds = sample();
        let values = (0..4).map(|i| Value::Int64(i * 10)).collect();
        ds.insert_column(1, Field::new("x", DataType::Int64), values);
        assert_eq!(ds.schema.index_of("x"), Some(1));
        assert_eq!(ds.schema.index_of("b"), Some(2));
        assert_eq!(ds.rows[2][1], Value::Int64(20));
    }

    #[test]
    #[should_panic(expected = "column length")]
    fn insert_column_panics_on_length_mismatch() {
        let mut ds = sample();
        ds.insert_column(0, Field::new("x", DataType::Int64), vec![Value::Null]);
    }

    #[test]
    fn value_display_matches_csv_text() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Float64(3.0).to_string(), "3.0");
        assert_eq!(Value::Float64(2.5).to_string(), "2.5");
        let d = NaiveDate::from_ymd_opt(2012, 8, 29).unwrap();
        assert_eq!(Value::Date(d).to_string(), "2012-08-29");
    }
}
