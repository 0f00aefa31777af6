//! Left-outer join of two [`crate::types::DataSet`]s.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{DataSet, Field, Schema, Value};

/// Suffixes applied to clashing column names, left then right.
const CLASH_SUFFIXES: (&str, &str) = ("_x", "_y");

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum JoinKey {
    Int(i64),
    Float(u64),
    Bool(bool),
    Text(String),
    Date(NaiveDate),
}

impl JoinKey {
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Null => None,
            Value::Int64(i) => Some(Self::Int(*i)),
            Value::Float64(f) => Some(Self::Float(f.to_bits())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Utf8(s) => Some(Self::Text(s.clone())),
            Value::Date(d) => Some(Self::Date(*d)),
        }
    }
}

/// Left-outer join `left` with `right` where `left[left_on] == right[right_on]`.
///
/// - Every left row appears in the output, in order. A left row with several matches is repeated
///   once per matching right row (in right-table order); a left row with no match gets
///   [`Value::Null`] in every right column.
/// - Output columns are all left columns followed by all right columns, the right key included.
/// - A column name present on both sides is renamed `<name>_x` (left) and `<name>_y` (right).
/// - Null keys never match.
///
/// Returns `None` if either key column is missing.
pub fn left_join(left: &DataSet, right: &DataSet, left_on: &str, right_on: &str) -> Option<DataSet> {
    let left_idx = left.schema.index_of(left_on)?;
    let right_idx = right.schema.index_of(right_on)?;

    let mut matches: HashMap<JoinKey, Vec<usize>> = HashMap::new();
    for (i, row) in right.rows.iter().enumerate() {
        if let Some(key) = row.get(right_idx).and_then(JoinKey::from_value) {
            matches.entry(key).or_default().push(i);
        }
    }

    let right_width = right.column_count();
    let mut rows = Vec::with_capacity(left.row_count());
    for row in &left.rows {
        let hits = row
            .get(left_idx)
            .and_then(JoinKey::from_value)
            .and_then(|k| matches.get(&k));
        match hits {
            Some(hits) => {
                for &r in hits {
                    let mut out = row.clone();
                    out.extend(right.rows[r].iter().cloned());
                    rows.push(out);
                }
            }
            None => {
                let mut out = row.clone();
                out.extend(std::iter::repeat_n(Value::Null, right_width));
                rows.push(out);
            }
        }
    }

    Some(DataSet::new(joined_schema(&left.schema, &right.schema), rows))
}

fn joined_schema(left: &Schema, right: &Schema) -> Schema {
    let clashes = |name: &str, other: &Schema| other.index_of(name).is_some();
    let (left_suffix, right_suffix) = CLASH_SUFFIXES;

    let left_fields = left.fields.iter().map(|f| {
        if clashes(&f.name, right) {
            Field::new(format!("{}{left_suffix}", f.name), f.data_type)
        } else {
            f.clone()
        }
    });
    let right_fields = right.fields.iter().map(|f| {
        if clashes(&f.name, left) {
            Field::new(format!("{}{right_suffix}", f.name), f.data_type)
        } else {
            f.clone()
        }
    });

    Schema::new(left_fields.chain(right_fields).collect())
}

#[cfg(test)]
mod tests {
    use super::left_join;
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn events() -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("country", DataType::Utf8),
                Field::new("year", DataType::Int64),
            ]),
            vec![
                vec![Value::Utf8("Great Britain".into()), Value::Int64(1984)],
                vec![Value::Utf8("Atlantis".into()), Value::Int64(1988)],
                vec![Value::Null, Value::Int64(1992)],
            ],
        )
    }

    fn codes(rows: &[(&str, &str)]) -> DataSet {
        DataSet::new(
            Schema::new(vec![
                Field::new("Code", DataType::Utf8),
                Field::new("Name", DataType::Utf8),
            ]),
            rows.iter()
                .map(|(c, n)| vec![Value::Utf8(c.to_string()), Value::Utf8(n.to_string())])
                .collect(),
        )
    }

    #[test]
    fn keeps_every_left_row_and_nulls_misses() {
        let out = left_join(&events(), &codes(&[("GBR", "Great Britain")]), "country", "Name").unwrap();

        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["country", "year", "Code", "Name"]
        );
        assert_eq!(out.row_count(), 3);
        assert_eq!(out.rows[0][2], Value::Utf8("GBR".into()));
        assert_eq!(out.rows[1][2], Value::Null);
        assert_eq!(out.rows[1][3], Value::Null);
        assert_eq!(out.rows[2][2], Value::Null);
    }

    #[test]
    fn repeats_left_row_for_each_match() {
        let right = codes(&[("GBR", "Great Britain"), ("GB", "Great Britain")]);
        let out = left_join(&events(), &right, "country", "Name").unwrap();
        assert_eq!(out.row_count(), 4);
        assert_eq!(out.rows[0][2], Value::Utf8("GBR".into()));
        assert_eq!(out.rows[1][2], Value::Utf8("GB".into()));
        assert_eq!(out.rows[2][0], Value::Utf8("Atlantis".into()));
    }

    #[test]
    fn suffixes_clashing_columns() {
        let right = DataSet::new(
            Schema::new(vec![
                Field::new("Name", DataType::Utf8),
                Field::new("year", DataType::Int64),
            ]),
            vec![vec![Value::Utf8("Great Britain".into()), Value::Int64(1948)]],
        );
        let out = left_join(&events(), &right, "country", "Name").unwrap();
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["country", "year_x", "Name", "year_y"]
        );
    }

    #[test]
    fn missing_key_column_is_none() {
        assert!(left_join(&events(), &codes(&[]), "nation", "Name").is_none());
        assert!(left_join(&events(), &codes(&[]), "country", "Label").is_none());
    }
}
