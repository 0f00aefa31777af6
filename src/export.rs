//! CSV output for [`crate::types::DataSet`].
//!
//! Header row first, then one record per row in row order. There is no index column. Cells use
//! the [`std::fmt::Display`] form of [`crate::types::Value`].

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrepareError, PrepareResult};
use crate::types::DataSet;

/// Serialize `dataset` as CSV into `wtr`.
pub fn write_csv_to_writer<W: std::io::Write>(dataset: &DataSet, wtr: W) -> PrepareResult<()> {
    let mut wtr = csv::Writer::from_writer(wtr);
    wtr.write_record(dataset.schema.field_names())?;
    for row in &dataset.rows {
        wtr.write_record(row.iter().map(ToString::to_string))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `dataset` as CSV to `path`, replacing any existing file.
///
/// The data goes to a sibling `<name>.tmp` file first and is renamed over `path` once complete,
/// so a failed write leaves a previous file at `path` untouched.
pub fn write_csv_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> PrepareResult<()> {
    let path = path.as_ref();
    let tmp = staging_path(path);

    let written = fs::File::create(&tmp)
        .map_err(PrepareError::from)
        .and_then(|file| write_csv_to_writer(dataset, std::io::BufWriter::new(file)));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }

    fs::rename(&tmp, path)?;
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::types::{DataType, Field, Schema, Value};

    #[test]
    fn writes_header_and_rows_without_index() {
        let ds = DataSet::new(
            Schema::new(vec![
                Field::new("host", DataType::Utf8),
                Field::new("start", DataType::Date),
                Field::new("Code", DataType::Utf8),
            ]),
            vec![
                vec![
                    Value::Utf8("Stoke Mandeville, London".into()),
                    Value::Date(NaiveDate::from_ymd_opt(1984, 7, 17).unwrap()),
                    Value::Null,
                ],
            ],
        );

        let mut buf = Vec::new();
        write_csv_to_writer(&ds, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "host,start,Code\n\"Stoke Mandeville, London\",1984-07-17,\n");
    }

    #[test]
    fn staging_path_is_a_sibling() {
        let p = staging_path(Path::new("data/paralympics_events_prepared.csv"));
        assert_eq!(p, Path::new("data/paralympics_events_prepared.csv.tmp"));
    }
}
