//! Text descriptions of a [`DataSet`] for eyeballing data before and after preparation.
//!
//! [`describe_dataset`] collects shape, a head preview, column types, numeric summaries and
//! missing-value information into a [`DatasetDescription`], which renders via `Display`.
//! How many columns a rendered table shows is a per-call option ([`DescribeOptions::max_columns`]).

use std::fmt;

use crate::processing::{reduce, ReduceOp};
use crate::types::{DataSet, DataType, Value};

/// Presentation options for [`describe_dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeOptions {
    /// Rows shown in the head preview.
    pub head_rows: usize,
    /// Widest table to render; wider tables show the first and last columns around `...`.
    /// `None` shows every column.
    pub max_columns: Option<usize>,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            head_rows: 5,
            max_columns: Some(20),
        }
    }
}

impl DescribeOptions {
    /// Show every column.
    pub fn all_columns(mut self) -> Self {
        self.max_columns = None;
        self
    }
}

/// `describe`-style statistics for one numeric column. Nulls are skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (`n - 1`); `None` below two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Everything [`describe_dataset`] reports about a table.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetDescription {
    pub rows: usize,
    pub columns: usize,
    /// Column names with their types, in schema order.
    pub dtypes: Vec<(String, DataType)>,
    pub head: DataSet,
    pub numeric: Vec<NumericSummary>,
    /// Rows containing at least one null.
    pub rows_with_missing: DataSet,
    /// Null count per column, in schema order.
    pub missing_counts: Vec<(String, usize)>,
    pub options: DescribeOptions,
}

/// Describe `dataset`.
pub fn describe_dataset(dataset: &DataSet, options: &DescribeOptions) -> DatasetDescription {
    let head = DataSet::new(
        dataset.schema.clone(),
        dataset.rows.iter().take(options.head_rows).cloned().collect(),
    );

    let numeric = dataset
        .schema
        .fields
        .iter()
        .filter(|f| f.data_type.is_numeric())
        .filter_map(|f| summarize_numeric(dataset, &f.name))
        .collect();

    let missing_counts = dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .map(|(i, f)| (f.name.clone(), dataset.column_values(i).filter(|v| v.is_null()).count()))
        .collect();

    DatasetDescription {
        rows: dataset.row_count(),
        columns: dataset.column_count(),
        dtypes: dataset
            .schema
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.data_type))
            .collect(),
        head,
        numeric,
        rows_with_missing: dataset.filter_rows(|row| row.iter().any(Value::is_null)),
        missing_counts,
        options: options.clone(),
    }
}

/// Summarize one numeric column of `dataset`.
///
/// Returns `None` if `column` does not exist in the schema.
pub fn summarize_numeric(dataset: &DataSet, column: &str) -> Option<NumericSummary> {
    let idx = dataset.schema.index_of(column)?;
    let as_f64 = |v: Option<Value>| v.and_then(|v| v.as_f64());

    let mut values: Vec<f64> = dataset.column_values(idx).filter_map(Value::as_f64).collect();
    values.sort_by(f64::total_cmp);

    let mean = as_f64(reduce(dataset, column, ReduceOp::Mean));
    let std = match (mean, values.len()) {
        (Some(m), n) if n >= 2 => {
            let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
            Some((ss / (n - 1) as f64).sqrt())
        }
        _ => None,
    };

    Some(NumericSummary {
        column: column.to_string(),
        count: values.len(),
        mean,
        std,
        min: as_f64(reduce(dataset, column, ReduceOp::Min)),
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: as_f64(reduce(dataset, column, ReduceOp::Max)),
    })
}

/// Linear-interpolated quantile of already sorted values.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

impl fmt::Display for DatasetDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let max_columns = self.options.max_columns;

        writeln!(f, "shape: ({}, {})", self.rows, self.columns)?;

        writeln!(f, "\nhead:")?;
        write_dataset(f, &self.head, max_columns)?;

        writeln!(f, "\ncolumns:")?;
        for (name, data_type) in &self.dtypes {
            writeln!(f, "  {name:<24} {data_type}")?;
        }

        writeln!(f, "\nsummary:")?;
        let headers: Vec<String> = std::iter::once(String::new())
            .chain(self.numeric.iter().map(|s| s.column.clone()))
            .collect();
        let stats: [(&str, fn(&NumericSummary) -> Option<f64>); 8] = [
            ("count", |s| Some(s.count as f64)),
            ("mean", |s| s.mean),
            ("std", |s| s.std),
            ("min", |s| s.min),
            ("25%", |s| s.q25),
            ("50%", |s| s.median),
            ("75%", |s| s.q75),
            ("max", |s| s.max),
        ];
        let rows: Vec<Vec<String>> = stats
            .iter()
            .map(|(label, get)| {
                std::iter::once(label.to_string())
                    .chain(self.numeric.iter().map(|s| format_stat(get(s))))
                    .collect()
            })
            .collect();
        write_table(f, &headers, &rows, max_columns.map(|n| n + 1))?;

        writeln!(f, "\nrows with missing values: {}", self.rows_with_missing.row_count())?;
        write_dataset(f, &self.rows_with_missing, max_columns)?;

        writeln!(f, "\nmissing values per column:")?;
        for (name, n) in &self.missing_counts {
            writeln!(f, "  {name:<24} {n}")?;
        }
        Ok(())
    }
}

fn format_stat(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.3}"),
        None => "NaN".to_string(),
    }
}

fn write_dataset(f: &mut fmt::Formatter<'_>, ds: &DataSet, max_columns: Option<usize>) -> fmt::Result {
    let headers: Vec<String> = ds.schema.field_names().map(str::to_owned).collect();
    let rows: Vec<Vec<String>> = ds
        .rows
        .iter()
        .map(|row| row.iter().map(|v| if v.is_null() { "NaN".to_string() } else { v.to_string() }).collect())
        .collect();
    write_table(f, &headers, &rows, max_columns)
}

/// Render a left-aligned text table. Columns beyond `max_columns` are elided in the middle.
fn write_table(
    f: &mut fmt::Formatter<'_>,
    headers: &[String],
    rows: &[Vec<String>],
    max_columns: Option<usize>,
) -> fmt::Result {
    let shown = visible_columns(headers.len(), max_columns);
    let cell = |row: &[String], c: Option<usize>| match c {
        Some(i) => row.get(i).cloned().unwrap_or_default(),
        None => "...".to_string(),
    };

    let widths: Vec<usize> = shown
        .iter()
        .map(|&c| {
            std::iter::once(cell(headers, c))
                .chain(rows.iter().map(|r| cell(r, c)))
                .map(|s| s.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    for line in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        let parts: Vec<String> = shown
            .iter()
            .zip(&widths)
            .map(|(&c, &w)| format!("{:<w$}", cell(line, c)))
            .collect();
        writeln!(f, "  {}", parts.join("  ").trim_end())?;
    }
    Ok(())
}

/// Column positions to render; `None` marks the elision column.
fn visible_columns(total: usize, max_columns: Option<usize>) -> Vec<Option<usize>> {
    match max_columns {
        Some(max) if max > 0 && total > max => {
            let front = max.div_ceil(2);
            let back = max - front;
            (0..front)
                .map(Some)
                .chain(std::iter::once(None))
                .chain((total - back..total).map(Some))
                .collect()
        }
        _ => (0..total).map(Some).collect(),
    }
}
