//! Series behind the tutorial's charts: histograms, box plots and a participants timeseries.
//!
//! Nothing here draws; each result carries the numbers a chart would plot and renders them as
//! plain text via `Display`.

use std::fmt;

use chrono::NaiveDate;

use crate::inspect::quantile;
use crate::processing::{reduce, sort_by, ReduceOp};
use crate::types::{DataSet, Value};

/// Options for [`distribution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramOptions {
    /// Number of equal-width bins.
    pub bins: usize,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self { bins: 10 }
    }
}

/// One histogram bin covering `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<Bin>,
}

/// Histograms of the numeric columns of `dataset`.
///
/// With `columns = None` every numeric column is included. Named columns that are missing or not
/// numeric are skipped. A column with no values yields no bins; a column where every value is the
/// same yields a single bin.
pub fn distribution(dataset: &DataSet, columns: Option<&[&str]>, options: HistogramOptions) -> Vec<Histogram> {
    numeric_columns(dataset, columns)
        .into_iter()
        .map(|(idx, column)| histogram(dataset, idx, column, options.bins.max(1)))
        .collect()
}

fn histogram(dataset: &DataSet, idx: usize, column: String, bins: usize) -> Histogram {
    let value_f64 = |op| reduce(dataset, &column, op).and_then(|v| v.as_f64());
    let (Some(min), Some(max)) = (value_f64(ReduceOp::Min), value_f64(ReduceOp::Max)) else {
        return Histogram { column, bins: Vec::new() };
    };

    let bins = if max == min { 1 } else { bins };
    let width = (max - min) / bins as f64;
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in dataset.column_values(idx).filter_map(Value::as_f64) {
        let slot = if width == 0.0 {
            0
        } else {
            (((v - min) / width) as usize).min(bins - 1)
        };
        out[slot].count += 1;
    }

    Histogram { column, bins: out }
}

/// Box-plot statistics for one column: quartiles, whiskers at the furthest values within
/// 1.5 × IQR of the box, and the values beyond the whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub column: String,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Box-plot statistics for every numeric column with at least one value.
pub fn outliers(dataset: &DataSet) -> Vec<BoxStats> {
    numeric_columns(dataset, None)
        .into_iter()
        .filter_map(|(idx, column)| box_stats(dataset, idx, column))
        .collect()
}

fn box_stats(dataset: &DataSet, idx: usize, column: String) -> Option<BoxStats> {
    let mut values: Vec<f64> = dataset.column_values(idx).filter_map(Value::as_f64).collect();
    values.sort_by(f64::total_cmp);

    let q1 = quantile(&values, 0.25)?;
    let median = quantile(&values, 0.5)?;
    let q3 = quantile(&values, 0.75)?;
    let iqr = q3 - q1;
    let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside = values.iter().copied().filter(|v| (lo_fence..=hi_fence).contains(v));
    let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
    let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);

    Some(BoxStats {
        column,
        q1,
        median,
        q3,
        lower_whisker,
        upper_whisker,
        outliers: values
            .iter()
            .copied()
            .filter(|v| !(lo_fence..=hi_fence).contains(v))
            .collect(),
    })
}

/// A value series ordered by date.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub date_column: String,
    pub value_column: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Points `(date, value)` sorted by `date_column`. Rows missing either value are skipped.
///
/// Returns `None` if either column does not exist.
pub fn timeseries(dataset: &DataSet, date_column: &str, value_column: &str) -> Option<TimeSeries> {
    let value_idx = dataset.schema.index_of(value_column)?;
    let sorted = sort_by(dataset, date_column)?;
    let date_idx = sorted.schema.index_of(date_column)?;

    let points = sorted
        .rows
        .iter()
        .filter_map(|row| match (&row[date_idx], row[value_idx].as_f64()) {
            (Value::Date(d), Some(v)) => Some((*d, v)),
            _ => None,
        })
        .collect();

    Some(TimeSeries {
        date_column: date_column.to_string(),
        value_column: value_column.to_string(),
        points,
    })
}

/// `(index, name)` of each numeric column, optionally restricted to `columns`.
fn numeric_columns(dataset: &DataSet, columns: Option<&[&str]>) -> Vec<(usize, String)> {
    dataset
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(_, f)| f.data_type.is_numeric())
        .filter(|(_, f)| columns.is_none_or(|wanted| wanted.contains(&f.name.as_str())))
        .map(|(i, f)| (i, f.name.clone()))
        .collect()
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "histogram of {}", self.column)?;
        let peak = self.bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        for b in &self.bins {
            let bar = "#".repeat(b.count * 40 / peak);
            writeln!(f, "  [{:>10.1}, {:>10.1}] {:>5} {bar}", b.lower, b.upper, b.count)?;
        }
        Ok(())
    }
}

impl fmt::Display for BoxStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}: whiskers=[{:.1}, {:.1}] q1={:.1} median={:.1} q3={:.1} outliers={:?}",
            self.column, self.lower_whisker, self.upper_whisker, self.q1, self.median, self.q3, self.outliers
        )
    }
}

impl fmt::Display for TimeSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} by {}", self.value_column, self.date_column)?;
        for (date, value) in &self.points {
            writeln!(f, "  {}  {value}", date.format("%Y-%m-%d"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Field, Schema};

    fn events() -> DataSet {
        let date = |y, m, d| Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        DataSet::new(
            Schema::new(vec![
                Field::new("start", DataType::Date),
                Field::new("participants", DataType::Int64),
                Field::new("host", DataType::Utf8),
            ]),
            vec![
                vec![date(1964, 11, 3), Value::Int64(375), Value::Utf8("Tokyo".into())],
                vec![date(1960, 9, 18), Value::Int64(209), Value::Utf8("Rome".into())],
                vec![date(1968, 11, 4), Value::Int64(750), Value::Utf8("Tel Aviv".into())],
                vec![Value::Null, Value::Int64(10_000), Value::Utf8("Nowhere".into())],
            ],
        )
    }

    #[test]
    fn histogram_bins_cover_the_range() {
        let h = distribution(&events(), None, HistogramOptions { bins: 4 });
        assert_eq!(h.len(), 1);
        let bins = &h[0].bins;
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].lower, 209.0);
        assert_eq!(bins[3].upper, 10_000.0);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 4);
        assert_eq!(bins[3].count, 1);
    }

    #[test]
    fn histogram_reads_the_requested_column() {
        let ds = DataSet::new(
            Schema::new(vec![
                Field::new("participants_m", DataType::Int64),
                Field::new("participants_f", DataType::Int64),
            ]),
            vec![
                vec![Value::Int64(1000), Value::Int64(5)],
                vec![Value::Int64(2000), Value::Int64(15)],
            ],
        );
        let h = distribution(&ds, Some(&["participants_f"]), HistogramOptions { bins: 2 });
        assert_eq!(h.len(), 1);
        assert_eq!(h[0].column, "participants_f");
        assert_eq!((h[0].bins[0].lower, h[0].bins[1].upper), (5.0, 15.0));
        assert_eq!(h[0].bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1]);

        let stats = outliers(&ds);
        assert_eq!(stats[1].column, "participants_f");
        assert_eq!(stats[1].median, 10.0);
    }

    #[test]
    fn distribution_skips_unknown_and_text_columns() {
        let h = distribution(&events(), Some(&["host", "nope"]), HistogramOptions::default());
        assert!(h.is_empty());
    }

    #[test]
    fn box_stats_flag_outliers() {
        let stats = outliers(&events());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].outliers, vec![10_000.0]);
        assert_eq!(stats[0].upper_whisker, 750.0);
        assert_eq!(stats[0].lower_whisker, 209.0);
    }

    #[test]
    fn timeseries_is_date_ordered() {
        let ts = timeseries(&events(), "start", "participants").unwrap();
        let values: Vec<f64> = ts.points.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![209.0, 375.0, 750.0]);
        assert!(timeseries(&events(), "start", "athletes").is_none());
    }
}
