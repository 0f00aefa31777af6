//! Print the chart series for the prepared events file (and, with the `excel` feature, describe
//! the raw workbook sheets).

use std::process::ExitCode;
use std::sync::Arc;

use paralympics_prep::charts::{distribution, outliers, timeseries, HistogramOptions};
use paralympics_prep::ingestion::{ingest_from_path, IngestionOptions, StdErrObserver};
use paralympics_prep::paths::DataPaths;
use paralympics_prep::processing::filter_eq;
use paralympics_prep::prepare::{EVENT_TYPE, START};
use paralympics_prep::IngestionResult;

fn main() -> ExitCode {
    match run(&DataPaths::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("visualise-events failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(paths: &DataPaths) -> IngestionResult<()> {
    let options = IngestionOptions {
        observer: Some(Arc::new(StdErrObserver)),
        ..Default::default()
    };

    #[cfg(feature = "excel")]
    describe_workbook(paths, &options)?;

    let prepared = ingest_from_path(paths.events_prepared(), &options)?;
    let hist = HistogramOptions::default();

    for h in distribution(&prepared, Some(&["participants_m", "participants_f"]), hist) {
        println!("{h}");
    }

    for season in ["summer", "winter"] {
        let Some(subset) = filter_eq(&prepared, EVENT_TYPE, season) else {
            continue;
        };
        println!("== {season} ({} events)", subset.row_count());
        for h in distribution(&subset, None, hist) {
            println!("{h}");
        }
    }

    for stats in outliers(&prepared) {
        print!("{stats}");
    }

    if let Some(ts) = timeseries(&prepared, START, "participants") {
        print!("\n{ts}");
    }
    Ok(())
}

#[cfg(feature = "excel")]
fn describe_workbook(paths: &DataPaths, options: &IngestionOptions) -> IngestionResult<()> {
    use paralympics_prep::inspect::{describe_dataset, DescribeOptions};
    use paralympics_prep::paths::MEDAL_STANDINGS_SHEET;

    let events = ingest_from_path(paths.all_raw_workbook(), options)?;
    let medals = ingest_from_path(
        paths.all_raw_workbook(),
        &IngestionOptions {
            sheet: Some(MEDAL_STANDINGS_SHEET.to_string()),
            ..options.clone()
        },
    )?;

    let describe = DescribeOptions::default().all_columns();
    println!("{}", describe_dataset(&events, &describe));
    println!("{}", describe_dataset(&medals, &describe));
    Ok(())
}
