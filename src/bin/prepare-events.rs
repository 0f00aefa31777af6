//! Prepare `paralympics_events_prepared.csv` from the raw events and NPC code files.

use std::process::ExitCode;
use std::sync::Arc;

use paralympics_prep::ingestion::{ingest_from_path, CsvReadOptions, IngestionOptions, IngestionSeverity, StdErrObserver};
use paralympics_prep::inspect::{describe_dataset, DescribeOptions};
use paralympics_prep::paths::DataPaths;
use paralympics_prep::prepare::{normalize_event_types, prepare_events_to_path, PrepareOptions, StdErrPrepareObserver};
use paralympics_prep::PrepareResult;

fn main() -> ExitCode {
    match run(&DataPaths::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("prepare-events failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(paths: &DataPaths) -> PrepareResult<()> {
    let observer = Arc::new(StdErrObserver);
    let read = |csv: CsvReadOptions| IngestionOptions {
        csv,
        observer: Some(observer.clone()),
        alert_at_or_above: IngestionSeverity::Critical,
        ..Default::default()
    };

    let raw = ingest_from_path(paths.events_raw(), &read(CsvReadOptions::default()))?;
    let codes = ingest_from_path(
        paths.npc_codes(),
        &read(CsvReadOptions::default().with_columns(["Code", "Name"]).lossy()),
    )?;

    let raw = normalize_event_types(&raw)?;
    let options = PrepareOptions {
        observer: Some(Arc::new(StdErrPrepareObserver)),
        ..Default::default()
    };
    let prepared = prepare_events_to_path(&raw, Some(&codes), &options, paths.events_prepared())?;

    print!("{}", describe_dataset(&prepared, &DescribeOptions::default().all_columns()));
    Ok(())
}
