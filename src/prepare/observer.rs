use std::fmt;
use std::path::PathBuf;

/// The ordered steps of [`super::prepare_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrepareStep {
    ExcludeRows,
    CoerceIntegers,
    ParseDates,
    ReplaceCountries,
    JoinLookup,
    DropColumns,
    InsertDuration,
}

impl fmt::Display for PrepareStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ExcludeRows => "exclude_rows",
            Self::CoerceIntegers => "coerce_integers",
            Self::ParseDates => "parse_dates",
            Self::ReplaceCountries => "replace_countries",
            Self::JoinLookup => "join_lookup",
            Self::DropColumns => "drop_columns",
            Self::InsertDuration => "insert_duration",
        };
        f.write_str(name)
    }
}

/// Events emitted while preparing the events table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrepareEvent {
    Started { rows: usize, columns: usize },
    StepFinished { step: PrepareStep, rows: usize, columns: usize },
    Written { path: PathBuf, rows: usize },
}

/// Observer hook for preparation events.
pub trait PrepareObserver: Send + Sync {
    fn on_event(&self, event: &PrepareEvent);
}

/// A simple stderr logger for preparation events.
#[derive(Debug, Default)]
pub struct StdErrPrepareObserver;

impl PrepareObserver for StdErrPrepareObserver {
    fn on_event(&self, event: &PrepareEvent) {
        match event {
            PrepareEvent::Started { rows, columns } => {
                eprintln!("[prepare][start] rows={rows} columns={columns}")
            }
            PrepareEvent::StepFinished { step, rows, columns } => {
                eprintln!("[prepare][{step}] rows={rows} columns={columns}")
            }
            PrepareEvent::Written { path, rows } => {
                eprintln!("[prepare][written] path={} rows={rows}", path.display())
            }
        }
    }
}
