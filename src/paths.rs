//! Fixed layout of the package data directory.

use std::path::{Path, PathBuf};

pub const EVENTS_RAW_CSV: &str = "paralympics_events_raw.csv";
pub const ALL_RAW_XLSX: &str = "paralympics_all_raw.xlsx";
pub const NPC_CODES_CSV: &str = "npc_codes.csv";
pub const EVENTS_PREPARED_CSV: &str = "paralympics_events_prepared.csv";
/// Workbook sheet holding the medal table.
pub const MEDAL_STANDINGS_SHEET: &str = "medal_standings";

/// Input and output locations, all inside one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub data_dir: PathBuf,
}

impl DataPaths {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn events_raw(&self) -> PathBuf {
        self.data_dir.join(EVENTS_RAW_CSV)
    }

    pub fn all_raw_workbook(&self) -> PathBuf {
        self.data_dir.join(ALL_RAW_XLSX)
    }

    pub fn npc_codes(&self) -> PathBuf {
        self.data_dir.join(NPC_CODES_CSV)
    }

    pub fn events_prepared(&self) -> PathBuf {
        self.data_dir.join(EVENTS_PREPARED_CSV)
    }
}

/// `data/` next to this package's `Cargo.toml`.
impl Default for DataPaths {
    fn default() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }
}
