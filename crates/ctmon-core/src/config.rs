//! Monitor configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where the monitor keeps its persisted history and export output.
///
/// Policy values (conversion factor, retention window, tick cadence) are
/// fixed constants, not configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Directory holding the persisted key-value slot.
    pub data_dir: PathBuf,
    /// Directory the CSV export is written into.
    pub export_dir: PathBuf,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            export_dir: PathBuf::from("."),
        }
    }
}

impl MonitorConfig {
    /// Load from a YAML file; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Full path of the CSV export target.
    pub fn export_path(&self) -> PathBuf {
        self.export_dir.join(crate::export::EXPORT_FILE_NAME)
    }
}
