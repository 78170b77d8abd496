use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::store::{MistakeLedger, StoreError};

pub const EXPORT_VERSION: u32 = 1;

/// Portable snapshot of a player's progress and settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub kanapop_export_version: u32,
    pub exported_at: DateTime<Utc>,
    pub config: Config,
    pub mistakes: MistakeLedger,
}

impl ExportData {
    pub fn new(config: &Config, mistakes: &MistakeLedger) -> Self {
        Self {
            kanapop_export_version: EXPORT_VERSION,
            exported_at: Utc::now(),
            config: config.clone(),
            mistakes: mistakes.clone(),
        }
    }

    pub fn check_version(&self) -> Result<(), StoreError> {
        if self.kanapop_export_version != EXPORT_VERSION {
            return Err(StoreError::UnsupportedExportVersion {
                found: self.kanapop_export_version,
                expected: EXPORT_VERSION,
            });
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path)?;
        let data: ExportData = serde_json::from_str(&content)?;
        data.check_version()?;
        Ok(data)
    }
}
