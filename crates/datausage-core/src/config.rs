//! Library configuration.
//!
//! Stores the dataset endpoint and an optional cache-directory override
//! at `~/.config/datausage/config.json`. A missing file yields defaults.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "datausage";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Snapshot file name under the cache directory
const SNAPSHOT_FILE: &str = "mobile_data.json";

/// data.gov.sg datastore endpoint for the quarterly mobile data usage
/// dataset.
pub const DATASET_ENDPOINT: &str = "https://data.gov.sg/api/action/datastore_search?resource_id=a807b7ab-6cad-4aa6-87d0-e283a7353a0f";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub endpoint: String,
    pub cache_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DATASET_ENDPOINT.to_string(),
            cache_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Where the snapshot file lives: the override when set, otherwise
    /// the platform cache directory.
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        let base = match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::cache_dir()
                .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?
                .join(APP_NAME),
        };
        Ok(base.join(SNAPSHOT_FILE))
    }
}
