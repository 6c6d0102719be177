//! Application settings.
//!
//! Settings live in `config.json` next to the database in the per-OS data
//! directory. A missing file means defaults; a malformed one is an error so a
//! typo never silently points the tool at a different database.
//!
//! ## Resolution order for the database path
//!
//! 1. `TASKTALLY_DB` environment variable
//! 2. `db_file` in `config.json`
//! 3. `tasktally.db` inside the data directory
//!
//! ```rust,no_run
//! use tasktally::libs::config::Config;
//!
//! let config = Config::read()?;
//! let db_path = config.db_path()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "tasktally.db";
pub const DB_ENV_VAR: &str = "TASKTALLY_DB";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Explicit database location; defaults to the data directory.
    pub db_file: Option<PathBuf>,
    /// Name of the project created on first launch.
    pub default_project: String,
    /// Row cap for list and search commands when none is given.
    pub list_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_file: None,
            default_project: "Inbox".to_string(),
            list_limit: 50,
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().file_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&config_file_path)?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse configuration at {}", config_file_path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().file_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().file_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        if let Some(path) = env::var_os(DB_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }
        match &self.db_file {
            Some(path) => Ok(path.clone()),
            None => Ok(DataStorage::new().file_path(DB_FILE_NAME)?),
        }
    }
}
