//! Location of the files tasktally keeps between runs.
//!
//! `TASKTALLY_HOME` wins when set. Otherwise the directory follows the
//! platform convention:
//!
//! - Windows: `%LOCALAPPDATA%\tasktally`
//! - macOS: `~/Library/Application Support/tasktally`
//! - elsewhere: `$XDG_DATA_HOME/tasktally`, falling back to `~/.local/share/tasktally`

use super::error::Result;
use std::env::{self, consts::OS};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

pub const APP_DIR: &str = "tasktally";
pub const HOME_ENV_VAR: &str = "TASKTALLY_HOME";

#[derive(Debug, Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        Self {
            base_path: resolve(OS, |key| env::var_os(key)),
        }
    }

    /// Path of `file_name` inside the data directory, creating the directory if needed.
    pub fn file_path(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_path)?;
        Ok(self.base_path.join(file_name))
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(os: &str, lookup: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    if let Some(home) = lookup(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }
    let home = || PathBuf::from(lookup("HOME").unwrap_or_else(|| ".".into()));
    let root = match os {
        "windows" => PathBuf::from(lookup("LOCALAPPDATA").unwrap_or_else(|| ".".into())),
        "macos" => home().join("Library").join("Application Support"),
        _ => match lookup("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
            Some(data_home) => PathBuf::from(data_home),
            None => home().join(".local").join("share"),
        },
    };
    root.join(APP_DIR)
}
