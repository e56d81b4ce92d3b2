use anyhow::Result;
use std::env::consts::OS;
use std::env::var;
use std::path::{Path, PathBuf};
use std::{fs, str};

pub const VENDOR_NAME: &str = "lacodda";
pub const APP_NAME: &str = "atende";

/// Resolves platform-specific paths for the application's data files.
///
/// The base directory follows OS conventions:
/// - Windows: `%LOCALAPPDATA%\lacodda\atende`
/// - macOS: `~/Library/Application Support/lacodda/atende`
/// - Linux: `~/.local/share/lacodda/atende`
///
/// The database, configuration file, `uploads/` and `logs/` all live under
/// this directory.
#[derive(Clone)]
pub struct DataStorage {
    base_path: PathBuf,
}

impl DataStorage {
    pub fn new() -> Self {
        let base_path = match OS {
            "windows" => var("LOCALAPPDATA").unwrap_or_else(|_| ".".into()),
            "macos" => var("HOME").unwrap_or_else(|_| ".".into()) + "/Library/Application Support",
            _ => var("HOME").unwrap_or_else(|_| ".".into()) + "/.local/share",
        };
        let base_path = Path::new(&base_path).join(VENDOR_NAME).join(APP_NAME);

        Self { base_path }
    }

    /// Returns the full path for a file in the base directory, creating
    /// the directory on first use.
    pub fn get_path(&self, file_name: &str) -> Result<PathBuf> {
        if !self.base_path.exists() {
            fs::create_dir_all(&self.base_path)?;
        }
        Ok(self.base_path.join(file_name))
    }

    /// Returns a subdirectory of the base directory, creating it on first use.
    ///
    /// Used for `uploads/` (stored PDF reports) and `logs/` (audit trail).
    pub fn get_dir(&self, dir_name: &str) -> Result<PathBuf> {
        let dir = self.base_path.join(dir_name);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(dir)
    }
}

impl Default for DataStorage {
    fn default() -> Self {
        Self::new()
    }
}
