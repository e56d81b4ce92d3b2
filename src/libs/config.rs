//! Configuration management for the application.
//!
//! Settings are stored as JSON in the platform data directory and are split
//! into optional modules: the HTTP server binding and the audit log limits.
//! Each module can be configured independently through the interactive
//! setup wizard (`atende init`) or by editing the file by hand.
//!
//! The server binding can additionally be overridden at runtime through the
//! `ATENDE_ADDR` and `ATENDE_PORT` environment variables, which take
//! precedence over the file; CLI flags in turn beat the environment.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\lacodda\atende\config.json`
//! - **macOS**: `~/Library/Application Support/lacodda/atende/config.json`
//! - **Linux**: `~/.local/share/lacodda/atende/config.json`

use super::audit::DEFAULT_MAX_LOG_SIZE;
use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default dashboard binding, kept compatible with the original deployment.
pub const DEFAULT_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

/// HTTP server binding configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    /// Address the dashboard listens on.
    pub addr: String,
    /// TCP port for the dashboard and JSON API.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            addr: DEFAULT_ADDR.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Audit trail configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AuditConfig {
    /// Size in bytes after which `security.log` is rotated to `security.log.1`.
    pub max_log_size: u64,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            max_log_size: DEFAULT_MAX_LOG_SIZE,
        }
    }
}

/// Root configuration object.
///
/// All modules are optional so a missing file, or a file written by an
/// older version, still loads; unconfigured modules are omitted from the
/// JSON output.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults when it does
    /// not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file if present.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Runs the interactive configuration wizard.
    ///
    /// Presents the available modules, prompts for each selected one with
    /// the current values as defaults, and returns the updated configuration
    /// ready for saving.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = ["Server", "Audit"];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules)
            .interact()?;

        for &selection in &selected {
            match modules[selection] {
                "Server" => {
                    let default = config.server.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        addr: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerAddr.to_string())
                            .default(default.addr)
                            .interact_text()?,
                        port: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptServerPort.to_string())
                            .default(default.port)
                            .interact_text()?,
                    });
                }
                "Audit" => {
                    let default = config.audit.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleAudit);
                    config.audit = Some(AuditConfig {
                        max_log_size: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMaxLogSize.to_string())
                            .default(default.max_log_size)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }

    /// Resolves the effective server binding: the config file provides the
    /// base values, `ATENDE_ADDR`/`ATENDE_PORT` override them.
    pub fn bind_addr(&self) -> (String, u16) {
        let base = self.server.clone().unwrap_or_default();
        let addr = env::var("ATENDE_ADDR").unwrap_or(base.addr);
        let port = env::var("ATENDE_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(base.port);
        (addr, port)
    }

    /// Effective audit rotation threshold.
    pub fn audit_max_log_size(&self) -> u64 {
        self.audit.as_ref().map(|a| a.max_log_size).unwrap_or(DEFAULT_MAX_LOG_SIZE)
    }
}
