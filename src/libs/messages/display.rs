//! Display implementation for application messages.
//!
//! Central text formatting for all user-facing messages. Keeping every
//! message string in one place makes the terminal output consistent and
//! keeps format arguments type-checked at the call site.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let message = match self {
            // === ATENDIMENTO MESSAGES ===
            Message::AtendimentosHeader(count) => format!("📋 Atendimentos ({})", count),
            Message::NoAtendimentosFound => "No atendimentos found".to_string(),
            Message::StatsHeader => "📊 Statistics".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigFileNotFound => "Configuration file not found".to_string(),
            Message::ConfigModuleServer => "Server configuration".to_string(),
            Message::ConfigModuleAudit => "Audit log configuration".to_string(),

            // === SERVER MESSAGES ===
            Message::ServerStarted(addr) => format!("Dashboard available at http://{}", addr),
            Message::ServerStopped => "Server stopped".to_string(),
            Message::DatabaseReady => "Database ready".to_string(),

            // === SEED MESSAGES ===
            Message::SeedCompleted(count) => format!("Inserted {} demo atendimentos", count),

            // === EXPORT MESSAGES ===
            Message::ExportingData(format) => format!("Exporting atendimentos as {}...", format),
            Message::ExportCompleted(path) => format!("Data exported successfully to: {}", path),
            Message::NoDataToExport => "No data available to export".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),
            Message::DatabaseVersion(version) => format!("Database schema version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "📜 Migration history".to_string(),
            Message::NothingToRollback => "Nothing to roll back".to_string(),
            Message::RollingBack(from, to) => format!("Rolling back from v{} to v{}", from, to),
            Message::RollbackCompleted(version) => format!("Rolled back to v{}", version),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptServerAddr => "Bind address".to_string(),
            Message::PromptServerPort => "Port".to_string(),
            Message::PromptMaxLogSize => "Audit log size limit in bytes".to_string(),
        };
        write!(f, "{}", message)
    }
}
