//! Append-only audit trail of every mutating action.
//!
//! Entries go to `logs/security.log` in the application data directory, one
//! line per action:
//!
//! ```text
//! 2025-09-04 09:00:12 ACTION: ADD_APPOINTMENT | DETAILS: Maria Silva - Alpha Ltda
//! ```
//!
//! Recording is best-effort: a failed write must never abort the user action
//! that triggered it, so [`AuditLog::record`] swallows I/O errors (they are
//! still visible through `msg_debug!`). When the file grows past the size
//! limit it is rotated to `security.log.1`, replacing any previous rotation.

use crate::libs::data_storage::DataStorage;
use crate::msg_debug;
use anyhow::Result;
use chrono::Local;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub const AUDIT_FILE_NAME: &str = "security.log";
pub const LOGS_DIR_NAME: &str = "logs";

/// Default rotation threshold in bytes.
pub const DEFAULT_MAX_LOG_SIZE: u64 = 1024 * 1024;

/// Recorded action vocabulary. Kept as an enum so handlers cannot invent
/// ad-hoc action strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    AddAppointment,
    UpdateAppointment,
    DeleteAppointment,
    UploadSuccess,
    UploadRejected,
    UploadError,
    DownloadPdf,
    ClearLogs,
    CheckDb,
    SeedDemoData,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuditAction::AddAppointment => "ADD_APPOINTMENT",
            AuditAction::UpdateAppointment => "UPDATE_APPOINTMENT",
            AuditAction::DeleteAppointment => "DELETE_APPOINTMENT",
            AuditAction::UploadSuccess => "UPLOAD_SUCCESS",
            AuditAction::UploadRejected => "UPLOAD_REJECTED",
            AuditAction::UploadError => "UPLOAD_ERROR",
            AuditAction::DownloadPdf => "DOWNLOAD_PDF",
            AuditAction::ClearLogs => "CLEAR_LOGS",
            AuditAction::CheckDb => "CHECK_DB",
            AuditAction::SeedDemoData => "SEED_DEMO_DATA",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone)]
pub struct AuditLog {
    path: PathBuf,
    max_size: u64,
}

impl AuditLog {
    /// Opens the audit log in the application's `logs/` directory.
    pub fn new() -> Result<Self> {
        let logs_dir = DataStorage::new().get_dir(LOGS_DIR_NAME)?;
        Ok(Self {
            path: logs_dir.join(AUDIT_FILE_NAME),
            max_size: DEFAULT_MAX_LOG_SIZE,
        })
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Appends an entry. Never fails: audit problems must not break the
    /// operation being audited.
    pub fn record(&self, action: AuditAction, details: &str) {
        let line = format!("{} ACTION: {} | DETAILS: {}", Local::now().format("%Y-%m-%d %H:%M:%S"), action, details);
        if let Err(e) = self.append(&line) {
            msg_debug!(format!("audit write failed: {}", e));
        }
    }

    fn append(&self, line: &str) -> Result<()> {
        self.rotate_if_needed()?;
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    fn rotate_if_needed(&self) -> Result<()> {
        let size = match fs::metadata(&self.path) {
            Ok(meta) => meta.len(),
            Err(_) => return Ok(()),
        };
        if size >= self.max_size {
            let rotated = self.path.with_extension("log.1");
            fs::rename(&self.path, rotated)?;
        }
        Ok(())
    }

    /// Returns the last `n` entries, oldest first.
    pub fn tail(&self, n: usize) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        let start = lines.len().saturating_sub(n);
        Ok(lines[start..].to_vec())
    }

    /// Truncates the log. The clearing itself is recorded as the first
    /// entry of the fresh file.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        self.record(AuditAction::ClearLogs, "audit log truncated");
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
