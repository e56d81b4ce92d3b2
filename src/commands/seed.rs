//! Demonstration data seeding.
//!
//! Inserts the four sample visits on an empty database. Repeated runs are
//! no-ops, so the command is safe to script.

use crate::db::atendimentos::Atendimentos;
use crate::libs::audit::{AuditAction, AuditLog};
use crate::libs::messages::Message;
use crate::msg_success;
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let inserted = Atendimentos::new()?.seed_demo()?;

    if inserted > 0 {
        AuditLog::new()?.record(AuditAction::SeedDemoData, &format!("{} registros", inserted));
    }

    msg_success!(Message::SeedCompleted(inserted));
    Ok(())
}
