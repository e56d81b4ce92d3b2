//! Database migration command.
//!
//! Applies pending migrations, or with `--status` shows the current schema
//! version and the applied history without changing anything.

use crate::db::db::Db;
use crate::db::migrations::{get_db_version, init_with_migrations, needs_migration, MigrationManager};
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Show the schema version and migration history instead of migrating
    #[arg(short, long)]
    status: bool,
}

pub fn cmd(args: MigrateArgs) -> Result<()> {
    let mut conn = Db::new_without_migrations()?;

    if args.status {
        let version = get_db_version(&conn)?;
        msg_print!(Message::DatabaseVersion(version));

        if needs_migration(&conn)? {
            msg_info!(Message::DatabaseNeedsUpdate);
        } else {
            msg_info!(Message::DatabaseUpToDate);
        }

        let history = MigrationManager::new().get_migration_history(&conn)?;
        if !history.is_empty() {
            msg_print!(Message::MigrationHistory, true);
            View::migration_history(&history)?;
        }
        return Ok(());
    }

    if needs_migration(&conn)? {
        init_with_migrations(&mut conn)?;
    } else {
        msg_info!(Message::DatabaseUpToDate);
    }

    Ok(())
}
