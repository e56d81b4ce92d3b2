//! Database connection bootstrap.
//!
//! Opens the SQLite file in the application data directory, applies the
//! connection pragmas (WAL journaling, foreign keys) and brings the schema
//! up to date before handing the connection out.

use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use rusqlite::Connection;

pub const DB_FILE_NAME: &str = "gestao_clinica.db";

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (creating if needed) the application database and runs any
    /// pending migrations.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let mut conn = Connection::open(db_file_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        init_with_migrations(&mut conn)?;

        Ok(Db { conn })
    }

    /// Opens the database without touching the schema, for inspection
    /// commands that must not trigger migrations.
    pub fn new_without_migrations() -> Result<Connection> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let conn = Connection::open(db_file_path)?;
        Ok(conn)
    }
}
