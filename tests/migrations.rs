#[cfg(test)]
mod tests {
    use atende::db::db::Db;
    use atende::db::migrations::{get_db_version, needs_migration, MigrationManager};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct MigrationTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            MigrationTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_run_automatically(_ctx: &mut MigrationTestContext) {
        // Opening the database brings the schema up to date
        let db = Db::new().unwrap();

        let version = get_db_version(&db.conn).unwrap();
        assert!(version > 0);
        assert!(!needs_migration(&db.conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_needs_migration(_ctx: &mut MigrationTestContext) {
        let conn = Db::new_without_migrations().unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_history(_ctx: &mut MigrationTestContext) {
        let mut conn = Db::new_without_migrations().unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();

        let history = manager.get_migration_history(&conn).unwrap();
        assert!(!history.is_empty());

        // Versions are recorded in order, starting at 1
        for (i, entry) in history.iter().enumerate() {
            assert_eq!(entry.0 as usize, i + 1);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migration_idempotency(_ctx: &mut MigrationTestContext) {
        let mut conn = Db::new_without_migrations().unwrap();
        let manager = MigrationManager::new();

        manager.run_migrations(&mut conn).unwrap();
        let version1 = get_db_version(&conn).unwrap();

        manager.run_migrations(&mut conn).unwrap();
        let version2 = get_db_version(&conn).unwrap();

        assert_eq!(version1, version2);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_schema_after_migrations(_ctx: &mut MigrationTestContext) {
        let db = Db::new().unwrap();

        // The visit table and its indices exist
        let table: String = db
            .conn
            .query_row("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'atendimentos'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(table, "atendimentos");

        let indices: i64 = db
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name IN ('idx_atendimentos_data', 'idx_atendimentos_empresa')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(indices, 2);

        // New rows pick up the default status
        db.conn
            .execute(
                "INSERT INTO atendimentos (empresa, nome, modalidade, data, hora) VALUES ('Alpha', 'Maria', 'Admissional', '2025-09-04', '09:00')",
                [],
            )
            .unwrap();
        let status: String = db.conn.query_row("SELECT status FROM atendimentos", [], |row| row.get(0)).unwrap();
        assert_eq!(status, "Pendente");
    }
}
