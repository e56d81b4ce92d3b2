#[cfg(test)]
mod tests {
    use atende::libs::audit::DEFAULT_MAX_LOG_SIZE;
    use atende::libs::config::{AuditConfig, Config, ServerConfig, DEFAULT_ADDR, DEFAULT_PORT};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_without_file_returns_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert!(config.server.is_none());
        assert!(config.audit.is_none());
        assert_eq!(config.audit_max_log_size(), DEFAULT_MAX_LOG_SIZE);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_roundtrip(_ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig {
                addr: "0.0.0.0".to_string(),
                port: 9000,
            }),
            audit: Some(AuditConfig { max_log_size: 2048 }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.server, Some(ServerConfig { addr: "0.0.0.0".to_string(), port: 9000 }));
        assert_eq!(loaded.audit, Some(AuditConfig { max_log_size: 2048 }));
        assert_eq!(loaded.audit_max_log_size(), 2048);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_loads(_ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig::default()),
            audit: None,
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert!(loaded.server.is_some());
        assert!(loaded.audit.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete(_ctx: &mut ConfigTestContext) {
        // Nothing to delete yet
        assert!(!Config::delete().unwrap());

        Config::default().save().unwrap();
        assert!(Config::delete().unwrap());
        assert!(!Config::delete().unwrap());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_bind_addr_resolution(_ctx: &mut ConfigTestContext) {
        // Without file or environment the defaults apply
        let config = Config::read().unwrap();
        assert_eq!(config.bind_addr(), (DEFAULT_ADDR.to_string(), DEFAULT_PORT));

        // File values replace the defaults
        let config = Config {
            server: Some(ServerConfig {
                addr: "192.168.0.10".to_string(),
                port: 8600,
            }),
            audit: None,
        };
        assert_eq!(config.bind_addr(), ("192.168.0.10".to_string(), 8600));

        // Environment beats the file
        std::env::set_var("ATENDE_ADDR", "0.0.0.0");
        std::env::set_var("ATENDE_PORT", "9100");
        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 9100));

        // An unparsable port falls back to the file value
        std::env::set_var("ATENDE_PORT", "not-a-port");
        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 8600));

        std::env::remove_var("ATENDE_ADDR");
        std::env::remove_var("ATENDE_PORT");
    }
}
