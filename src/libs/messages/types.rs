#[derive(Debug, Clone)]
pub enum Message {
    // === ATENDIMENTO MESSAGES ===
    AtendimentosHeader(usize), // count
    NoAtendimentosFound,
    StatsHeader,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigFileNotFound,
    ConfigModuleServer,
    ConfigModuleAudit,

    // === SERVER MESSAGES ===
    ServerStarted(String), // bind address
    ServerStopped,
    DatabaseReady,

    // === SEED MESSAGES ===
    SeedCompleted(usize), // inserted count

    // === EXPORT MESSAGES ===
    ExportingData(String),   // format
    ExportCompleted(String), // output path
    NoDataToExport,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    NothingToRollback,
    RollingBack(u32, u32),  // from, to
    RollbackCompleted(u32), // version

    // === PROMPTS ===
    PromptSelectModules,
    PromptServerAddr,
    PromptServerPort,
    PromptMaxLogSize,
}
