//! Database layer for the atende application.
//!
//! A single SQLite file holds the visit table and the migrations tracking
//! table. Schema changes go through the versioned migration system so every
//! deployment converges on the same structure.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atende::db::atendimentos::Atendimentos;
//! use atende::libs::atendimento::AtendimentoFilter;
//!
//! let atendimentos = Atendimentos::new()?;
//! let all = atendimentos.fetch(&AtendimentoFilter::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Core database connection and initialization module.
///
/// Provides the `Db` struct that opens the SQLite file, applies connection
/// pragmas and brings the schema up to date.
pub mod db;

/// Database schema migration system.
///
/// Handles versioned schema changes, tracks migration history, and provides
/// development-time migration management commands.
pub mod migrations;

/// Visit record repository.
///
/// CRUD operations, filtered listing, document attachment and the aggregate
/// statistics behind the dashboard.
pub mod atendimentos;
