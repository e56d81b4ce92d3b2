//! Core library modules for the atende application.
//!
//! Serves as the main entry point for the application's library components.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Domain Types**: Visit records, modalities, filters, statistics
//! - **Input Safety**: Sanitization and validation of every boundary value
//! - **Audit Trail**: Append-only, size-rotated action log
//! - **User Interface**: Console rendering and data export
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atende::db::atendimentos::Atendimentos;
//! use atende::libs::atendimento::{Atendimento, Modalidade};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! let at = Atendimento::new(
//!     "Alpha Ltda",
//!     "Maria Silva",
//!     Modalidade::Admissional,
//!     NaiveDate::from_ymd_opt(2025, 9, 4).unwrap(),
//!     NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
//! );
//! let atendimentos = Atendimentos::new()?;
//! atendimentos.insert(&at)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod atendimento;
pub mod audit;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod messages;
pub mod validation;
pub mod view;
