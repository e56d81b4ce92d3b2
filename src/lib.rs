//! # Atende - Clinical Visit Management
//!
//! A small service for registering occupational-health visits (atendimentos),
//! attaching PDF reports, and reviewing activity through a web dashboard.
//!
//! ## Features
//!
//! - **Visit Registry**: Create, update, filter, and delete visit records
//! - **Web Dashboard**: HTTP dashboard with a JSON API for every operation
//! - **PDF Reports**: Validated upload and download of laudo/avaliação files
//! - **Statistics**: Aggregate counts for dashboard cards and charts
//! - **Audit Trail**: Append-only, size-rotated log of every mutation
//! - **Data Export**: Export the visit table to CSV, JSON, and Excel formats
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atende::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
pub mod web;
