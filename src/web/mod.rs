//! Web dashboard and JSON API.
//!
//! The embedded single-page dashboard talks to the JSON API under `/api`;
//! both are served by the same axum router. State is a cloneable bundle of
//! the visit repository, the audit log and the uploads directory.

pub mod error;
pub mod handlers;
pub mod server;
