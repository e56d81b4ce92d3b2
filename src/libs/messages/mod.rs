//! Centralized user-facing messages.
//!
//! Every terminal string the CLI and server print lives in the [`Message`]
//! enum; the `msg_*` macros route them to the console or the tracing system.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
