//! # Observability
//!
//! Structured logging for storage and server events.

pub mod logger;

pub use logger::{Logger, Severity};
