//! Structured logging vocabulary.
//!
//! The crate uses `tracing` for logs/events. Library code emits events and never
//! installs a global subscriber; binaries and tests initialize
//! `tracing_subscriber` at process boundaries.

pub mod events;
pub mod fields;
