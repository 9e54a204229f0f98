//! Common types used throughout the simulator.
//!
//! Currently this is the error vocabulary shared by configuration, trace parsing,
//! and the replay loop.

/// Error types for configuration, trace format, and replay failures.
pub mod error;

pub use error::{ConfigError, ReplayError, TraceFormatError, TraceFormatKind};
