//! Simulation harness.
//!
//! Connects trace input to the cache: record expansion, the modify bonus, the
//! per-record access counter, and the optional verbose access log.

/// Replay loop and file entry point.
pub mod replay;

pub use replay::{Replayer, replay_file};
