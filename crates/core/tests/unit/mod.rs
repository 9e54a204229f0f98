//! # Unit Components
//!
//! Groups the unit tests by the module they exercise.

/// Address decoding, the line store, and the replacement engine.
pub mod cache;


/// Error display and conversions.
pub mod error;



/// Trace record grammar and the line reader.
pub mod trace;
