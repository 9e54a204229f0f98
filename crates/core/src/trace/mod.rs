//! Memory trace input.
//!
//! Traces are text, one record per line, in the format produced by
//! `valgrind --tool=lackey --trace-mem=yes` restricted to data accesses.

/// Buffered reader yielding parsed records.
pub mod reader;

/// Record grammar and parsing.
pub mod record;

pub use reader::TraceReader;
pub use record::{Operation, TraceRecord};
