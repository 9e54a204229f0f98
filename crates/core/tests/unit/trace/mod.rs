//! Trace input tests.

/// `TraceReader` iteration, blank lines, and line numbers.
pub mod reader;
