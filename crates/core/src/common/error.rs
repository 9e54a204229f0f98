//! Error definitions.
//!
//! This module defines the two error classes of the simulator. It provides:
//! 1. **Configuration Errors:** Invalid geometry, an unallocatable line grid, or an
//!    unreadable trace source. These are fatal and no replay is attempted.
//! 2. **Trace Format Errors:** A trace line that does not match the record grammar.
//! 3. **Replay Errors:** Everything that can stop a replay, from setup to the last record.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration problems detected before any record is replayed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The number of set index bits (`-s`) was zero.
    #[error("set index bits must be a positive integer")]
    SetIndexBits,

    /// The associativity (`-E`) was zero.
    #[error("associativity must be a positive integer")]
    Associativity,

    /// The number of block offset bits (`-b`) was zero.
    #[error("block offset bits must be a positive integer")]
    BlockOffsetBits,

    /// Set index and block offset bits leave no room for a tag in a 64-bit address.
    #[error("geometry too wide: s + b = {total} bits, must be below 64")]
    GeometryTooWide {
        /// Sum of set index bits and block offset bits.
        total: u32,
    },

    /// `ways * sets` does not fit in the host address space.
    #[error("cache of {ways} ways x 2^{set_index_bits} sets is too large to index")]
    GridTooLarge {
        /// Requested associativity.
        ways: usize,
        /// Requested set index bits.
        set_index_bits: u32,
    },

    /// The line grid could not be allocated.
    #[error("failed to allocate {lines} cache lines")]
    Allocation {
        /// Number of lines requested.
        lines: usize,
    },

    /// The trace file could not be opened.
    #[error("cannot open trace {}: {source}", .path.display())]
    TraceSource {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A JSON configuration document did not parse.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What was wrong with a malformed trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceFormatKind {
    /// The line ended before all fields were read.
    Truncated,
    /// The operation is not one of `L`, `S`, `M`.
    UnknownOperation(char),
    /// The operation was not followed by a space.
    MissingSpace,
    /// The address and size were not separated by a comma.
    MissingComma,
    /// The address is not an unsigned hexadecimal integer.
    BadAddress,
    /// The size is not a decimal integer.
    BadSize,
    /// The size was zero.
    ZeroSize,
}

impl std::fmt::Display for TraceFormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truncated => write!(f, "truncated record"),
            Self::UnknownOperation(op) => write!(f, "unknown operation '{op}'"),
            Self::MissingSpace => write!(f, "expected a space after the operation"),
            Self::MissingComma => write!(f, "expected ',' between address and size"),
            Self::BadAddress => write!(f, "address is not hexadecimal"),
            Self::BadSize => write!(f, "size is not a decimal integer"),
            Self::ZeroSize => write!(f, "size must be positive"),
        }
    }
}

/// A trace line that does not match `<op> <hex-addr>,<size>`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("trace line {line}: {kind}: {text:?}")]
pub struct TraceFormatError {
    /// 1-based line number in the trace, or 0 when parsed outside a reader.
    pub line: usize,
    /// The offending line with surrounding whitespace removed.
    pub text: String,
    /// Classification of the problem.
    pub kind: TraceFormatKind,
}

impl TraceFormatError {
    /// Creates an error for `text` with no line number attached.
    pub fn new(kind: TraceFormatKind, text: &str) -> Self {
        Self {
            line: 0,
            text: text.to_owned(),
            kind,
        }
    }

    /// Attaches the 1-based line number the record was read from.
    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// Errors that stop a replay before end of input.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// The run could not be set up.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading the trace failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A record did not match the trace grammar.
    #[error(transparent)]
    Format(#[from] TraceFormatError),

    /// Writing verbose output failed.
    #[error("failed to write verbose output: {0}")]
    Verbose(#[source] io::Error),
}
