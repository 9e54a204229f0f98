//! Trace record grammar.
//!
//! A record is one line of the form `<op> <hex-addr>,<size>`:
//!
//! ```text
//! L 7ff000398,8
//! ```
//!
//! where `op` is `L` (load), `S` (store) or `M` (modify), the address is unsigned
//! hexadecimal without a `0x` prefix, and the size is a positive decimal byte count.
//! Anything else is a [`TraceFormatError`].

use std::fmt;
use std::str::FromStr;

use crate::common::{TraceFormatError, TraceFormatKind};

/// Memory operation of a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Data load.
    Load,
    /// Data store.
    Store,
    /// Load followed by a store to the same location.
    Modify,
}

impl Operation {
    /// Parses the single-letter operation code.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// The single-letter operation code.
    pub const fn as_char(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Whether each block access of this operation earns an extra hit for its write half.
    #[inline]
    pub const fn grants_bonus(self) -> bool {
        matches!(self, Self::Modify)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One parsed trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Kind of access.
    pub op: Operation,
    /// First byte accessed.
    pub addr: u64,
    /// Number of bytes accessed; always positive.
    pub size: u64,
}

impl TraceRecord {
    /// Creates a record.
    pub const fn new(op: Operation, addr: u64, size: u64) -> Self {
        Self { op, addr, size }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.op, self.addr, self.size)
    }
}

fn parse_hex(field: &str) -> Option<u64> {
    if !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(field, 16).ok()
}

fn parse_size(field: &str) -> Option<u64> {
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

impl FromStr for TraceRecord {
    type Err = TraceFormatError;

    /// Parses one record. Surrounding whitespace is ignored; the returned error has no
    /// line number attached.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let text = line.trim();
        let fail = |kind| TraceFormatError::new(kind, text);

        let mut chars = text.chars();
        let op_char = chars.next().ok_or_else(|| fail(TraceFormatKind::Truncated))?;
        let op = Operation::from_char(op_char)
            .ok_or_else(|| fail(TraceFormatKind::UnknownOperation(op_char)))?;

        let rest = chars.as_str();
        if rest.is_empty() {
            return Err(fail(TraceFormatKind::Truncated));
        }
        if !rest.starts_with(|c: char| c.is_ascii_whitespace()) {
            return Err(fail(TraceFormatKind::MissingSpace));
        }

        let fields = rest.trim_start();
        let (addr_field, size_field) = fields
            .split_once(',')
            .ok_or_else(|| fail(TraceFormatKind::MissingComma))?;

        if addr_field.is_empty() || size_field.is_empty() {
            return Err(fail(TraceFormatKind::Truncated));
        }
        let addr = parse_hex(addr_field).ok_or_else(|| fail(TraceFormatKind::BadAddress))?;
        let size = parse_size(size_field).ok_or_else(|| fail(TraceFormatKind::BadSize))?;
        if size == 0 {
            return Err(fail(TraceFormatKind::ZeroSize));
        }

        Ok(Self { op, addr, size })
    }
}
