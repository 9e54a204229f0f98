//! Configuration system for the cache simulator.
//!
//! This module defines the run configuration. It provides:
//! 1. **Defaults:** The geometry used when a field is omitted.
//! 2. **Structure:** The `(s, E, b)` geometry plus the verbose switch.
//! 3. **Validation:** Conversion into an immutable [`Geometry`], rejecting
//!    non-positive values before any memory is allocated.
//!
//! Configuration is built by the CLI from `-s/-E/-b/-v` or deserialized from JSON.
//! The trace source is not part of it.

use serde::Deserialize;

use crate::cache::geometry::Geometry;
use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Default set index bits (16 sets).
    pub const SET_INDEX_BITS: u32 = 4;

    /// Default associativity (direct-mapped).
    pub const ASSOCIATIVITY: usize = 1;

    /// Default block offset bits (16-byte blocks).
    pub const BLOCK_OFFSET_BITS: u32 = 4;
}

/// Run configuration.
///
/// # Examples
///
/// ```
/// use csim_core::config::Config;
///
/// let config = Config::from_json(r#"{ "set_index_bits": 5, "associativity": 2, "block_offset_bits": 6 }"#)?;
/// let geometry = config.geometry()?;
/// assert_eq!(geometry.num_sets(), 32);
/// assert_eq!(geometry.block_size(), 64);
/// assert!(!config.verbose);
/// # Ok::<(), csim_core::common::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of set index bits `s`; the cache has `2^s` sets.
    pub set_index_bits: u32,
    /// Number of lines per set `E`.
    pub associativity: usize,
    /// Number of block offset bits `b`; blocks are `2^b` bytes.
    pub block_offset_bits: u32,
    /// Print one line per block access while replaying.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            set_index_bits: defaults::SET_INDEX_BITS,
            associativity: defaults::ASSOCIATIVITY,
            block_offset_bits: defaults::BLOCK_OFFSET_BITS,
            verbose: false,
        }
    }
}

impl Config {
    /// Parses a configuration from a JSON object; omitted fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON or unknown fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the geometry fields.
    ///
    /// All three values must be positive, and `s + b` must leave at least one tag bit.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] variant naming the first offending field.
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        if self.set_index_bits == 0 {
            return Err(ConfigError::SetIndexBits);
        }
        if self.associativity == 0 {
            return Err(ConfigError::Associativity);
        }
        if self.block_offset_bits == 0 {
            return Err(ConfigError::BlockOffsetBits);
        }
        Geometry::new(
            self.set_index_bits,
            self.associativity,
            self.block_offset_bits,
        )
    }
}
