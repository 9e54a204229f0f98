//! Cache Geometry and Address Decoding.
//!
//! A geometry is the triple `(s, E, b)`: `2^s` sets, `E` ways per set, and `2^b`-byte
//! blocks. It is validated once on construction; afterwards every address splits into
//!
//! ```text
//!   63                      s+b          b           0
//!  +-------------------------+-----------+------------+
//!  |           tag           | set index | block off. |
//!  +-------------------------+-----------+------------+
//! ```
//!
//! with plain shifts and masks and no error path.

use crate::common::ConfigError;

/// The three fields of a decoded address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddress {
    /// All address bits above the set index.
    pub tag: u64,
    /// Which set the address maps to, in `0..num_sets`.
    pub set: usize,
    /// Byte within the block, in `0..block_size`.
    pub offset: u64,
}

/// Validated, immutable cache geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    set_index_bits: u32,
    block_offset_bits: u32,
    ways: usize,
    num_sets: usize,
}

impl Geometry {
    /// Builds a geometry of `2^set_index_bits` sets, `ways` lines per set, and
    /// `2^block_offset_bits`-byte blocks.
    ///
    /// Zero set bits (a single, fully associative set) and zero block bits (one-byte
    /// blocks) are accepted here; the stricter positivity rule for user input lives in
    /// [`Config::geometry`](crate::config::Config::geometry).
    ///
    /// # Errors
    ///
    /// * [`ConfigError::Associativity`] if `ways` is zero.
    /// * [`ConfigError::GeometryTooWide`] if `s + b >= 64`, leaving no tag bits.
    /// * [`ConfigError::GridTooLarge`] if `ways * 2^s` overflows `usize`.
    pub fn new(set_index_bits: u32, ways: usize, block_offset_bits: u32) -> Result<Self, ConfigError> {
        if ways == 0 {
            return Err(ConfigError::Associativity);
        }

        let total = set_index_bits.saturating_add(block_offset_bits);
        if total >= u64::BITS {
            return Err(ConfigError::GeometryTooWide { total });
        }

        let too_large = ConfigError::GridTooLarge {
            ways,
            set_index_bits,
        };
        let Some(num_sets) = 1usize.checked_shl(set_index_bits) else {
            return Err(too_large);
        };
        if num_sets.checked_mul(ways).is_none() {
            return Err(too_large);
        }

        Ok(Self {
            set_index_bits,
            block_offset_bits,
            ways,
            num_sets,
        })
    }

    /// Number of set index bits (`s`).
    #[inline]
    pub const fn set_index_bits(&self) -> u32 {
        self.set_index_bits
    }

    /// Number of block offset bits (`b`).
    #[inline]
    pub const fn block_offset_bits(&self) -> u32 {
        self.block_offset_bits
    }

    /// Associativity (`E`).
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets, `2^s`.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Block size in bytes, `2^b`.
    #[inline]
    pub const fn block_size(&self) -> u64 {
        1 << self.block_offset_bits
    }

    /// Total number of lines, `E * 2^s`. Cannot overflow after construction.
    #[inline]
    pub const fn line_count(&self) -> usize {
        self.num_sets * self.ways
    }

    /// Splits `addr` into tag, set index, and block offset.
    #[inline]
    pub const fn decode(&self, addr: u64) -> DecodedAddress {
        let set_mask = (self.num_sets as u64) - 1;
        DecodedAddress {
            tag: addr >> (self.set_index_bits + self.block_offset_bits),
            set: ((addr >> self.block_offset_bits) & set_mask) as usize,
            offset: addr & (self.block_size() - 1),
        }
    }

    /// Aligns `addr` down to the start of its block.
    #[inline]
    pub const fn block_base(&self, addr: u64) -> u64 {
        addr & !(self.block_size() - 1)
    }
}
