//! Cache Line Store.
//!
//! Owns every line of the cache in one contiguous allocation. Line `(set, way)` lives
//! at index `set * ways + way`, so a set is a contiguous slice scanned in way order.
//! The store answers lookups and victim queries; deciding hit versus miss is the
//! caller's job.

use super::geometry::Geometry;
use crate::common::ConfigError;

/// One cache line: the tag it holds, whether it holds anything, and when it was last used.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the resident block. Meaningless while `valid` is false.
    pub tag: u64,
    /// Whether the line holds a block.
    pub valid: bool,
    /// Access-counter value of the most recent fill or hit.
    pub last_used: u64,
}

/// The line chosen to receive a block on a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Victim {
    /// An invalid line; filling it evicts nothing.
    Cold(usize),
    /// The least recently used valid line of a full set.
    Evict(usize),
}

impl Victim {
    /// The way index of the chosen line.
    #[inline]
    pub const fn way(self) -> usize {
        match self {
            Self::Cold(way) | Self::Evict(way) => way,
        }
    }
}

/// Flat `sets x ways` grid of cache lines.
#[derive(Debug)]
pub struct CacheStore {
    lines: Vec<CacheLine>,
    ways: usize,
}

impl CacheStore {
    /// Allocates an all-invalid grid sized for `geometry`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Allocation`] if the grid cannot be allocated.
    pub fn new(geometry: &Geometry) -> Result<Self, ConfigError> {
        let count = geometry.line_count();
        let mut lines = Vec::new();
        lines
            .try_reserve_exact(count)
            .map_err(|_| ConfigError::Allocation { lines: count })?;
        lines.resize(count, CacheLine::default());

        Ok(Self {
            lines,
            ways: geometry.ways(),
        })
    }

    /// The lines of `set`, in way order.
    ///
    /// # Panics
    ///
    /// Panics if `set` is out of range. Sets produced by
    /// [`Geometry::decode`] are always in range.
    #[inline]
    pub fn set(&self, set: usize) -> &[CacheLine] {
        let base = set * self.ways;
        &self.lines[base..base + self.ways]
    }

    #[inline]
    fn line_mut(&mut self, set: usize, way: usize) -> &mut CacheLine {
        &mut self.lines[set * self.ways + way]
    }

    /// Way holding a valid line tagged `tag` in `set`, if any.
    pub fn lookup(&self, set: usize, tag: u64) -> Option<usize> {
        self.set(set)
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Chooses the line of `set` that a missing block should go into.
    ///
    /// The first invalid line in way order wins outright. In a full set the line with
    /// the smallest `last_used` is chosen; on a tie the lower way wins.
    pub fn select_victim(&self, set: usize) -> Victim {
        let lines = self.set(set);
        if let Some(way) = lines.iter().position(|line| !line.valid) {
            return Victim::Cold(way);
        }
        let way = lines
            .iter()
            .enumerate()
            .min_by_key(|(_, line)| line.last_used)
            .map_or(0, |(way, _)| way);
        Victim::Evict(way)
    }

    /// Marks `(set, way)` as used at `now`.
    #[inline]
    pub fn touch(&mut self, set: usize, way: usize, now: u64) {
        self.line_mut(set, way).last_used = now;
    }

    /// Overwrites `(set, way)` with a valid line for `tag` used at `now`.
    #[inline]
    pub fn install(&mut self, set: usize, way: usize, tag: u64, now: u64) {
        *self.line_mut(set, way) = CacheLine {
            tag,
            valid: true,
            last_used: now,
        };
    }

    /// Invalidates every line.
    pub fn clear(&mut self) {
        self.lines.fill(CacheLine::default());
    }
}
