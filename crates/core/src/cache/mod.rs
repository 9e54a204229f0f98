//! Set-Associative Cache Simulator.
//!
//! This module implements the replacement engine: given an address and the current
//! access-counter value, it classifies the access as a hit, a cold miss, or an eviction
//! and updates the line store accordingly. Replacement is true LRU driven by the
//! access-counter timestamps stored in each line.

/// Geometry validation and address decoding.
pub mod geometry;

/// Flat line storage and victim selection.
pub mod store;

use self::geometry::Geometry;
use self::store::{CacheStore, Victim};
use crate::common::ConfigError;

/// Classification of a single block-sized access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// A valid line already held the tag.
    Hit,
    /// Miss filled into an invalid line.
    ColdMiss,
    /// Miss that overwrote the least recently used line of a full set.
    Eviction,
}

impl AccessOutcome {
    /// Whether the access missed (cold or eviction).
    #[inline]
    pub const fn is_miss(self) -> bool {
        !matches!(self, Self::Hit)
    }

    /// Token printed for this outcome in verbose traces.
    ///
    /// An eviction prints `evict` on its own; the miss it implies is not echoed.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::ColdMiss => "miss",
            Self::Eviction => "evict",
        }
    }
}

/// Cache simulator over a validated geometry.
#[derive(Debug)]
pub struct CacheSim {
    geometry: Geometry,
    store: CacheStore,
}

impl CacheSim {
    /// Creates an empty cache for `geometry`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Allocation`] if the line grid cannot be allocated.
    pub fn new(geometry: Geometry) -> Result<Self, ConfigError> {
        let store = CacheStore::new(&geometry)?;
        tracing::debug!(
            sets = geometry.num_sets(),
            ways = geometry.ways(),
            block_size = geometry.block_size(),
            "allocated cache"
        );
        Ok(Self { geometry, store })
    }

    /// The geometry this cache was built with.
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Read access to the line store.
    #[inline]
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Accesses the block containing `addr` at timestamp `now`.
    ///
    /// On a hit the line's timestamp moves to `now`. On a miss the block is filled into
    /// the first invalid way of its set or, if the set is full, over the way with the
    /// oldest timestamp.
    pub fn access(&mut self, addr: u64, now: u64) -> AccessOutcome {
        let decoded = self.geometry.decode(addr);

        if let Some(way) = self.store.lookup(decoded.set, decoded.tag) {
            self.store.touch(decoded.set, way, now);
            return AccessOutcome::Hit;
        }

        let victim = self.store.select_victim(decoded.set);
        self.store.install(decoded.set, victim.way(), decoded.tag, now);
        match victim {
            Victim::Cold(_) => AccessOutcome::ColdMiss,
            Victim::Evict(_) => AccessOutcome::Eviction,
        }
    }

    /// Checks whether the block containing `addr` is resident, without touching it.
    pub fn contains(&self, addr: u64) -> bool {
        let decoded = self.geometry.decode(addr);
        self.store.lookup(decoded.set, decoded.tag).is_some()
    }

    /// Tags of the valid lines in `set`, in way order.
    pub fn resident_tags(&self, set: usize) -> Vec<u64> {
        self.store
            .set(set)
            .iter()
            .filter(|line| line.valid)
            .map(|line| line.tag)
            .collect()
    }

    /// Invalidates every line, returning the cache to its initial state.
    pub fn flush(&mut self) {
        self.store.clear();
    }
}
