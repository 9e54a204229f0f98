//! Trace-driven set-associative cache simulator library.
//!
//! This crate replays a valgrind-style memory trace against a configurable cache and
//! counts hits, misses, and evictions. It is organised as follows:
//! 1. **Cache:** Address decoding, the flat line store, and the LRU replacement engine.
//! 2. **Trace:** The `<op> <hex-addr>,<size>` record grammar and a line-oriented reader.
//! 3. **Simulation:** The replay loop that expands records into block-sized accesses.
//! 4. **Configuration and statistics:** Geometry validation and the final totals.
//!
//! # Examples
//!
//! ```
//! use csim_core::{Config, Replayer};
//!
//! let config = Config { set_index_bits: 4, associativity: 1, block_offset_bits: 4, verbose: false };
//! let trace = "L 10,1\nM 20,1\nL 22,1\nS 18,1\nL 110,1\n";
//!
//! let stats = Replayer::new(&config)?.replay(trace.as_bytes())?;
//! assert_eq!(stats.summary_line(), "hits:3 misses:3 evictions:1");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Address decoding, the line store, and the replacement engine.
pub mod cache;
/// Error types shared across the crate.
pub mod common;
/// Simulator configuration (defaults, validation, JSON loading).
pub mod config;
/// Replay loop and file entry points.
pub mod sim;
/// Hit/miss/eviction totals and summary formatting.
pub mod stats;
/// Trace record grammar and reader.
pub mod trace;

/// Cache simulator over a flat array of lines; use `CacheSim::new` with a validated geometry.
pub use crate::cache::CacheSim;
/// Validated cache geometry; obtain one from `Config::geometry`.
pub use crate::cache::geometry::Geometry;
/// Root configuration type.
pub use crate::config::Config;
/// Trace replayer driving a `CacheSim`.
pub use crate::sim::replay::Replayer;
/// Run totals returned by the replayer.
pub use crate::stats::CacheStats;
