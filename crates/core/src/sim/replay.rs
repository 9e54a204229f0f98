//! Trace Replay.
//!
//! The replayer feeds trace records through a [`CacheSim`]. Each record is expanded
//! into block-sized accesses starting at the block that contains its first byte:
//!
//! ```text
//!   base = addr & !(B - 1)
//!   accesses at base, base + B, base + 2B, ...  while offset < size
//! ```
//!
//! so a record touches `ceil(size / B)` blocks counted from `base`. For a misaligned
//! record this can differ from the blocks its byte range really spans; that is the
//! classification rule, not a bug to correct.
//!
//! All accesses of one record share a timestamp. The access counter advances once per
//! record, after the record's last access. A modify earns one extra hit per block
//! access, whatever the access itself was classified as.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::cache::CacheSim;
use crate::cache::geometry::Geometry;
use crate::common::{ConfigError, ReplayError};
use crate::config::Config;
use crate::stats::CacheStats;
use crate::trace::{TraceReader, TraceRecord};

/// Drives a cache with trace records and accumulates the totals.
#[derive(Debug)]
pub struct Replayer {
    cache: CacheSim,
    stats: CacheStats,
    clock: u64,
}

impl Replayer {
    /// Creates a replayer with an empty cache for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for invalid geometry or if the cache cannot be allocated.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_geometry(config.geometry()?)
    }

    /// Creates a replayer for an already-built geometry.
    ///
    /// Unlike [`Replayer::new`] this accepts single-set and one-byte-block geometries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Allocation`] if the cache cannot be allocated.
    pub fn with_geometry(geometry: Geometry) -> Result<Self, ConfigError> {
        Ok(Self {
            cache: CacheSim::new(geometry)?,
            stats: CacheStats::default(),
            clock: 0,
        })
    }

    /// Totals so far.
    #[inline]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The simulated cache.
    #[inline]
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }

    /// Number of records processed, which is also the next access timestamp.
    #[inline]
    pub const fn records_processed(&self) -> u64 {
        self.clock
    }

    /// Applies one record. When `verbose` is set, writes one
    /// `<op> <hex-addr> <hit|miss|evict>` line per block access.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Verbose`] if writing verbose output fails.
    pub fn step(
        &mut self,
        record: &TraceRecord,
        mut verbose: Option<&mut (dyn Write + '_)>,
    ) -> Result<(), ReplayError> {
        let geometry = *self.cache.geometry();
        let block_size = geometry.block_size();
        let base = geometry.block_base(record.addr);
        let now = self.clock;
        let bonus = record.op.grants_bonus();

        let mut offset = 0u64;
        while offset < record.size {
            let addr = base.wrapping_add(offset);
            let outcome = self.cache.access(addr, now);
            self.stats.record(outcome);
            if bonus {
                self.stats.record_bonus_hit();
            }

            tracing::trace!(op = %record.op, addr, ?outcome, now, "block access");
            if let Some(out) = verbose.as_deref_mut() {
                writeln!(out, "{} {:x} {}", record.op, addr, outcome.token())
                    .map_err(ReplayError::Verbose)?;
            }

            let Some(next) = offset.checked_add(block_size) else {
                break;
            };
            offset = next;
        }

        self.clock += 1;
        Ok(())
    }

    /// Replays every record from `reader`, returning the accumulated totals.
    ///
    /// # Errors
    ///
    /// Stops at the first malformed record ([`ReplayError::Format`]) or read failure
    /// ([`ReplayError::Io`]).
    pub fn replay<R: BufRead>(&mut self, reader: R) -> Result<CacheStats, ReplayError> {
        self.run(reader, None)
    }

    /// Like [`Replayer::replay`], also writing one verbose line per block access to `out`.
    ///
    /// # Errors
    ///
    /// As for [`Replayer::replay`], plus [`ReplayError::Verbose`] if `out` fails.
    pub fn replay_verbose<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        out: &mut W,
    ) -> Result<CacheStats, ReplayError> {
        self.run(reader, Some(out as &mut dyn Write))
    }

    fn run<R: BufRead>(
        &mut self,
        reader: R,
        mut verbose: Option<&mut (dyn Write + '_)>,
    ) -> Result<CacheStats, ReplayError> {
        for record in TraceReader::new(reader) {
            self.step(&record?, verbose.as_deref_mut())?;
        }
        if let Some(out) = verbose {
            out.flush().map_err(ReplayError::Verbose)?;
        }

        tracing::debug!(
            records = self.clock,
            hits = self.stats.hits,
            misses = self.stats.misses,
            evictions = self.stats.evictions,
            "replay finished"
        );
        Ok(self.stats)
    }
}

/// Replays the trace file at `path` with a fresh cache built from `config`.
///
/// The geometry is validated before the file is opened. With `config.verbose` set,
/// per-access lines go to stdout.
///
/// # Errors
///
/// * [`ReplayError::Config`] for invalid geometry or an unopenable trace.
/// * [`ReplayError::Format`] / [`ReplayError::Io`] from the replay itself.
pub fn replay_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<CacheStats, ReplayError> {
    let mut replayer = Replayer::new(config)?;

    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ConfigError::TraceSource {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    if config.verbose {
        let stdout = io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        replayer.replay_verbose(reader, &mut out)
    } else {
        replayer.replay(reader)
    }
}
