//! Cache simulator CLI.
//!
//! This binary replays a valgrind memory trace against a set-associative cache and
//! prints the totals. It performs:
//! 1. **Argument parsing:** `-s <s> -E <E> -b <b> -t <tracefile>` plus `-v` and `-h`.
//! 2. **Validation:** Non-positive geometry or an unreadable trace exits with status 1.
//! 3. **Replay:** Optional per-access verbose lines, then `hits:<h> misses:<m> evictions:<e>`.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use csim_core::common::{ConfigError, ReplayError};
use csim_core::config::Config;
use csim_core::sim::replay_file;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative cache simulator for valgrind memory traces",
    override_usage = "csim [-hv] -s <s> -E <E> -b <b> -t <tracefile>",
    long_about = "Replays a valgrind (lackey) data trace against a cache of 2^s sets, E lines per set and 2^b-byte blocks, using LRU replacement.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 8 -E 2 -b 4 -t traces/trans.trace\n\nSet RUST_LOG=csim_core=trace for structured per-access logs on stderr."
)]
struct Cli {
    /// Display trace info: one line per block access.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set index bits (S = 2^s is the number of sets).
    #[arg(short = 's', value_name = "s")]
    set_index_bits: u32,

    /// Associativity (number of lines per set).
    #[arg(short = 'E', value_name = "E")]
    associativity: usize,

    /// Number of block bits (B = 2^b is the block size).
    #[arg(short = 'b', value_name = "b")]
    block_offset_bits: u32,

    /// Name of the valgrind trace to replay.
    #[arg(short = 't', value_name = "tracefile")]
    trace: PathBuf,

    /// Print the totals as a JSON object instead of the summary line.
    #[arg(long)]
    json: bool,
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// The message printed for a configuration error before exiting.
fn config_error_message(err: &ConfigError) -> String {
    match err {
        ConfigError::SetIndexBits => "Error: set index bits.".to_string(),
        ConfigError::Associativity => "Error: associativity.".to_string(),
        ConfigError::BlockOffsetBits => "Error: number of block bits.".to_string(),
        ConfigError::TraceSource { .. } => format!("Error: opening file ({err})"),
        other => format!("Error: {other}"),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = Config {
        set_index_bits: cli.set_index_bits,
        associativity: cli.associativity,
        block_offset_bits: cli.block_offset_bits,
        verbose: cli.verbose,
    };
    tracing::debug!(?config, trace = %cli.trace.display(), "starting replay");

    let stats = match replay_file(&cli.trace, &config) {
        Ok(stats) => stats,
        Err(ReplayError::Config(e)) => {
            eprintln!("{}", config_error_message(&e));
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if cli.json {
        match stats.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    } else {
        println!("{}", stats.summary_line());
    }
}
