mod deframe;
mod diffdecode;
mod info;

use std::io::stderr;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use lrpt::deframing::ResyncOpts;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Resynchronization tuning.
#[derive(Args, Debug, Clone)]
struct SyncArgs {
    /// Number of sync word repeats, after the first, required to acquire sync.
    #[arg(long, default_value_t = ResyncOpts::DEFAULT_DEPTH)]
    depth: usize,

    /// Number of frame periods to look ahead for a sync word before sync is
    /// considered lost.
    #[arg(long, default_value_t = ResyncOpts::DEFAULT_LOOKAHEAD)]
    lookahead: usize,

    /// Number of frame periods to skip after a failed sync search. Defaults to
    /// depth - 1.
    #[arg(long)]
    retry_periods: Option<usize>,
}

impl SyncArgs {
    fn opts(&self) -> ResyncOpts {
        let opts = ResyncOpts::new()
            .with_depth(self.depth)
            .with_lookahead(self.lookahead);
        match self.retry_periods {
            Some(periods) => opts.with_retry_periods(periods),
            None => opts,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Remove sync words from, and de-interleave, a raw soft symbol file.
    ///
    /// Input is the 8-bit soft symbols produced by the demodulator. Output is the
    /// de-interleaved data symbols, ready for Viterbi decoding.
    Deframe {
        #[command(flatten)]
        sync: SyncArgs,

        /// Delete output file if it already exists
        #[arg(long, action)]
        clobber: bool,

        /// Output file path.
        #[arg(short, long, default_value = "deframed.s", value_name = "path")]
        output: PathBuf,

        /// Input raw soft symbol file.
        input: PathBuf,
    },
    /// Differentially decode a file of signed I/Q soft symbol pairs.
    ///
    /// For satellites transmitting differential offset-QPSK. The decoder state is
    /// carried from one chunk to the next, so chunk size does not affect the output.
    Diffdecode {
        /// Number of symbols to decode at a time.
        #[arg(long, default_value_t = 16_384)]
        chunk_size: usize,

        /// Delete output file if it already exists
        #[arg(long, action)]
        clobber: bool,

        /// Output file path.
        #[arg(short, long, default_value = "diffdecoded.s", value_name = "path")]
        output: PathBuf,

        /// Input soft symbol file.
        input: PathBuf,
    },
    /// Show sync statistics for a raw soft symbol file.
    Info {
        #[command(flatten)]
        sync: SyncArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: info::Format,

        /// Input raw soft symbol file.
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("LRPT_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Deframe {
            sync,
            clobber,
            output,
            input,
        } => {
            if !clobber && output.exists() {
                bail!("{output:?} exists; use --clobber");
            }
            let opts = sync.opts();
            debug!("{opts:?}");
            info!("deframing {input:?} to {output:?}");
            deframe::deframe(input, output, &opts)
        }
        Commands::Diffdecode {
            chunk_size,
            clobber,
            output,
            input,
        } => {
            if !clobber && output.exists() {
                bail!("{output:?} exists; use --clobber");
            }
            info!("decoding {input:?} to {output:?}");
            diffdecode::diffdecode(input, output, *chunk_size)
        }
        Commands::Info {
            sync,
            format,
            input,
        } => info::info(input, format, sync.opts()),
    }
}
