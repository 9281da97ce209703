//! logdecode CLI: decode, classify and aggregate EVM event log batches.
//!
//! # Commands
//! ```text
//! logdecode decode     -i <logs.json> -o <out.json> [-n <limit>]
//! logdecode signatures [--json]
//! logdecode classify   <address>... [--json]
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use logdecode_observability::init_tracing;
use std::path::PathBuf;

mod cmd_classify;
mod cmd_decode;
mod cmd_signatures;
mod config;
mod input;

use config::CliConfig;

#[derive(Parser)]
#[command(
    name = "logdecode",
    about = "Multi-protocol blockchain event log decoder",
    long_about = "
logdecode: decode raw EVM event logs into named parameters, classify each
log by the protocol that emitted it, and summarise a batch by protocol type.

ENVIRONMENT VARIABLES:
  RUST_LOG    Log filter directives; overrides the configured log level
",
    version
)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file (log, datasets, batch sections)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Signature dataset (YAML or JSON); overrides the config file
    #[arg(long, global = true)]
    signatures: Option<PathBuf>,

    /// Token / protocol metadata dataset (YAML or JSON); overrides the config file
    #[arg(long, global = true)]
    metadata: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a batch of logs and write the grouped output
    Decode {
        /// Input JSON: an array of logs or an object with a `logs` array
        #[arg(short, long, default_value = "sample.json")]
        input: PathBuf,
        /// Path to write decoded output JSON
        #[arg(short, long, default_value = "decoded_events_output.json")]
        out: PathBuf,
        /// Only process the first N logs
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Decode on the calling thread only
        #[arg(long)]
        sequential: bool,
        /// Number of parallel Rayon threads (0 = use default)
        #[arg(long)]
        threads: Option<usize>,
    },

    /// List the registered event signatures
    Signatures {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify contract addresses by protocol
    Classify {
        /// Contract addresses (any case)
        #[arg(required = true)]
        addresses: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.log = config.log.with_level("debug");
    }
    if let Some(path) = cli.signatures {
        config.datasets.signatures = Some(path);
    }
    if let Some(path) = cli.metadata {
        config.datasets.metadata = Some(path);
    }
    init_tracing(&config.log);

    match cli.command {
        Commands::Decode {
            input,
            out,
            limit,
            sequential,
            threads,
        } => {
            if sequential {
                config.batch.parallel = false;
            }
            if let Some(n) = threads {
                config.batch.concurrency = n;
            }
            cmd_decode::run(&config, &input, &out, limit)
        }

        Commands::Signatures { json } => cmd_signatures::run(&config, json),

        Commands::Classify { addresses, json } => cmd_classify::run(&config, &addresses, json),
    }
}
