//! Run a queueing network described in a TOML file and print per-station statistics.
//!
//! ```bash
//! cargo run --example network -- demos/tandem.toml
//! cargo run --example network -- demos/network.toml --events 5000 --json
//! RUST_LOG=queuenet=trace cargo run --example network -- demos/tandem.toml --events 20
//! ```

use clap::Parser;
use queuenet::{NetworkConfig, NetworkSimulation};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Queueing network simulator
///
/// Single-threaded and reproducible: the same file and seeds always give the same report.
#[derive(Parser, Debug)]
#[command(name = "queuenet")]
#[command(version, about, long_about = None)]
struct Args {
    /// Network description to simulate
    config: PathBuf,

    /// Override the event budget from the file
    #[arg(short = 'e', long)]
    events: Option<u64>,

    /// Override the seeds from the file
    #[arg(short = 's', long, value_delimiter = ',')]
    seeds: Option<Vec<u64>>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn run(args: Args) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = NetworkConfig::load(&args.config)?;
    if let Some(events) = args.events {
        config.events = events;
    }
    if let Some(seeds) = args.seeds {
        config.seeds = seeds;
    }

    let report = NetworkSimulation::new(config.into_description()?)?.run()?;
    if args.json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(report.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,queuenet=info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}
