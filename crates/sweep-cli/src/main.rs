#![deny(unsafe_code, missing_docs, unreachable_pub)]

//! Command-line driver that runs one cleaning simulation and reports its
//! metrics.

mod cli;
mod report;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use sweep_engine::SimulationRun;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::report::Report;

/// Entry point for the Sweep command-line interface.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.to_config();
    let mut run = SimulationRun::new(config).context("invalid run configuration")?;
    let terminal = run
        .run_to_completion()
        .context("simulation aborted")?;
    info!(seed = run.seed(), "run complete");

    let report = Report::new(&run, &terminal, cli.history);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if cli.json {
        serde_json::to_writer_pretty(&mut out, &report).context("failed to encode report")?;
        writeln!(out)?;
    } else {
        report.write_text(&mut out)?;
    }
    Ok(())
}

/// Install the fmt subscriber on stderr. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
