//! CLI entry point - the composition root.
//!
//! Reads the port suffix from the bench configuration, resolves the
//! forceful-reclaim strategy once, and runs the sequential port sweep.

use clap::Parser;

use bench_stop::cli::Cli;
use bench_stop::config::read_port_suffix;
use bench_stop::error::CliError;
use bench_stop::reclaim::ReclaimStrategy;
use bench_stop::stopper::{PortStopper, RedisCliClient};

fn main() {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG still wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    // Config is read before any socket is touched; a missing file aborts
    // the run without probing a single port.
    let suffix = read_port_suffix(&cli.config)?;
    tracing::debug!(%suffix, "resolved port suffix");

    let strategy = ReclaimStrategy::detect();
    tracing::debug!(?strategy, "resolved reclaim strategy");

    let shutdown = RedisCliClient;
    PortStopper::new(&shutdown, &strategy).stop_all(suffix);

    Ok(())
}
