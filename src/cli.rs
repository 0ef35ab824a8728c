//! Command-line definition for bench-stop.

use std::path::PathBuf;

use clap::Parser;

use crate::config::DEFAULT_CONFIG_PATH;

/// Shut down the bench services listening on the configured port family.
///
/// Runs without arguments from the bench directory; the flags below are
/// optional overrides.
#[derive(Parser)]
#[command(name = "bench-stop")]
#[command(about = "Stop bench service processes on the configured ports")]
#[command(version)]
pub struct Cli {
    /// Path to the Redis cache configuration file
    #[arg(long = "config", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_need_no_arguments() {
        let cli = Cli::parse_from(["bench-stop"]);
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.verbose);
    }

    #[test]
    fn config_override_and_verbose() {
        let cli = Cli::parse_from(["bench-stop", "--config", "/tmp/redis.conf", "-v"]);
        assert_eq!(cli.config, PathBuf::from("/tmp/redis.conf"));
        assert!(cli.verbose);
    }
}
