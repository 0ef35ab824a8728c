//! Port-suffix extraction from the bench Redis cache configuration.
//!
//! The configuration is line-oriented with whitespace-delimited key/value
//! pairs; only the `port` line is consulted. The final character of its
//! value identifies which service instance's ports this bench uses.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

/// Where the bench keeps its Redis cache configuration, relative to the
/// bench directory the tool must be invoked from.
pub const DEFAULT_CONFIG_PATH: &str = "./config/redis_cache.conf";

/// Suffix used when the configuration carries no `port` line.
const DEFAULT_SUFFIX: char = '0';

/// Errors from reading the bench configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be opened or read.
    #[error(
        "cannot read {path}: {source}\nRun bench-stop from the bench directory containing `config/`."
    )]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The `port` value does not end in a digit, so no valid port can be
    /// built from it.
    #[error("port value in {path} ends in {found:?}, expected a digit")]
    BadSuffix { path: String, found: char },
}

/// Read the port suffix digit from the configuration file at `path`.
///
/// A missing file is fatal; a missing `port` line (or one with an empty
/// value) falls back to `'0'`. The suffix must be an ASCII digit because
/// it is later combined into port numbers handed to external commands.
pub fn read_port_suffix(path: &Path) -> Result<char, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    let Some(value) = port_value(&contents) else {
        debug!(path = %path.display(), "no `port` line in config, using default suffix");
        return Ok(DEFAULT_SUFFIX);
    };

    let Some(suffix) = value.chars().last() else {
        debug!(path = %path.display(), "`port` line has empty value, using default suffix");
        return Ok(DEFAULT_SUFFIX);
    };

    if !suffix.is_ascii_digit() {
        return Err(ConfigError::BadSuffix {
            path: path.display().to_string(),
            found: suffix,
        });
    }

    Ok(suffix)
}

/// Value of the last `port` line, if any. Later lines win, matching how
/// Redis itself treats repeated directives.
fn port_value(contents: &str) -> Option<&str> {
    let mut value = None;
    for line in contents.lines() {
        let mut fields = line.split_whitespace();
        if fields.next() == Some("port") {
            value = Some(fields.next().unwrap_or(""));
        }
    }
    value
}
