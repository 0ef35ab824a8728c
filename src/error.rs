//! CLI error type and exit-code mapping.

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level CLI error.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 2: Misuse of shell command (clap handles this itself)
    /// - 64-78: sysexits.h categories
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 78, // EX_CONFIG
            CliError::Io(_) => 74,     // EX_IOERR
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_with_ex_config() {
        let err = CliError::Config("missing file".into());
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn config_error_conversion_keeps_message() {
        let err: CliError = ConfigError::BadSuffix {
            path: "./config/redis_cache.conf".into(),
            found: 'x',
        }
        .into();
        assert!(err.to_string().contains("expected a digit"));
    }
}
