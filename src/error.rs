// Error types module

use thiserror::Error;

/// Centralized error type for the minifier
///
/// Only configuration loading and gate construction can fail. The engine
/// and the per-response decision never return errors: malformed markup is
/// passed through and unusable override values are treated as absent.
#[derive(Error, Debug)]
pub enum MinifyError {
    /// Configuration errors (invalid YAML, missing env vars, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// An exclusion pattern that is not a valid regular expression
    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Reading a configuration file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
