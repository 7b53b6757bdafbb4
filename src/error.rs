//! Error types for k2fw.

use thiserror::Error;

/// Error type for k2fw operations.
///
/// A denied packet is never an error: evaluation returns `Ok(false)` for
/// addresses no rule covers. Every variant here describes malformed input.
#[derive(Error, Debug)]
pub enum Error {
    /// Port outside `0..=65535`
    #[error("invalid port: {0} (expected 0-65535)")]
    InvalidPort(u64),

    /// Port field that is not a number
    #[error("invalid port: '{0}'")]
    MalformedPort(String),

    /// Port range with its bounds reversed
    #[error("invalid port range: {min}-{max}")]
    InvalidPortRange { min: u32, max: u32 },

    /// Invalid IPv4 address
    #[error("invalid IP address: {0}")]
    InvalidIpAddress(String),

    /// Address range with its bounds reversed
    #[error("invalid IP range: {min}-{max}")]
    InvalidIpRange { min: String, max: String },

    /// Unrecognized direction/protocol pairing
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// Malformed row in a rule source
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Global firewall not installed yet
    #[error("firewall not initialized")]
    NotInitialized,

    /// Global firewall already installed
    #[error("firewall already initialized")]
    AlreadyInitialized,
}

/// Result type alias for k2fw operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Attach a 1-based line number to an error raised while parsing one row.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Error::Parse { line: 0, message } => Error::Parse { line, message },
            Error::Parse { .. } | Error::Io(_) => self,
            other => Error::Parse {
                line,
                message: other.to_string(),
            },
        }
    }
}
