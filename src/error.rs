/// Error types for talking to the BDL API and rendering its data
use thiserror::Error;

/// Errors raised while fetching or decoding upstream statistics
#[derive(Error, Debug)]
pub enum BdlError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// Client could not be built from the configuration
    #[error("Invalid client configuration: {0}")]
    ClientSetup(String),

    /// Response body was not the expected JSON document
    #[error("Failed to parse API response: {0}")]
    ResponseParse(String),
}

/// Errors raised while drawing a chart
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),

    #[error("Nothing to draw: {0}")]
    Empty(&'static str),
}

/// Invalid environment configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Type alias for Results using BdlError
pub type Result<T> = std::result::Result<T, BdlError>;
