//! Error types for the REST client

use thiserror::Error;

/// Errors that can occur while talking to the appliance
#[derive(Debug, Error)]
pub enum RestError {
    /// Transport failure: connection refused, timeout, DNS, broken body stream
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The appliance answered with a non-2xx status
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The response body was not the JSON we expected
    #[error("JSON parsing error: {0}")]
    Parse(String),
}
