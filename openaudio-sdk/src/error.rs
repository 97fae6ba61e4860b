use std::path::PathBuf;
use std::time::Duration;

use openaudio_api::{DeviceId, InputId, ZoneId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdkError {
    /// Setup-time failure: bad host or the appliance does not answer
    #[error("Cannot connect to OpenAudio at {0}")]
    CannotConnect(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Any non-2xx status or transport failure of a direct appliance call
    #[error("Error communicating with API: {0}")]
    Unexpected(#[from] openaudio_api::ApiError),

    /// A poll cycle failed; previously known topology is kept
    #[error("Error communicating with API: {0}")]
    Poll(#[from] openaudio_state::StateError),

    #[error("Poll cycle exceeded {0:?}")]
    Timeout(Duration),

    #[error("Volume must be a fraction between 0.0 and 1.0, got {0}")]
    InvalidVolume(f64),

    #[error("Device not found: {0}")]
    DeviceNotFound(DeviceId),

    #[error("Zone not found: {0}")]
    ZoneNotFound(ZoneId),

    #[error("Input not found: {0}")]
    InputNotFound(InputId),

    #[error("Config file {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file is not valid JSON: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

impl SdkError {
    /// HTTP status behind the failure, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Unexpected(e) => e.status(),
            SdkError::Poll(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;
