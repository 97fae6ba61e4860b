//! First-run setup validation
//!
//! Checks what a user typed into a setup form before anything is saved.

use openaudio_api::{Appliance, DeviceId, OpenAudioClient};
use serde::{Deserialize, Serialize};

use crate::config::{host_valid, parse_scan_interval, HubConfig};
use crate::error::{Result, SdkError};

/// Raw setup form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupInput {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    /// Seconds, as typed; the default interval applies when absent
    #[serde(default)]
    pub scan_interval: Option<String>,
}

/// A setup that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSetup {
    /// Display title for the connection, the first device id
    pub title: String,
    pub device_ids: Vec<DeviceId>,
    pub config: HubConfig,
}

/// Validate a setup form against a live appliance
///
/// In order: host syntax ([`SdkError::CannotConnect`]), scan interval
/// ([`SdkError::InvalidConfiguration`]), reachability
/// ([`SdkError::CannotConnect`]), then the device list.
pub fn validate_setup(input: &SetupInput) -> Result<ValidatedSetup> {
    validate_setup_with(input, OpenAudioClient::new)
}

/// [`validate_setup`] with a custom way to reach the appliance at an address
pub fn validate_setup_with<A, F>(input: &SetupInput, connect: F) -> Result<ValidatedSetup>
where
    A: Appliance,
    F: FnOnce(String) -> A,
{
    if !host_valid(&input.host) {
        tracing::debug!("Rejecting malformed host {:?}", input.host);
        return Err(SdkError::CannotConnect(input.host.clone()));
    }

    let mut config = HubConfig::new(input.host.clone());
    config.port = input.port;
    if let Some(interval) = &input.scan_interval {
        config.scan_interval = parse_scan_interval(interval)?;
    }

    let appliance = connect(config.address());
    if !appliance.can_connect() {
        tracing::error!("Failed to reach OpenAudio amplifier at {}", config.address());
        return Err(SdkError::CannotConnect(config.address()));
    }
    tracing::debug!("Successfully reached the OpenAudio amplifier on the network");

    let device_ids = appliance.get_devices()?;
    let title = device_ids
        .first()
        .map(|id| id.to_string())
        .unwrap_or_else(|| input.host.clone());
    tracing::debug!("OpenAudio devices: {:?}. Registering with {}", device_ids, title);

    Ok(ValidatedSetup {
        title,
        device_ids,
        config,
    })
}
