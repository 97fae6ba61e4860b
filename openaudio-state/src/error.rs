//! Error types for openaudio-state

use std::fmt;

use openaudio_api::{ApiError, DeviceId, InputId, ZoneId};

/// Result type for openaudio-state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Which fetch of a poll cycle failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep {
    Devices,
    Zones,
    Inputs,
    InputConfig(InputId),
}

impl fmt::Display for PollStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollStep::Devices => write!(f, "device info"),
            PollStep::Zones => write!(f, "zone info"),
            PollStep::Inputs => write!(f, "input info"),
            PollStep::InputConfig(id) => write!(f, "input config for {}", id),
        }
    }
}

/// Errors that can occur while polling or querying the topology
#[derive(Debug)]
pub enum StateError {
    /// A poll cycle was aborted by a failed appliance call
    Poll { step: PollStep, source: ApiError },

    /// Device not present in the store
    DeviceNotFound(DeviceId),

    /// Zone not present under any device
    ZoneNotFound(ZoneId),

    /// Input not present under any device
    InputNotFound(InputId),
}

impl StateError {
    /// HTTP status of the failed call, for poll failures that carry one
    pub fn status(&self) -> Option<u16> {
        match self {
            StateError::Poll { source, .. } => source.status(),
            _ => None,
        }
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::Poll { step, source } => {
                write!(f, "Poll failed fetching {}: {}", step, source)
            }
            StateError::DeviceNotFound(id) => write!(f, "Device not found: {}", id),
            StateError::ZoneNotFound(id) => write!(f, "Zone not found: {}", id),
            StateError::InputNotFound(id) => write!(f, "Input not found: {}", id),
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StateError::Poll { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_error_display_and_status() {
        let err = StateError::Poll {
            step: PollStep::Zones,
            source: ApiError::UnexpectedStatus(503),
        };
        assert_eq!(
            format!("{}", err),
            "Poll failed fetching zone info: Unexpected response: HTTP 503"
        );
        assert_eq!(err.status(), Some(503));
    }

    #[test]
    fn test_input_config_step_names_the_input() {
        let step = PollStep::InputConfig(InputId::new("4"));
        assert_eq!(format!("{}", step), "input config for 4");
    }
}
