//! Derived playback state
//!
//! Everything here is a pure function of topology data: nothing is cached and
//! nothing is written back. Views are recomputed on every read, so they are
//! only as fresh as the last successful poll.
//!
//! ```rust,ignore
//! use openaudio_state::presentation::ZoneView;
//!
//! store.read(|topology| {
//!     for (device, zone) in topology.zones() {
//!         let view = ZoneView::resolve(device, zone, &topology.catalogue);
//!         println!("{}: {} ({:?})", view.name, view.state, view.source);
//!     }
//! });
//! ```

mod device;
mod input;
mod zone;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use device::{DeviceView, Diagnostic, DiagnosticValue, MANUFACTURER};
pub use input::{
    input_icon, input_source, input_source_list, input_state, InputKind, InputView,
    FALLBACK_INPUT_ICON, INPUT_FEATURES,
};
pub use zone::{
    source_to_input, zone_icon, zone_media_title, zone_source, zone_source_list, zone_state,
    ZoneView, ZONE_FEATURES,
};

/// Source label meaning "no input selected"
pub const NO_SOURCE: &str = "None";

/// Playback state shown for a zone or input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Playing,
    On,
    Off,
}

impl PlayerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerState::Playing => "playing",
            PlayerState::On => "on",
            PlayerState::Off => "off",
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Controls a presentation entity accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    SelectSource,
    VolumeSet,
    TurnOn,
    TurnOff,
}

/// Integer percentage to a 0.0-1.0 fraction
pub fn volume_fraction(volume: u8) -> f64 {
    f64::from(volume) / 100.0
}

/// 0.0-1.0 fraction to an integer percentage, truncating
///
/// A tiny epsilon absorbs float error so that `percentage(v / 100)` is `v`
/// for every integer `v`. Out-of-range input saturates at 0 or 100; callers
/// that must reject it validate first.
pub fn percentage(fraction: f64) -> u8 {
    if fraction.is_nan() || fraction <= 0.0 {
        return 0;
    }
    let scaled = (fraction * 100.0 + 1e-9).trunc();
    if scaled >= 100.0 {
        100
    } else {
        scaled as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(0.29, 29)]
    #[case(0.5, 50)]
    #[case(0.999, 99)]
    #[case(1.0, 100)]
    #[case(1.5, 100)]
    #[case(-0.2, 0)]
    fn test_percentage_truncates(#[case] fraction: f64, #[case] expected: u8) {
        assert_eq!(percentage(fraction), expected);
    }

    #[test]
    fn test_percentage_of_nan_is_zero() {
        assert_eq!(percentage(f64::NAN), 0);
    }

    #[test]
    fn test_state_serializes_lowercase() {
        assert_eq!(PlayerState::Playing.to_string(), "playing");
        assert_eq!(
            serde_json::to_string(&PlayerState::Off).unwrap(),
            "\"off\""
        );
    }

    proptest! {
        #[test]
        fn prop_volume_survives_fraction(volume in 0u8..=100) {
            prop_assert_eq!(percentage(volume_fraction(volume)), volume);
        }

        #[test]
        fn prop_percentage_never_exceeds_fraction(fraction in 0.0f64..=1.0) {
            let volume = percentage(fraction);
            prop_assert!(volume <= 100);
            prop_assert!(volume_fraction(volume) <= fraction + 1e-6);
        }
    }
}
