//! Input state, type labels and icons

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::{volume_fraction, Feature, PlayerState};
use crate::model::Input;

/// Controls every input accepts
pub const INPUT_FEATURES: &[Feature] = &[Feature::SelectSource, Feature::TurnOn, Feature::TurnOff];

/// Input types the appliance is known to report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Airplay,
    Dlna,
    Spotify,
    Usb,
    Bluetooth,
    Rca,
    Optical,
    GoogleCast,
}

impl InputKind {
    pub const ALL: [InputKind; 8] = [
        InputKind::Airplay,
        InputKind::Dlna,
        InputKind::Spotify,
        InputKind::Usb,
        InputKind::Bluetooth,
        InputKind::Rca,
        InputKind::Optical,
        InputKind::GoogleCast,
    ];

    /// Label as the appliance spells it
    pub fn label(&self) -> &'static str {
        match self {
            InputKind::Airplay => "Airplay",
            InputKind::Dlna => "DLNA",
            InputKind::Spotify => "Spotify",
            InputKind::Usb => "USB",
            InputKind::Bluetooth => "Bluetooth",
            InputKind::Rca => "RCA",
            InputKind::Optical => "Optical",
            InputKind::GoogleCast => "Google Cast",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            InputKind::Airplay => "mdi:cast-audio-variant",
            InputKind::Dlna | InputKind::GoogleCast => "mdi:cast-audio",
            InputKind::Spotify => "mdi:spotify",
            InputKind::Usb => "mdi:usb",
            InputKind::Bluetooth => "mdi:bluetooth-audio",
            InputKind::Rca => "mdi:audio-input-rca",
            InputKind::Optical => "mdi:laser-pointer",
        }
    }
}

impl FromStr for InputKind {
    type Err = ();

    /// Exact, case-sensitive match on the appliance label
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
            .ok_or(())
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Icon for labels no [`InputKind`] matches
pub const FALLBACK_INPUT_ICON: &str = "mdi:music-box";

/// On unless the input is disabled
pub fn input_state(input: &Input) -> PlayerState {
    if input.enabled {
        PlayerState::On
    } else {
        PlayerState::Off
    }
}

/// The current type label; only the head of the reported list counts
pub fn input_source(input: &Input) -> Option<&str> {
    input.current_type()
}

/// Available types, plus the current one if the appliance left it out
pub fn input_source_list(input: &Input) -> Vec<String> {
    let mut sources = input.available_types.clone();
    if let Some(current) = input_source(input).filter(|current| !current.is_empty()) {
        if !sources.iter().any(|source| source == current) {
            sources.push(current.to_string());
        }
    }
    sources
}

pub fn input_icon(label: &str) -> &'static str {
    label
        .parse::<InputKind>()
        .map(|kind| kind.icon())
        .unwrap_or(FALLBACK_INPUT_ICON)
}

/// Everything a presentation layer shows for one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputView {
    pub unique_id: String,
    pub name: String,
    pub state: PlayerState,
    pub icon: &'static str,
    pub volume: Option<f64>,
    pub source: Option<String>,
    pub source_list: Vec<String>,
    pub features: Vec<Feature>,
}

impl InputView {
    pub fn resolve(input: &Input) -> Self {
        let source = input_source(input);

        Self {
            unique_id: format!("input_{}", input.id),
            name: format!("Source {} Input", input.name.as_deref().unwrap_or_default()),
            state: input_state(input),
            icon: input_icon(source.unwrap_or_default()),
            volume: input.volume.map(volume_fraction),
            source: source.map(str::to_string),
            source_list: input_source_list(input),
            features: INPUT_FEATURES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openaudio_api::InputId;
    use rstest::rstest;

    fn input(types: &[&str], available: &[&str]) -> Input {
        Input {
            id: InputId::new("3"),
            name: Some("Deck".to_string()),
            enabled: true,
            input_type: types.iter().map(|t| t.to_string()).collect(),
            input_class: Some(1),
            available_types: available.iter().map(|t| t.to_string()).collect(),
            volume: Some(80),
        }
    }

    #[rstest]
    #[case("Airplay", "mdi:cast-audio-variant")]
    #[case("DLNA", "mdi:cast-audio")]
    #[case("Spotify", "mdi:spotify")]
    #[case("USB", "mdi:usb")]
    #[case("Bluetooth", "mdi:bluetooth-audio")]
    #[case("RCA", "mdi:audio-input-rca")]
    #[case("Optical", "mdi:laser-pointer")]
    #[case("Google Cast", "mdi:cast-audio")]
    #[case("spotify", "mdi:music-box")]
    #[case("Tidal", "mdi:music-box")]
    #[case("", "mdi:music-box")]
    fn test_input_icon(#[case] label: &str, #[case] expected: &str) {
        assert_eq!(input_icon(label), expected);
    }

    #[test]
    fn test_kind_labels_parse_back() {
        for kind in InputKind::ALL {
            assert_eq!(kind.label().parse::<InputKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_state_follows_enabled() {
        let mut input = input(&["USB"], &[]);
        assert_eq!(input_state(&input), PlayerState::On);
        input.enabled = false;
        assert_eq!(input_state(&input), PlayerState::Off);
    }

    #[test]
    fn test_source_is_head_of_type_list() {
        assert_eq!(input_source(&input(&["USB", "RCA"], &[])), Some("USB"));
        assert_eq!(input_source(&input(&[], &[])), None);
    }

    #[rstest]
    #[case(&["USB"], &["RCA", "USB"], &["RCA", "USB"])]
    #[case(&["Spotify"], &["RCA", "USB"], &["RCA", "USB", "Spotify"])]
    #[case(&[], &["RCA"], &["RCA"])]
    #[case(&["Optical"], &[], &["Optical"])]
    fn test_source_list_appends_current(
        #[case] types: &[&str],
        #[case] available: &[&str],
        #[case] expected: &[&str],
    ) {
        assert_eq!(input_source_list(&input(types, available)), expected);
    }

    #[test]
    fn test_view() {
        let view = InputView::resolve(&input(&["Spotify"], &["Spotify"]));

        assert_eq!(view.unique_id, "input_3");
        assert_eq!(view.name, "Source Deck Input");
        assert_eq!(view.icon, "mdi:spotify");
        assert_eq!(view.volume, Some(0.8));
        assert_eq!(view.source.as_deref(), Some("Spotify"));
        assert_eq!(view.features, INPUT_FEATURES);
    }
}
