//! Zone state, titles, icons and source selection

use std::collections::BTreeMap;

use openaudio_api::InputId;
use serde::Serialize;

use super::{volume_fraction, Feature, PlayerState, NO_SOURCE};
use crate::model::{Device, SourceCatalogue, Zone};

/// Controls every zone accepts
pub const ZONE_FEATURES: &[Feature] = &[Feature::SelectSource, Feature::VolumeSet];

/// Playing if an input is active, otherwise on unless disabled
pub fn zone_state(zone: &Zone) -> PlayerState {
    if zone.active_input.is_some() {
        PlayerState::Playing
    } else if zone.enabled {
        PlayerState::On
    } else {
        PlayerState::Off
    }
}

/// "Playing from ..." text for a playing zone
///
/// Named inputs (class 0) show their name; anything else shows its current
/// type. `None` when the zone is not playing or its active input is not
/// attached to `device`.
pub fn zone_media_title(device: &Device, zone: &Zone) -> Option<String> {
    let input = device.input(zone.active_input.as_ref()?)?;

    if input.is_named() {
        if let Some(name) = input.name.as_deref().filter(|name| !name.is_empty()) {
            return Some(format!("Playing from {}", name));
        }
    }
    Some(format!(
        "Playing from {}",
        input.current_type().unwrap_or("Unknown")
    ))
}

pub fn zone_icon(zone: &Zone) -> &'static str {
    // warnings win over playback state
    if zone.has_warnings() {
        return "mdi:speaker-message";
    }
    match zone_state(zone) {
        PlayerState::Playing => "mdi:speaker-play",
        PlayerState::On => "mdi:speaker",
        PlayerState::Off => "mdi:speaker-off",
    }
}

/// `"None"` followed by every catalogue label in first-seen order
pub fn zone_source_list(catalogue: &SourceCatalogue) -> Vec<String> {
    std::iter::once(NO_SOURCE)
        .chain(catalogue.labels())
        .map(str::to_string)
        .collect()
}

/// Label of the first selected input the catalogue knows, else `"None"`
pub fn zone_source(zone: &Zone, catalogue: &SourceCatalogue) -> String {
    zone.inputs
        .iter()
        .find_map(|input_id| catalogue.label(input_id))
        .unwrap_or(NO_SOURCE)
        .to_string()
}

/// Input id behind a source label; `"None"` and unknown labels select nothing
pub fn source_to_input(source: &str, catalogue: &SourceCatalogue) -> Option<InputId> {
    if source == NO_SOURCE {
        return None;
    }
    catalogue.input_for_label(source).cloned()
}

/// Everything a presentation layer shows for one zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneView {
    pub unique_id: String,
    pub name: String,
    pub state: PlayerState,
    pub media_title: Option<String>,
    pub media_content_type: &'static str,
    pub icon: &'static str,
    pub volume: f64,
    pub source: String,
    pub source_list: Vec<String>,
    /// `warnings` and `warning_count`, only when the zone has warnings
    pub attributes: BTreeMap<String, serde_json::Value>,
    pub features: Vec<Feature>,
}

impl ZoneView {
    pub fn resolve(device: &Device, zone: &Zone, catalogue: &SourceCatalogue) -> Self {
        let mut attributes = BTreeMap::new();
        if zone.has_warnings() {
            attributes.insert("warnings".to_string(), serde_json::json!(zone.warnings));
            attributes.insert(
                "warning_count".to_string(),
                serde_json::json!(zone.warnings.len()),
            );
        }

        Self {
            unique_id: format!("zone_{}", zone.id),
            name: format!("{} Zone", zone.name),
            state: zone_state(zone),
            media_title: zone_media_title(device, zone),
            media_content_type: "music",
            icon: zone_icon(zone),
            volume: volume_fraction(zone.volume),
            source: zone_source(zone, catalogue),
            source_list: zone_source_list(catalogue),
            attributes,
            features: ZONE_FEATURES.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Input;
    use openaudio_api::{DeviceAttributes, DeviceConfig, DeviceId, ZoneId};
    use rstest::rstest;

    fn zone(active: Option<&str>, enabled: bool, warnings: &[&str]) -> Zone {
        Zone {
            id: ZoneId::new("amp-1-z1"),
            name: "Kitchen".to_string(),
            enabled,
            volume: 45,
            inputs: vec![],
            active_input: active.map(InputId::new),
            warnings: warnings.iter().map(|w| w.to_string()).collect(),
        }
    }

    fn input(id: &str, name: Option<&str>, class: Option<i64>, types: &[&str]) -> Input {
        Input {
            id: InputId::new(id),
            name: name.map(str::to_string),
            enabled: true,
            input_type: types.iter().map(|t| t.to_string()).collect(),
            input_class: class,
            available_types: vec![],
            volume: None,
        }
    }

    fn device_with(inputs: Vec<Input>) -> Device {
        Device {
            id: DeviceId::new("amp-1"),
            config: DeviceConfig::default(),
            connection: None,
            metrics: None,
            attributes: DeviceAttributes {
                serial_number: "SN1".to_string(),
                firmware_version: None,
            },
            zones: BTreeMap::new(),
            inputs: inputs.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    fn catalogue(ids: &[&str]) -> SourceCatalogue {
        let mut catalogue = SourceCatalogue::new();
        for id in ids {
            catalogue.record(InputId::new(*id));
        }
        catalogue
    }

    #[rstest]
    #[case(Some("in1"), false, PlayerState::Playing)]
    #[case(Some("in1"), true, PlayerState::Playing)]
    #[case(None, true, PlayerState::On)]
    #[case(None, false, PlayerState::Off)]
    fn test_zone_state(
        #[case] active: Option<&str>,
        #[case] enabled: bool,
        #[case] expected: PlayerState,
    ) {
        assert_eq!(zone_state(&zone(active, enabled, &[])), expected);
    }

    #[test]
    fn test_title_prefers_name_of_named_input() {
        let device = device_with(vec![input("in1", Some("Phono"), Some(0), &["RCA"])]);
        let title = zone_media_title(&device, &zone(Some("in1"), true, &[]));
        assert_eq!(title.as_deref(), Some("Playing from Phono"));
    }

    #[rstest]
    #[case(Some("Phono"), Some(1), &["RCA"], "Playing from RCA")]
    #[case(Some(""), Some(0), &["Optical"], "Playing from Optical")]
    #[case(None, Some(0), &["USB", "RCA"], "Playing from USB")]
    #[case(Some("Phono"), None, &[], "Playing from Unknown")]
    fn test_title_falls_back_to_type(
        #[case] name: Option<&str>,
        #[case] class: Option<i64>,
        #[case] types: &[&str],
        #[case] expected: &str,
    ) {
        let device = device_with(vec![input("in1", name, class, types)]);
        let title = zone_media_title(&device, &zone(Some("in1"), true, &[]));
        assert_eq!(title.as_deref(), Some(expected));
    }

    #[test]
    fn test_no_title_unless_playing_a_known_input() {
        let device = device_with(vec![input("in1", Some("Phono"), Some(0), &["RCA"])]);
        assert_eq!(zone_media_title(&device, &zone(None, true, &[])), None);
        assert_eq!(zone_media_title(&device, &zone(Some("in9"), true, &[])), None);
    }

    #[rstest]
    #[case(Some("in1"), true, &["clip"], "mdi:speaker-message")]
    #[case(None, false, &["clip"], "mdi:speaker-message")]
    #[case(Some("in1"), true, &[], "mdi:speaker-play")]
    #[case(None, true, &[], "mdi:speaker")]
    #[case(None, false, &[], "mdi:speaker-off")]
    fn test_zone_icon(
        #[case] active: Option<&str>,
        #[case] enabled: bool,
        #[case] warnings: &[&str],
        #[case] expected: &str,
    ) {
        assert_eq!(zone_icon(&zone(active, enabled, warnings)), expected);
    }

    #[test]
    fn test_source_list_starts_with_none() {
        let list = zone_source_list(&catalogue(&["2", "1"]));
        assert_eq!(list, vec!["None", "Source 2", "Source 1"]);
        assert_eq!(zone_source_list(&SourceCatalogue::new()), vec!["None"]);
    }

    #[test]
    fn test_source_is_first_catalogued_selection() {
        let catalogue = catalogue(&["1", "2"]);
        let mut zone = zone(None, true, &[]);
        assert_eq!(zone_source(&zone, &catalogue), "None");

        zone.inputs = vec![InputId::new("9"), InputId::new("2"), InputId::new("1")];
        assert_eq!(zone_source(&zone, &catalogue), "Source 2");
    }

    #[test]
    fn test_source_to_input() {
        let catalogue = catalogue(&["4"]);
        assert_eq!(source_to_input("Source 4", &catalogue), Some(InputId::new("4")));
        assert_eq!(source_to_input("None", &catalogue), None);
        assert_eq!(source_to_input("Source 5", &catalogue), None);
    }

    #[test]
    fn test_view_carries_warning_attributes() {
        let device = device_with(vec![]);
        let view = ZoneView::resolve(&device, &zone(None, true, &["clip", "hot"]), &catalogue(&[]));

        assert_eq!(view.unique_id, "zone_amp-1-z1");
        assert_eq!(view.name, "Kitchen Zone");
        assert_eq!(view.volume, 0.45);
        assert_eq!(view.attributes["warning_count"], serde_json::json!(2));
        assert_eq!(view.attributes["warnings"], serde_json::json!(["clip", "hot"]));

        let quiet = ZoneView::resolve(&device, &zone(None, true, &[]), &catalogue(&[]));
        assert!(quiet.attributes.is_empty());
    }
}
