use serde::{Deserialize, Serialize};

use super::enabled_by_default;
use crate::ids::{InputId, ZoneId};

/// Response of `zones`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneIdList {
    #[serde(default)]
    pub zone_ids: Vec<ZoneId>,
}

/// One element of the `zones/info` array, also the body of `zones/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub zone_id: ZoneId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Integer percentage, 0-100
    pub volume: u8,
    /// Currently selected inputs, in appliance order
    #[serde(default, rename = "input")]
    pub inputs: Vec<InputId>,
    #[serde(default)]
    pub active_input: Option<InputId>,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

impl ZoneInfo {
    /// Warnings reported for this zone, empty when there are none
    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or_default()
    }
}

/// Body of `PUT zones/{id}/volume` and `PUT inputs/{id}/volume`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRequest {
    pub volume: u8,
}

/// Body of `PUT zones/{id}/input`
///
/// The appliance accepts zero or one input; an empty list deselects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInputRequest {
    pub input_ids: Vec<InputId>,
}

impl ZoneInputRequest {
    pub fn new(input: Option<&InputId>) -> Self {
        Self {
            input_ids: input.into_iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_defaults() {
        let json = r#"{"zone_id": "amp-1-z1", "name": "Kitchen", "volume": 35}"#;
        let zone: ZoneInfo = serde_json::from_str(json).unwrap();

        assert!(zone.enabled);
        assert!(zone.inputs.is_empty());
        assert!(zone.active_input.is_none());
        assert!(zone.warnings().is_empty());
    }

    #[test]
    fn test_zone_with_numeric_inputs() {
        let json = r#"{
            "zone_id": "amp-1-z1", "name": "Kitchen", "enabled": false, "volume": 35,
            "input": [2, "5"], "active_input": 2, "warnings": ["clipping"]
        }"#;
        let zone: ZoneInfo = serde_json::from_str(json).unwrap();

        assert!(!zone.enabled);
        assert_eq!(zone.inputs, vec![InputId::new("2"), InputId::new("5")]);
        assert_eq!(zone.active_input, Some(InputId::new("2")));
        assert_eq!(zone.warnings(), ["clipping".to_string()]);
    }

    #[test]
    fn test_zone_input_request_bodies() {
        let none = serde_json::to_value(ZoneInputRequest::new(None)).unwrap();
        assert_eq!(none, serde_json::json!({ "input_ids": [] }));

        let id = InputId::new("3");
        let one = serde_json::to_value(ZoneInputRequest::new(Some(&id))).unwrap();
        assert_eq!(one, serde_json::json!({ "input_ids": ["3"] }));
    }
}
