use serde::{Deserialize, Deserializer, Serialize};

use super::enabled_by_default;
use crate::ids::InputId;

/// Response of `inputs/` and `inputs/info`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputIdList {
    #[serde(default)]
    pub input_ids: Vec<InputId>,
}

/// Body of `inputs/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub input_id: Option<InputId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Current type; the appliance reports a list, only the head matters
    #[serde(default, deserialize_with = "one_or_many")]
    pub input_type: Vec<String>,
    /// Class `0` marks a named input
    #[serde(default)]
    pub input_class: Option<i64>,
    #[serde(default)]
    pub available_types: Vec<String>,
    /// Integer percentage, 0-100
    #[serde(default)]
    pub volume: Option<u8>,
}

/// Response of `inputs/{id}/available-types` and `inputs/{id}/types`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableTypes {
    #[serde(default)]
    pub available_types: Vec<String>,
}

/// Body of `PUT inputs/{id}/type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTypeRequest {
    #[serde(rename = "type")]
    pub input_type: String,
}

/// Body of `PUT inputs/{id}/enable`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnableRequest {
    pub enable: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
        None => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_config_with_type_list() {
        let json = r#"{
            "input_id": "1", "name": "Phono", "input_type": ["RCA"],
            "input_class": 0, "available_types": ["RCA", "Optical"], "volume": 80
        }"#;
        let input: InputConfig = serde_json::from_str(json).unwrap();

        assert!(input.enabled);
        assert_eq!(input.input_type, vec!["RCA".to_string()]);
        assert_eq!(input.input_class, Some(0));
        assert_eq!(input.volume, Some(80));
    }

    #[test]
    fn test_input_type_as_plain_string() {
        let json = r#"{"name": "Streamer", "input_type": "Spotify", "input_class": 1}"#;
        let input: InputConfig = serde_json::from_str(json).unwrap();

        assert_eq!(input.input_type, vec!["Spotify".to_string()]);
        assert!(input.available_types.is_empty());
        assert!(input.volume.is_none());
    }

    #[test]
    fn test_input_type_null_or_missing() {
        let input: InputConfig = serde_json::from_str(r#"{"input_type": null}"#).unwrap();
        assert!(input.input_type.is_empty());

        let input: InputConfig = serde_json::from_str("{}").unwrap();
        assert!(input.input_type.is_empty());
        assert!(input.input_class.is_none());
    }

    #[test]
    fn test_request_bodies() {
        let body = InputTypeRequest { input_type: "Bluetooth".to_string() };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "type": "Bluetooth" })
        );
        assert_eq!(
            serde_json::to_value(EnableRequest { enable: false }).unwrap(),
            serde_json::json!({ "enable": false })
        );
    }
}
