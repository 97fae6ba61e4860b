//! Zone record

use openaudio_api::{InputId, ZoneId, ZoneInfo};
use serde::{Deserialize, Serialize};

/// An audio output zone, owned by exactly one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub enabled: bool,
    /// Integer percentage, 0-100
    pub volume: u8,
    /// Selected inputs in appliance order; may be empty
    pub inputs: Vec<InputId>,
    pub active_input: Option<InputId>,
    pub warnings: Vec<String>,
}

impl Zone {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

impl From<ZoneInfo> for Zone {
    fn from(info: ZoneInfo) -> Self {
        let warnings = info.warnings().to_vec();
        Self {
            id: info.zone_id,
            name: info.name,
            enabled: info.enabled,
            volume: info.volume,
            inputs: info.inputs,
            active_input: info.active_input,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn zone(warnings: serde_json::Value) -> Zone {
        let info: ZoneInfo = serde_json::from_value(json!({
            "zone_id": "amp-1", "name": "Kitchen", "volume": 10, "warnings": warnings
        }))
        .unwrap();
        Zone::from(info)
    }

    #[test]
    fn test_null_warnings_are_empty() {
        let zone = zone(json!(null));
        assert!(zone.warnings.is_empty());
        assert!(!zone.has_warnings());
    }

    #[test]
    fn test_warnings_are_kept_in_order() {
        let zone = zone(json!(["clipping", "thermal"]));
        assert_eq!(zone.warnings, vec!["clipping", "thermal"]);
        assert!(zone.has_warnings());
    }
}
