use serde::{Deserialize, Serialize};

use crate::ids::DeviceId;

/// Response of `devices/` and `devices/server`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceIdList {
    #[serde(default)]
    pub device_ids: Vec<DeviceId>,
}

/// One element of the `devices/info` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub device_id: DeviceId,
    #[serde(default)]
    pub config: Option<DeviceConfig>,
    #[serde(default)]
    pub connection: Option<ConnectionInfo>,
    #[serde(default)]
    pub metrics: Option<DeviceMetrics>,
    pub attributes: DeviceAttributes,
}

/// User-editable device settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default)]
    pub name: Option<String>,
}

/// Network link details of a device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    #[serde(default)]
    pub ssid: Option<String>,
    /// dBm
    #[serde(default)]
    pub signal_strength: Option<i32>,
    #[serde(default, rename = "type")]
    pub connection_type: Option<String>,
    /// Seconds since boot
    #[serde(default)]
    pub uptime: Option<u64>,
}

/// Runtime resource usage, percentages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceMetrics {
    #[serde(default)]
    pub cpu_usage: Option<f64>,
    #[serde(default)]
    pub disk_usage: Option<f64>,
    #[serde(default)]
    pub ram_usage: Option<f64>,
}

/// Hardware identity of a device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceAttributes {
    /// Stable across sessions, used as the unique-id base
    pub serial_number: String,
    #[serde(default)]
    pub firmware_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_device_record() {
        let json = r#"{
            "device_id": "oa-amp-01",
            "config": {"name": "Living Room Amp", "led": true},
            "connection": {"ssid": "home", "signal_strength": -58, "type": "wifi", "uptime": 3600},
            "metrics": {"cpu_usage": 12.5, "disk_usage": 40.0, "ram_usage": 61.2},
            "attributes": {"serial_number": "SN123", "firmware_version": "3.1.4"}
        }"#;

        let device: DeviceInfo = serde_json::from_str(json).unwrap();
        assert_eq!(device.device_id.as_str(), "oa-amp-01");
        assert_eq!(device.config.unwrap().name.as_deref(), Some("Living Room Amp"));
        let connection = device.connection.unwrap();
        assert_eq!(connection.connection_type.as_deref(), Some("wifi"));
        assert_eq!(connection.signal_strength, Some(-58));
        assert_eq!(device.metrics.unwrap().ram_usage, Some(61.2));
        assert_eq!(device.attributes.serial_number, "SN123");
    }

    #[test]
    fn test_sparse_device_record() {
        let json = r#"{
            "device_id": "oa-amp-01",
            "connection": null,
            "attributes": {"serial_number": "SN123"}
        }"#;

        let device: DeviceInfo = serde_json::from_str(json).unwrap();
        assert!(device.config.is_none());
        assert!(device.connection.is_none());
        assert!(device.metrics.is_none());
        assert!(device.attributes.firmware_version.is_none());
    }

    #[test]
    fn test_serial_number_is_required() {
        let json = r#"{"device_id": "oa-amp-01", "attributes": {}}"#;
        assert!(serde_json::from_str::<DeviceInfo>(json).is_err());
    }
}
