//! Device identity and diagnostics

use std::fmt;

use serde::Serialize;

use crate::model::Device;

pub const MANUFACTURER: &str = "OpenAudio";

/// A diagnostic reading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiagnosticValue {
    Text(String),
    Integer(i64),
    Percent(f64),
}

impl fmt::Display for DiagnosticValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticValue::Text(text) => f.write_str(text),
            DiagnosticValue::Integer(value) => write!(f, "{}", value),
            DiagnosticValue::Percent(value) => write!(f, "{:.1}", value),
        }
    }
}

/// One diagnostic sensor of a device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// `{serial}_{key}`
    pub unique_id: String,
    pub key: &'static str,
    pub name: &'static str,
    pub unit: Option<&'static str>,
    /// `None` when the appliance did not report the sub-record or the field
    pub value: Option<DiagnosticValue>,
}

/// Identity and diagnostics of one device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceView {
    pub device_id: String,
    /// Configured name, or the device id when none is set
    pub name: String,
    pub manufacturer: &'static str,
    pub serial_number: String,
    pub firmware_version: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DeviceView {
    pub fn resolve(device: &Device) -> Self {
        let name = device
            .config
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(device.id.as_str())
            .to_string();

        Self {
            device_id: device.id.to_string(),
            name,
            manufacturer: MANUFACTURER,
            serial_number: device.serial_number().to_string(),
            firmware_version: device.attributes.firmware_version.clone(),
            diagnostics: diagnostics(device),
        }
    }

    pub fn diagnostic(&self, key: &str) -> Option<&Diagnostic> {
        self.diagnostics.iter().find(|d| d.key == key)
    }
}

fn diagnostics(device: &Device) -> Vec<Diagnostic> {
    let connection = device.connection.as_ref();
    let metrics = device.metrics.as_ref();
    let serial = device.serial_number();

    let reading = |key: &'static str,
                   name: &'static str,
                   unit: Option<&'static str>,
                   value: Option<DiagnosticValue>| Diagnostic {
        unique_id: format!("{}_{}", serial, key),
        key,
        name,
        unit,
        value,
    };

    vec![
        reading(
            "ssid",
            "SSID",
            None,
            connection.and_then(|c| c.ssid.clone()).map(DiagnosticValue::Text),
        ),
        reading(
            "signal_strength",
            "Signal Strength",
            Some("dBm"),
            connection
                .and_then(|c| c.signal_strength)
                .map(|dbm| DiagnosticValue::Integer(i64::from(dbm))),
        ),
        reading(
            "connection_type",
            "Connection Type",
            None,
            connection
                .and_then(|c| c.connection_type.clone())
                .map(DiagnosticValue::Text),
        ),
        reading(
            "uptime",
            "Uptime",
            Some("s"),
            connection
                .and_then(|c| c.uptime)
                .map(|secs| DiagnosticValue::Integer(i64::try_from(secs).unwrap_or(i64::MAX))),
        ),
        reading(
            "cpu_usage",
            "CPU Usage",
            Some("%"),
            metrics.and_then(|m| m.cpu_usage).map(DiagnosticValue::Percent),
        ),
        reading(
            "disk_usage",
            "Disk Usage",
            Some("%"),
            metrics.and_then(|m| m.disk_usage).map(DiagnosticValue::Percent),
        ),
        reading(
            "ram_usage",
            "RAM Usage",
            Some("%"),
            metrics.and_then(|m| m.ram_usage).map(DiagnosticValue::Percent),
        ),
    ]
}
