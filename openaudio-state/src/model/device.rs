//! Device record

use std::collections::BTreeMap;

use openaudio_api::{
    ConnectionInfo, DeviceAttributes, DeviceConfig, DeviceId, DeviceInfo, DeviceMetrics, InputId,
    ZoneId,
};
use serde::{Deserialize, Serialize};

use super::{Input, Zone};

/// One physical amplifier unit and everything attributed to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub config: DeviceConfig,
    pub connection: Option<ConnectionInfo>,
    pub metrics: Option<DeviceMetrics>,
    pub attributes: DeviceAttributes,
    pub zones: BTreeMap<ZoneId, Zone>,
    pub inputs: BTreeMap<InputId, Input>,
}

impl Device {
    /// Create a device node from its first observed info record
    pub fn new(info: DeviceInfo) -> Self {
        let mut device = Self {
            id: info.device_id.clone(),
            config: DeviceConfig::default(),
            connection: None,
            metrics: None,
            attributes: info.attributes.clone(),
            zones: BTreeMap::new(),
            inputs: BTreeMap::new(),
        };
        device.update(info);
        device
    }

    /// Overwrite config, connection, metrics and attributes from a fresh record
    ///
    /// Each sub-record is replaced wholesale. Zones and inputs are left alone;
    /// they are merged by their own steps.
    pub fn update(&mut self, info: DeviceInfo) {
        self.config = info.config.unwrap_or_default();
        self.connection = info.connection;
        self.metrics = info.metrics;
        self.attributes = info.attributes;
    }

    /// Stable hardware identity
    pub fn serial_number(&self) -> &str {
        &self.attributes.serial_number
    }

    pub fn zone(&self, zone_id: &ZoneId) -> Option<&Zone> {
        self.zones.get(zone_id)
    }

    pub fn input(&self, input_id: &InputId) -> Option<&Input> {
        self.inputs.get(input_id)
    }
}
