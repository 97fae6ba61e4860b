//! Amplifier (device) handle

use openaudio_api::{DeviceId, InputId, ZoneId};
use openaudio_state::presentation::DeviceView;
use openaudio_state::TopologyStore;

use crate::error::{Result, SdkError};

/// Handle to one physical amplifier unit
#[derive(Debug, Clone)]
pub struct Amplifier {
    pub id: DeviceId,
    store: TopologyStore,
}

impl Amplifier {
    pub(crate) fn new(id: DeviceId, store: TopologyStore) -> Self {
        Self { id, store }
    }

    /// Identity and diagnostics
    pub fn view(&self) -> Result<DeviceView> {
        self.record().map(|device| DeviceView::resolve(&device))
    }

    pub fn record(&self) -> Result<openaudio_state::Device> {
        self.store
            .device(&self.id)
            .map_err(|_| SdkError::DeviceNotFound(self.id.clone()))
    }

    pub fn zone_ids(&self) -> Result<Vec<ZoneId>> {
        self.record().map(|device| device.zones.into_keys().collect())
    }

    pub fn input_ids(&self) -> Result<Vec<InputId>> {
        self.record().map(|device| device.inputs.into_keys().collect())
    }
}
