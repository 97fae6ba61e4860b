//! The seam between the appliance and everything that consumes it

use crate::ids::{DeviceId, InputId, ZoneId};
use crate::payload::{DeviceInfo, InputConfig, InputIdList, ZoneInfo};
use crate::Result;

/// Calls the reconciliation engine and the control façade make against an
/// appliance
///
/// [`crate::OpenAudioClient`] is the production implementation. Every call
/// blocks until the appliance answers and either yields a parsed payload or
/// an [`crate::ApiError`].
pub trait Appliance: Send + Sync {
    /// Probe the appliance; `true` when it answers the device list
    fn can_connect(&self) -> bool;

    fn get_devices(&self) -> Result<Vec<DeviceId>>;

    /// Device that serves the API, if the appliance names one
    fn get_server_device_id(&self) -> Result<Option<DeviceId>>;

    fn get_devices_info(&self) -> Result<Vec<DeviceInfo>>;

    fn get_zones_info(&self) -> Result<Vec<ZoneInfo>>;

    /// Summary list of every input id known to the appliance
    fn get_inputs_info(&self) -> Result<InputIdList>;

    fn get_input_config(&self, input_id: &InputId) -> Result<InputConfig>;

    fn set_zone_volume(&self, zone_id: &ZoneId, volume: u8) -> Result<u8>;

    /// Select `input` on a zone, or deselect everything with `None`
    fn set_zone_input(&self, zone_id: &ZoneId, input: Option<&InputId>) -> Result<()>;

    fn set_input_type(&self, input_id: &InputId, input_type: &str) -> Result<()>;

    fn set_input_volume(&self, input_id: &InputId, volume: u8) -> Result<serde_json::Value>;

    fn enable_input(&self, input_id: &InputId, enable: bool) -> Result<serde_json::Value>;
}
