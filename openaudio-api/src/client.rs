use rest_client::RestClient;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::appliance::Appliance;
use crate::endpoint::Endpoint;
use crate::ids::{DeviceId, InputId, ZoneId};
use crate::payload::{
    AvailableTypes, ConnectionInfo, DeviceAttributes, DeviceConfig, DeviceIdList, DeviceInfo,
    DeviceMetrics, EnableRequest, InputConfig, InputIdList, InputTypeRequest, VolumeRequest,
    ZoneIdList, ZoneInfo, ZoneInputRequest,
};
use crate::{ApiError, Result};

/// A client for one OpenAudio appliance
///
/// Bridges the typed endpoint definitions and actual network requests. One
/// client talks to exactly one appliance address; every device behind that
/// address is reachable through it.
///
/// ```rust,no_run
/// use openaudio_api::{Appliance, OpenAudioClient};
///
/// let client = OpenAudioClient::new("192.168.1.50");
/// let devices = client.get_devices_info()?;
/// # Ok::<(), openaudio_api::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OpenAudioClient {
    host: String,
    rest: RestClient,
}

impl OpenAudioClient {
    /// Create a client for the appliance at `host` (`ip` or `ip:port`)
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_rest_client(host, RestClient::new())
    }

    /// Create a client with a custom REST client (custom timeouts)
    pub fn with_rest_client(host: impl Into<String>, rest: RestClient) -> Self {
        Self {
            host: host.into(),
            rest,
        }
    }

    /// Address this client talks to
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn get_device_connection(&self, device_id: &DeviceId) -> Result<ConnectionInfo> {
        self.get("get_device_connection", Endpoint::DeviceConnection(device_id))
    }

    pub fn get_device_attributes(&self, device_id: &DeviceId) -> Result<DeviceAttributes> {
        self.get("get_device_attributes", Endpoint::DeviceAttributes(device_id))
    }

    pub fn get_device_config(&self, device_id: &DeviceId) -> Result<DeviceConfig> {
        self.get("get_device_config", Endpoint::DeviceConfig(device_id))
    }

    pub fn get_device_metrics(&self, device_id: &DeviceId) -> Result<DeviceMetrics> {
        self.get("get_device_metrics", Endpoint::DeviceMetrics(device_id))
    }

    pub fn get_zones(&self) -> Result<Vec<ZoneId>> {
        let list: ZoneIdList = self.get("get_zones", Endpoint::Zones)?;
        Ok(list.zone_ids)
    }

    pub fn get_zone_config(&self, zone_id: &ZoneId) -> Result<ZoneInfo> {
        self.get("get_zone_config", Endpoint::ZoneConfig(zone_id))
    }

    /// Input ids, optionally restricted to one input class
    pub fn get_inputs(&self, class_filter: Option<i64>) -> Result<Vec<InputId>> {
        let list: InputIdList = self.get("get_inputs", Endpoint::Inputs(class_filter))?;
        Ok(list.input_ids)
    }

    /// Input id summary, optionally restricted to one input class
    pub fn get_inputs_info_filtered(&self, class_filter: Option<i64>) -> Result<InputIdList> {
        self.get("get_inputs_info", Endpoint::InputsInfo(class_filter))
    }

    pub fn get_available_types(&self, input_id: &InputId) -> Result<Vec<String>> {
        let types: AvailableTypes =
            self.get("get_available_types", Endpoint::InputAvailableTypes(input_id))?;
        Ok(types.available_types)
    }

    pub fn get_input_types(&self, input_id: &InputId) -> Result<Vec<String>> {
        let types: AvailableTypes = self.get("get_input_types", Endpoint::InputTypes(input_id))?;
        Ok(types.available_types)
    }

    fn get<T: DeserializeOwned>(&self, operation: &str, endpoint: Endpoint<'_>) -> Result<T> {
        let path = endpoint.path();
        tracing::debug!("Invoking {} with host={}, path={}", operation, self.host, path);

        self.rest.get_json(&self.host, &path).map_err(|e| {
            tracing::error!("Error in {}: {}", operation, e);
            ApiError::from(e)
        })
    }

    fn put<B: Serialize>(&self, operation: &str, endpoint: Endpoint<'_>, body: &B) -> Result<()> {
        let path = endpoint.path();
        tracing::debug!("Invoking {} with host={}, path={}", operation, self.host, path);

        self.rest.put_json_discard(&self.host, &path, body).map_err(|e| {
            tracing::error!("Error in {}: {}", operation, e);
            ApiError::from(e)
        })
    }

    fn put_returning<B: Serialize>(
        &self,
        operation: &str,
        endpoint: Endpoint<'_>,
        body: &B,
    ) -> Result<serde_json::Value> {
        let path = endpoint.path();
        tracing::debug!("Invoking {} with host={}, path={}", operation, self.host, path);

        self.rest.put_json(&self.host, &path, body).map_err(|e| {
            tracing::error!("Error in {}: {}", operation, e);
            ApiError::from(e)
        })
    }
}

impl Appliance for OpenAudioClient {
    fn can_connect(&self) -> bool {
        tracing::debug!("Verifying connectivity to OpenAudio at {}", self.host);
        self.get_devices().is_ok()
    }

    fn get_devices(&self) -> Result<Vec<DeviceId>> {
        let list: DeviceIdList = self.get("get_devices", Endpoint::Devices)?;
        Ok(list.device_ids)
    }

    fn get_server_device_id(&self) -> Result<Option<DeviceId>> {
        let list: DeviceIdList = self.get("get_server_device_id", Endpoint::ServerDevice)?;
        Ok(list.device_ids.into_iter().next())
    }

    fn get_devices_info(&self) -> Result<Vec<DeviceInfo>> {
        self.get("get_devices_info", Endpoint::DevicesInfo)
    }

    fn get_zones_info(&self) -> Result<Vec<ZoneInfo>> {
        self.get("get_zones_info", Endpoint::ZonesInfo)
    }

    fn get_inputs_info(&self) -> Result<InputIdList> {
        self.get_inputs_info_filtered(None)
    }

    fn get_input_config(&self, input_id: &InputId) -> Result<InputConfig> {
        self.get("get_input_config", Endpoint::InputConfig(input_id))
    }

    fn set_zone_volume(&self, zone_id: &ZoneId, volume: u8) -> Result<u8> {
        validate_volume(volume)?;
        self.put("set_zone_volume", Endpoint::ZoneVolume(zone_id), &VolumeRequest { volume })?;
        Ok(volume)
    }

    fn set_zone_input(&self, zone_id: &ZoneId, input: Option<&InputId>) -> Result<()> {
        self.put(
            "set_zone_input",
            Endpoint::ZoneInput(zone_id),
            &ZoneInputRequest::new(input),
        )
    }

    fn set_input_type(&self, input_id: &InputId, input_type: &str) -> Result<()> {
        let body = InputTypeRequest {
            input_type: input_type.to_string(),
        };
        self.put("set_input_type", Endpoint::InputType(input_id), &body)
    }

    fn set_input_volume(&self, input_id: &InputId, volume: u8) -> Result<serde_json::Value> {
        validate_volume(volume)?;
        self.put_returning(
            "set_input_volume",
            Endpoint::InputVolume(input_id),
            &VolumeRequest { volume },
        )
    }

    fn enable_input(&self, input_id: &InputId, enable: bool) -> Result<serde_json::Value> {
        self.put_returning("enable_input", Endpoint::InputEnable(input_id), &EnableRequest { enable })
    }
}

fn validate_volume(volume: u8) -> Result<()> {
    if volume > 100 {
        return Err(ApiError::InvalidParameter(format!(
            "volume {} is out of range [0, 100]",
            volume
        )));
    }
    Ok(())
}
