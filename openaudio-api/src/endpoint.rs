//! REST endpoints exposed by the appliance
//!
//! Every path is relative to the appliance host and lives under
//! `api/{API_VERSION}/`.

use crate::ids::{DeviceId, InputId, ZoneId};

/// API version path segment
pub const API_VERSION: &str = "v3";

/// One addressable resource on the appliance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `devices/` - list of device ids
    Devices,
    /// `devices/info` - full record for every device
    DevicesInfo,
    /// `devices/server` - the device serving the API
    ServerDevice,
    DeviceConnection(&'a DeviceId),
    DeviceAttributes(&'a DeviceId),
    DeviceConfig(&'a DeviceId),
    DeviceMetrics(&'a DeviceId),
    /// `zones` - list of zone ids
    Zones,
    /// `zones/info` - full record for every zone
    ZonesInfo,
    ZoneConfig(&'a ZoneId),
    ZoneVolume(&'a ZoneId),
    ZoneInput(&'a ZoneId),
    /// `inputs/` - list of input ids, optionally filtered by class
    Inputs(Option<i64>),
    /// `inputs/info` - input id summary, optionally filtered by class
    InputsInfo(Option<i64>),
    InputConfig(&'a InputId),
    InputAvailableTypes(&'a InputId),
    InputTypes(&'a InputId),
    InputType(&'a InputId),
    InputVolume(&'a InputId),
    InputEnable(&'a InputId),
}

impl Endpoint<'_> {
    /// Path of this endpoint, relative to the host
    pub fn path(&self) -> String {
        let resource = match self {
            Endpoint::Devices => "devices/".to_string(),
            Endpoint::DevicesInfo => "devices/info".to_string(),
            Endpoint::ServerDevice => "devices/server".to_string(),
            Endpoint::DeviceConnection(id) => format!("devices/{}/connection", id),
            Endpoint::DeviceAttributes(id) => format!("devices/{}/attributes", id),
            Endpoint::DeviceConfig(id) => format!("devices/{}/config", id),
            Endpoint::DeviceMetrics(id) => format!("devices/{}/metrics", id),
            Endpoint::Zones => "zones".to_string(),
            Endpoint::ZonesInfo => "zones/info".to_string(),
            Endpoint::ZoneConfig(id) => format!("zones/{}", id),
            Endpoint::ZoneVolume(id) => format!("zones/{}/volume", id),
            Endpoint::ZoneInput(id) => format!("zones/{}/input", id),
            Endpoint::Inputs(filter) => format!("inputs/{}", class_filter_query(*filter)),
            Endpoint::InputsInfo(filter) => format!("inputs/info{}", class_filter_query(*filter)),
            Endpoint::InputConfig(id) => format!("inputs/{}", id),
            Endpoint::InputAvailableTypes(id) => format!("inputs/{}/available-types", id),
            Endpoint::InputTypes(id) => format!("inputs/{}/types", id),
            Endpoint::InputType(id) => format!("inputs/{}/type", id),
            Endpoint::InputVolume(id) => format!("inputs/{}/volume", id),
            Endpoint::InputEnable(id) => format!("inputs/{}/enable", id),
        };
        format!("api/{}/{}", API_VERSION, resource)
    }
}

fn class_filter_query(filter: Option<i64>) -> String {
    match filter {
        Some(class) => format!("?class_filter={}", class),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Endpoint::Devices, "api/v3/devices/")]
    #[case(Endpoint::DevicesInfo, "api/v3/devices/info")]
    #[case(Endpoint::ServerDevice, "api/v3/devices/server")]
    #[case(Endpoint::Zones, "api/v3/zones")]
    #[case(Endpoint::ZonesInfo, "api/v3/zones/info")]
    #[case(Endpoint::Inputs(None), "api/v3/inputs/")]
    #[case(Endpoint::Inputs(Some(0)), "api/v3/inputs/?class_filter=0")]
    #[case(Endpoint::InputsInfo(None), "api/v3/inputs/info")]
    #[case(Endpoint::InputsInfo(Some(2)), "api/v3/inputs/info?class_filter=2")]
    fn test_collection_paths(#[case] endpoint: Endpoint<'static>, #[case] expected: &str) {
        assert_eq!(endpoint.path(), expected);
    }

    #[test]
    fn test_resource_paths() {
        let device = DeviceId::new("amp-1");
        let zone = ZoneId::new("amp-1-z1");
        let input = InputId::new("4");

        assert_eq!(Endpoint::DeviceMetrics(&device).path(), "api/v3/devices/amp-1/metrics");
        assert_eq!(Endpoint::ZoneInput(&zone).path(), "api/v3/zones/amp-1-z1/input");
        assert_eq!(
            Endpoint::InputAvailableTypes(&input).path(),
            "api/v3/inputs/4/available-types"
        );
        assert_eq!(Endpoint::InputEnable(&input).path(), "api/v3/inputs/4/enable");
    }
}
