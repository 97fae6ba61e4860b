//! Typed request and response bodies for every appliance endpoint
//!
//! Field names follow the appliance's JSON. Absent-field policies live on
//! the types themselves (`enabled` defaults to `true`, optional
//! sub-records default to `None`), so nothing downstream has to guess.

mod device;
mod input;
mod zone;

pub use device::{
    ConnectionInfo, DeviceAttributes, DeviceConfig, DeviceIdList, DeviceInfo, DeviceMetrics,
};
pub use input::{AvailableTypes, EnableRequest, InputConfig, InputIdList, InputTypeRequest};
pub use zone::{VolumeRequest, ZoneIdList, ZoneInfo, ZoneInputRequest};

/// Default for `enabled` flags the appliance leaves out
pub(crate) fn enabled_by_default() -> bool {
    true
}
