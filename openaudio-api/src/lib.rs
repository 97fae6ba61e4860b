//! Type-safe client for the OpenAudio amplifier REST API
//!
//! This crate maps each REST endpoint of an OpenAudio appliance to a typed
//! call. It uses the private `rest-client` crate for the HTTP plumbing.
//!
//! ```rust,no_run
//! use openaudio_api::{Appliance, OpenAudioClient};
//!
//! let client = OpenAudioClient::new("192.168.1.50");
//! for input_id in client.get_inputs_info()?.input_ids {
//!     let config = client.get_input_config(&input_id)?;
//!     println!("{}: {:?}", input_id, config.input_type);
//! }
//! # Ok::<(), openaudio_api::ApiError>(())
//! ```
//!
//! The [`Appliance`] trait is the seam consumers program against, so the
//! reconciliation engine can be driven by an in-memory fake in tests.

pub mod appliance;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod ids;
pub mod payload;

pub use appliance::Appliance;
pub use client::OpenAudioClient;
pub use endpoint::{Endpoint, API_VERSION};
pub use error::{ApiError, Result};
pub use ids::{DeviceId, InputId, ZoneId};
pub use payload::{
    ConnectionInfo, DeviceAttributes, DeviceConfig, DeviceInfo, DeviceMetrics, InputConfig,
    InputIdList, ZoneInfo,
};
