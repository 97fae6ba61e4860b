//! # OpenAudio SDK
//!
//! Sync-first API for keeping track of, and controlling, an OpenAudio
//! amplifier appliance:
//!
//! ```rust,no_run
//! use openaudio_sdk::{HubConfig, OpenAudioSystem};
//!
//! fn main() -> Result<(), openaudio_sdk::SdkError> {
//!     let system = OpenAudioSystem::connect(HubConfig::new("192.168.1.50"))?;
//!     let poller = system.start_polling();
//!     poller.wait_for_cycles(1, std::time::Duration::from_secs(60));
//!
//!     for zone in system.zones() {
//!         let view = zone.view()?;
//!         println!("{} [{}] source={}", view.name, view.state, view.source);
//!     }
//!
//!     let kitchen = system.zones().into_iter().next()
//!         .ok_or_else(|| openaudio_sdk::SdkError::InvalidConfiguration("no zones".into()))?;
//!     kitchen.set_volume(0.35)?;         // wakes the poller for a fresh cycle
//!     kitchen.select_source("Source 1")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! openaudio-sdk (system, handles, controller, poller, config)
//!     ↓
//! openaudio-state (topology store, reconciliation, derived state)
//!     ↓
//! openaudio-api (typed REST endpoints)
//!     ↓
//! rest-client (HTTP transport)
//! ```
//!
//! Commands never write to the topology store. They ask the appliance to act
//! and then request a refresh; the next poll cycle observes the result.

mod amplifier;
pub mod config;
mod controller;
mod error;
mod input;
mod poller;
pub mod setup;
mod system;
mod zone;

pub use amplifier::Amplifier;
pub use config::HubConfig;
pub use controller::{volume_percentage, Controller};
pub use error::{Result, SdkError};
pub use input::Input;
pub use poller::{PollStatus, Poller};
pub use setup::{validate_setup, SetupInput, ValidatedSetup};
pub use system::OpenAudioSystem;
pub use zone::Zone;

// Re-export commonly used types from the lower layers
pub use openaudio_api::{Appliance, DeviceId, InputId, ZoneId};
pub use openaudio_state::presentation::{DeviceView, InputView, PlayerState, ZoneView};
pub use openaudio_state::PollReport;
