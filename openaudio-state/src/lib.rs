//! OpenAudio State
//!
//! Polls an OpenAudio appliance and keeps a consistent in-memory topology of
//! its devices, zones and inputs, from which playback state is derived on
//! read.
//!
//! # Architecture
//!
//! ```text
//! scheduler → reconcile() → Appliance (ordered REST calls)
//!                  │
//!                  ▼
//!            TopologyStore ──read──▶ presentation (ZoneView, InputView, DeviceView)
//! ```
//!
//! The appliance has no aggregate endpoint and no push channel. Zones name
//! their owning device only through an id prefix, and inputs carry no owner
//! at all, so ownership is inferred during [`reconcile`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use openaudio_api::OpenAudioClient;
//! use openaudio_state::{Reconciler, TopologyStore};
//! use openaudio_state::presentation::ZoneView;
//!
//! let store = TopologyStore::new();
//! let reconciler = Reconciler::new(Arc::new(OpenAudioClient::new("192.168.1.50")), store.clone());
//! reconciler.reconcile()?;
//!
//! store.read(|topology| {
//!     for (device, zone) in topology.zones() {
//!         let view = ZoneView::resolve(device, zone, &topology.catalogue);
//!         println!("{}: {}", view.name, view.state);
//!     }
//! });
//! # Ok::<(), openaudio_state::StateError>(())
//! ```

pub mod error;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod reconcile;
pub mod store;

pub use error::{PollStep, Result, StateError};
pub use model::{Device, Input, SourceCatalogue, Zone};
pub use presentation::{DeviceView, InputView, PlayerState, ZoneView};
pub use reconcile::{owning_device_id, reconcile, PollReport, Reconciler};
pub use store::{Topology, TopologyStore};
