//! OpenAudioSystem - Main entry point for the SDK
//!
//! Owns the connection to one appliance, its topology store and the
//! reconciliation engine. Everything is synchronous.

use std::sync::Arc;
use std::time::{Duration, Instant};

use openaudio_api::{Appliance, DeviceId, InputId, OpenAudioClient, ZoneId};
use openaudio_state::{PollReport, Reconciler, TopologyStore};

use crate::config::HubConfig;
use crate::controller::Controller;
use crate::error::{Result, SdkError};
use crate::poller::{Poller, RefreshSignal};
use crate::{Amplifier, Input, Zone};

/// One reconciliation cycle bounded by the configured timeout
pub(crate) struct Cycle {
    reconciler: Reconciler<dyn Appliance>,
    timeout: Duration,
}

impl Cycle {
    /// A cycle that finishes after its timeout is reported as failed even
    /// though its merges have been applied
    pub(crate) fn run(&self) -> Result<PollReport> {
        let started = Instant::now();
        let report = self.reconciler.reconcile()?;

        let elapsed = started.elapsed();
        if elapsed > self.timeout {
            tracing::warn!(
                "OpenAudio poll took {:?}, longer than the {:?} limit",
                elapsed,
                self.timeout
            );
            return Err(SdkError::Timeout(self.timeout));
        }
        tracing::debug!("OpenAudio poll finished in {:?}", elapsed);
        Ok(report)
    }
}

/// Main system entry point
///
/// # Example
///
/// ```rust,no_run
/// use openaudio_sdk::{HubConfig, OpenAudioSystem};
///
/// fn main() -> Result<(), openaudio_sdk::SdkError> {
///     let system = OpenAudioSystem::connect(HubConfig::new("192.168.1.50"))?;
///     system.refresh()?;
///
///     for zone in system.zones() {
///         let view = zone.view()?;
///         println!("{}: {} at {:.0}%", view.name, view.state, view.volume * 100.0);
///     }
///
///     // keep polling in the background
///     let poller = system.start_polling();
///     # drop(poller);
///     Ok(())
/// }
/// ```
pub struct OpenAudioSystem {
    config: HubConfig,
    store: TopologyStore,
    cycle: Arc<Cycle>,
    controller: Controller,
    refresh: Arc<RefreshSignal>,
    server_device_id: Option<DeviceId>,
}

impl OpenAudioSystem {
    /// Connect to the appliance described by `config`
    ///
    /// Fails with [`SdkError::CannotConnect`] if the host is malformed or the
    /// appliance does not answer. Does not poll; call [`Self::refresh`] or
    /// [`Self::start_polling`].
    pub fn connect(config: HubConfig) -> Result<Self> {
        config.validate()?;
        let client = OpenAudioClient::new(config.address());
        Self::with_appliance(config, Arc::new(client))
    }

    /// Connect through any [`Appliance`] implementation
    pub fn with_appliance(config: HubConfig, appliance: Arc<dyn Appliance>) -> Result<Self> {
        config.validate()?;

        if !appliance.can_connect() {
            tracing::error!("Could not connect to OpenAudio at {}", config.address());
            return Err(SdkError::CannotConnect(config.address()));
        }
        let server_device_id = appliance.get_server_device_id()?;
        tracing::info!(
            "Connected to OpenAudio at {} (server device {:?})",
            config.address(),
            server_device_id
        );

        let store = TopologyStore::new();
        let refresh = Arc::new(RefreshSignal::default());
        let cycle = Arc::new(Cycle {
            reconciler: Reconciler::new(Arc::clone(&appliance), store.clone()),
            timeout: config.cycle_timeout,
        });
        let controller = Controller::new(appliance, store.clone(), Arc::clone(&refresh));

        Ok(Self {
            config,
            store,
            cycle,
            controller,
            refresh,
            server_device_id,
        })
    }

    /// Run one reconciliation cycle now
    ///
    /// On failure the previously known topology stays readable.
    pub fn refresh(&self) -> Result<PollReport> {
        self.refresh.take_pending();
        self.cycle.run()
    }

    /// Whether a command asked for a refresh that has not run yet
    ///
    /// Only meaningful without a [`Poller`]; an attached poller consumes
    /// requests itself.
    pub fn refresh_requested(&self) -> bool {
        self.refresh.is_pending()
    }

    /// Start the background poller at the configured scan interval
    pub fn start_polling(&self) -> Poller {
        Poller::spawn(
            Arc::clone(&self.cycle),
            self.config.scan_interval,
            Arc::clone(&self.refresh),
        )
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// Device that serves the API, as reported at connect time
    pub fn server_device_id(&self) -> Option<&DeviceId> {
        self.server_device_id.as_ref()
    }

    /// Read-only access to the raw topology
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn amplifiers(&self) -> Vec<Amplifier> {
        self.store
            .device_ids()
            .into_iter()
            .map(|id| Amplifier::new(id, self.store.clone()))
            .collect()
    }

    pub fn amplifier(&self, device_id: &DeviceId) -> Result<Amplifier> {
        self.store
            .device(device_id)
            .map(|_| Amplifier::new(device_id.clone(), self.store.clone()))
            .map_err(|_| SdkError::DeviceNotFound(device_id.clone()))
    }

    /// Every zone, device by device
    pub fn zones(&self) -> Vec<Zone> {
        let ids: Vec<ZoneId> = self
            .store
            .read(|topology| topology.zones().map(|(_, zone)| zone.id.clone()).collect());
        ids.into_iter().map(|id| self.zone_handle(id)).collect()
    }

    pub fn zone(&self, zone_id: &ZoneId) -> Result<Zone> {
        self.store
            .zone(zone_id)
            .map(|_| self.zone_handle(zone_id.clone()))
            .map_err(|_| SdkError::ZoneNotFound(zone_id.clone()))
    }

    /// Every input attached to a device
    pub fn inputs(&self) -> Vec<Input> {
        let ids: Vec<InputId> = self
            .store
            .read(|topology| topology.inputs().map(|(_, input)| input.id.clone()).collect());
        ids.into_iter().map(|id| self.input_handle(id)).collect()
    }

    pub fn input(&self, input_id: &InputId) -> Result<Input> {
        self.store
            .input(input_id)
            .map(|_| self.input_handle(input_id.clone()))
            .map_err(|_| SdkError::InputNotFound(input_id.clone()))
    }

    /// Tear down: forget all topology so lingering handles read nothing
    pub fn close(self) {
        tracing::info!("Closing OpenAudio connection to {}", self.config.address());
        self.store.clear();
    }

    fn zone_handle(&self, id: ZoneId) -> Zone {
        Zone::new(id, self.store.clone(), self.controller.clone())
    }

    fn input_handle(&self, id: InputId) -> Input {
        Input::new(id, self.store.clone(), self.controller.clone())
    }
}
