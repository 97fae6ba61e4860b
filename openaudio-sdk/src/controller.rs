//! Control façade
//!
//! Turns user commands into appliance calls. Commands never touch the
//! topology store; each successful command raises a refresh request and the
//! next cycle picks up the new state.

use std::fmt;
use std::sync::Arc;

use openaudio_api::{Appliance, InputId, ZoneId};
use openaudio_state::presentation::{percentage, source_to_input, NO_SOURCE};
use openaudio_state::TopologyStore;

use crate::error::{Result, SdkError};
use crate::poller::RefreshSignal;

#[derive(Clone)]
pub struct Controller {
    appliance: Arc<dyn Appliance>,
    store: TopologyStore,
    refresh: Arc<RefreshSignal>,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller").finish_non_exhaustive()
    }
}

impl Controller {
    pub(crate) fn new(
        appliance: Arc<dyn Appliance>,
        store: TopologyStore,
        refresh: Arc<RefreshSignal>,
    ) -> Self {
        Self {
            appliance,
            store,
            refresh,
        }
    }

    /// Set a zone's volume from a 0.0-1.0 fraction; returns the percentage sent
    pub fn set_zone_volume(&self, zone_id: &ZoneId, fraction: f64) -> Result<u8> {
        let volume = volume_percentage(fraction)?;
        tracing::debug!("Setting volume to {} for zone {}", volume, zone_id);
        let applied = self.appliance.set_zone_volume(zone_id, volume)?;
        self.refresh.request();
        Ok(applied)
    }

    /// Select one input on a zone, or none
    pub fn set_zone_input(&self, zone_id: &ZoneId, input: Option<&InputId>) -> Result<()> {
        tracing::debug!("Setting input to {:?} for zone {}", input, zone_id);
        self.appliance.set_zone_input(zone_id, input)?;
        self.refresh.request();
        Ok(())
    }

    /// Select a zone's input by its source-list label
    ///
    /// `"None"` deselects. A label the catalogue does not know also
    /// deselects.
    pub fn select_zone_source(&self, zone_id: &ZoneId, source: &str) -> Result<()> {
        let input = self
            .store
            .read(|topology| source_to_input(source, &topology.catalogue));
        if input.is_none() && source != NO_SOURCE {
            tracing::warn!("Unknown source {:?} for zone {}, deselecting", source, zone_id);
        }
        self.set_zone_input(zone_id, input.as_ref())
    }

    pub fn set_input_type(&self, input_id: &InputId, input_type: &str) -> Result<()> {
        tracing::debug!("Setting input type to {} for input {}", input_type, input_id);
        self.appliance.set_input_type(input_id, input_type)?;
        self.refresh.request();
        Ok(())
    }

    /// Set an input's volume from a 0.0-1.0 fraction; returns the percentage sent
    pub fn set_input_volume(&self, input_id: &InputId, fraction: f64) -> Result<u8> {
        let volume = volume_percentage(fraction)?;
        tracing::debug!("Setting volume to {} for input {}", volume, input_id);
        self.appliance.set_input_volume(input_id, volume)?;
        self.refresh.request();
        Ok(volume)
    }

    pub fn set_input_enabled(&self, input_id: &InputId, enabled: bool) -> Result<()> {
        tracing::debug!(
            "{} input {}",
            if enabled { "Enabling" } else { "Disabling" },
            input_id
        );
        self.appliance.enable_input(input_id, enabled)?;
        self.refresh.request();
        Ok(())
    }
}

/// Fraction to appliance percentage, rejecting anything outside 0.0-1.0
pub fn volume_percentage(fraction: f64) -> Result<u8> {
    if fraction.is_nan() || !(0.0..=1.0).contains(&fraction) {
        return Err(SdkError::InvalidVolume(fraction));
    }
    Ok(percentage(fraction))
}
