//! Zone handle

use openaudio_api::ZoneId;
use openaudio_state::presentation::ZoneView;
use openaudio_state::TopologyStore;

use crate::error::{Result, SdkError};
use crate::Controller;

/// Handle to one output zone
///
/// Reads resolve against the store on every call; commands go through the
/// shared [`Controller`].
///
/// ```rust,ignore
/// let view = zone.view()?;
/// if view.state == PlayerState::Playing {
///     println!("{}", view.media_title.unwrap_or_default());
/// }
/// zone.set_volume(0.4)?;
/// zone.select_source("Source 2")?;
/// ```
#[derive(Debug, Clone)]
pub struct Zone {
    pub id: ZoneId,
    store: TopologyStore,
    controller: Controller,
}

impl Zone {
    pub(crate) fn new(id: ZoneId, store: TopologyStore, controller: Controller) -> Self {
        Self {
            id,
            store,
            controller,
        }
    }

    /// Current presentation state
    pub fn view(&self) -> Result<ZoneView> {
        self.store
            .read(|topology| {
                topology
                    .find_zone(&self.id)
                    .map(|(device, zone)| ZoneView::resolve(device, zone, &topology.catalogue))
            })
            .ok_or_else(|| SdkError::ZoneNotFound(self.id.clone()))
    }

    /// Raw zone record as last polled
    pub fn record(&self) -> Result<openaudio_state::Zone> {
        self.store
            .zone(&self.id)
            .map_err(|_| SdkError::ZoneNotFound(self.id.clone()))
    }

    pub fn set_volume(&self, fraction: f64) -> Result<u8> {
        self.controller.set_zone_volume(&self.id, fraction)
    }

    /// Select by source-list label; `"None"` deselects
    pub fn select_source(&self, source: &str) -> Result<()> {
        self.controller.select_zone_source(&self.id, source)
    }
}
