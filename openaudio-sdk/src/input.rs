//! Input handle

use openaudio_api::InputId;
use openaudio_state::presentation::InputView;
use openaudio_state::TopologyStore;

use crate::error::{Result, SdkError};
use crate::Controller;

/// Handle to one source input
#[derive(Debug, Clone)]
pub struct Input {
    pub id: InputId,
    store: TopologyStore,
    controller: Controller,
}

impl Input {
    pub(crate) fn new(id: InputId, store: TopologyStore, controller: Controller) -> Self {
        Self {
            id,
            store,
            controller,
        }
    }

    pub fn view(&self) -> Result<InputView> {
        self.record().map(|input| InputView::resolve(&input))
    }

    /// Raw input record as last polled
    pub fn record(&self) -> Result<openaudio_state::Input> {
        self.store
            .input(&self.id)
            .map_err(|_| SdkError::InputNotFound(self.id.clone()))
    }

    pub fn set_volume(&self, fraction: f64) -> Result<u8> {
        self.controller.set_input_volume(&self.id, fraction)
    }

    /// Switch the input type, e.g. `"Bluetooth"`
    pub fn select_source(&self, input_type: &str) -> Result<()> {
        self.controller.set_input_type(&self.id, input_type)
    }

    pub fn turn_on(&self) -> Result<()> {
        self.controller.set_input_enabled(&self.id, true)
    }

    pub fn turn_off(&self) -> Result<()> {
        self.controller.set_input_enabled(&self.id, false)
    }
}
