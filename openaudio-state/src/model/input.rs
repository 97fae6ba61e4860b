//! Input record

use openaudio_api::{InputConfig, InputId};
use serde::{Deserialize, Serialize};

/// Input class whose display name is authoritative
pub const NAMED_INPUT_CLASS: i64 = 0;

/// A source input attached to a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub id: InputId,
    pub name: Option<String>,
    pub enabled: bool,
    /// Type labels as reported; the head is the current type
    pub input_type: Vec<String>,
    pub input_class: Option<i64>,
    pub available_types: Vec<String>,
    /// Integer percentage, 0-100
    pub volume: Option<u8>,
}

impl Input {
    /// Build the stored record for `id` from its config payload
    ///
    /// The id comes from the input list, not from the payload, which may
    /// omit it.
    pub fn from_config(id: InputId, config: InputConfig) -> Self {
        Self {
            id,
            name: config.name,
            enabled: config.enabled,
            input_type: config.input_type,
            input_class: config.input_class,
            available_types: config.available_types,
            volume: config.volume,
        }
    }

    /// True for class-0 inputs, whose name should be shown instead of the type
    pub fn is_named(&self) -> bool {
        self.input_class == Some(NAMED_INPUT_CLASS)
    }

    /// Current type label, the first reported type
    pub fn current_type(&self) -> Option<&str> {
        self.input_type.first().map(String::as_str)
    }
}
