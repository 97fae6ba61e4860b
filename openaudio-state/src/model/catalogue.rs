//! Global source catalogue
//!
//! Maps every input id ever seen to its selectable label. Entries keep the
//! position of their first insertion and are never removed, so the list
//! offered to zones only grows across polls.

use std::collections::HashMap;

use openaudio_api::InputId;
use serde::{Deserialize, Serialize};

/// Insertion-ordered input id → label map
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceCatalogue {
    entries: Vec<(InputId, String)>,
    #[serde(skip)]
    index: HashMap<InputId, usize>,
}

impl SourceCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label synthesized for an input id
    pub fn label_for(input_id: &InputId) -> String {
        format!("Source {}", input_id)
    }

    /// Add or overwrite the label of `input_id`, keeping its original position
    pub fn insert(&mut self, input_id: InputId, label: String) {
        match self.position(&input_id) {
            Some(position) => self.entries[position].1 = label,
            None => {
                self.index.insert(input_id.clone(), self.entries.len());
                self.entries.push((input_id, label));
            }
        }
    }

    /// Record `input_id` with its synthesized label
    pub fn record(&mut self, input_id: InputId) {
        let label = Self::label_for(&input_id);
        self.insert(input_id, label);
    }

    pub fn label(&self, input_id: &InputId) -> Option<&str> {
        self.position(input_id)
            .map(|position| self.entries[position].1.as_str())
    }

    /// Input id carrying `label`, first match in catalogue order
    pub fn input_for_label(&self, label: &str) -> Option<&InputId> {
        self.entries
            .iter()
            .find(|(_, l)| l == label)
            .map(|(id, _)| id)
    }

    /// Labels in first-seen order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&InputId, &str)> {
        self.entries.iter().map(|(id, label)| (id, label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, input_id: &InputId) -> Option<usize> {
        // index is skipped by serde; fall back to a scan after deserialization
        self.index
            .get(input_id)
            .copied()
            .or_else(|| self.entries.iter().position(|(id, _)| id == input_id))
    }
}

impl PartialEq for SourceCatalogue {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for SourceCatalogue {}
