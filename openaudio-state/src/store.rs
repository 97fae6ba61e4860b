//! Topology store
//!
//! The store is the single place the appliance topology lives:
//!
//! ```text
//! TopologyStore
//! └── Arc<RwLock<Topology>>
//!     ├── devices: BTreeMap<DeviceId, Device>
//!     │   ├── zones:  BTreeMap<ZoneId, Zone>
//!     │   └── inputs: BTreeMap<InputId, Input>
//!     └── catalogue: SourceCatalogue (input id → "Source {id}")
//! ```
//!
//! Only the reconciliation engine writes, one merge step per critical
//! section. Readers go through [`TopologyStore::read`] or take an owned
//! snapshot, so they never see a device half-way through a merge.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use openaudio_api::{DeviceId, DeviceInfo, InputId, ZoneId};
use parking_lot::{RwLock, RwLockWriteGuard};
use serde::{Deserialize, Serialize};

use crate::model::{Device, Input, SourceCatalogue, Zone};
use crate::{Result, StateError};

/// The object graph built from the appliance's resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    pub devices: BTreeMap<DeviceId, Device>,
    pub catalogue: SourceCatalogue,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn device(&self, device_id: &DeviceId) -> Option<&Device> {
        self.devices.get(device_id)
    }

    /// The zone with `zone_id` and the device that owns it
    pub fn find_zone(&self, zone_id: &ZoneId) -> Option<(&Device, &Zone)> {
        self.devices
            .values()
            .find_map(|device| device.zone(zone_id).map(|zone| (device, zone)))
    }

    /// The input with `input_id` and the device it is attached to
    pub fn find_input(&self, input_id: &InputId) -> Option<(&Device, &Input)> {
        self.devices
            .values()
            .find_map(|device| device.input(input_id).map(|input| (device, input)))
    }

    /// Every zone with its owning device, device by device
    pub fn zones(&self) -> impl Iterator<Item = (&Device, &Zone)> {
        self.devices
            .values()
            .flat_map(|device| device.zones.values().map(move |zone| (device, zone)))
    }

    /// Every attached input with its device, device by device
    pub fn inputs(&self) -> impl Iterator<Item = (&Device, &Input)> {
        self.devices
            .values()
            .flat_map(|device| device.inputs.values().map(move |input| (device, input)))
    }

    /// Create the device on first sight, otherwise overwrite its sub-records
    ///
    /// Returns `true` when the device was new.
    pub(crate) fn upsert_device(&mut self, info: DeviceInfo) -> bool {
        match self.devices.get_mut(&info.device_id) {
            Some(device) => {
                device.update(info);
                false
            }
            None => {
                let device = Device::new(info);
                self.devices.insert(device.id.clone(), device);
                true
            }
        }
    }

    /// Replace `zone` under `owner`; `false` if the owner is unknown
    pub(crate) fn replace_zone(&mut self, owner: &DeviceId, zone: Zone) -> bool {
        match self.devices.get_mut(owner) {
            Some(device) => {
                device.zones.insert(zone.id.clone(), zone);
                true
            }
            None => false,
        }
    }

    /// Drop every zone whose id is not in `current`, returning the dropped ids
    pub(crate) fn retain_zones(&mut self, current: &BTreeSet<ZoneId>) -> Vec<ZoneId> {
        let mut removed = Vec::new();
        for device in self.devices.values_mut() {
            device.zones.retain(|zone_id, _| {
                let keep = current.contains(zone_id);
                if !keep {
                    removed.push(zone_id.clone());
                }
                keep
            });
        }
        removed
    }

    /// Detach every input from every device
    pub(crate) fn detach_inputs(&mut self) {
        for device in self.devices.values_mut() {
            device.inputs.clear();
        }
    }

    /// Attach or replace `input` on `carrier`; `false` if the carrier is unknown
    pub(crate) fn attach_input(&mut self, carrier: &DeviceId, input: Input) -> bool {
        match self.devices.get_mut(carrier) {
            Some(device) => {
                device.inputs.insert(input.id.clone(), input);
                true
            }
            None => false,
        }
    }
}

/// Shared handle to a [`Topology`]
///
/// Clones share the same topology. Create one per appliance connection and
/// drop it (or [`TopologyStore::clear`] it) when the connection goes away.
#[derive(Debug, Clone, Default)]
pub struct TopologyStore {
    inner: Arc<RwLock<Topology>>,
}

impl TopologyStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a consistent view of the topology
    pub fn read<R>(&self, f: impl FnOnce(&Topology) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Owned copy of the whole topology
    pub fn snapshot(&self) -> Topology {
        self.inner.read().clone()
    }

    pub fn device(&self, device_id: &DeviceId) -> Result<Device> {
        self.read(|topology| topology.device(device_id).cloned())
            .ok_or_else(|| StateError::DeviceNotFound(device_id.clone()))
    }

    pub fn device_ids(&self) -> Vec<DeviceId> {
        self.read(|topology| topology.devices.keys().cloned().collect())
    }

    pub fn zone(&self, zone_id: &ZoneId) -> Result<Zone> {
        self.read(|topology| topology.find_zone(zone_id).map(|(_, zone)| zone.clone()))
            .ok_or_else(|| StateError::ZoneNotFound(zone_id.clone()))
    }

    pub fn input(&self, input_id: &InputId) -> Result<Input> {
        self.read(|topology| topology.find_input(input_id).map(|(_, input)| input.clone()))
            .ok_or_else(|| StateError::InputNotFound(input_id.clone()))
    }

    pub fn catalogue(&self) -> SourceCatalogue {
        self.read(|topology| topology.catalogue.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.read(|topology| topology.devices.is_empty())
    }

    /// Drop everything, for when the appliance connection is torn down
    pub fn clear(&self) {
        *self.inner.write() = Topology::new();
    }

    /// Exclusive access for one merge step
    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Topology> {
        self.inner.write()
    }
}
