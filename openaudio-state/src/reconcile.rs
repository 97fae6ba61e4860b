//! Reconciliation engine
//!
//! One call to [`reconcile`] is one poll cycle:
//!
//! 1. fetch `devices/info`, create or refresh every device it lists;
//! 2. fetch `zones/info`, hang each zone under the device its id names,
//!    dropping zones whose device is unknown, then remove stored zones the
//!    response no longer lists;
//! 3. the last device that received a zone becomes the input carrier;
//! 4. fetch the input id list, then each input's config, detach every
//!    previously attached input, attach this cycle's inputs to the carrier
//!    and record `"Source {id}"` in the catalogue.
//!
//! Each step commits under its own write lock once all of its fetches have
//! succeeded. A failing call aborts the rest of the cycle; steps already
//! committed in that cycle stay in the store.
//!
//! Devices missing from a later `devices/info` response are not removed and
//! catalogue entries are never pruned. Zones and attached inputs always
//! mirror the last successful response of their step.

use std::collections::BTreeSet;

use openaudio_api::{Appliance, DeviceId, InputId, ZoneId};
use parking_lot::Mutex;

use crate::error::PollStep;
use crate::model::{Input, Zone};
use crate::store::TopologyStore;
use crate::{Result, StateError};

/// What a successful cycle changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Devices seen in the device-info response
    pub devices: usize,
    /// Devices created by this cycle
    pub new_devices: usize,
    /// Zones stored under their owning device
    pub zones: usize,
    /// Zones dropped because their owning device is unknown
    pub dropped_zones: Vec<ZoneId>,
    /// Stored zones removed because the response no longer listed them
    pub removed_zones: Vec<ZoneId>,
    /// Device that received this cycle's inputs
    pub input_carrier: Option<DeviceId>,
    /// Inputs attached to the carrier
    pub inputs: usize,
    /// Input ids recorded in the source catalogue
    pub catalogued: usize,
}

/// Owning device of a zone: everything before the last `-`
///
/// Device ids may contain hyphens themselves, so only the final segment is
/// the zone suffix. A zone id without a hyphen has no owner and yields an
/// empty id, which never matches a device.
pub fn owning_device_id(zone_id: &ZoneId) -> DeviceId {
    match zone_id.as_str().rsplit_once('-') {
        Some((device, _suffix)) => DeviceId::new(device),
        None => DeviceId::new(""),
    }
}

/// Run one poll cycle against `appliance`, merging into `store`
///
/// Callers must not run two cycles on the same store at once; use
/// [`Reconciler`] when that cannot be guaranteed.
pub fn reconcile<A: Appliance + ?Sized>(appliance: &A, store: &TopologyStore) -> Result<PollReport> {
    let mut report = PollReport::default();

    merge_devices(appliance, store, &mut report)?;
    merge_zones(appliance, store, &mut report)?;
    merge_inputs(appliance, store, &mut report)?;

    tracing::debug!(
        "Poll complete: {} devices ({} new), {} zones ({} dropped), {} inputs on {:?}",
        report.devices,
        report.new_devices,
        report.zones,
        report.dropped_zones.len(),
        report.inputs,
        report.input_carrier
    );
    Ok(report)
}

fn merge_devices<A: Appliance + ?Sized>(
    appliance: &A,
    store: &TopologyStore,
    report: &mut PollReport,
) -> Result<()> {
    let devices = appliance.get_devices_info().map_err(|source| StateError::Poll {
        step: PollStep::Devices,
        source,
    })?;

    let mut topology = store.write();
    for info in devices {
        let device_id = info.device_id.clone();
        if topology.upsert_device(info) {
            tracing::debug!("Initialized device {}", device_id);
            report.new_devices += 1;
        }
        report.devices += 1;
    }
    Ok(())
}

fn merge_zones<A: Appliance + ?Sized>(
    appliance: &A,
    store: &TopologyStore,
    report: &mut PollReport,
) -> Result<()> {
    let zones = appliance.get_zones_info().map_err(|source| StateError::Poll {
        step: PollStep::Zones,
        source,
    })?;

    let mut topology = store.write();
    let mut current = BTreeSet::new();
    for info in zones {
        let owner = owning_device_id(&info.zone_id);
        let zone = Zone::from(info);
        let zone_id = zone.id.clone();
        current.insert(zone_id.clone());

        if topology.replace_zone(&owner, zone) {
            // Last attributed zone decides where the inputs go
            report.input_carrier = Some(owner);
            report.zones += 1;
        } else {
            tracing::warn!("Dropping zone {}: no device {:?}", zone_id, owner.as_str());
            report.dropped_zones.push(zone_id);
        }
    }

    report.removed_zones = topology.retain_zones(&current);
    for zone_id in &report.removed_zones {
        tracing::debug!("Removed zone {}: no longer reported", zone_id);
    }
    Ok(())
}

fn merge_inputs<A: Appliance + ?Sized>(
    appliance: &A,
    store: &TopologyStore,
    report: &mut PollReport,
) -> Result<()> {
    let summary = appliance.get_inputs_info().map_err(|source| StateError::Poll {
        step: PollStep::Inputs,
        source,
    })?;

    let inputs = summary
        .input_ids
        .into_iter()
        .map(|input_id| fetch_input(appliance, input_id))
        .collect::<Result<Vec<_>>>()?;

    let mut topology = store.write();
    // attachments only reflect this cycle's carrier
    topology.detach_inputs();
    for input in inputs {
        let input_id = input.id.clone();
        match &report.input_carrier {
            Some(carrier) if topology.attach_input(carrier, input) => {
                tracing::debug!("Attached input {} to {}", input_id, carrier);
                report.inputs += 1;
            }
            _ => tracing::debug!("No carrier device for input {}", input_id),
        }
        topology.catalogue.record(input_id);
        report.catalogued += 1;
    }
    Ok(())
}

fn fetch_input<A: Appliance + ?Sized>(appliance: &A, input_id: InputId) -> Result<Input> {
    match appliance.get_input_config(&input_id) {
        Ok(config) => Ok(Input::from_config(input_id, config)),
        Err(source) => Err(StateError::Poll {
            step: PollStep::InputConfig(input_id),
            source,
        }),
    }
}

/// Pairs an appliance with a store and serialises poll cycles
///
/// Overlapping [`Reconciler::reconcile`] calls queue on an internal lock, so
/// merges from two cycles never interleave.
pub struct Reconciler<A: Appliance + ?Sized> {
    store: TopologyStore,
    cycle: Mutex<()>,
    appliance: std::sync::Arc<A>,
}

impl<A: Appliance + ?Sized> Reconciler<A> {
    pub fn new(appliance: std::sync::Arc<A>, store: TopologyStore) -> Self {
        Self {
            store,
            cycle: Mutex::new(()),
            appliance,
        }
    }

    /// Run one poll cycle, waiting for any cycle already in flight
    pub fn reconcile(&self) -> Result<PollReport> {
        let _cycle = self.cycle.lock();
        reconcile(self.appliance.as_ref(), &self.store)
    }

    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    pub fn appliance(&self) -> &std::sync::Arc<A> {
        &self.appliance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("A-B-C", "A-B")]
    #[case("amp-1-z2", "amp-1")]
    #[case("amp-z", "amp")]
    #[case("A", "")]
    #[case("trailing-", "trailing")]
    fn test_owning_device_id(#[case] zone_id: &str, #[case] expected: &str) {
        assert_eq!(owning_device_id(&ZoneId::new(zone_id)).as_str(), expected);
    }

    proptest! {
        #[test]
        fn prop_owner_is_all_but_last_segment(
            segments in prop::collection::vec("[a-z0-9]{1,6}", 2..6)
        ) {
            let zone_id = ZoneId::new(segments.join("-"));
            let expected = segments[..segments.len() - 1].join("-");
            let owner = owning_device_id(&zone_id);
            prop_assert_eq!(owner.as_str(), expected.as_str());
        }

        #[test]
        fn prop_single_segment_has_no_owner(segment in "[a-z0-9]{1,12}") {
            let owner = owning_device_id(&ZoneId::new(segment));
            prop_assert_eq!(owner.as_str(), "");
        }
    }
}
