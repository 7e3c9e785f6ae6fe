//! Per-VLAN broadcast groups.
//!
//! Flooding never enumerates per-port actions at decision time. Instead,
//! one fan-out group per VLAN is computed when the switch connects and
//! every flood decision references it, which bounds flow-table churn and
//! keeps flooded frames inside their broadcast domain by construction.

use crate::topology::TopologyRegistry;
use lswitch_common::{GroupId, PortId, VlanId};
use std::collections::BTreeMap;

/// One switch-resident fan-out group.
///
/// Members are every port of the VLAN, ingress port included: the group
/// is static per VLAN and must serve any ingress, and the switch's output
/// semantics already skip forwarding a frame back out the port it arrived
/// on. Trunk ports are never members; they are served by tagging, not by
/// group fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastGroup {
    pub id: GroupId,
    pub vlan: VlanId,
    /// Member ports in ascending order.
    pub members: Vec<PortId>,
}

/// The broadcast groups of one switch, keyed by VLAN.
#[derive(Debug, Clone, Default)]
pub struct BroadcastGroups {
    by_vlan: BTreeMap<VlanId, BroadcastGroup>,
}

impl BroadcastGroups {
    /// Computes one group per VLAN known to the registry.
    ///
    /// Safe to run again on reconnect: the VLAN-derived group id makes
    /// re-installation an overwrite, never a duplicate.
    pub fn build(registry: &TopologyRegistry) -> Self {
        let by_vlan = registry
            .vlans()
            .map(|vlan| {
                let group = BroadcastGroup {
                    id: vlan.group_id(),
                    vlan,
                    members: registry.members_of(vlan).to_vec(),
                };
                (vlan, group)
            })
            .collect();
        Self { by_vlan }
    }

    /// The flooding target for a VLAN, if one was built.
    pub fn group_for(&self, vlan: VlanId) -> Option<&BroadcastGroup> {
        self.by_vlan.get(&vlan)
    }

    /// Groups in VLAN-id order.
    pub fn iter(&self) -> impl Iterator<Item = &BroadcastGroup> {
        self.by_vlan.values()
    }

    pub fn len(&self) -> usize {
        self.by_vlan.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_vlan.is_empty()
    }
}
