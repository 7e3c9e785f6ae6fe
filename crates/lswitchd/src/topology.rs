//! Read-only per-switch topology registry.
//!
//! Built once from the validated configuration when a switch connects,
//! then shared immutably. Member lists are kept sorted so group programs
//! are deterministic.

use crate::config::SwitchConfig;
use lswitch_common::{ControllerError, ControllerResult, PortId, SwitchId, VlanId};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Classification of a switch port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortRole {
    /// Access port belonging to exactly one VLAN.
    Access(VlanId),
    /// Trunk port carrying all VLANs tagged; belongs to no single VLAN.
    Trunk,
}

/// Per-switch port/VLAN topology, immutable after construction.
#[derive(Debug, Clone)]
pub struct TopologyRegistry {
    switch: SwitchId,
    roles: HashMap<PortId, PortRole>,
    members: BTreeMap<VlanId, Vec<PortId>>,
    trunks: HashSet<PortId>,
}

impl TopologyRegistry {
    /// Builds the registry for one switch from its validated config section.
    pub fn from_config(switch: SwitchId, section: &SwitchConfig) -> Self {
        let trunks: HashSet<PortId> = section.trunks.iter().copied().collect();

        let mut roles: HashMap<PortId, PortRole> = section
            .ports
            .iter()
            .map(|(port, vlan)| (*port, PortRole::Access(*vlan)))
            .collect();
        for port in &trunks {
            roles.insert(*port, PortRole::Trunk);
        }

        let members = section
            .vlans
            .iter()
            .map(|(vlan, ports)| {
                let mut ports = ports.clone();
                ports.sort();
                (*vlan, ports)
            })
            .collect();

        Self {
            switch,
            roles,
            members,
            trunks,
        }
    }

    /// The switch this registry describes.
    pub fn switch(&self) -> SwitchId {
        self.switch
    }

    /// Classifies a port, or `None` if the configuration never mentions it.
    pub fn role_of(&self, port: PortId) -> Option<PortRole> {
        self.roles.get(&port).copied()
    }

    /// Classifies a port, reporting an unconfigured port as an error.
    pub fn require_role(&self, port: PortId) -> ControllerResult<PortRole> {
        self.role_of(port)
            .ok_or(ControllerError::UnconfiguredPort {
                switch: self.switch,
                port,
            })
    }

    /// Member ports of a VLAN, sorted. Empty for an unknown VLAN.
    pub fn members_of(&self, vlan: VlanId) -> &[PortId] {
        self.members.get(&vlan).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ports carrying tagged traffic for all VLANs.
    pub fn trunk_ports(&self) -> &HashSet<PortId> {
        &self.trunks
    }

    /// VLANs configured on this switch, in id order.
    pub fn vlans(&self) -> impl Iterator<Item = VlanId> + '_ {
        self.members.keys().copied()
    }
}
