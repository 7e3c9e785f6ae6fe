//! Static topology configuration.
//!
//! The port→VLAN table, VLAN membership lists, and trunk-port lists are
//! supplied as a file loaded once at startup and never mutated afterwards.
//! Validation happens at load time so a missing mapping surfaces as a
//! configuration error, never as a lookup panic in the frame path.

use lswitch_common::{ControllerError, ControllerResult, PortId, SwitchId, VlanId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

/// Per-switch topology section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Access classification: port → its designated VLAN.
    pub ports: BTreeMap<PortId, VlanId>,
    /// Broadcast domains: VLAN → member ports.
    pub vlans: BTreeMap<VlanId, Vec<PortId>>,
    /// Ports carrying all VLANs tagged; never flood-group members.
    #[serde(default)]
    pub trunks: Vec<PortId>,
}

/// The full topology configuration, keyed by switch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyConfig {
    pub switches: BTreeMap<SwitchId, SwitchConfig>,
}

impl TopologyConfig {
    /// Loads and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ControllerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ControllerError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        info!(
            "Loaded topology configuration for {} switch(es) from {}",
            config.switches.len(),
            path.display()
        );
        Ok(config)
    }

    /// Parses and validates a configuration document.
    pub fn from_yaml(text: &str) -> ControllerResult<Self> {
        let config: TopologyConfig = serde_yaml::from_str(text)
            .map_err(|e| ControllerError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the section for a switch, if configured.
    pub fn switch(&self, switch: SwitchId) -> Option<&SwitchConfig> {
        self.switches.get(&switch)
    }

    /// Checks the structural invariants of every switch section.
    pub fn validate(&self) -> ControllerResult<()> {
        for (switch, section) in &self.switches {
            section.validate(*switch)?;
        }
        Ok(())
    }
}

impl SwitchConfig {
    fn validate(&self, switch: SwitchId) -> ControllerResult<()> {
        let trunks: HashSet<PortId> = self.trunks.iter().copied().collect();

        for port in &trunks {
            if self.ports.contains_key(port) {
                return Err(ControllerError::invalid_config(format!(
                    "switch {switch}: port {port} is listed as a trunk but also has an access VLAN binding"
                )));
            }
        }

        for (port, vlan) in &self.ports {
            if !self.vlans.contains_key(vlan) {
                return Err(ControllerError::invalid_config(format!(
                    "switch {switch}: port {port} is bound to {vlan} which has no membership list"
                )));
            }
        }

        for (vlan, members) in &self.vlans {
            let mut seen = HashSet::new();
            for port in members {
                if !seen.insert(*port) {
                    return Err(ControllerError::invalid_config(format!(
                        "switch {switch}: port {port} listed twice in {vlan}"
                    )));
                }
                if trunks.contains(port) {
                    return Err(ControllerError::invalid_config(format!(
                        "switch {switch}: trunk port {port} cannot be a member of {vlan}"
                    )));
                }
                match self.ports.get(port) {
                    None => {
                        return Err(ControllerError::invalid_config(format!(
                            "switch {switch}: {vlan} member port {port} has no access VLAN binding"
                        )));
                    }
                    Some(bound) if bound != vlan => {
                        return Err(ControllerError::invalid_config(format!(
                            "switch {switch}: port {port} is a member of {vlan} but bound to {bound}"
                        )));
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }
}
