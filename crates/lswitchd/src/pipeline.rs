//! Forwarding decision engine.
//!
//! Consumes one frame event at a time, updates the learning table, and
//! produces a [`Decision`]. Pure control-plane state: this module never
//! performs I/O, the rule installer turns decisions into commands.

use crate::fdb::FdbTable;
use crate::topology::{PortRole, TopologyRegistry};
use lswitch_common::{ControllerResult, FrameEvent, PortId, VlanId};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Outcome of processing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Discard silently; no learning, no programming.
    Ignore,
    /// Destination unknown: flood through the VLAN's broadcast group.
    Flood(VlanId),
    /// Destination learned in the same VLAN: forward to its port.
    Unicast(PortId),
    /// Destination learned in a different VLAN: drop, and install a rule
    /// so the controller is not re-consulted for this flow.
    Drop,
}

/// Per-switch decision state: the topology registry plus the learning
/// table it feeds.
#[derive(Debug)]
pub struct ForwardingEngine {
    registry: Arc<TopologyRegistry>,
    fdb: FdbTable,
}

impl ForwardingEngine {
    pub fn new(registry: Arc<TopologyRegistry>) -> Self {
        Self {
            registry,
            fdb: FdbTable::new(),
        }
    }

    /// The learning table, for inspection.
    pub fn fdb(&self) -> &FdbTable {
        &self.fdb
    }

    /// Forgets all learned bindings. Run when the switch re-bootstraps.
    pub fn reset(&mut self) {
        self.fdb.clear();
    }

    /// Classifies a frame into a forwarding decision, learning the
    /// source binding as a side effect.
    ///
    /// The source MAC is learned exactly once per frame, before the
    /// destination lookup, so a frame addressed to its own source
    /// resolves against the fresh binding.
    #[instrument(skip(self, frame), fields(switch = %frame.switch))]
    pub fn decide(&mut self, frame: &FrameEvent) -> ControllerResult<Decision> {
        if frame.ethertype.is_lldp() {
            debug!("Ignoring link-layer discovery frame on port {}", frame.in_port);
            return Ok(Decision::Ignore);
        }

        // Classify the ingress port first: frames from trunk ports carry
        // tags this pipeline cannot see, so their bindings must not enter
        // the table. An unconfigured port is an operator error.
        let src_vlan = match self.registry.require_role(frame.in_port)? {
            PortRole::Access(vlan) => vlan,
            PortRole::Trunk => {
                warn!(
                    "Discarding frame from trunk port {}: untagged classification undefined",
                    frame.in_port
                );
                return Ok(Decision::Ignore);
            }
        };

        if let Some(previous) = self.fdb.learn(frame.src, frame.in_port) {
            info!(
                "Station move: {} relocated from port {} to port {}",
                frame.src, previous, frame.in_port
            );
        }

        let out_port = match self.fdb.lookup(frame.dst) {
            Some(port) => port,
            None => {
                if frame.dst.is_multicast() {
                    debug!("Flooding group-addressed frame to {}", frame.dst);
                }
                return Ok(Decision::Flood(src_vlan));
            }
        };

        // Bindings are only ever learned on access ports, so the learned
        // port must classify; anything else resolves to drop rather than
        // risk crossing a VLAN boundary.
        match self.registry.require_role(out_port)? {
            PortRole::Access(dst_vlan) if dst_vlan == src_vlan => Ok(Decision::Unicast(out_port)),
            PortRole::Access(dst_vlan) => {
                debug!(
                    "Cross-VLAN traffic {} ({}) -> {} ({}), dropping",
                    frame.src, src_vlan, frame.dst, dst_vlan
                );
                Ok(Decision::Drop)
            }
            PortRole::Trunk => {
                warn!("Learned binding for {} points at trunk port {}", frame.dst, out_port);
                Ok(Decision::Drop)
            }
        }
    }
}
