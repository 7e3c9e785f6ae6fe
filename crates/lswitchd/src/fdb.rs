//! Per-switch MAC learning table.
//!
//! Maps source MAC addresses to the ingress port they were last observed
//! on. Last write wins. Entries are never aged out; they live until the
//! switch disconnects, which drops the whole table.

use lswitch_common::{MacAddress, PortId};
use std::collections::HashMap;

/// Learned MAC→port bindings for a single switch.
///
/// Owned by the switch context and mutated only from that switch's frame
/// path, so the "most recent observation wins" invariant needs no locking.
#[derive(Debug, Clone, Default)]
pub struct FdbTable {
    entries: HashMap<MacAddress, PortId>,
}

impl FdbTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a MAC to its latest ingress port, unconditionally
    /// overwriting any prior binding.
    ///
    /// Returns the previous port if the station moved.
    pub fn learn(&mut self, mac: MacAddress, port: PortId) -> Option<PortId> {
        match self.entries.insert(mac, port) {
            Some(previous) if previous != port => Some(previous),
            _ => None,
        }
    }

    /// Looks up the port a MAC was last observed on.
    pub fn lookup(&self, mac: MacAddress) -> Option<PortId> {
        self.entries.get(&mac).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every binding. Used when a switch re-runs bootstrap.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
