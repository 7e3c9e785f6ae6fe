//! lswitchd - VLAN-aware L2 learning-switch controller
//!
//! Turns observed Ethernet frames into learned address-to-port bindings,
//! VLAN-isolated forwarding/flooding decisions, and switch-side rule
//! installations that let matching future traffic bypass the controller.
//!
//! Event flow:
//!
//! 1. `Connect` → switch lifecycle bootstrap: per-VLAN broadcast groups,
//!    then the default miss rule, then the switch is Ready
//! 2. `FrameObserved` → learn source binding, decide flood/unicast/drop,
//!    install an exact-match rule, release or re-inject the frame
//! 3. `Disconnect` → drop all per-switch state
//!
//! The switch control channel itself is out of scope; it delivers decoded
//! events and accepts commands through the `lswitch_common` types.

mod config;
mod daemon;
mod fdb;
mod groups;
mod installer;
mod pipeline;
mod switch_mgr;
mod topology;

pub use config::{SwitchConfig, TopologyConfig};
pub use daemon::ControllerDaemon;
pub use fdb::FdbTable;
pub use groups::{BroadcastGroup, BroadcastGroups};
pub use installer::RuleInstaller;
pub use pipeline::{Decision, ForwardingEngine};
pub use switch_mgr::{SwitchContext, SwitchState};
pub use topology::{PortRole, TopologyRegistry};
