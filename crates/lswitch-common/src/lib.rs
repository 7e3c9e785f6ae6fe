//! Shared vocabulary for the lswitch controller.
//!
//! This crate defines the types that cross the boundary between the
//! decision core and the switch control channel:
//!
//! - [`Event`]: the finite set of inputs the core consumes
//! - [`Command`]: the finite set of outputs the core produces
//! - [`CommandSink`]: the fire-and-forget transport boundary
//! - [`ControllerError`]: error classification for all core operations
//!
//! The control channel itself (connection setup, OpenFlow framing,
//! version negotiation) lives outside this workspace. It delivers decoded
//! [`Event`]s and accepts [`Command`]s; nothing here performs network I/O.

mod command;
mod error;
mod event;
mod sink;
mod types;

pub use command::{Command, FlowAction, MatchSpec, PRIORITY_LEARNED, PRIORITY_MISS};
pub use error::{ControllerError, ControllerResult};
pub use event::{Event, FrameEvent, SwitchCapabilities};
pub use sink::{CommandSink, RecordingSink};
pub use types::{EtherType, GroupId, MacAddress, ParseMacError, PortId, SwitchId, VlanId};
