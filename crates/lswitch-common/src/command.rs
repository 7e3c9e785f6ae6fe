//! Commands produced by the controller core.
//!
//! Every command is a fire-and-forget instruction to the switch
//! transport. All installs use overwrite semantics on their key (the
//! match spec for flows, the group id for groups), so repeating a
//! command is always safe.

use crate::types::{GroupId, MacAddress, PortId, SwitchId};

/// Priority of the connect-time default (miss) rule.
pub const PRIORITY_MISS: u16 = 0;

/// Priority of learned-flow rules.
///
/// Strictly above [`PRIORITY_MISS`] so an installed rule shadows the
/// default and the controller stops seeing that flow.
pub const PRIORITY_LEARNED: u16 = 10;

/// Flow match specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchSpec {
    /// Matches everything; used only for the connect-time default rule.
    Miss,
    /// Exact match on the learned-flow 3-tuple.
    Exact {
        in_port: PortId,
        src: MacAddress,
        dst: MacAddress,
    },
}

/// Action attached to a flow rule or an injected frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowAction {
    /// Forward out a single port.
    ToPort(PortId),
    /// Forward through a broadcast group's fan-out.
    ToGroup(GroupId),
    /// Empty action set; matching frames are discarded by the switch.
    Drop,
    /// Punt to the controller, full payload, never buffered.
    ToController,
}

/// The finite set of outputs the decision core produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Install (or overwrite) a flow rule.
    InstallFlow {
        switch: SwitchId,
        match_spec: MatchSpec,
        priority: u16,
        action: FlowAction,
        /// When present, the switch applies the action to its buffered
        /// copy of the triggering frame; no separate injection happens.
        buffer_id: Option<u32>,
    },
    /// Install (or overwrite) an all-type fan-out group.
    InstallGroup {
        switch: SwitchId,
        group_id: GroupId,
        /// Every listed port receives a copy of a flooded frame.
        members: Vec<PortId>,
    },
    /// Re-inject an unbuffered frame with the decided action.
    Inject {
        switch: SwitchId,
        in_port: PortId,
        action: FlowAction,
        payload: Option<Vec<u8>>,
    },
}

impl Command {
    /// Returns the switch this command is addressed to.
    pub fn switch_id(&self) -> SwitchId {
        match self {
            Command::InstallFlow { switch, .. }
            | Command::InstallGroup { switch, .. }
            | Command::Inject { switch, .. } => *switch,
        }
    }

    pub fn is_flow_install(&self) -> bool {
        matches!(self, Command::InstallFlow { .. })
    }

    pub fn is_group_install(&self) -> bool {
        matches!(self, Command::InstallGroup { .. })
    }

    pub fn is_inject(&self) -> bool {
        matches!(self, Command::Inject { .. })
    }
}
