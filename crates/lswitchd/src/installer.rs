//! Rule installer: turns decisions into switch programming.
//!
//! Every install is fire-and-forget and safe to repeat: flow rules key on
//! their match spec and groups on their VLAN-derived id, so a repeated
//! command overwrites rather than duplicates.

use crate::groups::{BroadcastGroup, BroadcastGroups};
use lswitch_common::{
    Command, CommandSink, ControllerResult, FlowAction, FrameEvent, MatchSpec, SwitchId,
    PRIORITY_LEARNED, PRIORITY_MISS,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Emits programming commands for one switch.
pub struct RuleInstaller {
    switch: SwitchId,
    sink: Arc<dyn CommandSink>,
}

impl RuleInstaller {
    pub fn new(switch: SwitchId, sink: Arc<dyn CommandSink>) -> Self {
        Self { switch, sink }
    }

    /// Installs one fan-out group program.
    pub async fn install_group(&self, group: &BroadcastGroup) -> ControllerResult<()> {
        debug!(
            "Installing group {} for {} with members {:?}",
            group.id, group.vlan, group.members
        );
        self.sink
            .send(Command::InstallGroup {
                switch: self.switch,
                group_id: group.id,
                members: group.members.clone(),
            })
            .await
    }

    /// Installs every VLAN's broadcast group, in VLAN-id order.
    pub async fn install_groups(&self, groups: &BroadcastGroups) -> ControllerResult<()> {
        for group in groups.iter() {
            self.install_group(group).await?;
        }
        Ok(())
    }

    /// Installs the connect-time default rule: match everything at the
    /// lowest priority and punt to the controller unbuffered, so full
    /// payloads always arrive.
    pub async fn install_miss_rule(&self) -> ControllerResult<()> {
        self.sink
            .send(Command::InstallFlow {
                switch: self.switch,
                match_spec: MatchSpec::Miss,
                priority: PRIORITY_MISS,
                action: FlowAction::ToController,
                buffer_id: None,
            })
            .await
    }

    /// Programs the switch for one decided frame.
    ///
    /// Installs an exact-match rule for the frame's 3-tuple carrying the
    /// decided action. A buffered frame rides the install itself (the
    /// switch applies the action to its buffered copy); an unbuffered
    /// frame is re-injected with the action and original payload
    /// immediately after the install.
    #[instrument(skip(self, frame), fields(switch = %self.switch))]
    pub async fn apply(&self, frame: &FrameEvent, action: FlowAction) -> ControllerResult<()> {
        self.sink
            .send(Command::InstallFlow {
                switch: self.switch,
                match_spec: MatchSpec::Exact {
                    in_port: frame.in_port,
                    src: frame.src,
                    dst: frame.dst,
                },
                priority: PRIORITY_LEARNED,
                action,
                buffer_id: frame.buffer_id,
            })
            .await?;

        if !frame.is_buffered() {
            self.sink
                .send(Command::Inject {
                    switch: self.switch,
                    in_port: frame.in_port,
                    action,
                    payload: frame.payload.clone(),
                })
                .await?;
        }

        Ok(())
    }
}
