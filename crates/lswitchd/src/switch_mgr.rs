//! Per-switch lifecycle and frame handling.
//!
//! Each connected switch gets one [`SwitchContext`] owning all of its
//! mutable state (learning table, broadcast groups, readiness). The
//! context is driven by a single task, so per-switch mutation is
//! single-writer by construction.

use crate::groups::BroadcastGroups;
use crate::installer::RuleInstaller;
use crate::pipeline::{Decision, ForwardingEngine};
use crate::topology::TopologyRegistry;
use lswitch_common::{
    CommandSink, ControllerError, ControllerResult, FlowAction, FrameEvent, SwitchId,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Lifecycle state of a connected switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// Control channel is up, bootstrap programming not yet complete.
    Connected,
    /// Groups and the miss rule are installed; frame events are accepted.
    Ready,
}

/// All controller-side state for one switch.
pub struct SwitchContext {
    switch: SwitchId,
    state: SwitchState,
    engine: ForwardingEngine,
    groups: BroadcastGroups,
    installer: RuleInstaller,
}

impl SwitchContext {
    pub fn new(
        switch: SwitchId,
        registry: Arc<TopologyRegistry>,
        sink: Arc<dyn CommandSink>,
    ) -> Self {
        Self {
            switch,
            state: SwitchState::Connected,
            engine: ForwardingEngine::new(registry.clone()),
            groups: BroadcastGroups::build(&registry),
            installer: RuleInstaller::new(switch, sink),
        }
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    pub fn engine(&self) -> &ForwardingEngine {
        &self.engine
    }

    /// Runs connect-time programming: per-VLAN broadcast groups first,
    /// then the default miss rule, then the switch is Ready.
    ///
    /// Re-running on reconnect is safe: learned state is discarded and
    /// the VLAN-derived group ids make the group installs overwrites.
    #[instrument(skip(self), fields(switch = %self.switch))]
    pub async fn bootstrap(&mut self) -> ControllerResult<()> {
        self.state = SwitchState::Connected;
        self.engine.reset();

        self.installer.install_groups(&self.groups).await?;
        self.installer.install_miss_rule().await?;

        self.state = SwitchState::Ready;
        info!(
            "Switch {} ready: {} broadcast group(s) and miss rule installed",
            self.switch,
            self.groups.len()
        );
        Ok(())
    }

    /// Processes one observed frame: learn, decide, program.
    ///
    /// Learning and decision execute together; a frame rejected here
    /// leaves no partial state behind.
    pub async fn handle_frame(&mut self, frame: &FrameEvent) -> ControllerResult<()> {
        if self.state != SwitchState::Ready {
            return Err(ControllerError::SwitchNotReady { switch: self.switch });
        }

        let decision = self.engine.decide(frame)?;
        let action = match decision {
            Decision::Ignore => return Ok(()),
            Decision::Unicast(port) => FlowAction::ToPort(port),
            Decision::Drop => FlowAction::Drop,
            Decision::Flood(vlan) => {
                let group = self.groups.group_for(vlan).ok_or_else(|| {
                    ControllerError::invalid_config(format!(
                        "switch {}: no broadcast group built for {}",
                        self.switch, vlan
                    ))
                })?;
                FlowAction::ToGroup(group.id)
            }
        };

        self.installer.apply(frame, action).await
    }
}
