//! The transport boundary for outgoing commands.

use crate::command::Command;
use crate::error::ControllerResult;
use async_trait::async_trait;
use std::sync::Mutex;

/// Fire-and-forget command delivery to the switch transport.
///
/// `send` returns once the command is handed off; the core never waits
/// for switch acknowledgement. Commands for the same switch must be
/// delivered in the order they were sent, so a later rule is never
/// shadowed by an earlier one installed out of order. Ordering across
/// different switches is unconstrained.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Hands one command to the transport.
    async fn send(&self, command: Command) -> ControllerResult<()>;
}

/// A sink that records every command instead of delivering it.
///
/// Used by tests to assert on the exact program the core emits, and by
/// the daemon's record mode for debugging.
#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Mutex<Vec<Command>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded commands in send order.
    pub fn commands(&self) -> Vec<Command> {
        self.commands.lock().expect("recording sink poisoned").clone()
    }

    /// Drains and returns the recorded commands.
    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.lock().expect("recording sink poisoned"))
    }

    pub fn len(&self) -> usize {
        self.commands.lock().expect("recording sink poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CommandSink for RecordingSink {
    async fn send(&self, command: Command) -> ControllerResult<()> {
        self.commands
            .lock()
            .expect("recording sink poisoned")
            .push(command);
        Ok(())
    }
}
