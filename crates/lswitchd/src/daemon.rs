//! Event routing across switches.
//!
//! One tokio task per connected switch owns that switch's
//! [`SwitchContext`] and drains a dedicated channel, so events for the
//! same switch are processed in delivery order while different switches
//! proceed in parallel. No mutable state crosses the switch boundary;
//! the topology configuration is immutable and shared by `Arc`.

use crate::config::TopologyConfig;
use crate::switch_mgr::SwitchContext;
use crate::topology::TopologyRegistry;
use lswitch_common::{CommandSink, ControllerError, ControllerResult, Event, SwitchId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

struct SwitchHandle {
    tx: mpsc::UnboundedSender<Event>,
    task: JoinHandle<()>,
}

/// Routes control-channel events onto per-switch serialized streams.
pub struct ControllerDaemon {
    config: Arc<TopologyConfig>,
    sink: Arc<dyn CommandSink>,
    switches: HashMap<SwitchId, SwitchHandle>,
}

impl ControllerDaemon {
    pub fn new(config: Arc<TopologyConfig>, sink: Arc<dyn CommandSink>) -> Self {
        Self {
            config,
            sink,
            switches: HashMap::new(),
        }
    }

    /// Number of switches with a live event stream.
    pub fn switch_count(&self) -> usize {
        self.switches.len()
    }

    pub fn is_connected(&self, switch: SwitchId) -> bool {
        self.switches.contains_key(&switch)
    }

    /// Routes one event to its switch's stream.
    ///
    /// Errors returned here are the synchronous rejection paths: a
    /// connect for a switch absent from configuration, or a frame for a
    /// switch with no live stream. Processing errors inside a switch
    /// task are logged there; the frame is discarded with no partial
    /// state mutation.
    pub async fn dispatch(&mut self, event: Event) -> ControllerResult<()> {
        let switch = event.switch_id();
        match event {
            Event::Connect { .. } => {
                if !self.switches.contains_key(&switch) {
                    self.register(switch)?;
                }
                self.forward(switch, event)
            }
            Event::FrameObserved(_) => {
                if !self.switches.contains_key(&switch) {
                    return Err(ControllerError::SwitchNotReady { switch });
                }
                self.forward(switch, event)
            }
            Event::Disconnect { .. } => {
                match self.switches.remove(&switch) {
                    Some(handle) => {
                        // Forward the disconnect so the task tears down,
                        // then wait for it; commands already issued for
                        // this switch are flushed, later ones are stale.
                        let _ = handle.tx.send(event);
                        drop(handle.tx);
                        if let Err(e) = handle.task.await {
                            error!("Switch {} task panicked: {}", switch, e);
                        }
                        info!("Switch {} disconnected, state dropped", switch);
                    }
                    None => {
                        warn!("Ignoring disconnect for unknown switch {}", switch);
                    }
                }
                Ok(())
            }
        }
    }

    /// Closes every switch stream and waits for the tasks to drain.
    pub async fn shutdown(&mut self) {
        for (switch, handle) in self.switches.drain() {
            drop(handle.tx);
            if let Err(e) = handle.task.await {
                error!("Switch {} task panicked during shutdown: {}", switch, e);
            }
        }
    }

    fn register(&mut self, switch: SwitchId) -> ControllerResult<()> {
        let section = self
            .config
            .switch(switch)
            .ok_or(ControllerError::UnknownSwitch { switch })?;
        let registry = Arc::new(TopologyRegistry::from_config(switch, section));
        let context = SwitchContext::new(switch, registry, self.sink.clone());

        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_switch(context, rx));
        self.switches.insert(switch, SwitchHandle { tx, task });
        Ok(())
    }

    fn forward(&mut self, switch: SwitchId, event: Event) -> ControllerResult<()> {
        let handle = match self.switches.get(&switch) {
            Some(handle) => handle,
            None => return Err(ControllerError::SwitchNotReady { switch }),
        };
        handle.tx.send(event).map_err(|_| {
            ControllerError::transport(format!("event stream for switch {} is closed", switch))
        })
    }
}

/// Single-writer event loop for one switch.
async fn run_switch(mut context: SwitchContext, mut rx: mpsc::UnboundedReceiver<Event>) {
    while let Some(event) = rx.recv().await {
        match event {
            Event::Connect {
                switch,
                capabilities,
            } => {
                info!(
                    "Switch {} connected ({} buffers, {} tables), bootstrapping",
                    switch, capabilities.buffers, capabilities.tables
                );
                if let Err(e) = context.bootstrap().await {
                    // The switch stays on its miss rule; traffic still
                    // reaches the controller for inspection.
                    error!("Bootstrap failed for switch {}: {}", switch, e);
                }
            }
            Event::FrameObserved(frame) => {
                if let Err(e) = context.handle_frame(&frame).await {
                    if e.is_config_error() {
                        error!("Configuration error handling frame: {}", e);
                    } else {
                        warn!("Discarding frame: {}", e);
                    }
                }
            }
            Event::Disconnect { switch } => {
                debug!("Switch {} event stream closing", switch);
                break;
            }
        }
    }
}
