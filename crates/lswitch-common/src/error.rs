//! Error types for controller operations.
//!
//! All errors implement `std::error::Error` via `thiserror`. No error
//! ever changes a forwarding decision: cross-VLAN traffic resolves to an
//! explicit drop-and-install, never to a fallback flood, and a
//! configuration gap leaves the affected switch on its default miss rule
//! so traffic still reaches the controller.

use crate::types::{PortId, SwitchId};
use std::io;
use thiserror::Error;

/// Result type alias for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Errors that can occur in the decision core.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A switch reported a port the topology registry has no VLAN
    /// binding for. Reported rather than defaulted: mis-tagged traffic
    /// could otherwise cross VLAN boundaries.
    #[error("No VLAN binding for port {port} on switch {switch}")]
    UnconfiguredPort {
        /// The switch that observed the frame.
        switch: SwitchId,
        /// The unbound ingress port.
        port: PortId,
    },

    /// Bootstrap was invoked for a switch absent from configuration.
    #[error("Switch {switch} is not present in the topology configuration")]
    UnknownSwitch {
        /// The unconfigured switch.
        switch: SwitchId,
    },

    /// A frame event arrived for a switch not yet in Ready state.
    #[error("Frame event for switch {switch} arrived before bootstrap completed")]
    SwitchNotReady {
        /// The switch the event was addressed to.
        switch: SwitchId,
    },

    /// The topology configuration failed validation at load time.
    #[error("Invalid topology configuration: {detail}")]
    InvalidConfig {
        /// What was rejected.
        detail: String,
    },

    /// Failed to read the topology configuration file.
    #[error("Failed to read configuration '{path}': {source}")]
    ConfigIo {
        /// The path that could not be read.
        path: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A command could not be delivered to the switch transport.
    /// Not retried by the core; the contract is "fire a correct command
    /// once", delivery guarantees belong to the transport.
    #[error("Transport error: {message}")]
    Transport {
        /// Error message from the transport.
        message: String,
    },
}

impl ControllerError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(detail: impl Into<String>) -> Self {
        Self::InvalidConfig {
            detail: detail.into(),
        }
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns true for configuration errors that an operator must fix.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ControllerError::UnconfiguredPort { .. }
                | ControllerError::UnknownSwitch { .. }
                | ControllerError::InvalidConfig { .. }
                | ControllerError::ConfigIo { .. }
        )
    }

    /// Returns true for event-ordering errors where the frame is
    /// discarded without any state mutation.
    pub fn is_out_of_order(&self) -> bool {
        matches!(self, ControllerError::SwitchNotReady { .. })
    }
}
