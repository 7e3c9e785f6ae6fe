//! Events consumed by the controller core.
//!
//! The control channel delivers these already decoded; the core never
//! parses frames or protocol messages itself. The enum replaces
//! registration-based handler dispatch with one explicit, testable
//! event contract: for a given switch, `Connect` always precedes any
//! `FrameObserved`, and frame order defines learning recency.

use crate::types::{EtherType, MacAddress, PortId, SwitchId};

/// Capabilities reported by a switch at connect time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwitchCapabilities {
    /// Number of packet buffers the switch can hold.
    pub buffers: u32,
    /// Number of flow tables.
    pub tables: u8,
}

/// A single observed Ethernet frame, decoded by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEvent {
    pub switch: SwitchId,
    /// Ingress port the frame arrived on.
    pub in_port: PortId,
    pub src: MacAddress,
    pub dst: MacAddress,
    pub ethertype: EtherType,
    /// Buffer reference if the switch retained the frame locally.
    pub buffer_id: Option<u32>,
    /// Raw payload, present only when the frame was not buffered.
    pub payload: Option<Vec<u8>>,
}

impl FrameEvent {
    /// Creates a frame event for a switch-buffered frame.
    pub fn buffered(
        switch: SwitchId,
        in_port: PortId,
        src: MacAddress,
        dst: MacAddress,
        ethertype: EtherType,
        buffer_id: u32,
    ) -> Self {
        Self {
            switch,
            in_port,
            src,
            dst,
            ethertype,
            buffer_id: Some(buffer_id),
            payload: None,
        }
    }

    /// Creates a frame event for an unbuffered frame carrying its payload.
    pub fn unbuffered(
        switch: SwitchId,
        in_port: PortId,
        src: MacAddress,
        dst: MacAddress,
        ethertype: EtherType,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            switch,
            in_port,
            src,
            dst,
            ethertype,
            buffer_id: None,
            payload: Some(payload),
        }
    }

    /// Returns true if the switch holds a buffered copy of this frame.
    pub fn is_buffered(&self) -> bool {
        self.buffer_id.is_some()
    }
}

/// The finite set of inputs the decision core consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A switch completed its control-channel handshake.
    Connect {
        switch: SwitchId,
        capabilities: SwitchCapabilities,
    },
    /// A frame reached the controller via the miss rule.
    FrameObserved(FrameEvent),
    /// A switch's control channel went down.
    Disconnect { switch: SwitchId },
}

impl Event {
    /// Returns the switch this event belongs to.
    ///
    /// Every event is scoped to exactly one switch; the dispatcher uses
    /// this to route it onto that switch's serialized stream.
    pub fn switch_id(&self) -> SwitchId {
        match self {
            Event::Connect { switch, .. } => *switch,
            Event::FrameObserved(frame) => frame.switch,
            Event::Disconnect { switch } => *switch,
        }
    }
}
