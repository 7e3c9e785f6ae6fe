//! Core identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a switch (datapath), unique across the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwitchId(pub u64);

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Port identifier, local to a single switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortId(pub u32);

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// VLAN identifier, scoped per switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VlanId(pub u16);

impl VlanId {
    /// Derives the broadcast group identifier for this VLAN.
    ///
    /// Group id = VLAN id. The convention makes group installation
    /// idempotent across reconnects: re-installing a VLAN's group
    /// overwrites the prior program instead of duplicating it. No other
    /// group identifiers are allocated by this controller, so the range
    /// cannot collide.
    pub fn group_id(&self) -> GroupId {
        GroupId(self.0 as u32)
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vlan{}", self.0)
    }
}

/// Switch-resident group table identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error parsing a MAC address from its textual form.
#[derive(Debug, Clone, Error)]
#[error("Invalid MAC address '{input}': {reason}")]
pub struct ParseMacError {
    /// The input that failed to parse.
    pub input: String,
    /// Why it was rejected.
    pub reason: String,
}

/// 48-bit link-layer address, compared by exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// The all-ones broadcast address.
    pub const BROADCAST: MacAddress = MacAddress([0xff; 6]);

    pub fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Returns true if the group bit is set (broadcast or multicast).
    ///
    /// Such addresses are never learned as destinations, so frames
    /// addressed to them always take the flood path.
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl FromStr for MacAddress {
    type Err = ParseMacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(ParseMacError {
                input: s.to_string(),
                reason: format!("expected 6 octets, got {}", parts.len()),
            });
        }
        let mut bytes = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            bytes[i] = u8::from_str_radix(part, 16).map_err(|_| ParseMacError {
                input: s.to_string(),
                reason: format!("invalid hex octet '{}'", part),
            })?;
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

/// Ethernet frame type field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EtherType(pub u16);

impl EtherType {
    /// Link-layer discovery protocol.
    pub const LLDP: EtherType = EtherType(0x88cc);
    pub const IPV4: EtherType = EtherType(0x0800);
    pub const ARP: EtherType = EtherType(0x0806);

    /// Returns true for discovery/control traffic that must never be
    /// learned or forwarded by the L2 pipeline.
    pub fn is_lldp(&self) -> bool {
        *self == Self::LLDP
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mac_parse_and_display() {
        let mac: MacAddress = "00:11:22:aa:bb:cc".parse().unwrap();
        assert_eq!(mac.octets(), [0x00, 0x11, 0x22, 0xaa, 0xbb, 0xcc]);
        assert_eq!(mac.to_string(), "00:11:22:aa:bb:cc");
    }

    #[test]
    fn test_mac_parse_rejects_bad_input() {
        assert!("00:11:22:aa:bb".parse::<MacAddress>().is_err());
        assert!("00:11:22:aa:bb:zz".parse::<MacAddress>().is_err());
        assert!("".parse::<MacAddress>().is_err());
    }

    #[test]
    fn test_mac_multicast_bit() {
        assert!(MacAddress::BROADCAST.is_multicast());
        assert!(MacAddress::new([0x01, 0x00, 0x5e, 0, 0, 1]).is_multicast());
        assert!(!MacAddress::new([0x00, 0x11, 0x22, 0x33, 0x44, 0x55]).is_multicast());
    }

    #[test]
    fn test_vlan_group_id_convention() {
        assert_eq!(VlanId(10).group_id(), GroupId(10));
        assert_eq!(VlanId(4094).group_id(), GroupId(4094));
    }

    #[test]
    fn test_switch_id_display() {
        assert_eq!(SwitchId(1).to_string(), "0000000000000001");
        assert_eq!(SwitchId(0xabcd).to_string(), "000000000000abcd");
    }

    #[test]
    fn test_ethertype_lldp() {
        assert!(EtherType::LLDP.is_lldp());
        assert!(!EtherType::IPV4.is_lldp());
        assert_eq!(EtherType::LLDP.to_string(), "0x88cc");
    }
}
