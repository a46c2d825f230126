//! Shared vocabulary types for the SAI conformance-test harness.
//!
//! Everything a test session needs to name switch-resident state lives
//! here:
//!
//! - [`Oid`]: type-safe SAI object ids with per-kind markers
//! - [`VlanId`]: IEEE 802.1Q VLAN identifiers
//! - [`MacAddress`]: 48-bit Ethernet MAC addresses

mod mac;
mod oid;
mod vlan;

pub use mac::MacAddress;
pub use oid::{
    BridgeOid, BridgePortOid, HostifOid, HostifTableEntryOid, HostifTrapGroupOid, LagMemberOid,
    LagOid, NeighborEntryOid, NextHopOid, Oid, OidKind, PortOid, RawOid, RouteEntryOid,
    RouterInterfaceOid, SwitchOid, VirtualRouterOid, VlanMemberOid, VlanOid,
};
pub use vlan::VlanId;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid VLAN ID: {0} (must be 1-4094)")]
    InvalidVlanId(u16),
}
