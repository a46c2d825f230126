//! Forwarding-database bookkeeping.

use saitest_types::{BridgePortOid, MacAddress, VlanId};

/// One FDB entry installed during the session.
///
/// FDB entries are keyed objects on the switch side (MAC plus the
/// bridge/VLAN they live in) rather than id-bearing ones, so the
/// descriptor keeps the key material needed to delete the entry at
/// teardown, together with the bridge port it forwards to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdbRecord {
    pub mac: MacAddress,
    pub vlan_id: VlanId,
    pub bridge_port: BridgePortOid,
}

impl FdbRecord {
    pub fn new(mac: MacAddress, vlan_id: VlanId, bridge_port: BridgePortOid) -> Self {
        Self {
            mac,
            vlan_id,
            bridge_port,
        }
    }
}
