//! LAG collaborator model and the per-slot routing binding.

use crate::error::{DutError, DutResult};
use saitest_types::{LagMemberOid, LagOid, NeighborEntryOid, NextHopOid, RouteEntryOid, RouterInterfaceOid};
use std::fmt;

/// A link aggregation group created on the switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lag {
    oid: LagOid,
    member_oids: Vec<LagMemberOid>,
    member_port_indexes: Vec<u32>,
}

impl Lag {
    /// Creates a LAG record with no members yet.
    pub fn new(oid: LagOid) -> Self {
        Self {
            oid,
            member_oids: Vec::new(),
            member_port_indexes: Vec::new(),
        }
    }

    /// Records a LAG member and the device-port index it bundles.
    pub fn add_member(&mut self, member: LagMemberOid, port_index: u32) {
        self.member_oids.push(member);
        self.member_port_indexes.push(port_index);
    }

    /// The LAG object id on the switch.
    pub fn oid(&self) -> LagOid {
        self.oid
    }

    /// Member object ids, in creation order.
    pub fn member_oids(&self) -> &[LagMemberOid] {
        &self.member_oids
    }

    /// Device-port indexes of the members, aligned with [`Self::member_oids`].
    pub fn member_port_indexes(&self) -> &[u32] {
        &self.member_port_indexes
    }
}

/// The two LAG slots the harness maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LagSlot {
    Lag1,
    Lag2,
}

impl LagSlot {
    pub(crate) const fn field_name(&self) -> &'static str {
        match self {
            LagSlot::Lag1 => "lag1",
            LagSlot::Lag2 => "lag2",
        }
    }
}

impl fmt::Display for LagSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// The routing state bound to one LAG slot.
///
/// A LAG is only usable as a routed uplink once its router interface,
/// neighbor, next hop, and route all exist, and they are torn down as a
/// unit. Modeling the quintuple as one value makes a partial binding
/// unrepresentable in the descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LagBinding {
    pub lag: Lag,
    pub rif: RouterInterfaceOid,
    pub neighbor: NeighborEntryOid,
    pub next_hop: NextHopOid,
    pub route: RouteEntryOid,
}

impl LagBinding {
    /// Checks that all five handles are present.
    ///
    /// # Errors
    ///
    /// Returns [`DutError::IncompleteLagBinding`] naming the first
    /// missing handle.
    pub fn check_complete(&self, slot: LagSlot) -> DutResult<()> {
        let missing = if self.lag.oid().is_null() {
            Some("lag")
        } else if self.rif.is_null() {
            Some("rif")
        } else if self.neighbor.is_null() {
            Some("neighbor")
        } else if self.next_hop.is_null() {
            Some("next_hop")
        } else if self.route.is_null() {
            Some("route")
        } else {
            None
        };

        match missing {
            Some(missing) => Err(DutError::IncompleteLagBinding { slot, missing }),
            None => Ok(()),
        }
    }
}
