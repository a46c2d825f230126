//! VLAN collaborator model.

use saitest_types::{VlanId, VlanMemberOid, VlanOid};

/// A VLAN created on the switch during a test session.
///
/// Member object ids are kept in creation order so teardown can remove
/// the members before the VLAN itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vlan {
    id: VlanId,
    oid: VlanOid,
    member_oids: Vec<VlanMemberOid>,
    port_indexes: Vec<u32>,
}

impl Vlan {
    /// Creates a VLAN record with no members yet.
    pub fn new(id: VlanId, oid: VlanOid) -> Self {
        Self {
            id,
            oid,
            member_oids: Vec::new(),
            port_indexes: Vec::new(),
        }
    }

    /// Records a VLAN member and the device-port index it attaches.
    pub fn add_member(&mut self, member: VlanMemberOid, port_index: u32) {
        self.member_oids.push(member);
        self.port_indexes.push(port_index);
    }

    /// The VLAN id.
    pub fn id(&self) -> VlanId {
        self.id
    }

    /// The VLAN object id on the switch.
    pub fn oid(&self) -> VlanOid {
        self.oid
    }

    /// Member object ids, in creation order.
    pub fn member_oids(&self) -> &[VlanMemberOid] {
        &self.member_oids
    }

    /// Device-port indexes of the members, aligned with [`Self::member_oids`].
    pub fn port_indexes(&self) -> &[u32] {
        &self.port_indexes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_vlan_has_no_members() {
        let vlan = Vlan::new(VlanId::new(10).unwrap(), VlanOid::from_raw(0x26000000000a));
        assert_eq!(vlan.id().as_u16(), 10);
        assert!(vlan.member_oids().is_empty());
        assert!(vlan.port_indexes().is_empty());
    }

    #[test]
    fn test_members_keep_creation_order() {
        let mut vlan = Vlan::new(VlanId::new(20).unwrap(), VlanOid::from_raw(0x260000000014));
        vlan.add_member(VlanMemberOid::from_raw(0x27_01), 4);
        vlan.add_member(VlanMemberOid::from_raw(0x27_02), 5);

        assert_eq!(
            vlan.member_oids(),
            &[
                VlanMemberOid::from_raw(0x27_01),
                VlanMemberOid::from_raw(0x27_02)
            ]
        );
        assert_eq!(vlan.port_indexes(), &[4, 5]);
    }
}
