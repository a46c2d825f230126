//! Type-safe SAI object ids.
//!
//! The switch-control client hands back every created object as an
//! opaque 64-bit id (`sai_object_id_t`). Tracking those ids as bare
//! `u64`s makes it easy to hand a VLAN id to a routing call, so each
//! object kind gets its own phantom-typed wrapper: a `VlanOid` and a
//! `RouterInterfaceOid` are distinct types and cannot be swapped.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Raw SAI object id (matches `sai_object_id_t`).
pub type RawOid = u64;

/// Marker trait implemented by every object-kind tag.
pub trait OidKind: Send + Sync + 'static {
    /// Object kind name, used in `Debug` output.
    const NAME: &'static str;
}

/// An object id tagged with the kind of object it refers to.
///
/// Raw value 0 is `SAI_NULL_OBJECT_ID`; a null id is representable so
/// that "helper returned nothing" can be detected, but [`Oid::new`]
/// refuses it.
pub struct Oid<K: OidKind> {
    raw: RawOid,
    _kind: PhantomData<K>,
}

impl<K: OidKind> Oid<K> {
    /// The null object id (`SAI_NULL_OBJECT_ID`).
    pub const NULL: Self = Self {
        raw: 0,
        _kind: PhantomData,
    };

    /// Wraps a raw id, rejecting the null id.
    pub fn new(raw: RawOid) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Self::from_raw(raw))
        }
    }

    /// Wraps a raw id, null included.
    pub const fn from_raw(raw: RawOid) -> Self {
        Self {
            raw,
            _kind: PhantomData,
        }
    }

    /// Returns the raw id value.
    pub const fn raw(&self) -> RawOid {
        self.raw
    }

    /// Returns true for the null object id.
    pub const fn is_null(&self) -> bool {
        self.raw == 0
    }

    /// Returns true for any non-null object id.
    pub const fn is_valid(&self) -> bool {
        self.raw != 0
    }
}

// Manual impls: derive would bound them on `K`, which is only a tag.

impl<K: OidKind> Clone for Oid<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: OidKind> Copy for Oid<K> {}

impl<K: OidKind> Default for Oid<K> {
    fn default() -> Self {
        Self::NULL
    }
}

impl<K: OidKind> PartialEq for Oid<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K: OidKind> Eq for Oid<K> {}

impl<K: OidKind> PartialOrd for Oid<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: OidKind> Ord for Oid<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<K: OidKind> Hash for Oid<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K: OidKind> fmt::Debug for Oid<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:016x})", K::NAME, self.raw)
    }
}

impl<K: OidKind> fmt::Display for Oid<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016x}", self.raw)
    }
}

macro_rules! oid_kind {
    ($(($kind:ident, $alias:ident, $name:literal),)+) => {
        $(
            #[doc = concat!("Kind tag for ", $name, " objects.")]
            #[derive(Debug, Clone, Copy)]
            pub enum $kind {}

            impl OidKind for $kind {
                const NAME: &'static str = $name;
            }

            #[doc = concat!("Object id of a ", $name, ".")]
            pub type $alias = Oid<$kind>;
        )+
    };
}

oid_kind! {
    (SwitchKind, SwitchOid, "Switch"),
    (PortKind, PortOid, "Port"),
    (BridgeKind, BridgeOid, "Bridge"),
    (BridgePortKind, BridgePortOid, "BridgePort"),
    (VirtualRouterKind, VirtualRouterOid, "VirtualRouter"),
    (RouterInterfaceKind, RouterInterfaceOid, "RouterInterface"),
    (RouteEntryKind, RouteEntryOid, "RouteEntry"),
    (NeighborEntryKind, NeighborEntryOid, "NeighborEntry"),
    (NextHopKind, NextHopOid, "NextHop"),
    (VlanKind, VlanOid, "Vlan"),
    (VlanMemberKind, VlanMemberOid, "VlanMember"),
    (LagKind, LagOid, "Lag"),
    (LagMemberKind, LagMemberOid, "LagMember"),
    (HostifKind, HostifOid, "Hostif"),
    (HostifTableEntryKind, HostifTableEntryOid, "HostifTableEntry"),
    (HostifTrapGroupKind, HostifTrapGroupOid, "HostifTrapGroup"),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_rejects_null() {
        assert!(PortOid::new(0).is_none());
        assert!(PortOid::new(0x1000000000001).is_some());
    }

    #[test]
    fn test_null_constant() {
        assert!(VlanOid::NULL.is_null());
        assert!(!VlanOid::NULL.is_valid());
        assert_eq!(VlanOid::default(), VlanOid::NULL);
    }

    #[test]
    fn test_raw_round_trip() {
        let oid = SwitchOid::from_raw(0x2100000000);
        assert_eq!(oid.raw(), 0x2100000000);
        assert!(oid.is_valid());
    }

    #[test]
    fn test_debug_names_the_kind() {
        let rif = RouterInterfaceOid::from_raw(0x6000000000abc);
        assert_eq!(format!("{:?}", rif), "RouterInterface(0x0006000000000abc)");
    }

    #[test]
    fn test_display_is_plain_hex() {
        let lag = LagOid::from_raw(0x2a);
        assert_eq!(lag.to_string(), "0x000000000000002a");
    }

    #[test]
    fn test_equality_and_ordering() {
        let a = HostifOid::from_raw(1);
        let b = HostifOid::from_raw(1);
        let c = HostifOid::from_raw(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
    }
}
