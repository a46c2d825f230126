//! Descriptor error taxonomy.
//!
//! Every variant signals an ordering or provisioning mistake in the
//! calling test logic. None of them are transient: callers fail the
//! enclosing test case instead of retrying.

use crate::lag::LagSlot;
use saitest_types::{PortOid, VlanId};
use thiserror::Error;

/// Error type for descriptor operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DutError {
    /// A field was set twice without an intervening clear. The second
    /// value is discarded; accepting it would orphan the handles the
    /// first value still references.
    #[error("{field} is already configured")]
    AlreadyConfigured { field: &'static str },

    /// A VLAN with this id is already registered.
    #[error("VLAN {0} is already registered")]
    DuplicateVlanId(VlanId),

    /// No VLAN with this id is registered.
    #[error("VLAN {0} is not registered")]
    UnknownVlanId(VlanId),

    /// A LAG binding was offered with one of its five handles null.
    #[error("LAG binding for {slot} is incomplete: {missing} is unset")]
    IncompleteLagBinding {
        slot: LagSlot,
        missing: &'static str,
    },

    /// The LAG slot holds no binding.
    #[error("{0} is not configured")]
    LagNotConfigured(LagSlot),

    /// The device-port index list and the port list differ in length.
    #[error("port list length mismatch: {dev_ports} device-port indices vs {ports} ports")]
    PortListLengthMismatch { dev_ports: usize, ports: usize },

    /// The port handle is not part of the configured port list.
    #[error("port {0:?} is not in the configured port list")]
    UnknownPort(PortOid),

    /// A field was read before the corresponding setup step populated it.
    #[error("{field} was accessed before being configured")]
    UnsetFieldAccessed { field: &'static str },
}

impl DutError {
    pub(crate) fn already_configured(field: &'static str) -> Self {
        DutError::AlreadyConfigured { field }
    }

    pub(crate) fn unset(field: &'static str) -> Self {
        DutError::UnsetFieldAccessed { field }
    }
}

/// Result type for descriptor operations.
pub type DutResult<T> = Result<T, DutError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_messages() {
        let err = DutError::DuplicateVlanId(VlanId::new(10).unwrap());
        assert_eq!(err.to_string(), "VLAN 10 is already registered");

        let err = DutError::IncompleteLagBinding {
            slot: LagSlot::Lag1,
            missing: "rif",
        };
        assert_eq!(err.to_string(), "LAG binding for lag1 is incomplete: rif is unset");

        let err = DutError::PortListLengthMismatch {
            dev_ports: 3,
            ports: 2,
        };
        assert_eq!(
            err.to_string(),
            "port list length mismatch: 3 device-port indices vs 2 ports"
        );
    }

    #[test]
    fn test_helpers() {
        assert_eq!(
            DutError::already_configured("switch_id"),
            DutError::AlreadyConfigured { field: "switch_id" }
        );
        assert_eq!(
            DutError::unset("router"),
            DutError::UnsetFieldAccessed { field: "router" }
        );
    }
}
