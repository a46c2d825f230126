//! Device-under-test descriptor for the SAI conformance-test harness.
//!
//! A test session creates switch-resident objects (router state, VLANs,
//! ports, host interfaces, LAGs) through the switch-control client and
//! must reference and release every one of them later. [`DutState`] is
//! the session's single registry for those handles: constructed fully
//! unset, populated incrementally by setup, cleared in reverse order by
//! teardown.
//!
//! The descriptor performs no I/O and owns no transport; it only
//! enforces the bookkeeping discipline — fields are distinguishably
//! unset until set, double-provisioning is refused, and related
//! handles (the per-LAG routing quintuple, the aligned port lists) are
//! installed and removed as units.

mod dut;
mod error;
mod fdb;
mod lag;
mod port;
mod vlan;

pub use dut::{DutState, RouterState};
pub use error::{DutError, DutResult};
pub use fdb::FdbRecord;
pub use lag::{Lag, LagBinding, LagSlot};
pub use port::{
    FecMode, Port, PortConfig, PortConfigError, PortConfigSet, PortSpeed, PortState,
};
pub use vlan::Vlan;
