//! The device-under-test descriptor.

use crate::error::{DutError, DutResult};
use crate::fdb::FdbRecord;
use crate::lag::{LagBinding, LagSlot};
use crate::port::{Port, PortConfigSet, PortState};
use crate::vlan::Vlan;
use saitest_types::{
    BridgeOid, BridgePortOid, HostifOid, HostifTableEntryOid, HostifTrapGroupOid, PortOid,
    RouteEntryOid, RouterInterfaceOid, SwitchOid, VirtualRouterOid, VlanId,
};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

/// The default virtual router and the baseline routes/interfaces hung
/// off it. Created by router setup as a unit and torn down as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterState {
    /// Default virtual-router instance.
    pub vrf: VirtualRouterOid,
    /// Default IPv4 route entry.
    pub v4_default_route: RouteEntryOid,
    /// Default IPv6 route entry.
    pub v6_default_route: RouteEntryOid,
    /// Loopback router interface.
    pub loopback_rif: RouterInterfaceOid,
    /// Link-local fe80::/10 route entry.
    pub local_ipv6_10_route: RouteEntryOid,
    /// Host ::1/128 route entry.
    pub local_ipv6_128_route: RouteEntryOid,
}

/// Everything a test session has provisioned on the switch under test.
///
/// One descriptor is constructed per test session, with every field
/// unset, and is passed by reference into each setup and teardown step.
/// Setup populates fields as collaborators come to exist on the switch
/// (router, then VLANs, then ports, then LAGs); teardown clears them in
/// reverse and finishes with [`DutState::reset`]. The descriptor is
/// never shared between sessions; `&mut self` on every mutator keeps
/// ownership exclusive.
///
/// Reading a field before its setup step ran is a usage error and
/// fails with [`DutError::UnsetFieldAccessed`]; no field has a default
/// that could be mistaken for switch state. Setting an already-set
/// field without clearing it first fails with
/// [`DutError::AlreadyConfigured`], since silently replacing a handle
/// would leak the object the old handle refers to.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DutState {
    switch_id: Option<SwitchOid>,
    router: Option<RouterState>,
    default_vlan_id: Option<VlanId>,
    vlans: BTreeMap<VlanId, Vlan>,
    fdb: BTreeMap<VlanId, Vec<FdbRecord>>,
    default_1q_bridge: Option<BridgeOid>,
    bridge_ports: Option<Vec<BridgePortOid>>,
    default_trap_group: Option<HostifTrapGroupOid>,
    host_intf_table: Option<HostifTableEntryOid>,
    port_configs: Option<PortConfigSet>,
    ports: Option<PortState>,
    port_to_hostif: HashMap<PortOid, HostifOid>,
    hostifs: Option<Vec<HostifOid>>,
    port0_rif: Option<RouterInterfaceOid>,
    lag1: Option<LagBinding>,
    lag2: Option<LagBinding>,
}

fn set_once<T>(slot: &mut Option<T>, field: &'static str, value: T) -> DutResult<()> {
    if slot.is_some() {
        return Err(DutError::already_configured(field));
    }
    *slot = Some(value);
    Ok(())
}

fn get_set<'a, T>(slot: &'a Option<T>, field: &'static str) -> DutResult<&'a T> {
    slot.as_ref().ok_or(DutError::unset(field))
}

fn take_set<T>(slot: &mut Option<T>, field: &'static str) -> DutResult<T> {
    slot.take().ok_or(DutError::unset(field))
}

impl DutState {
    /// Creates a descriptor with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    // --- switch ---

    /// Records the switch instance under test. Set once per session;
    /// only [`Self::reset`] clears it.
    pub fn set_switch_id(&mut self, switch_id: SwitchOid) -> DutResult<()> {
        set_once(&mut self.switch_id, "switch_id", switch_id)?;
        debug!("Recorded switch {}", switch_id);
        Ok(())
    }

    pub fn switch_id(&self) -> DutResult<SwitchOid> {
        get_set(&self.switch_id, "switch_id").copied()
    }

    // --- router ---

    /// Installs the default-router state created by router setup.
    pub fn set_router_state(&mut self, router: RouterState) -> DutResult<()> {
        set_once(&mut self.router, "router", router)?;
        info!("Recorded default router state (vrf {})", router.vrf);
        Ok(())
    }

    pub fn router(&self) -> DutResult<&RouterState> {
        get_set(&self.router, "router")
    }

    /// Removes the router state, returning it so teardown can release
    /// the handles.
    pub fn clear_router_state(&mut self) -> DutResult<RouterState> {
        let router = take_set(&mut self.router, "router")?;
        info!("Cleared default router state");
        Ok(router)
    }

    // --- vlan ---

    /// Records the switch's default VLAN id.
    pub fn set_default_vlan_id(&mut self, id: VlanId) -> DutResult<()> {
        set_once(&mut self.default_vlan_id, "default_vlan_id", id)?;
        debug!("Recorded default VLAN id {}", id);
        Ok(())
    }

    pub fn default_vlan_id(&self) -> DutResult<VlanId> {
        get_set(&self.default_vlan_id, "default_vlan_id").copied()
    }

    /// Registers a VLAN created during the session, keyed by its id.
    pub fn register_vlan(&mut self, vlan: Vlan) -> DutResult<()> {
        let id = vlan.id();
        if self.vlans.contains_key(&id) {
            return Err(DutError::DuplicateVlanId(id));
        }
        self.vlans.insert(id, vlan);
        info!("Registered VLAN {}", id);
        Ok(())
    }

    /// Removes a VLAN from the registry, returning it so teardown can
    /// release its members and the VLAN itself.
    pub fn unregister_vlan(&mut self, id: VlanId) -> DutResult<Vlan> {
        let vlan = self.vlans.remove(&id).ok_or(DutError::UnknownVlanId(id))?;
        info!("Unregistered VLAN {}", id);
        Ok(vlan)
    }

    /// Looks up a registered VLAN.
    pub fn vlan(&self, id: VlanId) -> DutResult<&Vlan> {
        self.vlans.get(&id).ok_or(DutError::UnknownVlanId(id))
    }

    /// All registered VLANs, keyed by id. Empty until VLAN setup runs.
    pub fn vlans(&self) -> &BTreeMap<VlanId, Vlan> {
        &self.vlans
    }

    // --- fdb ---

    /// Appends an installed FDB entry to the bucket of its VLAN.
    /// Buckets keep creation order; the first append creates the
    /// bucket.
    pub fn append_fdb_entry(&mut self, vlan_id: VlanId, record: FdbRecord) {
        debug!("Recorded FDB entry {} in VLAN {}", record.mac, vlan_id);
        self.fdb.entry(vlan_id).or_default().push(record);
    }

    /// The FDB entries installed in a VLAN, in creation order.
    ///
    /// # Errors
    ///
    /// Fails if no entry was ever appended for this VLAN; an entirely
    /// absent bucket is "unset", not "empty".
    pub fn fdb_entries(&self, vlan_id: VlanId) -> DutResult<&[FdbRecord]> {
        self.fdb
            .get(&vlan_id)
            .map(Vec::as_slice)
            .ok_or(DutError::unset("fdb"))
    }

    // --- bridging / host interfaces ---

    /// Records the default 802.1Q bridge.
    pub fn set_default_1q_bridge(&mut self, bridge: BridgeOid) -> DutResult<()> {
        set_once(&mut self.default_1q_bridge, "default_1q_bridge", bridge)?;
        debug!("Recorded default 1Q bridge {}", bridge);
        Ok(())
    }

    pub fn default_1q_bridge(&self) -> DutResult<BridgeOid> {
        get_set(&self.default_1q_bridge, "default_1q_bridge").copied()
    }

    /// Records the bridge ports discovered on the default bridge.
    pub fn set_bridge_ports(&mut self, bridge_ports: Vec<BridgePortOid>) -> DutResult<()> {
        let count = bridge_ports.len();
        set_once(&mut self.bridge_ports, "bridge_port_list", bridge_ports)?;
        debug!("Recorded {} bridge ports", count);
        Ok(())
    }

    pub fn bridge_ports(&self) -> DutResult<&[BridgePortOid]> {
        get_set(&self.bridge_ports, "bridge_port_list").map(Vec::as_slice)
    }

    /// Records the default hostif trap group.
    pub fn set_default_trap_group(&mut self, group: HostifTrapGroupOid) -> DutResult<()> {
        set_once(&mut self.default_trap_group, "default_trap_group", group)?;
        debug!("Recorded default trap group {}", group);
        Ok(())
    }

    pub fn default_trap_group(&self) -> DutResult<HostifTrapGroupOid> {
        get_set(&self.default_trap_group, "default_trap_group").copied()
    }

    /// Records the hostif table entry routing trapped packets to the
    /// host interfaces.
    pub fn set_host_intf_table(&mut self, entry: HostifTableEntryOid) -> DutResult<()> {
        set_once(&mut self.host_intf_table, "host_intf_table", entry)?;
        debug!("Recorded hostif table entry {}", entry);
        Ok(())
    }

    pub fn host_intf_table(&self) -> DutResult<HostifTableEntryOid> {
        get_set(&self.host_intf_table, "host_intf_table").copied()
    }

    /// Records the host interfaces created for traffic injection and
    /// capture, in creation order.
    pub fn set_hostifs(&mut self, hostifs: Vec<HostifOid>) -> DutResult<()> {
        let count = hostifs.len();
        set_once(&mut self.hostifs, "hostif_list", hostifs)?;
        debug!("Recorded {} host interfaces", count);
        Ok(())
    }

    pub fn hostifs(&self) -> DutResult<&[HostifOid]> {
        get_set(&self.hostifs, "hostif_list").map(Vec::as_slice)
    }

    /// Maps a configured port to the host interface shadowing it.
    ///
    /// # Errors
    ///
    /// Fails with [`DutError::UnsetFieldAccessed`] before
    /// [`Self::set_ports`] ran, [`DutError::UnknownPort`] for a handle
    /// outside the port list, and [`DutError::AlreadyConfigured`] for a
    /// port that is already mapped.
    pub fn map_host_interface(&mut self, port: PortOid, hostif: HostifOid) -> DutResult<()> {
        let ports = get_set(&self.ports, "port_list")?;
        if !ports.contains(port) {
            return Err(DutError::UnknownPort(port));
        }
        if self.port_to_hostif.contains_key(&port) {
            return Err(DutError::already_configured("port_to_hostif"));
        }
        self.port_to_hostif.insert(port, hostif);
        debug!("Mapped port {} to hostif {}", port, hostif);
        Ok(())
    }

    /// The host interface mapped to a port, if any.
    pub fn hostif_for(&self, port: PortOid) -> Option<HostifOid> {
        self.port_to_hostif.get(&port).copied()
    }

    /// The full port-to-hostif mapping.
    pub fn port_to_hostif(&self) -> &HashMap<PortOid, HostifOid> {
        &self.port_to_hostif
    }

    // --- ports ---

    /// Stores the parsed port-config init set.
    pub fn set_port_configs(&mut self, configs: PortConfigSet) -> DutResult<()> {
        let count = configs.len();
        set_once(&mut self.port_configs, "port_configs", configs)?;
        debug!("Recorded {} port configs", count);
        Ok(())
    }

    pub fn port_configs(&self) -> DutResult<&PortConfigSet> {
        get_set(&self.port_configs, "port_configs")
    }

    /// Installs the port topology: device-port indices and port
    /// objects, positionally aligned.
    ///
    /// Validation runs before occupancy is checked, so a length
    /// mismatch always surfaces as such and never disturbs prior
    /// state.
    pub fn set_ports(&mut self, dev_ports: Vec<u32>, ports: Vec<Port>) -> DutResult<()> {
        let state = PortState::new(dev_ports, ports)?;
        let count = state.len();
        set_once(&mut self.ports, "port_list", state)?;
        info!("Recorded {} ports", count);
        Ok(())
    }

    pub fn ports(&self) -> DutResult<&PortState> {
        get_set(&self.ports, "port_list")
    }

    /// Removes the port topology, returning it so teardown can release
    /// the ports. The port-to-hostif mapping is dropped with it to keep
    /// its keys a subset of the configured ports.
    pub fn clear_ports(&mut self) -> DutResult<PortState> {
        let state = take_set(&mut self.ports, "port_list")?;
        let dropped = self.port_to_hostif.len();
        self.port_to_hostif.clear();
        info!("Cleared {} ports ({} hostif mappings dropped)", state.len(), dropped);
        Ok(state)
    }

    /// Records the router interface on port 0 used by L3 tests.
    pub fn set_port0_rif(&mut self, rif: RouterInterfaceOid) -> DutResult<()> {
        set_once(&mut self.port0_rif, "port0_rif", rif)?;
        debug!("Recorded port 0 rif {}", rif);
        Ok(())
    }

    pub fn port0_rif(&self) -> DutResult<RouterInterfaceOid> {
        get_set(&self.port0_rif, "port0_rif").copied()
    }

    // --- lag ---

    fn lag_slot(&self, slot: LagSlot) -> &Option<LagBinding> {
        match slot {
            LagSlot::Lag1 => &self.lag1,
            LagSlot::Lag2 => &self.lag2,
        }
    }

    fn lag_slot_mut(&mut self, slot: LagSlot) -> &mut Option<LagBinding> {
        match slot {
            LagSlot::Lag1 => &mut self.lag1,
            LagSlot::Lag2 => &mut self.lag2,
        }
    }

    /// Installs a LAG and its routing quintuple into a slot.
    ///
    /// The binding is checked for completeness before the slot is
    /// touched; neither failure overwrites an incumbent binding.
    pub fn set_lag(&mut self, slot: LagSlot, binding: LagBinding) -> DutResult<()> {
        binding.check_complete(slot)?;
        let lag_oid = binding.lag.oid();
        set_once(self.lag_slot_mut(slot), slot.field_name(), binding)?;
        info!("Recorded {} ({})", slot, lag_oid);
        Ok(())
    }

    /// The binding in a LAG slot.
    pub fn lag(&self, slot: LagSlot) -> DutResult<&LagBinding> {
        self.lag_slot(slot)
            .as_ref()
            .ok_or(DutError::LagNotConfigured(slot))
    }

    /// Empties a LAG slot, returning the binding so teardown can
    /// release the route, next hop, neighbor, rif, and LAG in order.
    pub fn clear_lag(&mut self, slot: LagSlot) -> DutResult<LagBinding> {
        let binding = self
            .lag_slot_mut(slot)
            .take()
            .ok_or(DutError::LagNotConfigured(slot))?;
        info!("Cleared {}", slot);
        Ok(binding)
    }

    // --- teardown ---

    /// Returns every field to unset. Idempotent and infallible, so
    /// session teardown always completes.
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("Reset DUT descriptor");
    }
}
