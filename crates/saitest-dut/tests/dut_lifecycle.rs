//! Session-lifecycle tests for the DUT descriptor: setup in dependency
//! order, test-body lookups, teardown in reverse order.

use pretty_assertions::assert_eq;
use saitest_dut::{
    DutError, DutState, FdbRecord, Lag, LagBinding, LagSlot, Port, PortConfig, PortConfigSet,
    PortSpeed, RouterState, Vlan,
};
use saitest_types::{
    BridgePortOid, HostifOid, HostifTableEntryOid, HostifTrapGroupOid, LagMemberOid, LagOid,
    MacAddress, NeighborEntryOid, NextHopOid, PortOid, RouteEntryOid, RouterInterfaceOid,
    SwitchOid, VirtualRouterOid, VlanId, VlanMemberOid, VlanOid,
};

fn vlan_id(id: u16) -> VlanId {
    VlanId::new(id).unwrap()
}

fn router_state() -> RouterState {
    RouterState {
        vrf: VirtualRouterOid::from_raw(0x3000000000001),
        v4_default_route: RouteEntryOid::from_raw(0x5000000000001),
        v6_default_route: RouteEntryOid::from_raw(0x5000000000002),
        loopback_rif: RouterInterfaceOid::from_raw(0x6000000000001),
        local_ipv6_10_route: RouteEntryOid::from_raw(0x5000000000003),
        local_ipv6_128_route: RouteEntryOid::from_raw(0x5000000000004),
    }
}

fn port(raw: u64, index: u32) -> Port {
    Port::new(
        PortOid::from_raw(raw),
        PortConfig {
            name: format!("Ethernet{}", index * 4),
            lanes: (index * 4..index * 4 + 4).collect(),
            speed: PortSpeed::GE_100,
            index,
            fec: None,
            mtu: None,
        },
    )
}

fn lag_binding(base: u64, port_indexes: &[u32]) -> LagBinding {
    let mut lag = Lag::new(LagOid::from_raw(base));
    for (i, &idx) in port_indexes.iter().enumerate() {
        lag.add_member(LagMemberOid::from_raw(base + 0x100 + i as u64), idx);
    }
    LagBinding {
        lag,
        rif: RouterInterfaceOid::from_raw(base + 1),
        neighbor: NeighborEntryOid::from_raw(base + 2),
        next_hop: NextHopOid::from_raw(base + 3),
        route: RouteEntryOid::from_raw(base + 4),
    }
}

#[test]
fn vlan_registry_round_trip() {
    let mut dut = DutState::new();
    let vlan_10 = Vlan::new(vlan_id(10), VlanOid::from_raw(0x26000000000a));
    dut.register_vlan(vlan_10.clone()).unwrap();

    let removed = dut.unregister_vlan(vlan_id(10)).unwrap();
    assert_eq!(removed, vlan_10);
    assert!(dut.vlans().is_empty());
    assert_eq!(
        dut.unregister_vlan(vlan_id(10)),
        Err(DutError::UnknownVlanId(vlan_id(10)))
    );
}

#[test]
fn vlan_10_and_20_scenario() {
    let mut dut = DutState::new();

    let mut vlan_10 = Vlan::new(vlan_id(10), VlanOid::from_raw(0x26000000000a));
    vlan_10.add_member(VlanMemberOid::from_raw(0x2701), 1);
    vlan_10.add_member(VlanMemberOid::from_raw(0x2702), 2);
    let vlan_20 = Vlan::new(vlan_id(20), VlanOid::from_raw(0x260000000014));

    dut.register_vlan(vlan_10).unwrap();
    dut.register_vlan(vlan_20).unwrap();

    assert_eq!(dut.vlans().len(), 2);
    let keys: Vec<u16> = dut.vlans().keys().map(|id| id.as_u16()).collect();
    assert_eq!(keys, vec![10, 20]);
    assert_eq!(dut.vlan(vlan_id(10)).unwrap().member_oids().len(), 2);

    // Registering VLAN 10 again is a duplicate even with a fresh object.
    assert_eq!(
        dut.register_vlan(Vlan::new(vlan_id(10), VlanOid::from_raw(0x26000000000b))),
        Err(DutError::DuplicateVlanId(vlan_id(10)))
    );
}

#[test]
fn hostif_mapping_scenario() {
    let mut dut = DutState::new();
    dut.set_ports(
        vec![0, 1, 2],
        vec![port(0x11, 0), port(0x12, 1), port(0x13, 2)],
    )
    .unwrap();

    let p1 = PortOid::from_raw(0x12);
    let h1 = HostifOid::from_raw(0xd1);
    dut.map_host_interface(p1, h1).unwrap();

    assert_eq!(dut.port_to_hostif().len(), 1);
    assert_eq!(dut.hostif_for(p1), Some(h1));

    // A port that was never configured is refused.
    let p9 = PortOid::from_raw(0x99);
    assert_eq!(
        dut.map_host_interface(p9, HostifOid::from_raw(0xd9)),
        Err(DutError::UnknownPort(p9))
    );
    assert_eq!(dut.port_to_hostif().len(), 1);
}

#[test]
fn set_ports_mismatch_is_atomic() {
    let mut dut = DutState::new();
    assert_eq!(
        dut.set_ports(vec![0, 1, 2], vec![port(0x11, 0), port(0x12, 1)]),
        Err(DutError::PortListLengthMismatch {
            dev_ports: 3,
            ports: 2,
        })
    );
    // Nothing was stored by the failed call.
    assert!(dut.ports().is_err());

    dut.set_ports(vec![0, 1], vec![port(0x11, 0), port(0x12, 1)]).unwrap();
    assert_eq!(dut.ports().unwrap().dev_ports(), &[0, 1]);
}

#[test]
fn lag_slot_is_not_overwritten() {
    let mut dut = DutState::new();
    let first = lag_binding(0x2000000000001, &[17, 18]);
    dut.set_lag(LagSlot::Lag1, first.clone()).unwrap();

    let second = lag_binding(0x2000000000002, &[19, 20]);
    assert_eq!(
        dut.set_lag(LagSlot::Lag1, second),
        Err(DutError::AlreadyConfigured { field: "lag1" })
    );
    assert_eq!(dut.lag(LagSlot::Lag1).unwrap(), &first);

    // An incomplete replacement reports the missing handle instead.
    let mut incomplete = lag_binding(0x2000000000003, &[21]);
    incomplete.next_hop = NextHopOid::NULL;
    assert_eq!(
        dut.set_lag(LagSlot::Lag1, incomplete),
        Err(DutError::IncompleteLagBinding {
            slot: LagSlot::Lag1,
            missing: "next_hop",
        })
    );
    assert_eq!(dut.lag(LagSlot::Lag1).unwrap(), &first);

    // The other slot is independent.
    dut.set_lag(LagSlot::Lag2, lag_binding(0x2000000000004, &[22])).unwrap();
    let cleared = dut.clear_lag(LagSlot::Lag2).unwrap();
    assert_eq!(cleared.lag.oid(), LagOid::from_raw(0x2000000000004));
    assert_eq!(
        dut.clear_lag(LagSlot::Lag2),
        Err(DutError::LagNotConfigured(LagSlot::Lag2))
    );
}

#[test]
fn full_session_lifecycle() {
    let mut dut = DutState::new();

    // Setup, in dependency order: switch, router, vlan, ports, lag.
    dut.set_switch_id(SwitchOid::from_raw(0x21000000000000)).unwrap();
    dut.set_router_state(router_state()).unwrap();
    dut.set_default_vlan_id(VlanId::DEFAULT).unwrap();

    dut.register_vlan(Vlan::new(vlan_id(10), VlanOid::from_raw(0x26000000000a)))
        .unwrap();
    dut.register_vlan(Vlan::new(vlan_id(20), VlanOid::from_raw(0x260000000014)))
        .unwrap();

    let configs = PortConfigSet::from_json_str(
        r#"{
            "PORT": {
                "Ethernet0": { "lanes": [0, 1, 2, 3], "speed": 100000, "index": 0 },
                "Ethernet4": { "lanes": [4, 5, 6, 7], "speed": 100000, "index": 1 }
            }
        }"#,
    )
    .unwrap();
    dut.set_port_configs(configs).unwrap();
    dut.set_ports(vec![0, 1], vec![port(0x11, 0), port(0x12, 1)]).unwrap();

    dut.set_default_1q_bridge(saitest_types::BridgeOid::from_raw(0x31)).unwrap();
    dut.set_bridge_ports(vec![
        BridgePortOid::from_raw(0x3a01),
        BridgePortOid::from_raw(0x3a02),
    ])
    .unwrap();
    dut.set_default_trap_group(HostifTrapGroupOid::from_raw(0x41)).unwrap();
    dut.set_host_intf_table(HostifTableEntryOid::from_raw(0x51)).unwrap();
    dut.set_hostifs(vec![HostifOid::from_raw(0xd1), HostifOid::from_raw(0xd2)])
        .unwrap();
    dut.map_host_interface(PortOid::from_raw(0x11), HostifOid::from_raw(0xd1))
        .unwrap();
    dut.set_port0_rif(RouterInterfaceOid::from_raw(0x6000000000010)).unwrap();

    let mac: MacAddress = "00:01:01:99:01:99".parse().unwrap();
    dut.append_fdb_entry(
        vlan_id(10),
        FdbRecord::new(mac, vlan_id(10), BridgePortOid::from_raw(0x3a01)),
    );

    dut.set_lag(LagSlot::Lag1, lag_binding(0x2000000000001, &[17, 18])).unwrap();
    dut.set_lag(LagSlot::Lag2, lag_binding(0x2000000000002, &[19, 20])).unwrap();

    // Test body reads.
    assert_eq!(dut.switch_id().unwrap().raw(), 0x21000000000000);
    assert_eq!(dut.default_vlan_id().unwrap(), VlanId::DEFAULT);
    assert_eq!(dut.ports().unwrap().len(), 2);
    assert_eq!(dut.fdb_entries(vlan_id(10)).unwrap().len(), 1);
    assert_eq!(dut.lag(LagSlot::Lag1).unwrap().lag.member_oids().len(), 2);
    assert_eq!(dut.port_configs().unwrap().get("Ethernet4").unwrap().index, 1);

    // Teardown, in reverse order.
    dut.clear_lag(LagSlot::Lag2).unwrap();
    dut.clear_lag(LagSlot::Lag1).unwrap();
    dut.clear_ports().unwrap();
    dut.unregister_vlan(vlan_id(20)).unwrap();
    dut.unregister_vlan(vlan_id(10)).unwrap();
    dut.clear_router_state().unwrap();
    dut.reset();

    assert_eq!(dut, DutState::new());
}

#[test]
fn reset_is_idempotent_and_unconditional() {
    let mut dut = DutState::new();
    dut.reset();
    assert_eq!(dut, DutState::new());

    dut.set_switch_id(SwitchOid::from_raw(0x21)).unwrap();
    dut.reset();
    dut.reset();
    assert_eq!(dut, DutState::new());
}
