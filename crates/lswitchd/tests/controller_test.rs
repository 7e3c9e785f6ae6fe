//! End-to-end tests for the controller core.
//!
//! Events go in through the daemon's dispatch entry point; the exact
//! switch-side program comes out through a recording sink, which stands
//! in for the control-channel transport.

use lswitch_common::{
    Command, EtherType, Event, FlowAction, FrameEvent, GroupId, MacAddress, MatchSpec, PortId,
    RecordingSink, SwitchCapabilities, SwitchId, VlanId, PRIORITY_LEARNED, PRIORITY_MISS,
};
use lswitchd::{ControllerDaemon, TopologyConfig};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const S1: SwitchId = SwitchId(1);

const TOPOLOGY: &str = r#"
switches:
  1:
    ports:
      1: 10
      2: 10
      3: 20
      4: 20
    vlans:
      10: [1, 2]
      20: [3, 4]
"#;

fn mac(last: u8) -> MacAddress {
    MacAddress::new([0, 0, 0, 0, 0, last])
}

fn harness() -> (ControllerDaemon, Arc<RecordingSink>) {
    let config = Arc::new(TopologyConfig::from_yaml(TOPOLOGY).unwrap());
    let sink = Arc::new(RecordingSink::new());
    (ControllerDaemon::new(config, sink.clone()), sink)
}

fn connect() -> Event {
    Event::Connect {
        switch: S1,
        capabilities: SwitchCapabilities {
            buffers: 256,
            tables: 2,
        },
    }
}

fn unbuffered(in_port: u32, src: MacAddress, dst: MacAddress) -> Event {
    Event::FrameObserved(FrameEvent::unbuffered(
        S1,
        PortId(in_port),
        src,
        dst,
        EtherType::IPV4,
        vec![0xca, 0xfe],
    ))
}

fn buffered(in_port: u32, src: MacAddress, dst: MacAddress, buffer_id: u32) -> Event {
    Event::FrameObserved(FrameEvent::buffered(
        S1,
        PortId(in_port),
        src,
        dst,
        EtherType::IPV4,
        buffer_id,
    ))
}

fn exact(in_port: u32, src: MacAddress, dst: MacAddress) -> MatchSpec {
    MatchSpec::Exact {
        in_port: PortId(in_port),
        src,
        dst,
    }
}

#[tokio::test]
async fn connect_installs_groups_and_default_rule() {
    let (mut daemon, sink) = harness();
    daemon.dispatch(connect()).await.unwrap();
    daemon.shutdown().await;

    let commands = sink.commands();
    assert_eq!(commands.len(), 3);
    assert_eq!(
        commands[0],
        Command::InstallGroup {
            switch: S1,
            group_id: VlanId(10).group_id(),
            members: vec![PortId(1), PortId(2)],
        }
    );
    assert_eq!(
        commands[1],
        Command::InstallGroup {
            switch: S1,
            group_id: VlanId(20).group_id(),
            members: vec![PortId(3), PortId(4)],
        }
    );
    assert_eq!(
        commands[2],
        Command::InstallFlow {
            switch: S1,
            match_spec: MatchSpec::Miss,
            priority: PRIORITY_MISS,
            action: FlowAction::ToController,
            buffer_id: None,
        }
    );
}

#[tokio::test]
async fn vlan_scenario_flood_unicast_then_isolation_drop() {
    let (mut daemon, sink) = harness();
    daemon.dispatch(connect()).await.unwrap();

    let mac_a = mac(0xa);
    let mac_b = mac(0xb);
    let mac_c = mac(0xc);

    // Unlearned destination: flood through VLAN 10's group.
    daemon.dispatch(unbuffered(1, mac_a, mac_b)).await.unwrap();
    // Reply learns B@2, A already learned: unicast to port 1.
    daemon.dispatch(unbuffered(2, mac_b, mac_a)).await.unwrap();
    // Learn C@3 in VLAN 20.
    daemon.dispatch(unbuffered(3, mac_c, mac(0xf))).await.unwrap();
    // VLAN 10 -> VLAN 20: structural drop.
    daemon.dispatch(unbuffered(1, mac_a, mac_c)).await.unwrap();
    daemon.shutdown().await;

    let commands = sink.commands();
    // Bootstrap (3) + four frames at two commands each.
    assert_eq!(commands.len(), 11);

    assert_eq!(
        commands[3],
        Command::InstallFlow {
            switch: S1,
            match_spec: exact(1, mac_a, mac_b),
            priority: PRIORITY_LEARNED,
            action: FlowAction::ToGroup(GroupId(10)),
            buffer_id: None,
        }
    );
    assert_eq!(
        commands[5],
        Command::InstallFlow {
            switch: S1,
            match_spec: exact(2, mac_b, mac_a),
            priority: PRIORITY_LEARNED,
            action: FlowAction::ToPort(PortId(1)),
            buffer_id: None,
        }
    );
    assert_eq!(
        commands[9],
        Command::InstallFlow {
            switch: S1,
            match_spec: exact(1, mac_a, mac_c),
            priority: PRIORITY_LEARNED,
            action: FlowAction::Drop,
            buffer_id: None,
        }
    );
    // The drop's injection carries the empty action set.
    assert_eq!(
        commands[10],
        Command::Inject {
            switch: S1,
            in_port: PortId(1),
            action: FlowAction::Drop,
            payload: Some(vec![0xca, 0xfe]),
        }
    );
}

#[tokio::test]
async fn fresh_switch_floods_until_destination_learned() {
    let (mut daemon, sink) = harness();
    daemon.dispatch(connect()).await.unwrap();

    // Three frames toward never-seen destinations: all flood.
    daemon.dispatch(unbuffered(1, mac(1), mac(9))).await.unwrap();
    daemon.dispatch(unbuffered(2, mac(2), mac(9))).await.unwrap();
    daemon
        .dispatch(unbuffered(1, mac(1), MacAddress::BROADCAST))
        .await
        .unwrap();
    daemon.shutdown().await;

    let flood_installs = sink
        .commands()
        .iter()
        .filter(|c| {
            matches!(
                c,
                Command::InstallFlow {
                    action: FlowAction::ToGroup(_),
                    ..
                }
            )
        })
        .count();
    assert_eq!(flood_installs, 3);
}

#[tokio::test]
async fn buffered_and_unbuffered_frames_are_symmetric() {
    let (mut daemon, sink) = harness();
    daemon.dispatch(connect()).await.unwrap();

    // Learn both endpoints so the decisions below are identical unicasts.
    daemon.dispatch(unbuffered(1, mac(1), mac(2))).await.unwrap();
    daemon.dispatch(unbuffered(2, mac(2), mac(1))).await.unwrap();

    // Same decision, buffered then unbuffered.
    daemon.dispatch(buffered(1, mac(1), mac(2), 314)).await.unwrap();
    daemon.dispatch(unbuffered(1, mac(1), mac(2))).await.unwrap();
    daemon.shutdown().await;

    let commands = sink.commands();
    // Bootstrap (3) + flood pair (2) + unicast pair (2) + buffered
    // install (1) + unbuffered install/inject pair (2).
    assert_eq!(commands.len(), 10);

    // Buffered: exactly one install carrying the buffer, no injection.
    assert_eq!(
        commands[7],
        Command::InstallFlow {
            switch: S1,
            match_spec: exact(1, mac(1), mac(2)),
            priority: PRIORITY_LEARNED,
            action: FlowAction::ToPort(PortId(2)),
            buffer_id: Some(314),
        }
    );
    // Unbuffered: the same install without a buffer, then one injection
    // carrying the original payload.
    assert_eq!(
        commands[8],
        Command::InstallFlow {
            switch: S1,
            match_spec: exact(1, mac(1), mac(2)),
            priority: PRIORITY_LEARNED,
            action: FlowAction::ToPort(PortId(2)),
            buffer_id: None,
        }
    );
    assert_eq!(
        commands[9],
        Command::Inject {
            switch: S1,
            in_port: PortId(1),
            action: FlowAction::ToPort(PortId(2)),
            payload: Some(vec![0xca, 0xfe]),
        }
    );
}

#[tokio::test]
async fn lldp_frames_produce_no_programming() {
    let (mut daemon, sink) = harness();
    daemon.dispatch(connect()).await.unwrap();
    daemon
        .dispatch(Event::FrameObserved(FrameEvent::unbuffered(
            S1,
            PortId(1),
            mac(1),
            mac(2),
            EtherType::LLDP,
            vec![0x01],
        )))
        .await
        .unwrap();
    daemon.shutdown().await;

    // Only the bootstrap commands.
    assert_eq!(sink.len(), 3);
}

#[tokio::test]
async fn unconfigured_port_leaves_only_the_miss_rule() {
    let (mut daemon, sink) = harness();
    daemon.dispatch(connect()).await.unwrap();
    daemon.dispatch(unbuffered(9, mac(1), mac(2))).await.unwrap();
    daemon.shutdown().await;

    // The frame is rejected inside the switch task; no learned-flow
    // programming follows the bootstrap commands.
    assert_eq!(sink.len(), 3);
}

#[tokio::test]
async fn disconnect_then_reconnect_starts_from_scratch() {
    let (mut daemon, sink) = harness();
    daemon.dispatch(connect()).await.unwrap();
    daemon.dispatch(unbuffered(1, mac(1), mac(2))).await.unwrap();
    daemon.dispatch(unbuffered(2, mac(2), mac(1))).await.unwrap();
    daemon.dispatch(Event::Disconnect { switch: S1 }).await.unwrap();
    sink.take();

    daemon.dispatch(connect()).await.unwrap();
    // mac(1) was forgotten with the old state: flood again, not unicast.
    daemon.dispatch(unbuffered(2, mac(2), mac(1))).await.unwrap();
    daemon.shutdown().await;

    let commands = sink.commands();
    assert_eq!(commands.len(), 5);
    assert!(commands[0].is_group_install());
    assert!(commands[1].is_group_install());
    match &commands[3] {
        Command::InstallFlow { action, .. } => {
            assert_eq!(*action, FlowAction::ToGroup(GroupId(10)));
        }
        other => panic!("expected flood install, got {:?}", other),
    }
}
