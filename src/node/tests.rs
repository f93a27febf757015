//! Tests for `Node` readiness, evaluation and pending-event bookkeeping.

use crate::error::BuildError;
use crate::node::{Arity, GateType, Node, NodeId, Scheduled};
use crate::signal::Signal;
use crate::time::VirtualTime;

/// Two inputs feeding one AND gate, wired by hand.
fn and_arena() -> Vec<Node> {
    let mut a = Node::new(NodeId::new(0), "a", GateType::In, 1, 1);
    let mut b = Node::new(NodeId::new(1), "b", GateType::In, 1, 1);
    let mut g = Node::new(NodeId::new(2), "g", GateType::And, 2, 1);
    a.outputs.push(g.id);
    b.outputs.push(g.id);
    g.inputs.extend([a.id, b.id]);
    vec![a, b, g]
}

#[test]
fn test_new_node_is_unknown() {
    let nodes = and_arena();
    for node in &nodes {
        assert_eq!(node.output(), Signal::Unknown);
        assert!(node.last_scheduled().is_none());
    }
}

#[test]
fn test_ready_requires_every_input_known() {
    let mut nodes = and_arena();
    assert!(!nodes[2].ready_to_evaluate(&nodes));
    assert_eq!(nodes[2].input_values(&nodes), None);

    nodes[0].set_output(Signal::High);
    assert!(!nodes[2].ready_to_evaluate(&nodes));

    nodes[1].set_output(Signal::Low);
    assert!(nodes[2].ready_to_evaluate(&nodes));
    assert_eq!(nodes[2].input_values(&nodes), Some(vec![true, false]));
}

#[test]
fn test_inputs_are_always_ready() {
    let nodes = and_arena();
    assert!(nodes[0].ready_to_evaluate(&nodes));
}

#[test]
fn test_delay_for_picks_edge() {
    let nodes = and_arena();
    assert_eq!(nodes[2].delay_for(true), 2);
    assert_eq!(nodes[2].delay_for(false), 1);
    assert_eq!(nodes[2].max_delay(), 2);
}

#[test]
fn test_evaluate_tags_arity_error_with_node() {
    let mut not = Node::new(NodeId::new(7), "n", GateType::Not, 1, 1);
    not.inputs.extend([NodeId::new(0), NodeId::new(1)]);
    let err = not.evaluate(&[true, true]).unwrap_err();
    assert_eq!(
        err,
        BuildError::Arity {
            node: Some(NodeId::new(7)),
            gate: GateType::Not,
            expected: Arity::Exactly(1),
            found: 2,
        }
    );
}

#[test]
fn test_projected_prefers_pending_value() {
    let mut nodes = and_arena();
    let g = &mut nodes[2];
    g.set_output(Signal::Low);
    assert_eq!(g.projected(), Signal::Low);

    g.last_scheduled = Some(Scheduled {
        time: VirtualTime::new(4),
        value: true,
    });
    assert_eq!(g.projected(), Signal::High);

    g.reset();
    assert_eq!(g.projected(), Signal::Unknown);
}

#[test]
fn test_display_mentions_gate_and_delays() {
    let nodes = and_arena();
    let s = nodes[2].to_string();
    assert!(s.contains("AND"));
    assert!(s.contains("rise=2"));
    assert!(s.contains("out=X"));
}
