//! Tests for graph construction, validation and zero-delay settling.

use crate::error::BuildError;
use crate::graph::{CircuitDescription, Connection, Graph, GraphBuilder, NodeSpec};
use crate::node::{Arity, GateType, NodeId};
use crate::signal::Signal;

fn half_adder() -> GraphBuilder {
    GraphBuilder::new()
        .input("a")
        .input("b")
        .gate_with_delays("s", GateType::Xor, 2, 2)
        .gate_with_delays("c", GateType::And, 1, 3)
        .output("sum")
        .output("carry")
        .connect_all(&["a", "b"], "s")
        .connect_all(&["a", "b"], "c")
        .connect("s", "sum")
        .connect("c", "carry")
}

// ── Successful builds ─────────────────────────────────────────────────

#[test]
fn test_builder_resolves_names() {
    let (graph, initial) = half_adder().initial("b", true).build().unwrap();

    assert_eq!(graph.len(), 6);
    assert_eq!(graph.find("c"), Some(NodeId::new(3)));
    assert_eq!(graph.find("nope"), None);
    assert_eq!(graph.primary_inputs(), &[NodeId::new(0), NodeId::new(1)]);
    assert_eq!(graph.primary_outputs(), &[NodeId::new(4), NodeId::new(5)]);

    let c = graph.node(NodeId::new(3)).unwrap();
    assert_eq!(c.inputs(), &[NodeId::new(0), NodeId::new(1)]);
    assert_eq!(c.outputs(), &[NodeId::new(5)]);
    assert_eq!((c.rise_delay(), c.fall_delay()), (1, 3));

    assert_eq!(initial.len(), 1);
    assert_eq!(initial[0].node, NodeId::new(1));
    assert!(initial[0].value);
    assert_eq!(initial[0].time.ticks(), 0);
}

#[test]
fn test_levels_and_delays() {
    let (graph, _) = half_adder().build().unwrap();
    assert_eq!(graph.max_delay(), 3);
    assert_eq!(graph.depth(), 3);
    assert_eq!(graph.levels()[0], vec![NodeId::new(0), NodeId::new(1)]);

    let order: Vec<NodeId> = graph.topological_order().collect();
    assert_eq!(order.len(), graph.len());
    for node in graph.nodes() {
        let pos = |id: NodeId| order.iter().position(|o| *o == id).unwrap();
        for input in node.inputs() {
            assert!(pos(*input) < pos(node.id()));
        }
    }
}

#[test]
fn test_description_round_trip_through_builder() {
    let desc = half_adder().into_description().unwrap();
    assert_eq!(desc.nodes.len(), 6);
    assert_eq!(desc.connections[0], Connection { from: 0, to: 2 });
    assert_eq!(desc.inputs, vec![0, 1]);

    let (graph, _) = Graph::from_description(&desc).unwrap();
    assert_eq!(graph.depth(), 3);
}

#[test]
fn test_empty_description_builds_empty_graph() {
    let (graph, initial) = Graph::from_description(&CircuitDescription::default()).unwrap();
    assert!(graph.is_empty());
    assert!(initial.is_empty());
    assert_eq!(graph.max_delay(), 0);
}

#[test]
fn test_new_graph_is_unknown_everywhere() {
    let (graph, _) = half_adder().build().unwrap();
    for node in graph.nodes() {
        assert_eq!(graph.signal(node.id()), Signal::Unknown);
    }
    assert_eq!(graph.signal(NodeId::new(42)), Signal::Unknown);
}

// ── Validation ────────────────────────────────────────────────────────

#[test]
fn test_duplicate_name() {
    let err = GraphBuilder::new().input("a").gate("a", GateType::Not).build().unwrap_err();
    assert_eq!(err, BuildError::DuplicateName("a".into()));

    let desc = CircuitDescription {
        nodes: vec![NodeSpec::new("x", GateType::In), NodeSpec::new("x", GateType::Out)],
        ..Default::default()
    };
    assert_eq!(
        Graph::from_description(&desc).unwrap_err(),
        BuildError::DuplicateName("x".into())
    );
}

#[test]
fn test_unknown_name() {
    let err = half_adder().connect("s", "missing").build().unwrap_err();
    assert_eq!(err, BuildError::UnknownNode("missing".into()));
}

#[test]
fn test_dangling_connection() {
    let desc = CircuitDescription {
        nodes: vec![NodeSpec::new("a", GateType::In), NodeSpec::new("y", GateType::Out)],
        connections: vec![Connection { from: 0, to: 5 }],
        ..Default::default()
    };
    assert_eq!(
        Graph::from_description(&desc).unwrap_err(),
        BuildError::DanglingConnection {
            from: 0,
            to: 5,
            len: 2
        }
    );
}

#[test]
fn test_too_many_inputs() {
    let err = GraphBuilder::new()
        .input("a")
        .input("b")
        .gate("n", GateType::Not)
        .connect_all(&["a", "b"], "n")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::Arity {
            node: Some(NodeId::new(2)),
            gate: GateType::Not,
            expected: Arity::Exactly(1),
            found: 2,
        }
    );
}

#[test]
fn test_too_few_inputs() {
    let err = GraphBuilder::new()
        .input("a")
        .gate("g", GateType::And)
        .output("y")
        .connect("g", "y")
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::Arity {
            node: Some(NodeId::new(1)),
            gate: GateType::And,
            expected: Arity::AtLeast(1),
            found: 0,
        }
    );
}

#[test]
fn test_input_cannot_be_driven() {
    let err = GraphBuilder::new()
        .input("a")
        .input("b")
        .connect("a", "b")
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::Arity {
            gate: GateType::In,
            expected: Arity::None,
            found: 1,
            ..
        }
    ));
}

#[test]
fn test_designation_must_match_gate() {
    let desc = CircuitDescription {
        nodes: vec![
            NodeSpec::new("a", GateType::In),
            NodeSpec::new("n", GateType::Not),
        ],
        connections: vec![Connection { from: 0, to: 1 }],
        inputs: vec![0],
        outputs: vec![1],
        ..Default::default()
    };
    assert_eq!(
        Graph::from_description(&desc).unwrap_err(),
        BuildError::Designation {
            node: NodeId::new(1),
            gate: GateType::Not,
            role: "output",
        }
    );
}

#[test]
fn test_initial_value_on_gate_is_rejected() {
    let err = half_adder().initial("s", true).build().unwrap_err();
    assert_eq!(
        err,
        BuildError::Designation {
            node: NodeId::new(2),
            gate: GateType::Xor,
            role: "input",
        }
    );
}

#[test]
fn test_initial_value_on_missing_index() {
    let mut desc = half_adder().into_description().unwrap();
    desc.initial_values.push((17, true));
    assert_eq!(
        Graph::from_description(&desc).unwrap_err(),
        BuildError::UnknownNode("#17".into())
    );
}

#[test]
fn test_cycle_is_rejected() {
    let err = GraphBuilder::new()
        .input("a")
        .gate("g", GateType::Nand)
        .gate("n", GateType::Not)
        .output("y")
        .connect("a", "g")
        .connect("n", "g")
        .connect("g", "n")
        .connect("n", "y")
        .build()
        .unwrap_err();
    match err {
        BuildError::Cycle { involved } => {
            assert!(involved.contains(&NodeId::new(1)));
            assert!(involved.contains(&NodeId::new(2)));
            assert!(!involved.contains(&NodeId::new(0)));
        }
        other => panic!("expected cycle, got {other}"),
    }
}

// ── Zero-delay settling ───────────────────────────────────────────────

#[test]
fn test_settle_half_adder() {
    let (graph, _) = half_adder().build().unwrap();
    let (a, b) = (NodeId::new(0), NodeId::new(1));
    let (sum, carry) = (NodeId::new(4), NodeId::new(5));

    for (va, vb) in [(false, false), (false, true), (true, false), (true, true)] {
        let out = graph.settle(&[(a, va), (b, vb)]).unwrap();
        assert_eq!(out[&sum], Signal::from(va ^ vb));
        assert_eq!(out[&carry], Signal::from(va && vb));
    }
    // Settling never touches the graph's own signals.
    assert_eq!(graph.signal(sum), Signal::Unknown);
}

#[test]
fn test_settle_leaves_undriven_logic_unknown() {
    let (graph, _) = half_adder().build().unwrap();
    let out = graph.settle(&[(NodeId::new(0), true)]).unwrap();
    assert_eq!(out[&NodeId::new(4)], Signal::Unknown);
    assert_eq!(out[&NodeId::new(5)], Signal::Unknown);
}

#[test]
fn test_display_lists_nodes() {
    let (graph, _) = half_adder().build().unwrap();
    let text = graph.to_string();
    assert!(text.starts_with("graph: 6 nodes, 2 inputs, 2 outputs, depth 3, max delay 3"));
    assert!(text.contains("N2 XOR \"s\" rise=2 fall=2 out=X"));
    assert_eq!(text.lines().count(), 7);
}
