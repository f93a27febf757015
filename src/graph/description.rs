//! Plain-data circuit description, as produced by a netlist reader.
//!
//! The reader (text parsing is not part of this crate) hands over an
//! ordered node list, index-based connections, the designated terminals
//! and any declared initial input values. [`Graph::from_description`]
//! validates all of it before a simulation can start.

use std::collections::HashSet;

use crate::error::{BuildError, BuildResult};
use crate::node::{GateType, NodeId, DEFAULT_DELAY};
use crate::simulation::Stimulus;

use super::Graph;

/// One node declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeSpec {
    pub name: String,
    pub gate: GateType,
    pub rise_delay: u64,
    pub fall_delay: u64,
}

impl NodeSpec {
    /// A node with the default delay on both edges.
    pub fn new(name: impl Into<String>, gate: GateType) -> Self {
        NodeSpec {
            name: name.into(),
            gate,
            rise_delay: DEFAULT_DELAY,
            fall_delay: DEFAULT_DELAY,
        }
    }

    pub fn with_delays(mut self, rise: u64, fall: u64) -> Self {
        self.rise_delay = rise;
        self.fall_delay = fall;
        self
    }
}

/// A directed wire between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub from: usize,
    pub to: usize,
}

/// Everything needed to build a [`Graph`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct CircuitDescription {
    pub nodes: Vec<NodeSpec>,
    pub connections: Vec<Connection>,
    /// Indices of primary inputs, in order.
    pub inputs: Vec<usize>,
    /// Indices of primary outputs, in order.
    pub outputs: Vec<usize>,
    /// Declared static values of primary inputs.
    pub initial_values: Vec<(usize, bool)>,
}

impl Graph {
    /// Validate a description and build the graph it describes.
    ///
    /// Returns the graph together with the declared initial values as
    /// time-zero stimuli. Fails on duplicate names, dangling connections,
    /// arity violations, wrongly-typed designations and cycles.
    pub fn from_description(desc: &CircuitDescription) -> BuildResult<(Graph, Vec<Stimulus>)> {
        let mut graph = Graph::empty();
        let mut names = HashSet::with_capacity(desc.nodes.len());

        for spec in &desc.nodes {
            if !names.insert(spec.name.as_str()) {
                return Err(BuildError::DuplicateName(spec.name.clone()));
            }
            graph.push_node(spec.name.clone(), spec.gate, spec.rise_delay, spec.fall_delay);
        }

        for c in &desc.connections {
            graph.connect(c.from, c.to)?;
        }

        for &i in &desc.inputs {
            graph.designate_input(NodeId::new(i))?;
        }
        for &i in &desc.outputs {
            graph.designate_output(NodeId::new(i))?;
        }

        let graph = graph.finalize()?;

        let mut initial = Vec::with_capacity(desc.initial_values.len());
        for &(i, value) in &desc.initial_values {
            let node = graph
                .node(NodeId::new(i))
                .ok_or_else(|| BuildError::UnknownNode(format!("#{}", i)))?;
            if !node.is_input() {
                return Err(BuildError::Designation {
                    node: node.id(),
                    gate: node.gate(),
                    role: "input",
                });
            }
            initial.push(Stimulus::initial(node.id(), value));
        }

        Ok((graph, initial))
    }
}
