//! The logic network: an arena of nodes plus its designated terminals.
//!
//! # Module structure
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`description`] | [`CircuitDescription`], the plain-data result a netlist reader hands over |
//! | [`builder`] | [`GraphBuilder`], name-based fluent construction |
//! | `topology` | Kahn levelization and cycle rejection |

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{BuildError, BuildResult};
use crate::node::{Arity, GateType, Node, NodeId};
use crate::signal::Signal;

pub mod builder;
pub mod description;
mod topology;

pub use builder::GraphBuilder;
pub use description::{CircuitDescription, Connection, NodeSpec};

/// Owns every node of a circuit by index.
///
/// A `Graph` only exists in a validated state: every node satisfies its
/// gate's arity, primary inputs are IN nodes, primary outputs are OUT
/// nodes and the topology is acyclic. After construction the topology
/// never changes; node signals are the only mutable state and are driven
/// exclusively by a [`Simulator`](crate::Simulator).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    nodes: Vec<Node>,
    inputs: Vec<NodeId>,
    outputs: Vec<NodeId>,
    levels: Vec<Vec<NodeId>>,
}

impl Graph {
    /// Start an empty, unvalidated graph. Only the builders use this.
    pub(crate) fn empty() -> Self {
        Graph {
            nodes: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            levels: Vec::new(),
        }
    }

    pub(crate) fn push_node(
        &mut self,
        name: impl Into<String>,
        gate: GateType,
        rise_delay: u64,
        fall_delay: u64,
    ) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes
            .push(Node::new(id, name, gate, rise_delay, fall_delay));
        id
    }

    /// Register a directed wire from `producer` to `consumer`.
    ///
    /// Updates the producer's fan-out and the consumer's fan-in. Rejects
    /// indices outside the arena and wires that would push a fixed-arity
    /// consumer past its input count.
    pub(crate) fn connect(&mut self, producer: usize, consumer: usize) -> BuildResult<()> {
        let len = self.nodes.len();
        if producer >= len || consumer >= len {
            return Err(BuildError::DanglingConnection {
                from: producer,
                to: consumer,
                len,
            });
        }

        let target = &self.nodes[consumer];
        let expected = target.gate.arity();
        if let Some(max) = expected.max() {
            if target.inputs.len() >= max {
                return Err(BuildError::Arity {
                    node: Some(target.id),
                    gate: target.gate,
                    expected,
                    found: target.inputs.len() + 1,
                });
            }
        }

        let (from, to) = (NodeId::new(producer), NodeId::new(consumer));
        self.nodes[producer].outputs.push(to);
        self.nodes[consumer].inputs.push(from);
        Ok(())
    }

    pub(crate) fn designate_input(&mut self, id: NodeId) -> BuildResult<()> {
        self.designate(id, GateType::In, "input")?;
        self.inputs.push(id);
        Ok(())
    }

    pub(crate) fn designate_output(&mut self, id: NodeId) -> BuildResult<()> {
        self.designate(id, GateType::Out, "output")?;
        self.outputs.push(id);
        Ok(())
    }

    fn designate(&self, id: NodeId, gate: GateType, role: &'static str) -> BuildResult<()> {
        let node = self
            .nodes
            .get(id.index())
            .ok_or_else(|| BuildError::UnknownNode(id.to_string()))?;
        if node.gate != gate {
            return Err(BuildError::Designation {
                node: id,
                gate: node.gate,
                role,
            });
        }
        Ok(())
    }

    /// Check arity of every node and levelize; the graph is usable after this.
    pub(crate) fn finalize(mut self) -> BuildResult<Self> {
        for node in &self.nodes {
            let expected: Arity = node.gate.arity();
            if !expected.accepts(node.inputs.len()) {
                return Err(BuildError::Arity {
                    node: Some(node.id),
                    gate: node.gate,
                    expected,
                    found: node.inputs.len(),
                });
            }
        }
        self.levels = topology::topological_levels(&self.nodes)?;
        debug!(
            nodes = self.nodes.len(),
            inputs = self.inputs.len(),
            outputs = self.outputs.len(),
            depth = self.levels.len(),
            max_delay = self.max_delay(),
            "Graph finalized"
        );
        Ok(self)
    }

    // ── Topology queries ──────────────────────────────────────

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node. Returns `None` for IDs from another graph.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes in arena order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    /// Resolve a node by name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|n| n.name == name).map(|n| n.id)
    }

    /// Designated primary inputs, in build order.
    pub fn primary_inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Designated primary outputs, in build order.
    pub fn primary_outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    /// Largest rise or fall delay of any node. Sizes the time wheel.
    pub fn max_delay(&self) -> u64 {
        self.nodes.iter().map(Node::max_delay).max().unwrap_or(0)
    }

    /// Node IDs grouped by topological level.
    pub fn levels(&self) -> &[Vec<NodeId>] {
        &self.levels
    }

    /// Number of topological levels, i.e. nodes on the longest path.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Every node in a topological order.
    pub fn topological_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.levels.iter().flatten().copied()
    }

    // ── Signal state ──────────────────────────────────────────

    /// Current value of a node, `Unknown` for foreign IDs.
    pub fn signal(&self, id: NodeId) -> Signal {
        self.node(id).map_or(Signal::Unknown, Node::output)
    }

    /// Forget all driven values and pending bookkeeping.
    pub(crate) fn reset_signals(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    /// Zero-delay evaluation of the whole network for a static input
    /// assignment.
    ///
    /// Nodes are evaluated level by level without touching the graph's
    /// own signals. Inputs missing from `assignment` stay unknown, and so
    /// does everything that depends on them. Returns the value of every
    /// primary output.
    pub fn settle(&self, assignment: &[(NodeId, bool)]) -> BuildResult<BTreeMap<NodeId, Signal>> {
        let mut values = vec![Signal::Unknown; self.nodes.len()];
        for &(id, value) in assignment {
            if let Some(node) = self.node(id) {
                if node.is_input() {
                    values[id.index()] = Signal::from(value);
                }
            }
        }

        for id in self.topological_order() {
            let node = &self.nodes[id.index()];
            if node.is_input() {
                continue;
            }
            let inputs: Option<Vec<bool>> = node
                .inputs
                .iter()
                .map(|i| values[i.index()].as_bool())
                .collect();
            if let Some(inputs) = inputs {
                values[id.index()] = Signal::from(node.evaluate(&inputs)?);
            }
        }

        Ok(self
            .outputs
            .iter()
            .map(|id| (*id, values[id.index()]))
            .collect())
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "graph: {} nodes, {} inputs, {} outputs, depth {}, max delay {}",
            self.nodes.len(),
            self.inputs.len(),
            self.outputs.len(),
            self.levels.len(),
            self.max_delay()
        )?;
        for node in &self.nodes {
            writeln!(f, "  {}", node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
