//! Fluent, name-based construction of a [`Graph`].
//!
//! Hides the index bookkeeping of [`CircuitDescription`]: nodes are
//! referred to by name and designated terminals are collected as they are
//! declared. Nothing is validated until [`GraphBuilder::build`].

use std::collections::HashMap;

use crate::error::{BuildError, BuildResult};
use crate::node::GateType;
use crate::simulation::Stimulus;

use super::description::{CircuitDescription, Connection, NodeSpec};
use super::Graph;

/// Fluent builder for a validated [`Graph`].
///
/// # Example
/// ```rust
/// use gatewheel::{GateType, GraphBuilder};
///
/// let (graph, initial) = GraphBuilder::new()
///     .input("a")
///     .input("b")
///     .gate_with_delays("g", GateType::And, 2, 1)
///     .output("y")
///     .connect("a", "g")
///     .connect("b", "g")
///     .connect("g", "y")
///     .initial("a", true)
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.len(), 4);
/// assert_eq!(initial.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    nodes: Vec<NodeSpec>,
    wires: Vec<(String, String)>,
    inputs: Vec<String>,
    outputs: Vec<String>,
    initial: Vec<(String, bool)>,
}

impl GraphBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Nodes ─────────────────────────────────────────────────

    /// Declare a primary input.
    pub fn input(mut self, name: &str) -> Self {
        self.nodes.push(NodeSpec::new(name, GateType::In));
        self.inputs.push(name.to_string());
        self
    }

    /// Declare a primary output.
    pub fn output(mut self, name: &str) -> Self {
        self.nodes.push(NodeSpec::new(name, GateType::Out));
        self.outputs.push(name.to_string());
        self
    }

    /// Declare a primary output with explicit delays.
    pub fn output_with_delays(mut self, name: &str, rise: u64, fall: u64) -> Self {
        self.nodes
            .push(NodeSpec::new(name, GateType::Out).with_delays(rise, fall));
        self.outputs.push(name.to_string());
        self
    }

    /// Declare a gate with the default delays.
    pub fn gate(mut self, name: &str, gate: GateType) -> Self {
        self.nodes.push(NodeSpec::new(name, gate));
        self
    }

    /// Declare a gate with explicit rise and fall delays.
    pub fn gate_with_delays(mut self, name: &str, gate: GateType, rise: u64, fall: u64) -> Self {
        self.nodes
            .push(NodeSpec::new(name, gate).with_delays(rise, fall));
        self
    }

    /// Declare a node from a raw spec. IN and OUT specs are not designated.
    pub fn node(mut self, spec: NodeSpec) -> Self {
        self.nodes.push(spec);
        self
    }

    // ── Wires ─────────────────────────────────────────────────

    /// Wire `from`'s output into `to`'s next input.
    pub fn connect(mut self, from: &str, to: &str) -> Self {
        self.wires.push((from.to_string(), to.to_string()));
        self
    }

    /// Wire every name in `from`, in order, into `to`.
    pub fn connect_all(mut self, from: &[&str], to: &str) -> Self {
        for name in from {
            self.wires.push((name.to_string(), to.to_string()));
        }
        self
    }

    // ── Values ────────────────────────────────────────────────

    /// Declare the static value of a primary input at time zero.
    pub fn initial(mut self, name: &str, value: bool) -> Self {
        self.initial.push((name.to_string(), value));
        self
    }

    // ── Build ─────────────────────────────────────────────────

    /// Resolve names into the index form a netlist reader would produce.
    pub fn into_description(self) -> BuildResult<CircuitDescription> {
        let mut index: HashMap<String, usize> = HashMap::with_capacity(self.nodes.len());
        for (i, spec) in self.nodes.iter().enumerate() {
            if index.insert(spec.name.clone(), i).is_some() {
                return Err(BuildError::DuplicateName(spec.name.clone()));
            }
        }
        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| BuildError::UnknownNode(name.to_string()))
        };

        let connections = self
            .wires
            .iter()
            .map(|(from, to)| {
                Ok(Connection {
                    from: lookup(from.as_str())?,
                    to: lookup(to.as_str())?,
                })
            })
            .collect::<BuildResult<Vec<_>>>()?;
        let inputs = self
            .inputs
            .iter()
            .map(|n| lookup(n.as_str()))
            .collect::<BuildResult<Vec<_>>>()?;
        let outputs = self
            .outputs
            .iter()
            .map(|n| lookup(n.as_str()))
            .collect::<BuildResult<Vec<_>>>()?;
        let initial_values = self
            .initial
            .iter()
            .map(|(n, v)| Ok((lookup(n.as_str())?, *v)))
            .collect::<BuildResult<Vec<_>>>()?;

        Ok(CircuitDescription {
            nodes: self.nodes,
            connections,
            inputs,
            outputs,
            initial_values,
        })
    }

    /// Validate and build the graph, returning it with the declared
    /// initial values as time-zero stimuli.
    pub fn build(self) -> BuildResult<(Graph, Vec<Stimulus>)> {
        let desc = self.into_description()?;
        Graph::from_description(&desc)
    }
}
