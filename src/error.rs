//! Structured error types for gatewheel.
//!
//! Building a graph returns `Result<T, BuildError>`; stepping and running a
//! simulation returns `Result<T, SimError>`. Build errors always surface
//! before any simulated time passes, so an inconsistent graph can never
//! reach the time wheel.

use thiserror::Error;

use crate::node::{Arity, GateType, NodeId};

/// Errors detected while assembling a graph from a circuit description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    // ── Description errors ────────────────────────────────

    /// A gate-type token did not name any known gate.
    #[error("unknown gate type {0:?}")]
    UnknownGateType(String),

    /// Two nodes were declared with the same name.
    #[error("node name {0:?} is declared more than once")]
    DuplicateName(String),

    /// A connection or designation referenced a name that was never declared.
    #[error("node {0:?} is not declared")]
    UnknownNode(String),

    /// A connection referenced a node index outside the node list.
    #[error("connection {from} -> {to} references a node outside 0..{len}")]
    DanglingConnection { from: usize, to: usize, len: usize },

    /// A primary input was not an IN node, or a primary output not an OUT node.
    #[error("node {node} is a {gate} and cannot be designated a primary {role}")]
    Designation {
        node: NodeId,
        gate: GateType,
        role: &'static str,
    },

    // ── Topology errors ───────────────────────────────────

    /// A node's fan-in does not satisfy its gate's arity.
    #[error("{}{gate} expects {expected} input(s), found {found}", node_prefix(.node))]
    Arity {
        node: Option<NodeId>,
        gate: GateType,
        expected: Arity,
        found: usize,
    },

    /// The connection list contains a feedback path.
    #[error("combinational cycle through {}", join_ids(.involved))]
    Cycle { involved: Vec<NodeId> },

    /// An IN node was asked to compute its output; inputs are driven externally.
    #[error("{gate} nodes are driven externally and are never evaluated")]
    NotEvaluable { gate: GateType },
}

/// Errors raised while seeding or running a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A stimulus referenced a node that is not in the graph.
    #[error("node {0} not found")]
    UnknownNode(NodeId),

    /// A stimulus tried to force a node that is not a primary input.
    #[error("node {node} is a {gate}; only IN nodes accept stimuli")]
    NotAnInput { node: NodeId, gate: GateType },

    /// `run` or `step` was called before `initialize`.
    #[error("simulation has not been initialized")]
    NotInitialized,

    /// `run` or `step` was called after the run reached quiescence.
    #[error("simulation is already quiescent; initialize a new run")]
    AlreadyQuiescent,

    /// An event was scheduled further ahead than the wheel can hold.
    #[error("delay of {delay} ticks exceeds the wheel horizon of {horizon}")]
    DelayBeyondHorizon { delay: u64, horizon: u64 },

    /// Simulated time would overflow `u64`.
    #[error("simulated time overflow")]
    TimeOverflow,

    /// The largest delay plus the wheel margin needs more slots than allowed.
    #[error("time wheel of {len} slots exceeds the limit of {max}")]
    WheelTooLarge { len: u64, max: u64 },

    /// The configured tick limit was reached before quiescence.
    #[error("tick limit of {limit} reached before quiescence")]
    TickLimit { limit: u64 },

    /// Nodes were still undetermined when the run went quiescent.
    #[error("unresolved at quiescence: {}", join_ids(.nodes))]
    Unresolved { nodes: Vec<NodeId> },

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Convenience alias for `Result<T, BuildError>`.
pub type BuildResult<T> = Result<T, BuildError>;

/// Convenience alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

fn node_prefix(node: &Option<NodeId>) -> String {
    node.map(|id| format!("node {}: ", id)).unwrap_or_default()
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
