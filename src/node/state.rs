//! `Node`: one gate or terminal in the arena owned by a `Graph`.

use crate::error::{BuildError, BuildResult};
use crate::signal::Signal;
use crate::time::VirtualTime;

use super::gate::GateType;
use super::id::NodeId;

/// Delay applied to both edges when none is given.
pub const DEFAULT_DELAY: u64 = 1;

/// The most recent event scheduled for a node that has not fired yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Scheduled {
    pub time: VirtualTime,
    pub value: bool,
}

/// A gate or terminal.
///
/// Connections are stored as index lists into the owning graph's arena,
/// so nodes never hold references to one another. Topology is fixed once
/// the graph is built; only `output` and `last_scheduled` change during a
/// run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) name: String,
    pub(crate) gate: GateType,
    pub(crate) inputs: Vec<NodeId>,
    pub(crate) outputs: Vec<NodeId>,
    pub(crate) output: Signal,
    pub(crate) rise_delay: u64,
    pub(crate) fall_delay: u64,
    pub(crate) last_scheduled: Option<Scheduled>,
}

impl Node {
    pub(crate) fn new(
        id: NodeId,
        name: impl Into<String>,
        gate: GateType,
        rise_delay: u64,
        fall_delay: u64,
    ) -> Self {
        Node {
            id,
            name: name.into(),
            gate,
            inputs: Vec::new(),
            outputs: Vec::new(),
            output: Signal::Unknown,
            rise_delay,
            fall_delay,
            last_scheduled: None,
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn gate(&self) -> GateType {
        self.gate
    }

    /// Fan-in, in connection order.
    #[inline]
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Fan-out, in connection order.
    #[inline]
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    /// The value this node currently drives.
    #[inline]
    pub fn output(&self) -> Signal {
        self.output
    }

    #[inline]
    pub fn rise_delay(&self) -> u64 {
        self.rise_delay
    }

    #[inline]
    pub fn fall_delay(&self) -> u64 {
        self.fall_delay
    }

    /// The pending event recorded for this node, if any.
    #[inline]
    pub fn last_scheduled(&self) -> Option<Scheduled> {
        self.last_scheduled
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        self.gate == GateType::In
    }

    /// Delay before a transition to `value`: rise for true, fall for false.
    #[inline]
    pub fn delay_for(&self, value: bool) -> u64 {
        if value {
            self.rise_delay
        } else {
            self.fall_delay
        }
    }

    #[inline]
    pub fn max_delay(&self) -> u64 {
        self.rise_delay.max(self.fall_delay)
    }

    /// Overwrite the driven value. Used for stimuli and event application.
    #[inline]
    pub fn set_output(&mut self, value: Signal) {
        self.output = value;
    }

    /// The value this node is heading to: the pending value while an
    /// event is outstanding, otherwise the current output.
    #[inline]
    pub fn projected(&self) -> Signal {
        match self.last_scheduled {
            Some(pending) => Signal::from(pending.value),
            None => self.output,
        }
    }

    /// Apply this node's gate function to `inputs`.
    ///
    /// Arity failures carry this node's ID.
    pub fn evaluate(&self, inputs: &[bool]) -> BuildResult<bool> {
        self.gate.evaluate(inputs).map_err(|e| match e {
            BuildError::Arity {
                gate,
                expected,
                found,
                ..
            } => BuildError::Arity {
                node: Some(self.id),
                gate,
                expected,
                found,
            },
            other => other,
        })
    }

    /// True iff every fan-in node drives a known value.
    ///
    /// `nodes` is the arena this node belongs to.
    pub fn ready_to_evaluate(&self, nodes: &[Node]) -> bool {
        self.inputs
            .iter()
            .all(|id| nodes[id.index()].output.is_known())
    }

    /// Current fan-in values, or `None` while any of them is unknown.
    pub fn input_values(&self, nodes: &[Node]) -> Option<Vec<bool>> {
        self.inputs
            .iter()
            .map(|id| nodes[id.index()].output.as_bool())
            .collect()
    }

    /// Clear run state: output back to unknown, nothing pending.
    pub(crate) fn reset(&mut self) {
        self.output = Signal::Unknown;
        self.last_scheduled = None;
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {:?} rise={} fall={} out={}",
            self.id, self.gate, self.name, self.rise_delay, self.fall_delay, self.output
        )
    }
}
