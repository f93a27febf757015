//! Inputs and results of a run: stimuli, per-tick outcomes and the final report.

use std::collections::BTreeMap;

use crate::error::{SimError, SimResult};
use crate::node::NodeId;
use crate::time::VirtualTime;
use crate::trace::TransitionTrace;

/// An externally forced value on a primary input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Stimulus {
    pub node: NodeId,
    pub value: bool,
    pub time: VirtualTime,
}

impl Stimulus {
    pub fn new(node: NodeId, value: bool, time: u64) -> Self {
        Stimulus {
            node,
            value,
            time: VirtualTime::new(time),
        }
    }

    /// A declared initial value, applied at time zero.
    pub fn initial(node: NodeId, value: bool) -> Self {
        Self::new(node, value, 0)
    }
}

/// Lifecycle of one run.
///
/// `Idle → Seeding → Stepping → Quiescent`. Only `initialize` leaves
/// `Quiescent`, by starting a new run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum SimPhase {
    Idle,
    Seeding,
    Stepping,
    Quiescent,
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// The tick that was processed.
    pub time: VirtualTime,
    /// Events taken off the wheel.
    pub applied: usize,
    /// Applied events that changed a node's value.
    pub transitions: usize,
    /// True once the run has gone quiescent on this tick.
    pub quiescent: bool,
}

/// Result of running a simulation to quiescence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RunReport {
    /// Every transition, in time and application order.
    pub trace: TransitionTrace,
    /// Settled value of each primary output that reached a known value.
    pub outputs: BTreeMap<NodeId, bool>,
    /// Nodes still unknown at quiescence, in arena order.
    pub unresolved: Vec<NodeId>,
    /// Time of the tick on which quiescence was detected.
    pub final_time: VirtualTime,
    /// Ticks processed.
    pub ticks: u64,
    /// Events taken off the wheel.
    pub events_applied: u64,
}

impl RunReport {
    /// Settled value of one primary output.
    pub fn output(&self, node: NodeId) -> Option<bool> {
        self.outputs.get(&node).copied()
    }

    /// Fail with [`SimError::Unresolved`] if any node never got a value.
    pub fn verify(&self) -> SimResult<()> {
        if self.unresolved.is_empty() {
            Ok(())
        } else {
            Err(SimError::Unresolved {
                nodes: self.unresolved.clone(),
            })
        }
    }
}
