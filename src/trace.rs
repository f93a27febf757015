//! Transition trace recorded by a simulation run.
//!
//! Every applied event that changes a node's value is appended as a
//! [`Transition`], in time order and, within a tick, in application
//! order. The trace can be hashed for replay verification and exported
//! in a deterministic line format.

use std::io::{self, Write};

use crate::node::NodeId;
use crate::time::VirtualTime;

// ── Hash utility ──────────────────────────────────────────────────────

/// Combine two u64 hashes deterministically.
pub fn hash_combine(a: u64, b: u64) -> u64 {
    let mut h = a;
    h = h.wrapping_mul(0x517cc1b727220a95);
    h = h.wrapping_add(b);
    h ^= h >> 32;
    h
}

// ── Transition ────────────────────────────────────────────────────────

/// A node changing value at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub time: VirtualTime,
    pub node: NodeId,
    pub value: bool,
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[T={}] {} -> {}",
            self.time.ticks(),
            self.node,
            u8::from(self.value)
        )
    }
}

// ── Transition Trace ──────────────────────────────────────────────────

/// Append-only list of transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionTrace {
    entries: Vec<Transition>,
}

impl TransitionTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition.
    pub fn record(&mut self, transition: Transition) {
        self.entries.push(transition);
    }

    /// All transitions, in recording order.
    pub fn entries(&self) -> &[Transition] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Transitions of a single node, in order.
    pub fn for_node(&self, node: NodeId) -> impl Iterator<Item = &Transition> + '_ {
        self.entries.iter().filter(move |t| t.node == node)
    }

    /// The last value a node transitioned to, if it ever did.
    pub fn last_value(&self, node: NodeId) -> Option<bool> {
        self.entries
            .iter()
            .rev()
            .find(|t| t.node == node)
            .map(|t| t.value)
    }

    /// Compute a deterministic hash of the whole trace.
    pub fn trace_hash(&self) -> u64 {
        let mut h: u64 = 0;
        for t in &self.entries {
            h = hash_combine(h, t.time.ticks());
            h = hash_combine(h, t.node.index() as u64);
            h = hash_combine(h, u64::from(t.value));
        }
        h
    }

    /// Export the trace to a writer, one `time node value` line per entry.
    pub fn export<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "# GATEWHEEL TRACE v1")?;
        writeln!(w, "# transitions: {}", self.entries.len())?;
        for t in &self.entries {
            writeln!(w, "{} {} {}", t.time.ticks(), t.node.index(), u8::from(t.value))?;
        }
        Ok(())
    }
}

impl std::fmt::Display for TransitionTrace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for t in &self.entries {
            writeln!(f, "{}", t)?;
        }
        Ok(())
    }
}
