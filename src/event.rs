//! Transition events for the time wheel.
//!
//! An `Event` says "node N drives value V at time T". Events are created
//! when a node's freshly computed value differs from the value it is
//! already heading to, and are owned by the scheduler until applied or
//! superseded.

use crate::node::NodeId;
use crate::time::VirtualTime;

// ── Event ID ──────────────────────────────────────────────────────────

/// A per-run, strictly-increasing event identifier.
///
/// Events inside one wheel slot are consumed in insertion order, which is
/// also ascending `EventId` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct EventId(u64);

impl EventId {
    /// Wrap a raw u64 into an `EventId`.
    #[inline]
    pub fn new(raw: u64) -> Self {
        EventId(raw)
    }

    /// Return the raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E#{}", self.0)
    }
}

// ── Event ID Generator ───────────────────────────────────────────────

/// Deterministic, strictly-increasing event-ID generator.
///
/// Each scheduler owns exactly one and resets it at the start of a run,
/// so identical runs mint identical IDs.
#[derive(Debug, Clone, Default)]
pub struct EventIdGen {
    next: u64,
}

impl EventIdGen {
    /// Create a generator starting at 0.
    pub fn new() -> Self {
        EventIdGen { next: 0 }
    }

    /// Mint the next event ID.
    pub fn next_id(&mut self) -> EventId {
        let id = EventId(self.next);
        self.next += 1;
        id
    }

    /// Peek at the next ID without consuming it.
    pub fn peek(&self) -> EventId {
        EventId(self.next)
    }
}

// ── Event ─────────────────────────────────────────────────────────────

/// A scheduled transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Unique identifier (monotonically increasing within a run).
    pub id: EventId,

    /// The node whose output changes.
    pub target: NodeId,

    /// The value the target drives once the event fires.
    pub value: bool,

    /// Absolute time at which the event fires.
    pub scheduled_at: VirtualTime,
}

impl Event {
    /// Convenience constructor.
    pub fn new(id: EventId, target: NodeId, value: bool, scheduled_at: VirtualTime) -> Self {
        Event {
            id,
            target,
            value,
            scheduled_at,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} <- {}",
            self.id,
            self.scheduled_at,
            self.target,
            u8::from(self.value)
        )
    }
}
