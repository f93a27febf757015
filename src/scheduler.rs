//! Delay-indexed event scheduler ("time wheel").
//!
//! A circular array of FIFO queues, one per tick, indexed by absolute time
//! modulo the wheel length `L`. `L` is the largest node delay plus a margin,
//! so every event that can be scheduled from "now" lands in a distinct slot
//! and an idle sweep of `L` ticks proves nothing is left in flight.

use std::collections::VecDeque;

use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::event::{Event, EventId, EventIdGen};
use crate::node::{Node, NodeId, Scheduled};
use crate::time::VirtualTime;

/// Slots added beyond the largest delay when none is configured.
pub const DEFAULT_WHEEL_MARGIN: u64 = 3;

/// Upper bound on the wheel length; larger delays are rejected.
pub const MAX_WHEEL_LEN: u64 = 1 << 20;

/// The time wheel.
///
/// Owns every pending event. Slot `i` only ever holds events for a single
/// absolute instant: the one in `[now, now + L)` congruent to `i`.
#[derive(Debug, Clone)]
pub struct Scheduler {
    slots: Vec<VecDeque<Event>>,
    now: VirtualTime,
    cursor: usize,
    pending: usize,
    id_gen: EventIdGen,
}

impl Scheduler {
    /// Create a wheel of `max_delay + margin` slots. A zero margin is
    /// raised to one so the wheel always has room for the largest delay.
    ///
    /// Fails with [`SimError::WheelTooLarge`] beyond [`MAX_WHEEL_LEN`].
    pub fn new(max_delay: u64, margin: u64) -> SimResult<Self> {
        let len = max_delay.saturating_add(margin.max(1));
        if len > MAX_WHEEL_LEN {
            return Err(SimError::WheelTooLarge {
                len,
                max: MAX_WHEEL_LEN,
            });
        }
        let len = usize::try_from(len).map_err(|_| SimError::WheelTooLarge {
            len,
            max: MAX_WHEEL_LEN,
        })?;
        Ok(Scheduler {
            slots: vec![VecDeque::new(); len],
            now: VirtualTime::ZERO,
            cursor: 0,
            pending: 0,
            id_gen: EventIdGen::new(),
        })
    }

    /// Number of slots, `L`.
    #[inline]
    pub fn wheel_len(&self) -> usize {
        self.slots.len()
    }

    /// Largest delay that can be scheduled, `L - 1`.
    #[inline]
    pub fn horizon(&self) -> u64 {
        self.slots.len() as u64 - 1
    }

    /// Current simulated time.
    #[inline]
    pub fn now(&self) -> VirtualTime {
        self.now
    }

    /// Slot index of the current time, `now mod L`.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of events waiting anywhere on the wheel.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// True if no event is waiting anywhere on the wheel.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }

    /// True if the slot under the cursor is empty.
    #[inline]
    pub fn current_slot_is_empty(&self) -> bool {
        self.slots[self.cursor].is_empty()
    }

    /// Returns the next event ID that will be assigned.
    pub fn next_event_id(&self) -> EventId {
        self.id_gen.peek()
    }

    /// Schedule `node` to drive `value` after `delay` ticks.
    ///
    /// If the node already has an event pending at that instant, the old
    /// event is removed first, so only the latest candidate for a given
    /// instant survives. Events pending for the node at any later instant
    /// were derived from older inputs and are removed as well.
    pub fn schedule(&mut self, node: &mut Node, value: bool, delay: u64) -> SimResult<EventId> {
        if delay > self.horizon() {
            return Err(SimError::DelayBeyondHorizon {
                delay,
                horizon: self.horizon(),
            });
        }
        let at = self.now.plus(delay).ok_or(SimError::TimeOverflow)?;

        if let Some(prev) = node.last_scheduled {
            if prev.time >= at {
                let removed = self.cancel_from(node.id, delay);
                trace!(
                    node = %node.id,
                    at = at.ticks(),
                    superseded = removed,
                    "Superseded pending events"
                );
            }
        }

        let id = self.id_gen.next_id();
        let slot = at.slot(self.wheel_len());
        self.slots[slot].push_back(Event::new(id, node.id, value, at));
        self.pending += 1;
        node.last_scheduled = Some(Scheduled { time: at, value });
        trace!(node = %node.id, value, at = at.ticks(), event = %id, "Scheduled");
        Ok(id)
    }

    /// Remove every event for `node` at `now + from_delay` or later.
    /// Returns how many were removed.
    fn cancel_from(&mut self, node: NodeId, from_delay: u64) -> usize {
        let len = self.wheel_len();
        let mut removed = 0;
        for delay in from_delay..len as u64 {
            let slot = &mut self.slots[(self.cursor + delay as usize) % len];
            let before = slot.len();
            slot.retain(|e| e.target != node);
            removed += before - slot.len();
        }
        self.pending -= removed;
        removed
    }

    /// Take the next event of the current slot, in insertion order.
    ///
    /// Events scheduled with zero delay while the slot is being drained
    /// join the back of the same queue and are returned in turn.
    pub fn pop_current(&mut self) -> Option<Event> {
        let event = self.slots[self.cursor].pop_front()?;
        self.pending -= 1;
        Some(event)
    }

    /// Move the cursor one tick forward.
    ///
    /// The current slot must have been drained.
    pub fn advance(&mut self) -> SimResult<()> {
        debug_assert!(self.current_slot_is_empty());
        self.now = self.now.plus(1).ok_or(SimError::TimeOverflow)?;
        self.cursor = (self.cursor + 1) % self.wheel_len();
        Ok(())
    }

    /// Drop every pending event and rewind to time zero.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
        self.now = VirtualTime::ZERO;
        self.cursor = 0;
        self.pending = 0;
        self.id_gen = EventIdGen::new();
    }

    /// Every pending event, ordered by time and then by insertion.
    pub fn pending_events(&self) -> Vec<Event> {
        let len = self.wheel_len();
        (0..len)
            .flat_map(|offset| self.slots[(self.cursor + offset) % len].iter().copied())
            .collect()
    }
}
