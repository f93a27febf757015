//! `SimConfig`: knobs for a simulation run.

use crate::scheduler::DEFAULT_WHEEL_MARGIN;

/// Configuration of a [`Simulator`](super::Simulator).
///
/// The defaults reproduce the classic behavior: a wheel three slots longer
/// than the largest delay, no tick limit, and a full transition trace.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct SimConfig {
    /// Slots added to the largest node delay to size the wheel (min 1).
    pub wheel_margin: u64,
    /// Abort with `SimError::TickLimit` after this many ticks.
    pub tick_limit: Option<u64>,
    /// Record transitions into the run's trace.
    pub record_trace: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            wheel_margin: DEFAULT_WHEEL_MARGIN,
            tick_limit: None,
            record_trace: true,
        }
    }
}

impl SimConfig {
    pub fn with_wheel_margin(mut self, margin: u64) -> Self {
        self.wheel_margin = margin;
        self
    }

    pub fn with_tick_limit(mut self, limit: u64) -> Self {
        self.tick_limit = Some(limit);
        self
    }

    /// Skip trace recording; the run report then carries an empty trace.
    pub fn without_trace(mut self) -> Self {
        self.record_trace = false;
        self
    }
}
