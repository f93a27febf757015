//! Simulation driver.
//!
//! Seeds the time wheel from stimuli, then steps it one tick at a time:
//! every event in the current slot is applied, each affected fan-out node
//! is re-evaluated, and changed candidates are scheduled after the gate's
//! rise or fall delay. The loop is purely synchronous and single-threaded,
//! so identical inputs always produce identical traces.

use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, info, trace, warn};

use crate::error::{SimError, SimResult};
use crate::event::Event;
use crate::graph::Graph;
use crate::node::NodeId;
use crate::scheduler::Scheduler;
use crate::signal::Signal;
use crate::time::VirtualTime;
use crate::trace::{Transition, TransitionTrace};

mod config;
mod report;

pub use config::SimConfig;
pub use report::{RunReport, SimPhase, Stimulus, TickOutcome};

/// Top-level simulation driver.
///
/// Owns the graph and the time wheel for the duration of a run; nothing
/// else can mutate node values while a run is in progress. Call
/// [`initialize`](Simulator::initialize) to seed a run, then
/// [`run`](Simulator::run) to execute until quiescence, or
/// [`step`](Simulator::step) to advance by exactly one tick.
#[derive(Debug, Clone)]
pub struct Simulator {
    graph: Graph,
    config: SimConfig,
    wheel: Scheduler,
    /// Stimuli further out than the wheel horizon, in time order.
    deferred: VecDeque<Stimulus>,
    phase: SimPhase,
    idle_ticks: u64,
    ticks: u64,
    events_applied: u64,
    trace: TransitionTrace,
}

impl Simulator {
    /// Create a simulator for `graph`, sizing the wheel from its largest delay.
    ///
    /// Fails with [`SimError::WheelTooLarge`] when that delay plus the
    /// configured margin exceeds the wheel limit.
    pub fn new(graph: Graph, config: SimConfig) -> SimResult<Self> {
        let wheel = Scheduler::new(graph.max_delay(), config.wheel_margin)?;
        Ok(Simulator {
            graph,
            config,
            wheel,
            deferred: VecDeque::new(),
            phase: SimPhase::Idle,
            idle_ticks: 0,
            ticks: 0,
            events_applied: 0,
            trace: TransitionTrace::new(),
        })
    }

    /// Build, seed and run in one call.
    pub fn simulate(graph: Graph, stimuli: &[Stimulus], config: SimConfig) -> SimResult<RunReport> {
        let mut sim = Simulator::new(graph, config)?;
        sim.initialize(stimuli)?;
        sim.run()
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Give the graph back, e.g. to build a simulator with another config.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Access the time wheel (e.g. to inspect pending events).
    pub fn wheel(&self) -> &Scheduler {
        &self.wheel
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    /// Current simulated time.
    pub fn now(&self) -> VirtualTime {
        self.wheel.now()
    }

    /// Transitions recorded so far in this run.
    pub fn trace(&self) -> &TransitionTrace {
        &self.trace
    }

    /// Current value of a node.
    pub fn signal(&self, id: NodeId) -> Signal {
        self.graph.signal(id)
    }

    // ── Seeding ───────────────────────────────────────────────

    /// Start a new run from `stimuli`.
    ///
    /// Every node returns to `Unknown`, the wheel is emptied and time
    /// rewinds to zero. Each stimulus becomes a transition event on its
    /// input at its absolute time; time-zero stimuli are the declared
    /// initial values and are applied on the first tick. Stimuli are
    /// validated before any state is touched.
    pub fn initialize(&mut self, stimuli: &[Stimulus]) -> SimResult<()> {
        for s in stimuli {
            let node = self.graph.node(s.node).ok_or(SimError::UnknownNode(s.node))?;
            if !node.is_input() {
                return Err(SimError::NotAnInput {
                    node: s.node,
                    gate: node.gate(),
                });
            }
        }

        self.phase = SimPhase::Seeding;
        self.graph.reset_signals();
        self.wheel.reset();
        self.trace.clear();
        self.idle_ticks = 0;
        self.ticks = 0;
        self.events_applied = 0;

        let mut sorted = stimuli.to_vec();
        sorted.sort_by_key(|s| s.time);
        self.deferred = sorted.into();
        self.release_due()?;

        debug!(
            stimuli = stimuli.len(),
            deferred = self.deferred.len(),
            wheel_len = self.wheel.wheel_len(),
            "Simulation seeded"
        );
        Ok(())
    }

    /// Move deferred stimuli that now fall inside the wheel horizon onto it.
    fn release_due(&mut self) -> SimResult<()> {
        let now = self.wheel.now();
        let horizon = self.wheel.horizon();
        while let Some(s) = self.deferred.front().copied() {
            let delay = match s.time.duration_since(now) {
                Some(d) if d > horizon => break,
                Some(d) => d,
                // Released before its tick comes up, so never behind.
                None => 0,
            };
            self.deferred.pop_front();
            let node = &mut self.graph.nodes_mut()[s.node.index()];
            self.wheel.schedule(node, s.value, delay)?;
        }
        Ok(())
    }

    // ── Stepping ──────────────────────────────────────────────

    fn check_runnable(&self) -> SimResult<()> {
        match self.phase {
            SimPhase::Idle => Err(SimError::NotInitialized),
            SimPhase::Quiescent => Err(SimError::AlreadyQuiescent),
            SimPhase::Seeding | SimPhase::Stepping => Ok(()),
        }
    }

    /// Process exactly one tick.
    ///
    /// Drains the current slot in FIFO order, including events that are
    /// scheduled into it with zero delay while it drains. After `L`
    /// consecutive empty ticks, with nothing left on the wheel and no
    /// deferred stimuli, the run is quiescent; otherwise the wheel
    /// advances to the next tick.
    pub fn step(&mut self) -> SimResult<TickOutcome> {
        self.check_runnable()?;
        if let Some(limit) = self.config.tick_limit {
            if self.ticks >= limit {
                return Err(SimError::TickLimit { limit });
            }
        }
        self.phase = SimPhase::Stepping;
        self.release_due()?;

        let time = self.wheel.now();
        let mut applied = 0;
        let mut transitions = 0;

        if self.wheel.current_slot_is_empty() {
            self.idle_ticks += 1;
        } else {
            self.idle_ticks = 0;
            while let Some(event) = self.wheel.pop_current() {
                applied += 1;
                if self.apply(event)? {
                    transitions += 1;
                }
            }
        }
        self.ticks += 1;
        self.events_applied += applied as u64;

        let quiescent = self.idle_ticks >= self.wheel.wheel_len() as u64
            && self.wheel.is_idle()
            && self.deferred.is_empty();
        if quiescent {
            self.phase = SimPhase::Quiescent;
        } else {
            self.wheel.advance()?;
        }

        if applied > 0 {
            debug!(
                time = time.ticks(),
                applied,
                transitions,
                pending = self.wheel.pending(),
                "Tick"
            );
        }

        Ok(TickOutcome {
            time,
            applied,
            transitions,
            quiescent,
        })
    }

    /// Apply one event and schedule whatever its fan-out now wants.
    ///
    /// Returns whether the target's value changed. An event that leaves
    /// the value unchanged is consumed silently and wakes no fan-out.
    fn apply(&mut self, event: Event) -> SimResult<bool> {
        let nodes = self.graph.nodes_mut();
        let target = &mut nodes[event.target.index()];

        if target.last_scheduled.map(|s| s.time) == Some(event.scheduled_at) {
            target.last_scheduled = None;
        }
        let value = Signal::from(event.value);
        if target.output == value {
            return Ok(false);
        }
        target.set_output(value);

        if self.config.record_trace {
            self.trace.record(Transition {
                time: event.scheduled_at,
                node: event.target,
                value: event.value,
            });
        }

        let fanout_len = nodes[event.target.index()].outputs.len();
        for k in 0..fanout_len {
            let out = nodes[event.target.index()].outputs[k];
            let node = &nodes[out.index()];
            let candidate = match node.input_values(nodes) {
                Some(inputs) => node.evaluate(&inputs)?,
                None => {
                    trace!(node = %out, "Not ready, deferring evaluation");
                    continue;
                }
            };
            if node.projected() == Signal::from(candidate) {
                continue;
            }
            let delay = node.delay_for(candidate);
            self.wheel
                .schedule(&mut nodes[out.index()], candidate, delay)?;
        }
        Ok(true)
    }

    /// Step until quiescence and report the outcome.
    ///
    /// Nodes that never received a value are listed in
    /// [`RunReport::unresolved`]; the primary outputs that did settle are
    /// still reported.
    pub fn run(&mut self) -> SimResult<RunReport> {
        self.check_runnable()?;
        info!(
            nodes = self.graph.len(),
            wheel_len = self.wheel.wheel_len(),
            "Run started"
        );

        while !self.step()?.quiescent {}

        let outputs: BTreeMap<NodeId, bool> = self
            .graph
            .primary_outputs()
            .iter()
            .filter_map(|id| self.graph.signal(*id).as_bool().map(|v| (*id, v)))
            .collect();
        let unresolved: Vec<NodeId> = self
            .graph
            .nodes()
            .iter()
            .filter(|n| !n.output().is_known())
            .map(|n| n.id())
            .collect();

        if !unresolved.is_empty() {
            warn!(
                count = unresolved.len(),
                first = %unresolved[0],
                "Nodes unresolved at quiescence"
            );
        }
        info!(
            final_time = self.wheel.now().ticks(),
            ticks = self.ticks,
            events = self.events_applied,
            transitions = self.trace.len(),
            "Run quiescent"
        );

        Ok(RunReport {
            trace: std::mem::take(&mut self.trace),
            outputs,
            unresolved,
            final_time: self.wheel.now(),
            ticks: self.ticks,
            events_applied: self.events_applied,
        })
    }
}
