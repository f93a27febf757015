//! # Gatewheel: Event-Driven Gate-Level Simulator
//!
//! Simulates combinational logic networks with per-gate rise and fall
//! delays. Work is driven by a time wheel: only nodes whose inputs
//! actually changed are re-evaluated, and identical inputs always
//! produce identical transition traces.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────┐
//! │         Simulator          │ ← seeds, steps, detects quiescence
//! │  ┌──────────────────────┐  │
//! │  │   Scheduler (wheel)  │  │ ← L slots of FIFO event queues
//! │  │  ┌────────────────┐  │  │
//! │  │  │     Events     │  │  │ ← (node, value, time) records
//! │  │  └────────────────┘  │  │
//! │  └──────────────────────┘  │
//! │  ┌──────────────────────┐  │
//! │  │        Graph         │  │ ← arena of nodes, levelized
//! │  │  ┌────────────────┐  │  │
//! │  │  │ Node / GateType│  │  │ ← tri-state output, gate table
//! │  │  └────────────────┘  │  │
//! │  └──────────────────────┘  │
//! │  ┌──────────────────────┐  │
//! │  │   TransitionTrace    │  │ ← every value change, in order
//! │  └──────────────────────┘  │
//! └────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gatewheel::{GateType, GraphBuilder, SimConfig, Simulator, Stimulus};
//!
//! let (graph, mut stimuli) = GraphBuilder::new()
//!     .input("a")
//!     .gate_with_delays("n", GateType::Not, 1, 1)
//!     .output_with_delays("y", 0, 0)
//!     .connect("a", "n")
//!     .connect("n", "y")
//!     .initial("a", true)
//!     .build()
//!     .unwrap();
//! let a = graph.find("a").unwrap();
//! let y = graph.find("y").unwrap();
//! stimuli.push(Stimulus::new(a, false, 4));
//!
//! let report = Simulator::simulate(graph, &stimuli, SimConfig::default()).unwrap();
//! assert_eq!(report.output(y), Some(true));
//! assert_eq!(report.trace.for_node(y).count(), 2);
//! ```

pub mod error;
pub mod event;
pub mod graph;
pub mod node;
pub mod scheduler;
pub mod signal;
pub mod simulation;
pub mod time;
pub mod trace;

// Re-exports for convenience.
pub use error::{BuildError, BuildResult, SimError, SimResult};
pub use event::{Event, EventId, EventIdGen};
pub use graph::{CircuitDescription, Connection, Graph, GraphBuilder, NodeSpec};
pub use node::{Arity, GateType, Node, NodeId, Scheduled, DEFAULT_DELAY};
pub use scheduler::{Scheduler, DEFAULT_WHEEL_MARGIN, MAX_WHEEL_LEN};
pub use signal::Signal;
pub use simulation::{RunReport, SimConfig, SimPhase, Simulator, Stimulus, TickOutcome};
pub use time::VirtualTime;
pub use trace::{Transition, TransitionTrace};
