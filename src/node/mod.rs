//! Nodes of a logic network: gates, primary inputs and primary outputs.
//!
//! # Module structure
//!
//! | Sub-module | Contents |
//! |---|---|
//! | [`id`] | [`NodeId`] newtype |
//! | [`gate`] | [`GateType`], [`Arity`] and the evaluation table |
//! | [`state`] | [`Node`] record and its pending-event bookkeeping |

pub mod gate;
pub mod id;
pub mod state;

// Flat re-exports so external callers can use `gatewheel::node::NodeId` etc.
pub use gate::{Arity, GateType};
pub use id::NodeId;
pub use state::{Node, Scheduled, DEFAULT_DELAY};

#[cfg(test)]
mod tests;
