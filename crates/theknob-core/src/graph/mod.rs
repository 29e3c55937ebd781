//! Mode-routed serial signal graph.
//!
//! The chain always holds the same six stages; a [`Mode`](crate::Mode)
//! only decides their order. Each order is a compile-time [`Topology`]
//! constant, so rewiring on a mode change is a single reference swap inside
//! the audio callback: no allocation, no edge list, no stage construction.
//!
//! # Architecture
//!
//! - [`StageId`] - Names one of the six stage slots
//! - [`Topology`] - A fixed permutation of all six `StageId`s
//! - [`SignalGraph`] - Owns the stages, tracks the last-applied mode, swaps
//!   the active topology before processing a block whose mode differs
//! - [`StereoBlock`] / [`StereoBuffer`] - Borrowed and owned two-channel audio
//!
//! # State machine
//!
//! ```text
//! Uninitialized ──prepare(spec, mode)──▶ Prepared(mode)
//!                                          │   ▲
//!                    process_block(M != mode) │   │ rewire, then process
//!                                          ▼   │
//!                                       Prepared(M)
//! ```
//!
//! Stages keep their internal state (delay contents, reverb tail) across a
//! rewire. There is no crossfade; the switch is abrupt but deterministic.

pub mod buffer;
mod signal_graph;
pub mod topology;

pub use buffer::{StereoBlock, StereoBuffer};
pub use signal_graph::{GraphError, GraphState, SignalGraph};
pub use topology::{StageId, Topology};
