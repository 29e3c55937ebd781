//! The Knob Core - parameter mapping, DSP primitives and mode routing
//!
//! This crate holds everything a knob-driven, mode-selectable effect chain
//! needs below the concrete effects: the deterministic knob → coefficient
//! mapping, the filter and delay building blocks, the [`Stage`] capability
//! trait, and the [`SignalGraph`] that orders six stages per [`Mode`].
//!
//! # Core Abstractions
//!
//! ## Parameter Mapping
//!
//! - [`map_range`] / [`normalize`] - Affine knob interpolation
//! - [`Mode`] - The three closed presets (Violet, Teal, Crimson)
//! - [`ModeTable`] - Immutable per-mode constant data
//! - [`ranges`] - Every compiled-in range table
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR section (RBJ cookbook + first-order bilinear)
//! - [`StereoBiquad`] - One coefficient set, independent state per channel
//! - [`CombFilter`] - Damped feedback comb for Freeverb
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//!
//! ## Delay Lines
//!
//! - [`DelayLine`] - Fixed-capacity circular buffer with an oldest-slot cursor
//!
//! ## Stage Routing
//!
//! - [`Stage`] - Object-safe processing unit (prepare / process / reset / name)
//! - [`SignalGraph`] - Owns six stages, swaps topologies on mode change
//! - [`Topology`] - The fixed stage permutation for one mode
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded audio applications.
//! Disable the default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! theknob-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use theknob_core::{Mode, map_range, ranges};
//!
//! let feedback = map_range(50.0, 0.0, ranges::DELAY_FEEDBACK_MAX[Mode::Teal]);
//! assert!(feedback > 0.0 && feedback < 0.75);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: All buffers are sized in `prepare`, never in `process_block`
//! - **No dependencies on std**: Pure `no_std` with `libm` for math
//! - **Garbage in, garbage out**: Knob values are never clamped inside the core

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod biquad;
pub mod comb;
pub mod delay;
pub mod graph;
pub mod mapping;
pub mod math;
pub mod mode;
pub mod param;
pub mod ranges;
pub mod readout;
pub mod stage;

// Re-export main types at crate root
pub use allpass::AllpassFilter;
pub use biquad::{
    Biquad, Coefficients, StereoBiquad, first_order_highpass_coefficients,
    first_order_lowpass_coefficients, highpass_coefficients, lowpass_coefficients,
    peak_coefficients,
};
pub use comb::CombFilter;
pub use delay::DelayLine;
pub use graph::{GraphError, GraphState, SignalGraph, StageId, StereoBlock, StereoBuffer, Topology};
pub use mapping::{KNOB_DEFAULT, KNOB_MAX, KNOB_MIN, map_range, normalize};
pub use math::{clamp_frequency, db_to_linear, flush_denormal, seconds_to_samples};
pub use mode::{InvalidMode, Mode, ModeTable};
pub use param::LinearSmoothedParam;
pub use readout::{ParamUnit, Readout};
pub use stage::{Controls, ProcessSpec, Stage};
