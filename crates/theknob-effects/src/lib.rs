//! The Knob Effects - the six stages of the chain
//!
//! Every stage implements [`theknob_core::Stage`] and recomputes its
//! coefficients from the knob and mode at the top of each block:
//!
//! - [`HighPassFilter`] - Knob-swept input high-pass
//! - [`ParametricEq`] - Three peaking bands sharing one gain and Q
//! - [`SpecialEq`] - Fixed per-mode voicing
//! - [`Reverb`] - [`Freeverb`] between fixed band-limiting filters
//! - [`Delay`] - Band-passed [`FeedbackDelay`] with mode-fixed times
//! - [`Distortion`] - Pre-gain, [`WaveShape`], compensating post-gain
//!
//! [`knob_chain`] mounts all six into a [`SignalGraph`].
//!
//! ## Example
//!
//! ```rust
//! use theknob_core::{Controls, Mode, ProcessSpec, StereoBuffer};
//!
//! let mut chain = theknob_effects::knob_chain();
//! chain.prepare(&ProcessSpec::new(48000.0, 256), Mode::Violet).unwrap();
//!
//! let mut buffer = StereoBuffer::new(256);
//! buffer.left[0] = 1.0;
//! chain.process_block(&mut buffer.as_block(), Controls::new(40.0, Mode::Crimson));
//! assert_eq!(chain.stage_names()[2], "Delay");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod chain;
pub mod delay;
pub mod distortion;
pub mod filter;
pub mod freeverb;
pub mod parametric_eq;
pub mod reverb;
pub mod special_eq;

// Re-export main types at crate root
pub use chain::{knob_chain, new_stage};
pub use delay::{Delay, FeedbackDelay};
pub use distortion::{Distortion, WaveShape, post_gain_db};
pub use filter::HighPassFilter;
pub use freeverb::{Freeverb, FreeverbParams};
pub use parametric_eq::ParametricEq;
pub use reverb::{Reverb, reverb_params};
pub use special_eq::{Band, BandShape, SpecialEq, VOICINGS};

pub use theknob_core::SignalGraph;
