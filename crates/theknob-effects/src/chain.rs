//! Mounting the six stages into a graph.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use theknob_core::{SignalGraph, Stage, StageId};

use crate::{Delay, Distortion, HighPassFilter, ParametricEq, Reverb, SpecialEq};

/// A fresh, unprepared stage for slot `id`.
pub fn new_stage(id: StageId) -> Box<dyn Stage + Send> {
    match id {
        StageId::Filter => Box::new(HighPassFilter::new()),
        StageId::Eq => Box::new(ParametricEq::new()),
        StageId::SpecialEq => Box::new(SpecialEq::new()),
        StageId::Reverb => Box::new(Reverb::new()),
        StageId::Delay => Box::new(Delay::new()),
        StageId::Distortion => Box::new(Distortion::new()),
    }
}

/// The full effect chain, unprepared.
pub fn knob_chain() -> SignalGraph {
    SignalGraph::new(StageId::ALL.map(new_stage))
}
