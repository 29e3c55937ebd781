//! The six-stage mode router.

#[cfg(not(feature = "std"))]
use alloc::boxed::Box;

use core::fmt;

use crate::mode::Mode;
use crate::stage::{Controls, ProcessSpec, Stage};

use super::buffer::StereoBlock;
use super::topology::{StageId, Topology};

/// Configuration errors reported by [`SignalGraph::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphError {
    /// Sample rate was zero, negative or not finite.
    InvalidSampleRate(f32),
    /// Maximum block size was zero.
    InvalidBlockSize(usize),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSampleRate(sr) => write!(f, "invalid sample rate {sr} Hz"),
            Self::InvalidBlockSize(n) => write!(f, "invalid block size {n}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GraphError {}

/// Lifecycle state of a [`SignalGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphState {
    /// Constructed, not yet prepared. Processing is a precondition violation.
    Uninitialized,
    /// Prepared and wired for `mode`.
    Prepared {
        /// Mode whose topology is active.
        mode: Mode,
    },
}

/// Owns six stages and runs them in the order the active mode dictates.
///
/// # Example
///
/// ```rust
/// use theknob_core::{Controls, Mode, ProcessSpec, SignalGraph, Stage, StereoBlock, StereoBuffer};
///
/// struct Pass(&'static str);
///
/// impl Stage for Pass {
///     fn prepare(&mut self, _spec: &ProcessSpec) {}
///     fn process_block(&mut self, _block: &mut StereoBlock<'_>, _controls: Controls) {}
///     fn reset(&mut self) {}
///     fn name(&self) -> &'static str {
///         self.0
///     }
/// }
///
/// let mut graph = SignalGraph::new([
///     Box::new(Pass("Filter")),
///     Box::new(Pass("EQ")),
///     Box::new(Pass("Special EQ")),
///     Box::new(Pass("Reverb")),
///     Box::new(Pass("Delay")),
///     Box::new(Pass("Distortion")),
/// ]);
/// graph.prepare(&ProcessSpec::new(48000.0, 64), Mode::Violet).unwrap();
///
/// let mut buffer = StereoBuffer::new(64);
/// graph.process_block(&mut buffer.as_block(), Controls::new(50.0, Mode::Teal));
/// assert_eq!(graph.mode(), Mode::Teal);
/// ```
pub struct SignalGraph {
    /// Stage instances, indexed by [`StageId::index`].
    stages: [Box<dyn Stage + Send>; StageId::COUNT],
    topology: &'static Topology,
    last_applied: Mode,
    state: GraphState,
    spec: ProcessSpec,
}

impl SignalGraph {
    /// Mount six stages, given in [`StageId::ALL`] order.
    pub fn new(stages: [Box<dyn Stage + Send>; StageId::COUNT]) -> Self {
        let mode = Mode::default();
        Self {
            stages,
            topology: Topology::for_mode(mode),
            last_applied: mode,
            state: GraphState::Uninitialized,
            spec: ProcessSpec::default(),
        }
    }

    /// Prepare every stage and wire the topology for `mode`.
    ///
    /// May allocate. Calling it again with a new sample rate re-sizes and
    /// clears all stage state.
    pub fn prepare(&mut self, spec: &ProcessSpec, mode: Mode) -> Result<(), GraphError> {
        if !spec.sample_rate.is_finite() || spec.sample_rate <= 0.0 {
            return Err(GraphError::InvalidSampleRate(spec.sample_rate));
        }
        if spec.max_block_size == 0 {
            return Err(GraphError::InvalidBlockSize(spec.max_block_size));
        }

        for stage in &mut self.stages {
            stage.prepare(spec);
        }
        self.spec = *spec;
        self.apply_mode(mode);
        self.state = GraphState::Prepared { mode };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = spec.sample_rate,
            block_size = spec.max_block_size,
            mode = mode.name(),
            "graph_prepare"
        );

        Ok(())
    }

    /// Process one block in place.
    ///
    /// If `controls.mode` differs from the last applied mode the topology is
    /// swapped first, so the change takes effect on this very block. Must
    /// not be called before [`prepare`](Self::prepare); in release builds
    /// an unprepared graph leaves the block untouched.
    ///
    /// With the `tracing` feature a swap emits a `graph_rewire` debug event
    /// from this call. On the audio thread, enable debug level only with a
    /// non-blocking subscriber.
    pub fn process_block(&mut self, block: &mut StereoBlock<'_>, controls: Controls) {
        debug_assert!(self.is_prepared(), "process_block called before prepare");
        if !self.is_prepared() {
            return;
        }

        if controls.mode != self.last_applied {
            self.apply_mode(controls.mode);
        }

        for id in self.topology.iter() {
            self.stages[id.index()].process_block(block, controls);
        }
    }

    /// Clear every stage's state. Topology and mode are unchanged.
    pub fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("graph_reset");
    }

    /// Active stage order.
    pub fn topology(&self) -> &'static Topology {
        self.topology
    }

    /// Mode whose topology is active.
    pub fn mode(&self) -> Mode {
        self.last_applied
    }

    /// Lifecycle state.
    pub fn state(&self) -> GraphState {
        self.state
    }

    /// `true` once [`prepare`](Self::prepare) has succeeded.
    pub fn is_prepared(&self) -> bool {
        matches!(self.state, GraphState::Prepared { .. })
    }

    /// Spec from the last successful prepare.
    pub fn spec(&self) -> ProcessSpec {
        self.spec
    }

    /// The stage mounted in slot `id`.
    pub fn stage(&self, id: StageId) -> &(dyn Stage + Send) {
        &*self.stages[id.index()]
    }

    /// Stage names in processing order.
    pub fn stage_names(&self) -> [&'static str; StageId::COUNT] {
        let order = self.topology.stages();
        core::array::from_fn(|i| self.stages[order[i].index()].name())
    }

    fn apply_mode(&mut self, mode: Mode) {
        #[cfg(feature = "tracing")]
        {
            if mode != self.last_applied {
                tracing::debug!(from = self.last_applied.name(), to = mode.name(), "graph_rewire");
            }
        }

        self.topology = Topology::for_mode(mode);
        self.last_applied = mode;
        if self.is_prepared() {
            self.state = GraphState::Prepared { mode };
        }
    }
}

impl fmt::Debug for SignalGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalGraph")
            .field("topology", self.topology)
            .field("state", &self.state)
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}
