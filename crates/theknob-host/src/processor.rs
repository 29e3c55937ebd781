//! The engine as a host sees it.

use theknob_core::{Mode, ProcessSpec, SignalGraph, StageId, StereoBlock, Topology};
use theknob_effects::knob_chain;

use crate::config::EngineConfig;
use crate::error::HostError;
use crate::shared::SharedControls;
use crate::state::PluginState;

/// Owns the six-stage graph and reads [`SharedControls`] once per block.
///
/// # Example
///
/// ```rust
/// use theknob_core::{Mode, ProcessSpec};
/// use theknob_host::KnobProcessor;
///
/// let mut processor = KnobProcessor::new();
/// processor.prepare(ProcessSpec::new(48000.0, 128)).unwrap();
///
/// let ui = processor.controls().clone();
/// ui.set_knob(80.0);
/// ui.set_mode(Mode::Crimson);
///
/// let mut left = vec![0.0; 128];
/// let mut right = vec![0.0; 128];
/// processor.process_block(&mut left, &mut right);
/// assert_eq!(processor.mode(), Mode::Crimson);
/// ```
#[derive(Debug)]
pub struct KnobProcessor {
    graph: SignalGraph,
    controls: SharedControls,
    /// Scratch right channel for mono hosts.
    mono_scratch: Vec<f32>,
}

impl KnobProcessor {
    /// Create an unprepared processor with default controls.
    pub fn new() -> Self {
        Self::with_controls(SharedControls::default())
    }

    /// Create an unprepared processor reading `controls`.
    pub fn with_controls(controls: SharedControls) -> Self {
        Self {
            graph: knob_chain(),
            controls,
            mono_scratch: Vec::new(),
        }
    }

    /// Create and prepare a processor from a validated config.
    pub fn from_config(config: &EngineConfig) -> Result<Self, HostError> {
        config.validate()?;
        let mut processor =
            Self::with_controls(SharedControls::new(config.knob, config.mode));
        processor.prepare(config.process_spec())?;
        Ok(processor)
    }

    /// Size every buffer for `spec` and wire the current mode.
    ///
    /// Allocates; never call from the audio thread.
    pub fn prepare(&mut self, spec: ProcessSpec) -> Result<(), HostError> {
        let mode = self.controls.mode();
        self.graph.prepare(&spec, mode)?;
        self.mono_scratch = vec![0.0; spec.max_block_size];

        tracing::info!(
            sample_rate = spec.sample_rate,
            block_size = spec.max_block_size,
            mode = mode.name(),
            "processor prepared"
        );
        Ok(())
    }

    /// Process one stereo block in place.
    pub fn process_block(&mut self, left: &mut [f32], right: &mut [f32]) {
        let controls = self.controls.snapshot();
        self.graph.process_block(&mut StereoBlock::new(left, right), controls);
    }

    /// Process a mono block in place.
    ///
    /// The right channel is a copy of the input and is discarded afterwards.
    /// Blocks longer than the prepared size are processed in pieces.
    pub fn process_mono(&mut self, samples: &mut [f32]) {
        debug_assert!(self.is_prepared(), "process_mono called before prepare");
        let chunk_len = self.mono_scratch.len();
        if chunk_len == 0 {
            return;
        }
        let controls = self.controls.snapshot();
        for chunk in samples.chunks_mut(chunk_len) {
            let right = &mut self.mono_scratch[..chunk.len()];
            right.copy_from_slice(chunk);
            self.graph.process_block(&mut StereoBlock::new(chunk, right), controls);
        }
    }

    /// Clear delay lines, reverb tails and filter memory.
    pub fn reset(&mut self) {
        self.graph.reset();
    }

    /// The shared controls this processor reads.
    pub fn controls(&self) -> &SharedControls {
        &self.controls
    }

    /// Mode whose topology is active.
    pub fn mode(&self) -> Mode {
        self.graph.mode()
    }

    /// Active stage order.
    pub fn topology(&self) -> &'static Topology {
        self.graph.topology()
    }

    /// Stage names in processing order.
    pub fn stage_names(&self) -> [&'static str; StageId::COUNT] {
        self.graph.stage_names()
    }

    /// `true` once [`prepare`](Self::prepare) has succeeded.
    pub fn is_prepared(&self) -> bool {
        self.graph.is_prepared()
    }

    /// The underlying graph, for readouts and diagnostics.
    pub fn graph(&self) -> &SignalGraph {
        &self.graph
    }

    /// Encode the current controls for the host session.
    pub fn save_state(&self) -> Result<Vec<u8>, HostError> {
        self.controls.state().save()
    }

    /// Restore controls from a host blob; bad blobs restore defaults.
    pub fn restore_state(&self, bytes: &[u8]) -> PluginState {
        let state = PluginState::restore(bytes);
        self.controls.apply_state(&state);
        state
    }
}

impl Default for KnobProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared() -> KnobProcessor {
        let mut processor = KnobProcessor::new();
        processor.prepare(ProcessSpec::new(48000.0, 64)).unwrap();
        processor
    }

    #[test]
    fn rejects_bad_spec() {
        let mut processor = KnobProcessor::new();
        let err = processor.prepare(ProcessSpec::new(48000.0, 0)).unwrap_err();
        assert!(matches!(err, HostError::Graph(_)));
        assert!(!processor.is_prepared());
    }

    #[test]
    fn controls_reach_the_graph() {
        let mut processor = prepared();
        processor.controls().set_mode(Mode::Teal);

        let mut left = [0.0; 64];
        let mut right = [0.0; 64];
        processor.process_block(&mut left, &mut right);

        assert_eq!(processor.mode(), Mode::Teal);
        assert_eq!(processor.topology(), Topology::for_mode(Mode::Teal));
        assert_eq!(processor.stage_names()[1], "EQ");
    }

    #[test]
    fn prepare_uses_current_mode() {
        let mut processor = KnobProcessor::with_controls(SharedControls::new(10.0, Mode::Crimson));
        processor.prepare(ProcessSpec::default()).unwrap();
        assert_eq!(processor.mode(), Mode::Crimson);
    }

    #[test]
    fn mono_matches_left_of_dual_mono() {
        let signal: Vec<f32> = (0..200).map(|i| ((i as f32) * 0.05).sin() * 0.4).collect();

        let mut stereo = prepared();
        stereo.controls().set_knob(70.0);
        let mut left = signal.clone();
        let mut right = signal.clone();
        for (l, r) in left.chunks_mut(64).zip(right.chunks_mut(64)) {
            stereo.process_block(l, r);
        }

        let mut mono = prepared();
        mono.controls().set_knob(70.0);
        let mut samples = signal;
        mono.process_mono(&mut samples);

        for (a, b) in samples.iter().zip(&left) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn state_through_processor() {
        let processor = prepared();
        processor.controls().set_knob(55.0);
        processor.controls().set_mode(Mode::Crimson);
        let blob = processor.save_state().unwrap();

        let other = prepared();
        let restored = other.restore_state(&blob);
        assert_eq!(restored.knob, 55.0);
        assert_eq!(other.controls().mode(), Mode::Crimson);

        other.restore_state(b"not json");
        assert_eq!(other.controls().knob(), 1.0);
        assert_eq!(other.controls().mode(), Mode::Violet);
    }

    #[test]
    fn from_config_prepares() {
        let config = EngineConfig {
            knob: 20.0,
            mode: Mode::Teal,
            ..EngineConfig::default()
        };
        let processor = KnobProcessor::from_config(&config).unwrap();
        assert!(processor.is_prepared());
        assert_eq!(processor.mode(), Mode::Teal);
        assert_eq!(processor.controls().knob(), 20.0);
    }
}
