//! The Knob Host - the glue between a plugin host and the effect chain
//!
//! - [`SharedControls`] - Lock-free knob and mode written by the control
//!   thread, read once per block by the audio thread
//! - [`KnobProcessor`] - Owns the [`SignalGraph`](theknob_core::SignalGraph),
//!   handles stereo and mono blocks
//! - [`PluginState`] - JSON state blob with a default fallback
//! - [`EngineConfig`] - TOML engine configuration
//!
//! ## Example
//!
//! ```rust
//! use theknob_host::{EngineConfig, KnobProcessor};
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     sample_rate = 44100
//!     block_size = 64
//!     knob = 50.0
//!     mode = "teal"
//! "#)?;
//! let mut processor = KnobProcessor::from_config(&config)?;
//!
//! let mut left = vec![0.1; 64];
//! let mut right = vec![0.1; 64];
//! processor.process_block(&mut left, &mut right);
//! # Ok::<(), theknob_host::HostError>(())
//! ```

pub mod config;
pub mod error;
mod mode_name;
pub mod processor;
pub mod shared;
pub mod state;

pub use config::EngineConfig;
pub use error::HostError;
pub use processor::KnobProcessor;
pub use shared::SharedControls;
pub use state::PluginState;
