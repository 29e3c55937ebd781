//! Compiled-in range tables.
//!
//! Every knob-driven parameter has a `(min, max)` pair. Where the pair
//! differs per mode it is a [`ModeTable`]; otherwise a plain constant.
//! `max < min` is deliberate for the falling curves (EQ Q, delay LPF).
//!
//! | Parameter | Violet | Teal | Crimson |
//! |-----------|--------|------|---------|
//! | Delay time L/R (s) | 0.7 | 0.2 | 1.0 |
//! | Delay feedback max | 0.6 | 0.75 | 0.25 |
//! | Delay wet max | 0.6 | 0.5 | 1.0 |
//! | Reverb freeze max | 0.35 | 0.1 | 0.1 |
//! | Reverb wet max | 0.5 | 0.8 | 1.0 |
//! | Reverb room size max | 0.5 | 0.75 | 0.9 |
//! | Reverb width max | 0.5 | 0.75 | 0.9 |
//! | Distortion gain min (dB) | 0 | 0 | 5 |
//! | Distortion gain max (dB) | 10 | 15 | 10 |

use crate::mode::ModeTable;

// Filter stage

/// High-pass cutoff at the lowest knob position (Hz).
pub const HPF_FREQ_MIN: f32 = 50.0;
/// High-pass cutoff at the highest knob position (Hz).
pub const HPF_FREQ_MAX: f32 = 150.0;

// EQ stage

/// Peak gain factor at the lowest knob position (linear).
pub const EQ_GAIN_MIN: f32 = 1.0;
/// Peak gain factor at the highest knob position (linear).
pub const EQ_GAIN_MAX: f32 = 3.0;
/// Peak Q at the lowest knob position.
pub const EQ_Q_MIN: f32 = 2.0;
/// Peak Q at the highest knob position.
pub const EQ_Q_MAX: f32 = 1.0;

// Delay stage

/// Left delay time per mode (seconds). Not knob-driven.
pub const DELAY_TIME_L: ModeTable<f32> = ModeTable::new([0.7, 0.2, 1.0]);
/// Right delay time per mode (seconds). Not knob-driven.
pub const DELAY_TIME_R: ModeTable<f32> = ModeTable::new([0.7, 0.2, 1.0]);
/// Longest delay any mode asks for (seconds); sizes the delay lines.
pub const DELAY_MAX_TIME: f32 = 2.0;
/// Feedback at the lowest knob position.
pub const DELAY_FEEDBACK_MIN: f32 = 0.0;
/// Feedback at the highest knob position.
pub const DELAY_FEEDBACK_MAX: ModeTable<f32> = ModeTable::new([0.6, 0.75, 0.25]);
/// Wet level at the lowest knob position.
pub const DELAY_WET_LEVEL_MIN: f32 = 0.0;
/// Wet level at the highest knob position.
pub const DELAY_WET_LEVEL_MAX: ModeTable<f32> = ModeTable::new([0.6, 0.5, 1.0]);
/// Pre-delay high-pass cutoff range (Hz).
pub const DELAY_HPF_FREQ_MIN: f32 = 200.0;
/// Pre-delay high-pass cutoff range (Hz).
pub const DELAY_HPF_FREQ_MAX: f32 = 400.0;
/// Pre-delay low-pass cutoff range (Hz). Falls as the knob rises.
pub const DELAY_LPF_FREQ_MIN: f32 = 10000.0;
/// Pre-delay low-pass cutoff range (Hz).
pub const DELAY_LPF_FREQ_MAX: f32 = 3500.0;
/// Damping low-pass inside the feedback path (Hz).
pub const DELAY_DAMPING_FREQ: f32 = 1000.0;

// Reverb stage

/// Freeze amount at the lowest knob position.
pub const REVERB_FREEZE_MIN: f32 = 0.0;
/// Freeze amount at the highest knob position.
pub const REVERB_FREEZE_MAX: ModeTable<f32> = ModeTable::new([0.35, 0.1, 0.1]);
/// Wet level at the highest knob position (lowest is 0).
pub const REVERB_WET_LEVEL_MAX: ModeTable<f32> = ModeTable::new([0.5, 0.8, 1.0]);
/// Room size at the highest knob position (lowest is 0).
pub const REVERB_ROOM_SIZE_MAX: ModeTable<f32> = ModeTable::new([0.5, 0.75, 0.9]);
/// Stereo width at the highest knob position (lowest is 0).
pub const REVERB_WIDTH_MAX: ModeTable<f32> = ModeTable::new([0.5, 0.75, 0.9]);
/// Whether damping rises with the knob (`true`) or falls (`false`).
pub const REVERB_DAMPING_RISES: ModeTable<bool> = ModeTable::new([false, false, true]);
/// Fixed high-pass ahead of the reverb (Hz).
pub const REVERB_HPF_FREQ: f32 = 300.0;
/// Fixed low-pass after the reverb (Hz).
pub const REVERB_LPF_FREQ: f32 = 3500.0;

// Distortion stage

/// Pre-gain at the lowest knob position (dB).
pub const DIST_INPUT_GAIN_MIN: ModeTable<f32> = ModeTable::new([0.0, 0.0, 5.0]);
/// Pre-gain at the highest knob position (dB).
pub const DIST_INPUT_GAIN_MAX: ModeTable<f32> = ModeTable::new([10.0, 15.0, 10.0]);
/// Post-gain as a multiple of the pre-gain (dB/dB). Loudness-matched by ear.
pub const DIST_OUTPUT_GAIN_RATIO: f32 = -0.75;
