//! Extreme control and sample-rate tests for the full chain.
//!
//! Verifies that every mode produces finite output at the knob's end stops,
//! beyond them, and at extreme sample rates (8 kHz and 192 kHz).

use theknob_core::{Controls, Mode, ProcessSpec, StereoBuffer};
use theknob_effects::knob_chain;

const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
const LOW_SAMPLE_RATE: f32 = 8000.0;
const HIGH_SAMPLE_RATE: f32 = 192000.0;
const BLOCK: usize = 500;
const BLOCKS: usize = 20;

/// Run `BLOCKS` blocks of an alternating ±0.5 pattern and assert finite output.
fn assert_finite_output(sample_rate: f32, knob: f32, mode: Mode) {
    let label = format!("{mode} knob={knob} sr={sample_rate}");
    let mut chain = knob_chain();
    chain
        .prepare(&ProcessSpec::new(sample_rate, BLOCK), mode)
        .expect("valid spec");

    let mut buffer = StereoBuffer::new(BLOCK);
    for block in 0..BLOCKS {
        for (i, (l, r)) in buffer.left.iter_mut().zip(buffer.right.iter_mut()).enumerate() {
            let input = match (block * BLOCK + i) % 3 {
                0 => 0.5,
                1 => -0.5,
                _ => 0.0,
            };
            *l = input;
            *r = -input;
        }
        chain.process_block(&mut buffer.as_block(), Controls::new(knob, mode));

        for (i, s) in buffer.left.iter().chain(&buffer.right).enumerate() {
            assert!(s.is_finite(), "{label}: non-finite output at sample {i}: {s}");
        }
    }
}

#[test]
fn knob_minimum() {
    for mode in Mode::ALL {
        assert_finite_output(DEFAULT_SAMPLE_RATE, 1.0, mode);
    }
}

#[test]
fn knob_maximum() {
    for mode in Mode::ALL {
        assert_finite_output(DEFAULT_SAMPLE_RATE, 100.0, mode);
    }
}

#[test]
fn knob_out_of_range() {
    // The core does not clamp; the chain must still stay finite slightly past the stops.
    for mode in Mode::ALL {
        assert_finite_output(DEFAULT_SAMPLE_RATE, 0.0, mode);
        assert_finite_output(DEFAULT_SAMPLE_RATE, 110.0, mode);
    }
}

#[test]
fn low_sample_rate() {
    for mode in Mode::ALL {
        assert_finite_output(LOW_SAMPLE_RATE, 1.0, mode);
        assert_finite_output(LOW_SAMPLE_RATE, 100.0, mode);
    }
}

#[test]
fn high_sample_rate() {
    for mode in Mode::ALL {
        assert_finite_output(HIGH_SAMPLE_RATE, 1.0, mode);
        assert_finite_output(HIGH_SAMPLE_RATE, 100.0, mode);
    }
}
