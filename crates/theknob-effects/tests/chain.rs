//! End-to-end tests of the mounted six-stage chain.

use theknob_core::{Controls, Mode, ProcessSpec, SignalGraph, StageId, StereoBuffer};
use theknob_effects::knob_chain;

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK: usize = 256;

fn prepared(mode: Mode) -> SignalGraph {
    let mut chain = knob_chain();
    chain
        .prepare(&ProcessSpec::new(SAMPLE_RATE, BLOCK), mode)
        .expect("valid spec");
    chain
}

fn sine_block(buffer: &mut StereoBuffer, offset: usize) {
    for (i, (l, r)) in buffer.left.iter_mut().zip(buffer.right.iter_mut()).enumerate() {
        let t = (offset + i) as f32 / SAMPLE_RATE;
        *l = (2.0 * std::f32::consts::PI * 220.0 * t).sin() * 0.5;
        *r = *l;
    }
}

fn readout(chain: &SignalGraph, id: StageId, name: &str) -> f32 {
    chain
        .stage(id)
        .readout_by_name(name)
        .unwrap_or_else(|| panic!("{id} has no readout {name}"))
        .value
}

#[test]
fn silence_in_silence_out_at_minimum() {
    let mut chain = prepared(Mode::Violet);
    let mut buffer = StereoBuffer::new(BLOCK);

    chain.process_block(&mut buffer.as_block(), Controls::new(1.0, Mode::Violet));

    assert!(buffer.left.iter().chain(&buffer.right).all(|&s| s == 0.0));

    assert_eq!(readout(&chain, StageId::Filter, "cutoff"), 50.0);
    assert_eq!(readout(&chain, StageId::Eq, "gain"), 1.0);
    assert_eq!(readout(&chain, StageId::Eq, "q"), 2.0);
    assert_eq!(readout(&chain, StageId::Distortion, "pre_gain"), 0.0);
    assert_eq!(readout(&chain, StageId::Distortion, "post_gain"), 0.0);
    assert_eq!(readout(&chain, StageId::Delay, "feedback"), 0.0);
    assert_eq!(readout(&chain, StageId::Delay, "wet_level"), 0.0);
    assert_eq!(readout(&chain, StageId::Reverb, "wet_level"), 0.0);
    assert_eq!(readout(&chain, StageId::Reverb, "room_size"), 0.0);
}

#[test]
fn silence_stays_silent_in_every_mode() {
    for mode in Mode::ALL {
        let mut chain = prepared(mode);
        let mut buffer = StereoBuffer::new(BLOCK);
        for _ in 0..50 {
            chain.process_block(&mut buffer.as_block(), Controls::new(100.0, mode));
            assert_eq!(buffer.peak(), 0.0, "{mode}");
        }
    }
}

#[test]
fn mode_switch_mid_stream() {
    let mut chain = prepared(Mode::Violet);
    let mut buffer = StereoBuffer::new(BLOCK);
    let schedule = [Mode::Violet, Mode::Teal, Mode::Teal, Mode::Crimson, Mode::Violet, Mode::Crimson];

    for (block, &mode) in schedule.iter().enumerate() {
        sine_block(&mut buffer, block * BLOCK);
        chain.process_block(&mut buffer.as_block(), Controls::new(70.0, mode));

        assert_eq!(chain.mode(), mode);
        assert_eq!(chain.topology().mode(), mode);
        assert!(
            buffer.left.iter().chain(&buffer.right).all(|s| s.is_finite()),
            "non-finite output after switching to {mode}"
        );
    }
    assert_eq!(
        chain.stage_names(),
        ["Filter", "EQ", "Delay", "Reverb", "Distortion", "Special EQ"]
    );
}

#[test]
fn tails_survive_a_rewire() {
    let mut chain = prepared(Mode::Teal);
    let mut buffer = StereoBuffer::new(BLOCK);
    sine_block(&mut buffer, 0);
    chain.process_block(&mut buffer.as_block(), Controls::new(100.0, Mode::Teal));

    // Delay and reverb still hold the sine after the switch.
    let mut energy = 0.0;
    for _ in 0..200 {
        buffer.clear();
        chain.process_block(&mut buffer.as_block(), Controls::new(100.0, Mode::Crimson));
        energy += buffer.left.iter().map(|s| s * s).sum::<f32>();
    }
    assert!(energy > 0.0);
}

#[test]
fn reset_clears_every_stage() {
    let mut chain = prepared(Mode::Crimson);
    let mut buffer = StereoBuffer::new(BLOCK);
    sine_block(&mut buffer, 0);
    chain.process_block(&mut buffer.as_block(), Controls::new(100.0, Mode::Crimson));

    chain.reset();
    assert_eq!(chain.mode(), Mode::Crimson);

    for _ in 0..100 {
        buffer.clear();
        chain.process_block(&mut buffer.as_block(), Controls::new(100.0, Mode::Crimson));
        assert_eq!(buffer.peak(), 0.0);
    }
}

#[test]
fn knob_changes_the_sound() {
    let render = |knob: f32| {
        let mut chain = prepared(Mode::Teal);
        let mut buffer = StereoBuffer::new(BLOCK);
        let mut out = Vec::new();
        for block in 0..8 {
            sine_block(&mut buffer, block * BLOCK);
            chain.process_block(&mut buffer.as_block(), Controls::new(knob, Mode::Teal));
            out.extend_from_slice(&buffer.left);
        }
        out
    };

    let quiet = render(1.0);
    let loud = render(100.0);
    let diff: f32 = quiet.iter().zip(&loud).map(|(a, b)| (a - b).abs()).sum();
    assert!(diff > 1.0, "knob had no audible effect: {diff}");
}

#[test]
fn prepare_twice_resizes() {
    let mut chain = prepared(Mode::Violet);
    let mut buffer = StereoBuffer::new(BLOCK);
    sine_block(&mut buffer, 0);
    chain.process_block(&mut buffer.as_block(), Controls::new(90.0, Mode::Violet));

    chain
        .prepare(&ProcessSpec::new(96000.0, 1024), Mode::Teal)
        .expect("valid spec");
    assert_eq!(chain.spec().sample_rate, 96000.0);
    assert_eq!(chain.mode(), Mode::Teal);

    let mut buffer = StereoBuffer::new(1024);
    chain.process_block(&mut buffer.as_block(), Controls::new(90.0, Mode::Teal));
    assert_eq!(buffer.peak(), 0.0);
}

#[test]
fn impulse_tail_never_goes_subnormal() {
    let controls = Controls::new(100.0, Mode::Teal);
    let mut chain = prepared(Mode::Teal);
    let mut buffer = StereoBuffer::new(BLOCK);
    buffer.left[0] = 1.0;
    buffer.right[0] = 1.0;
    chain.process_block(&mut buffer.as_block(), controls);

    // ~4 s of silence covers many delay echoes.
    for block in 0..750 {
        buffer.clear();
        chain.process_block(&mut buffer.as_block(), controls);
        assert!(
            buffer.left.iter().chain(&buffer.right).all(|s| !s.is_subnormal()),
            "subnormal output in block {block}"
        );
    }
}
