//! Property-based tests for theknob-core.
//!
//! Knob mapping laws, delay line ordering, filter stability and topology
//! invariants, using proptest for randomized inputs.

use proptest::prelude::*;
use theknob_core::{
    Biquad, DelayLine, KNOB_MAX, KNOB_MIN, Mode, StageId, Topology, first_order_highpass_coefficients,
    first_order_lowpass_coefficients, highpass_coefficients, lowpass_coefficients, map_range,
    normalize, peak_coefficients, ranges,
};

fn any_mode() -> impl Strategy<Value = Mode> {
    prop::sample::select(Mode::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Mapping is monotonic in the knob for rising and falling ranges.
    #[test]
    fn map_range_monotonic(
        a in KNOB_MIN..=KNOB_MAX,
        b in KNOB_MIN..=KNOB_MAX,
        lo in -100.0f32..100.0,
        span in 0.0f32..1000.0,
    ) {
        let (k1, k2) = if a <= b { (a, b) } else { (b, a) };
        let hi = lo + span;
        let tol = 1e-3 * (1.0 + lo.abs() + hi.abs());

        prop_assert!(map_range(k1, lo, hi) <= map_range(k2, lo, hi) + tol);
        prop_assert!(map_range(k1, hi, lo) + tol >= map_range(k2, hi, lo));
    }

    /// Endpoints land exactly on the range bounds.
    #[test]
    fn map_range_endpoints(lo in -1.0e4f32..1.0e4, hi in -1.0e4f32..1.0e4) {
        prop_assert_eq!(map_range(KNOB_MIN, lo, hi), lo);
        prop_assert_eq!(map_range(KNOB_MAX, lo, hi), hi);
    }

    /// Every mode's tables map into their own [min, max] over the knob range.
    #[test]
    fn mode_tables_stay_in_range(knob in KNOB_MIN..=KNOB_MAX, mode in any_mode()) {
        let fb = map_range(knob, ranges::DELAY_FEEDBACK_MIN, ranges::DELAY_FEEDBACK_MAX[mode]);
        prop_assert!((0.0..=ranges::DELAY_FEEDBACK_MAX[mode] + 1e-6).contains(&fb));

        let gain = map_range(knob, ranges::DIST_INPUT_GAIN_MIN[mode], ranges::DIST_INPUT_GAIN_MAX[mode]);
        prop_assert!(gain >= ranges::DIST_INPUT_GAIN_MIN[mode] - 1e-4);
        prop_assert!(gain <= ranges::DIST_INPUT_GAIN_MAX[mode] + 1e-4);

        let n = normalize(knob);
        prop_assert!((-1e-6..=1.0 + 1e-6).contains(&n));
    }

    /// Pushing N values into a line of capacity C >= N reads back newest first.
    #[test]
    fn delay_line_round_trip(values in prop::collection::vec(-1.0f32..1.0, 1..256), extra in 0usize..64) {
        let mut line = DelayLine::new(values.len() + extra);
        for &v in &values {
            line.push(v);
        }
        for (d, &expected) in values.iter().rev().enumerate() {
            prop_assert_eq!(line.get(d), expected);
        }
    }

    /// Every filter design the stages use stays finite on bounded input.
    #[test]
    fn filter_designs_are_stable(
        freq in 20.0f32..24000.0,
        q in 0.5f32..4.0,
        gain in 0.25f32..4.0,
        variant in 0usize..5,
        sample_rate in prop::sample::select(vec![22050.0f32, 44100.0, 48000.0, 96000.0]),
        input in prop::array::uniform32(-1.0f32..=1.0),
    ) {
        let coeffs = match variant {
            0 => lowpass_coefficients(freq, q, sample_rate),
            1 => highpass_coefficients(freq, q, sample_rate),
            2 => peak_coefficients(freq, q, gain, sample_rate),
            3 => first_order_lowpass_coefficients(freq, sample_rate),
            _ => first_order_highpass_coefficients(freq, sample_rate),
        };
        let mut biquad = Biquad::new();
        biquad.set_coefficients(coeffs);

        for _ in 0..32 {
            for &sample in &input {
                let out = biquad.process(sample);
                prop_assert!(out.is_finite() && out.abs() < 100.0, "variant {} freq {} got {}", variant, freq, out);
            }
        }
    }

    /// Any sequence of modes yields a permutation of the six stages.
    #[test]
    fn topology_is_always_a_permutation(mode in any_mode()) {
        let topo = Topology::for_mode(mode);
        let mut seen = [0usize; StageId::COUNT];
        for id in topo.iter() {
            seen[id.index()] += 1;
        }
        prop_assert_eq!(seen, [1; StageId::COUNT]);
        prop_assert_eq!(topo.stages()[0], StageId::Filter);
        prop_assert_eq!(topo.stages()[StageId::COUNT - 1], StageId::SpecialEq);
    }
}
