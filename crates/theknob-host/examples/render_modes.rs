//! Render a short test signal through every mode and print what each
//! stage computed.
//!
//! ```text
//! cargo run -p theknob-host --example render_modes -- [config.toml] [knob]
//! RUST_LOG=debug cargo run -p theknob-host --example render_modes
//! ```

use theknob_core::{Mode, StageId};
use theknob_host::{EngineConfig, HostError, KnobProcessor};
use tracing_subscriber::EnvFilter;

const SECONDS: f32 = 2.0;

fn main() -> Result<(), HostError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let mut config = match args.next() {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if let Some(knob) = args.next() {
        config.knob = knob
            .parse()
            .map_err(|_| HostError::InvalidConfig(format!("knob '{knob}' is not a number")))?;
        config.validate()?;
    }

    let total = (SECONDS * config.sample_rate) as usize;
    let input: Vec<f32> = (0..total)
        .map(|i| {
            let t = i as f32 / config.sample_rate;
            let burst = if t < 0.25 { 1.0 } else { 0.0 };
            (2.0 * std::f32::consts::PI * 220.0 * t).sin() * 0.5 * burst
        })
        .collect();

    for mode in Mode::ALL {
        let config = EngineConfig {
            mode,
            ..config.clone()
        };
        let mut processor = KnobProcessor::from_config(&config)?;

        let mut left = input.clone();
        let mut right = input.clone();
        for (l, r) in left
            .chunks_mut(config.block_size)
            .zip(right.chunks_mut(config.block_size))
        {
            processor.process_block(l, r);
        }

        let peak = left.iter().chain(&right).fold(0.0_f32, |acc, s| acc.max(s.abs()));
        let rms = (left.iter().map(|s| s * s).sum::<f32>() / left.len().max(1) as f32).sqrt();
        let tail = left[total / 2..].iter().fold(0.0_f32, |acc, s| acc.max(s.abs()));

        println!("{mode} (knob {}): {}", config.knob, processor.topology());
        println!("  peak {peak:.3}  rms {rms:.3}  tail peak {tail:.4}");
        for id in StageId::ALL {
            let stage = processor.graph().stage(id);
            let readouts: Vec<String> = (0..stage.readout_count())
                .filter_map(|i| stage.readout(i))
                .map(|r| r.to_string())
                .collect();
            println!("  {:<10} {}", stage.name(), readouts.join(", "));
        }
    }

    Ok(())
}
