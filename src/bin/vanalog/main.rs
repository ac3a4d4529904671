//! vanalog - plays a looping arpeggio through the default audio device
//!
//! Run with: cargo run -- [preset] [seconds]
//! Presets: bass, lead, pad, pluck, sync_lead (default)

mod sequencer;

use std::{thread, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sequencer::Sequencer;
use vanalog::{synth::shared::SharedSynth, voices, Note, VAnalog, MAX_BLOCK_SIZE};

const ARPEGGIO: [&str; 8] = ["A2", "E3", "A3", "C4", "E4", "C4", "A3", "E3"];

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let preset = args.next().unwrap_or_else(|| "sync_lead".to_owned());
    let seconds: u64 = args
        .next()
        .map(|s| s.parse())
        .transpose()
        .wrap_err("duration must be a whole number of seconds")?
        .unwrap_or(8);

    let patch = voices::all()
        .into_iter()
        .find(|p| p.name.replace(' ', "_") == preset)
        .ok_or_else(|| eyre!("unknown preset {preset:?}"))?;
    patch.validate()?;

    let steps = ARPEGGIO
        .iter()
        .map(|name| name.parse::<Note>())
        .collect::<Result<Vec<_>, _>>()?;

    // Set up audio
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;
    info!(preset = %patch.name, sample_rate, channels, seconds, "starting playback");

    // Shared so the main thread can inspect the engine while it plays
    let synth = SharedSynth::new(VAnalog::from_patch(&patch));
    let mut sequencer = Sequencer::new(steps, 112.0, 4, 0.6, sample_rate as f64);
    let mut mono = vec![0.0f32; MAX_BLOCK_SIZE];

    let audio_synth = synth.clone();
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            for frame_chunk in data.chunks_mut(MAX_BLOCK_SIZE * channels) {
                let frames = frame_chunk.len() / channels;
                let rendered = audio_synth.with(|synth| sequencer.render(synth, &mut mono[..frames]));

                let block = &mut mono[..frames];
                if let Err(err) = rendered {
                    error!(%err, "render failed");
                    block.fill(0.0);
                }

                // Copy to output (mono to all channels)
                for (frame, &s) in frame_chunk.chunks_mut(channels).zip(block.iter()) {
                    frame.fill(s);
                }
            }
        },
        |err| error!(%err, "audio stream error"),
        None,
    )?;

    stream.play()?;
    thread::sleep(Duration::from_secs(seconds));

    let sounding = synth.with(|synth| synth.active_notes().len());
    info!(sounding, "stopping");
    Ok(())
}
