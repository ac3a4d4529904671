use std::{f64::consts::TAU, fmt, str::FromStr};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::envelope::AdsrEnvelope, error::SynthError, synth::note::Note};

/*
Phase-Accumulating Oscillator
=============================

Every voice keeps a cycle position in [0, 1) per oscillator slot. Each sample
we read the waveform at that position and then step forward by

    increment = frequency / sample_rate

wrapping back into [0, 1) when we run past the end of the cycle. The position
is stored back into the voice at the end of the block, so the next block picks
up exactly where this one stopped.

Waveforms over one cycle (position 0 → 1):

  sine       sin(2π·pos)
  triangle   -1 → +1 over the first half, +1 → -1 over the second
  sawtooth   -1 + 2·pos
  pulse      -1 while pos < duty, +1 after
  noise      uniform random in [-1, 1], ignores the position

Hard Sync
---------
With sync enabled a second, silent accumulator runs at the sync frequency
(the note's pitch shifted by `sync_detune` cents). Whenever it wraps, the
audible oscillator is yanked back to position 0 no matter where it was.
Set the sync pitch above the main pitch and the cut-off cycles produce the
classic tearing sync sweep.
*/

/// Oscillator waveform kind.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Sawtooth,
    Pulse,
    Noise,
}

impl Waveform {
    pub const ALL: [Waveform; 5] = [
        Waveform::Sine,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Pulse,
        Waveform::Noise,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Pulse => "pulse",
            Waveform::Noise => "noise",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::ALL
            .into_iter()
            .find(|w| w.name() == s)
            .ok_or_else(|| SynthError::UnknownWaveform(s.to_owned()))
    }
}

impl TryFrom<String> for Waveform {
    type Error = SynthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Waveform> for String {
    fn from(value: Waveform) -> Self {
        value.name().to_owned()
    }
}

/// Per-slot oscillator configuration, shared by every voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatorParams {
    pub waveform: Waveform,
    /// Fraction of the cycle spent low, pulse wave only.
    pub duty: f32,
    /// Detune in cents (100 cents = 1 semitone).
    pub detune: f64,
    /// Amplitude envelope for this slot.
    pub envelope: AdsrEnvelope,
    /// Mixing volume.
    pub volume: f32,
    /// Hard-sync this oscillator to a second accumulator.
    pub sync: bool,
    /// Detune of the sync accumulator, in cents.
    pub sync_detune: f64,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            duty: 0.5,
            detune: 0.0,
            envelope: AdsrEnvelope::default(),
            volume: 1.0,
            sync: false,
            sync_detune: 0.0,
        }
    }
}

impl OscillatorParams {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            ..Self::default()
        }
    }

    pub fn with_envelope(mut self, envelope: AdsrEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn with_detune(mut self, cents: f64) -> Self {
        self.detune = cents;
        self
    }

    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_duty(mut self, duty: f32) -> Self {
        self.duty = duty;
        self
    }

    /// Enable hard sync against an accumulator detuned by `cents`.
    pub fn with_sync(mut self, cents: f64) -> Self {
        self.sync = true;
        self.sync_detune = cents;
        self
    }
}

/// Per-voice, per-slot oscillator state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OscillatorState {
    /// Position within the current cycle, in [0, 1).
    pub cycle_pos: f64,
    /// Position of the sync accumulator, in [0, 1).
    pub sync_cycle_pos: f64,
    /// Envelope level snapshotted at the last note-on.
    pub on_amp: f32,
    /// Envelope level snapshotted at the last note-off.
    pub off_amp: f32,
}

/// Random source for the noise waveform.
///
/// Playback seeds it from the OS; tests seed it explicitly to get the same
/// noise every run.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: Pcg32,
}

impl NoiseSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Uniform sample in [-1, 1].
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        1.0 - 2.0 * self.rng.random::<f32>()
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Fill `out` with raw waveform samples for one voice and advance its phase.
pub fn generate(
    out: &mut [f32],
    params: &OscillatorParams,
    state: &mut OscillatorState,
    note: Note,
    sample_rate: f32,
    noise: &mut NoiseSource,
) {
    let sample_rate = sample_rate as f64;
    let delta = note.freq(params.detune) / sample_rate;
    let sync_delta = note.freq(params.sync_detune) / sample_rate;
    let duty = params.duty as f64;

    let mut pos = state.cycle_pos;
    let mut sync_pos = state.sync_cycle_pos;

    for sample in out.iter_mut() {
        *sample = match params.waveform {
            Waveform::Sine => (TAU * pos).sin() as f32,
            Waveform::Triangle => {
                if pos < 0.5 {
                    (4.0 * pos - 1.0) as f32
                } else {
                    (1.0 - 4.0 * (pos - 0.5)) as f32
                }
            }
            Waveform::Sawtooth => (-1.0 + 2.0 * pos) as f32,
            Waveform::Pulse => {
                if pos < duty {
                    -1.0
                } else {
                    1.0
                }
            }
            Waveform::Noise => noise.next_sample(),
        };

        pos += delta;
        if pos >= 1.0 {
            pos = pos.fract();
        }

        if params.sync {
            sync_pos += sync_delta;
            if sync_pos >= 1.0 {
                sync_pos = sync_pos.fract();
                pos = 0.0;
            }
        }
    }

    state.cycle_pos = pos;
    state.sync_cycle_pos = sync_pos;
}
