//! Bass patch.
//!
//! A classic subtractive bass: a pulse wave with a sine an octave below,
//! filtered down hard and opened briefly by the filter envelope.
//!
//! # How It Works
//!
//! 1. Pulse oscillator (duty 0.5) gives hollow, odd-harmonic content
//! 2. Sine one octave down adds weight without extra buzz
//! 3. Low base cutoff keeps it deep and warm
//! 4. Short filter envelope adds a pluck of brightness on every note
//!
//! # Variations
//!
//! - Higher cutoff = more aggressive, "acid" bass
//! - More resonance = squelchier envelope sweep
//! - Sawtooth instead of pulse = brighter, more present bass

use crate::{
    dsp::{envelope::AdsrEnvelope, filter::FilterSettings, oscillator::{OscillatorParams, Waveform}},
    patch::Patch,
};

pub fn bass() -> Patch {
    let amp = AdsrEnvelope::new(0.005, 0.1, 0.7, 0.15);

    Patch::new("bass")
        .oscillator(OscillatorParams::new(Waveform::Pulse).with_envelope(amp).with_volume(0.6))
        .oscillator(
            OscillatorParams::new(Waveform::Sine)
                .with_detune(-1200.0)
                .with_envelope(amp)
                .with_volume(0.5),
        )
        .filter(FilterSettings::lowpass(0.35, 0.4).with_envelope(AdsrEnvelope::new(0.0, 0.12, 0.0, 0.1), 0.5))
}
