//! Pad patch - sustained, atmospheric texture.
//!
//! # How It Works
//!
//! 1. Two sawtooths detuned in opposite directions for width and movement
//! 2. A quiet triangle underneath to round off the body
//! 3. Slow attack (300ms) and long release (800ms) so chords swell and fade
//! 4. A slow filter envelope lets the brightness bloom after the attack

use crate::{
    dsp::{envelope::AdsrEnvelope, filter::FilterSettings, oscillator::{OscillatorParams, Waveform}},
    patch::Patch,
};

pub fn pad() -> Patch {
    let amp = AdsrEnvelope::new(0.3, 0.1, 0.8, 0.8);

    Patch::new("pad")
        .oscillator(
            OscillatorParams::new(Waveform::Sawtooth)
                .with_detune(-8.0)
                .with_envelope(amp)
                .with_volume(0.35),
        )
        .oscillator(
            OscillatorParams::new(Waveform::Sawtooth)
                .with_detune(8.0)
                .with_envelope(amp)
                .with_volume(0.35),
        )
        .oscillator(OscillatorParams::new(Waveform::Triangle).with_envelope(amp).with_volume(0.3))
        .filter(FilterSettings::lowpass(0.45, 0.1).with_envelope(AdsrEnvelope::new(0.6, 0.4, 0.5, 0.8), 0.6))
}
