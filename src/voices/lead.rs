//! Lead patch.
//!
//! A bright, cutting lead from two slightly detuned sawtooth waves. The
//! sawtooth carries every harmonic, so it cuts through a mix; the detune
//! makes the pair beat slowly against each other for width.
//!
//! # Variations
//!
//! - More detune (15+ cents) = "supersaw" smear
//! - Lower cutoff with more envelope = wah-like attack
//! - Zero sustain = plucky lead

use crate::{
    dsp::{envelope::AdsrEnvelope, filter::FilterSettings, oscillator::{OscillatorParams, Waveform}},
    patch::Patch,
};

pub fn lead() -> Patch {
    let amp = AdsrEnvelope::new(0.01, 0.1, 0.6, 0.2);

    Patch::new("lead")
        .oscillator(OscillatorParams::new(Waveform::Sawtooth).with_envelope(amp).with_volume(0.5))
        .oscillator(
            OscillatorParams::new(Waveform::Sawtooth)
                .with_detune(7.0)
                .with_envelope(amp)
                .with_volume(0.5),
        )
        .filter(FilterSettings::lowpass(0.7, 0.2))
}
