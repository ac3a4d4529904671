//! Hard-sync lead.
//!
//! The sawtooth is reset by a sync accumulator running a fifth above the
//! note. Each reset chops the ramp mid-cycle, which adds a strong formant
//! around the sync pitch: the nasal, tearing lead of early-80s synths.
//! A sine an octave down keeps the pitch anchored.

use crate::{
    dsp::{envelope::AdsrEnvelope, filter::FilterSettings, oscillator::{OscillatorParams, Waveform}},
    patch::Patch,
};

pub fn sync_lead() -> Patch {
    let amp = AdsrEnvelope::new(0.005, 0.2, 0.7, 0.25);

    Patch::new("sync lead")
        .oscillator(
            OscillatorParams::new(Waveform::Sawtooth)
                .with_sync(1900.0)
                .with_envelope(amp)
                .with_volume(0.6),
        )
        .oscillator(
            OscillatorParams::new(Waveform::Sine)
                .with_detune(-1200.0)
                .with_envelope(amp)
                .with_volume(0.4),
        )
        .filter(FilterSettings::lowpass(0.6, 0.35).with_envelope(AdsrEnvelope::new(0.0, 0.3, 0.2, 0.3), 0.8))
}
