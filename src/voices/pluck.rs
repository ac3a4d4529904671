//! Pluck patch - percussive, quickly-decaying note.
//!
//! Triangle wave, instant attack, quick decay to silence. Works for
//! arpeggios and rhythmic figures; think kalimba or synth harp.

use crate::{
    dsp::{envelope::AdsrEnvelope, filter::FilterSettings, oscillator::{OscillatorParams, Waveform}},
    patch::Patch,
};

pub fn pluck() -> Patch {
    Patch::new("pluck")
        .oscillator(
            OscillatorParams::new(Waveform::Triangle)
                .with_envelope(AdsrEnvelope::new(0.001, 0.15, 0.0, 0.1).with_curves(1.0, 3.0, 2.0)),
        )
        .filter(FilterSettings::lowpass(0.8, 0.0))
}
