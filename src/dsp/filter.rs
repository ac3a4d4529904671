#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::envelope::AdsrEnvelope, error::SynthError};

/*
Resonant 2-Pole Low-Pass
========================

Each voice runs its own copy of a small recursive filter: two state values,
coupled so the second one feeds back into the first.

    v0 = feedback·v0 − c·v1 + c·x
    v1 = feedback·v1 + c·v0
    y  = v1

Parameters live on a normalized [0, 1] scale and are mapped to coefficients
on an octave grid (every 0.125 step halves the coefficient):

    c        = 0.5^((1 − cutoff) / 0.125)
    r        = 0.5^((resonance + 0.125) / 0.125)
    feedback = 1 − r·c

Low `r` means the loop barely damps itself, so energy rings around the cutoff
before dying out: that ringing is the resonance.

Filter Envelope
---------------
The cutoff is swept per note by its own ADSR. The envelope can only push the
cutoff up into the headroom that is left above the base setting:

    cutoff = base + (1 − base) · amount · env

The envelope is sampled once at the start of each block, so sweeps move in
block-sized steps.

Fully Open
----------
A base cutoff of 1 with zero resonance leaves nothing for the filter to do
and the signal passes through untouched. The envelope cannot move the cutoff
in that state either (there is no headroom above 1).

The bypass is keyed on the *settings*, not on the coefficients. The recursion
itself still has a DC gain of 1 / (1 + r²) = 0.8 at cutoff 1, resonance 0, so
the gain steps from 0.8 to 1.0 between a base cutoff of 0.9999 and 1.0, and an
envelope that sweeps a lower base cutoff all the way up to 1 still sees 0.8.
*/

/// Shared filter configuration, read by every voice at update time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSettings {
    /// Base cutoff in [0, 1].
    pub cutoff: f32,
    /// Resonance in [0, 1].
    pub resonance: f32,
    /// Cutoff envelope.
    pub envelope: AdsrEnvelope,
    /// How far the envelope sweeps the cutoff, scaled by the headroom above it.
    pub env_amount: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            cutoff: 1.0,
            resonance: 0.0,
            envelope: AdsrEnvelope::new(0.0, 0.0, 1.0, f64::INFINITY),
            env_amount: 1.0,
        }
    }
}

impl FilterSettings {
    /// Static low-pass: the cutoff envelope is disconnected.
    pub fn lowpass(cutoff: f32, resonance: f32) -> Self {
        Self {
            cutoff,
            resonance,
            env_amount: 0.0,
            ..Self::default()
        }
    }

    pub fn with_envelope(mut self, envelope: AdsrEnvelope, amount: f32) -> Self {
        self.envelope = envelope;
        self.env_amount = amount;
        self
    }

    /// Check the configuration and borrow it for one update.
    pub fn prepare(&self) -> Result<PreparedFilter<'_>, SynthError> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(SynthError::InvalidCutoff(self.cutoff));
        }
        if !(0.0..=1.0).contains(&self.resonance) {
            return Err(SynthError::InvalidResonance(self.resonance));
        }

        Ok(PreparedFilter { settings: self })
    }

    pub fn is_open(&self) -> bool {
        self.cutoff == 1.0 && self.resonance == 0.0
    }
}

/// Per-voice filter memory plus the envelope snapshots for the cutoff sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    pub v0: f32,
    pub v1: f32,
    /// Filter envelope level at the last note-on.
    pub on_env: f32,
    /// Filter envelope level at the last note-off.
    pub off_env: f32,
}

impl FilterState {
    /// Current level of the cutoff envelope for a note gated by `on_time`/`off_time`.
    pub fn envelope_level(&self, envelope: &AdsrEnvelope, time: f64, on_time: f64, off_time: f64) -> f32 {
        envelope.value(time, on_time, off_time, self.on_env, self.off_env)
    }

    pub fn reset(&mut self) {
        self.v0 = 0.0;
        self.v1 = 0.0;
    }
}

/// Filter settings that passed range checks.
#[derive(Debug, Clone, Copy)]
pub struct PreparedFilter<'a> {
    settings: &'a FilterSettings,
}

impl PreparedFilter<'_> {
    pub fn settings(&self) -> &FilterSettings {
        self.settings
    }

    /// Coefficients `(c, feedback)` for a given envelope level.
    pub fn coefficients(&self, env_level: f32) -> (f32, f32) {
        let s = self.settings;
        let sweep = (1.0 - s.cutoff) * s.env_amount;
        let cutoff = s.cutoff + sweep * env_level;

        let c = 0.5_f32.powf((1.0 - cutoff) / 0.125);
        let r = 0.5_f32.powf((s.resonance + 0.125) / 0.125);

        (c, 1.0 - r * c)
    }

    /// Filter one block of a voice in place.
    pub fn apply(&self, time: f64, on_time: f64, off_time: f64, state: &mut FilterState, buffer: &mut [f32]) {
        if self.settings.is_open() {
            state.reset();
            return;
        }

        let env_level = state.envelope_level(&self.settings.envelope, time, on_time, off_time);
        let (c, feedback) = self.coefficients(env_level);

        let mut v0 = state.v0;
        let mut v1 = state.v1;

        for sample in buffer.iter_mut() {
            v0 = feedback * v0 - c * v1 + c * *sample;
            v1 = feedback * v1 + c * v0;
            *sample = v1;
        }

        state.v0 = v0;
        state.v1 = v1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::{num_complex::Complex, FftPlanner};
    use std::f32::consts::TAU;

    fn run(settings: &FilterSettings, state: &mut FilterState, buffer: &mut [f32]) {
        let filter = settings.prepare().expect("valid settings");
        filter.apply(0.0, 0.0, 0.0, state, buffer);
    }

    fn magnitude_at(signal: &[f32], bin: usize) -> f32 {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(signal.len());
        let mut spectrum: Vec<Complex<f32>> = signal.iter().map(|&s| Complex::new(s, 0.0)).collect();
        fft.process(&mut spectrum);
        spectrum[bin].norm()
    }

    #[test]
    fn rejects_out_of_range_settings() {
        assert_eq!(
            FilterSettings::lowpass(1.5, 0.0).prepare().unwrap_err(),
            SynthError::InvalidCutoff(1.5)
        );
        assert_eq!(
            FilterSettings::lowpass(0.5, -0.1).prepare().unwrap_err(),
            SynthError::InvalidResonance(-0.1)
        );
        assert!(FilterSettings::lowpass(f32::NAN, 0.0).prepare().is_err());
    }

    #[test]
    fn open_filter_passes_signal_through() {
        let settings = FilterSettings::default();
        let mut state = FilterState::default();
        let input: Vec<f32> = (0..64).map(|i| (i as f32 * 0.3).sin()).collect();
        let mut buffer = input.clone();

        run(&settings, &mut state, &mut buffer);

        assert_eq!(buffer, input);
        assert_eq!((state.v0, state.v1), (0.0, 0.0));
    }

    #[test]
    fn dc_settles_to_filter_gain() {
        // Steady state: v0 = r·v1 and v1·(1 + r²) = x
        let settings = FilterSettings::lowpass(0.75, 0.0);
        let mut state = FilterState::default();
        let mut buffer = vec![1.0f32; 4096];

        run(&settings, &mut state, &mut buffer);

        let r = 0.5_f32;
        let expected = 1.0 / (1.0 + r * r);
        assert!((buffer[4095] - expected).abs() < 1e-3, "got {}", buffer[4095]);
    }

    #[test]
    fn bypass_only_for_open_settings() {
        let dc_out = |settings: FilterSettings| {
            let mut buffer = vec![1.0f32; 4096];
            run(&settings, &mut FilterState::default(), &mut buffer);
            buffer[4095]
        };

        assert_eq!(dc_out(FilterSettings::lowpass(1.0, 0.0)), 1.0);
        assert!((dc_out(FilterSettings::lowpass(0.9999, 0.0)) - 0.8).abs() < 1e-3);

        // Swept up to a cutoff of 1 by the envelope: still filtered.
        let swept = FilterSettings::lowpass(0.5, 0.0).with_envelope(AdsrEnvelope::new(0.0, 0.0, 1.0, f64::INFINITY), 1.0);
        assert!((dc_out(swept) - 0.8).abs() < 1e-3);
    }

    #[test]
    fn impulse_response_stays_bounded_at_extremes() {
        for (cutoff, resonance) in [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (0.999, 0.0), (1.0, 0.5)] {
            let settings = FilterSettings::lowpass(cutoff, resonance);
            let mut state = FilterState::default();
            let mut peak = 0.0f32;

            for block in 0..32 {
                let mut buffer = vec![0.0f32; 512];
                if block == 0 {
                    buffer[0] = 1.0;
                }
                run(&settings, &mut state, &mut buffer);
                peak = buffer.iter().fold(peak, |acc, &x| acc.max(x.abs()));
                assert!(buffer.iter().all(|x| x.is_finite()));
            }

            assert!(peak <= 2.0, "cutoff={cutoff} resonance={resonance} peaked at {peak}");
            assert!((state.v0.abs() < 1e-3 && state.v1.abs() < 1e-3) || cutoff == 0.0);
        }
    }

    #[test]
    fn attenuates_high_frequencies() {
        // 40960 Hz with a 4096-point FFT puts 200 Hz in bin 20 and 10 kHz in bin 1000.
        let sample_rate = 40_960.0;
        let n = 4096;
        let signal: Vec<f32> = (0..2 * n)
            .map(|i| {
                let t = i as f32 / sample_rate;
                (TAU * 200.0 * t).sin() + (TAU * 10_000.0 * t).sin()
            })
            .collect();

        let mut filtered = signal.clone();
        let settings = FilterSettings::lowpass(0.5, 0.0);
        run(&settings, &mut FilterState::default(), &mut filtered);

        let dry_ratio = magnitude_at(&signal[n..], 1000) / magnitude_at(&signal[n..], 20);
        let wet_ratio = magnitude_at(&filtered[n..], 1000) / magnitude_at(&filtered[n..], 20);

        assert!(wet_ratio < dry_ratio * 0.01, "dry {dry_ratio}, wet {wet_ratio}");
    }

    #[test]
    fn envelope_opens_the_cutoff() {
        let settings = FilterSettings::lowpass(0.25, 0.0).with_envelope(AdsrEnvelope::new(0.0, 0.0, 1.0, 0.5), 1.0);
        let filter = settings.prepare().unwrap();

        let (closed, _) = filter.coefficients(0.0);
        let (open, _) = filter.coefficients(1.0);
        assert!((open - 1.0).abs() < 1e-6);
        assert!(closed < open);
    }
}
