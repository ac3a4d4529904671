//! Ready-made patches for common sounds.
//!
//! Each function returns a `Patch` to load into a `VAnalog`. Use these as
//! starting points for your own sounds, or study them to learn how different
//! timbres are built from the same few oscillators and one filter.
//!
//! # Example
//!
//! ```
//! use vanalog::{voices, VAnalog};
//!
//! let mut synth = VAnalog::from_patch(&voices::pad());
//! synth.apply_patch(&voices::sync_lead());
//! ```

mod bass;
mod lead;
mod pad;
mod pluck;
mod sync_lead;

pub use bass::bass;
pub use lead::lead;
pub use pad::pad;
pub use pluck::pluck;
pub use sync_lead::sync_lead;

/// Every preset, in a stable order.
pub fn all() -> Vec<crate::patch::Patch> {
    vec![bass(), lead(), pad(), pluck(), sync_lead()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{synth::node::SynthNode, SynthEvent, VAnalog};

    #[test]
    fn presets_are_valid_and_audible() {
        for patch in all() {
            patch.validate().unwrap();

            let mut synth = VAnalog::from_patch(&patch);
            synth.process_event(&SynthEvent::NoteOn { note: crate::Note::new(57) }, 0.0);
            for block in 0..8 {
                synth.update(block as f64 * 512.0 / 48_000.0, 48_000.0, 512).unwrap();
            }

            assert!(
                synth.output().iter().any(|s| s.abs() > 1e-4),
                "{} is silent",
                patch.name
            );
            assert!(synth.output().iter().all(|s| s.is_finite()));
        }
    }
}
