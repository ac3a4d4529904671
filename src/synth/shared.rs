use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    error::Result,
    synth::{message::SynthEvent, node::SynthNode, vanalog::VAnalog},
};

/// A `VAnalog` shared between an event thread and the audio thread.
///
/// Every event and every block takes the same lock for the whole call, so a
/// block never sees half of an event applied.
#[derive(Clone)]
pub struct SharedSynth {
    inner: Arc<Mutex<VAnalog>>,
}

impl SharedSynth {
    pub fn new(synth: VAnalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(synth)),
        }
    }

    pub fn process_event(&self, event: &SynthEvent, time: f64) {
        self.lock().process_event(event, time);
    }

    /// Render `frames` samples and copy them into `out`.
    pub fn render_block(&self, time: f64, sample_rate: f32, out: &mut [f32]) -> Result<()> {
        self.lock().render_block(time, sample_rate, out)
    }

    pub fn update(&self, time: f64, sample_rate: f32, frames: usize) -> Result<()> {
        self.lock().update(time, sample_rate, frames)
    }

    /// Run `f` with exclusive access, e.g. to tweak settings.
    pub fn with<R>(&self, f: impl FnOnce(&mut VAnalog) -> R) -> R {
        f(&mut self.lock())
    }

    // A panic mid-block leaves the engine in a consistent (if odd-sounding)
    // state, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, VAnalog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::note::Note;
    use std::thread;

    #[test]
    fn events_from_another_thread_reach_the_engine() {
        let shared = SharedSynth::new(VAnalog::new(1));
        let sender = shared.clone();

        thread::spawn(move || {
            for number in 60..64 {
                sender.process_event(&SynthEvent::NoteOn { note: Note::new(number) }, 0.0);
            }
        })
        .join()
        .unwrap();

        let mut out = vec![0.0f32; 512];
        shared.render_block(0.0, 48_000.0, &mut out).unwrap();

        assert_eq!(shared.with(|synth| synth.active_notes().len()), 4);
        assert!(out.iter().any(|&s| s != 0.0));
    }
}
