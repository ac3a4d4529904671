#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::synth::note::Note;

/// Musical events understood by the voice engine.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthEvent {
    NoteOn { note: Note },
    NoteOff { note: Note },
    /// Hard cut: every voice stops immediately, no release tail.
    AllNotesOff,
    /// Not handled by `VAnalog`; accepted and ignored.
    PitchBend { cents: f32 },
}

/// An event stamped with the time (seconds) it takes effect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimedEvent {
    pub time: f64,
    pub event: SynthEvent,
}

impl TimedEvent {
    pub fn new(time: f64, event: SynthEvent) -> Self {
        Self { time, event }
    }

    pub fn note_on(time: f64, note: impl Into<Note>) -> Self {
        Self::new(time, SynthEvent::NoteOn { note: note.into() })
    }

    pub fn note_off(time: f64, note: impl Into<Note>) -> Self {
        Self::new(time, SynthEvent::NoteOff { note: note.into() })
    }
}

/// Source of pending events, drained once per block by the engine.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<TimedEvent>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<TimedEvent> {
    fn pop(&mut self) -> Option<TimedEvent> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for std::collections::VecDeque<TimedEvent> {
    fn pop(&mut self) -> Option<TimedEvent> {
        self.pop_front()
    }
}
