//! Sequencer - sample-accurate arpeggio playback
//!
//! Runs in the audio callback. Each host buffer is cut into sub-blocks at
//! event boundaries so every note starts on its exact sample.

use vanalog::{Note, Result, TimedEvent, VAnalog};

pub struct Sequencer {
    steps: Vec<Note>,
    /// Seconds per step
    step_len: f64,
    /// Fraction of a step the key is held
    gate: f64,
    sample_rate: f64,
    /// Playback position in samples
    position: u64,
    next_step: usize,
    next_on: f64,
    pending_off: Option<(f64, Note)>,
}

impl Sequencer {
    pub fn new(steps: Vec<Note>, bpm: f64, steps_per_beat: u32, gate: f64, sample_rate: f64) -> Self {
        Self {
            steps,
            step_len: 60.0 / bpm / steps_per_beat as f64,
            gate: gate.clamp(0.01, 1.0),
            sample_rate,
            position: 0,
            next_step: 0,
            next_on: 0.0,
            pending_off: None,
        }
    }

    pub fn time(&self) -> f64 {
        self.position as f64 / self.sample_rate
    }

    /// Next event due at or before `now`, note-offs first.
    fn pop_due(&mut self, now: f64) -> Option<TimedEvent> {
        if let Some((time, note)) = self.pending_off {
            if time <= now {
                self.pending_off = None;
                return Some(TimedEvent::note_off(time, note));
            }
        }

        if self.next_on <= now && !self.steps.is_empty() {
            let time = self.next_on;
            let note = self.steps[self.next_step];

            self.next_step = (self.next_step + 1) % self.steps.len();
            self.next_on += self.step_len;
            self.pending_off = Some((time + self.gate * self.step_len, note));

            return Some(TimedEvent::note_on(time, note));
        }

        None
    }

    fn next_event_time(&self) -> f64 {
        let off = self.pending_off.map_or(f64::INFINITY, |(time, _)| time);
        if self.steps.is_empty() {
            off
        } else {
            off.min(self.next_on)
        }
    }

    /// Fill `out` with the next stretch of the arpeggio.
    pub fn render(&mut self, synth: &mut VAnalog, out: &mut [f32]) -> Result<()> {
        let sample_rate = self.sample_rate as f32;
        let mut offset = 0;

        while offset < out.len() {
            let now = self.time();
            while let Some(timed) = self.pop_due(now) {
                synth.process_event(&timed.event, timed.time);
            }

            let until_next = ((self.next_event_time() - now) * self.sample_rate).ceil();
            let remaining = out.len() - offset;
            let frames = if until_next.is_finite() && until_next >= 1.0 {
                (until_next as usize).min(remaining)
            } else {
                remaining
            };

            synth.render_block(now, sample_rate, &mut out[offset..offset + frames])?;
            offset += frames;
            self.position += frames as u64;
        }

        Ok(())
    }
}
