use tracing::{debug, trace, warn};

use crate::{
    dsp::{
        filter::{FilterSettings, FilterState},
        oscillator::{self, NoiseSource, OscillatorParams, OscillatorState},
    },
    error::{Result, SynthError},
    patch::Patch,
    synth::{
        message::{MessageReceiver, SynthEvent},
        node::{OutputPort, SynthNode},
        note::Note,
    },
    MAX_BLOCK_SIZE,
};

/*
Virtual-Analog Voice Engine
===========================

One `VAnalog` plays any number of notes at once. Every distinct note gets a
`NoteState` holding its own oscillator phases, envelope snapshots and filter
memory; the oscillator and filter *settings* are shared by all of them.

Per block, for each sounding note:

    for each oscillator slot:
        raw waveform  ──→ osc_buf                    (advances the phase)
        gain ramp from env(time) to env(end_time)    (multiply in place)
        osc_buf ──+──→ note_buf
    filter(note_buf)                                 (per-note memory)
    note_buf ──+──→ output

The envelope is only evaluated at the two ends of the block and the gain is
interpolated linearly in between. That keeps the per-sample cost at one
multiply-add while still avoiding stair-step clicks at block boundaries.

Retriggering
------------
A note-on for a note that is still sounding does not start from silence. The
current level of every envelope is captured first (with the old on/off times)
and becomes the starting level of the new attack. A note-off does the same for
the release.

Voice Removal
-------------
A note is dropped once every oscillator's gain at the end of the block is
exactly zero. With an infinite release that never happens on its own; only
`AllNotesOff` clears such notes.
*/

/// Everything one sounding note owns.
#[derive(Debug, Clone)]
pub struct NoteState {
    note: Note,
    on_time: f64,
    /// 0.0 while the key is held.
    off_time: f64,
    oscillators: Vec<OscillatorState>,
    filter: FilterState,
}

impl NoteState {
    fn new(note: Note, time: f64, num_oscillators: usize) -> Self {
        Self {
            note,
            on_time: time,
            off_time: 0.0,
            oscillators: vec![OscillatorState::default(); num_oscillators],
            filter: FilterState::default(),
        }
    }

    pub fn note(&self) -> Note {
        self.note
    }

    pub fn on_time(&self) -> f64 {
        self.on_time
    }

    pub fn off_time(&self) -> f64 {
        self.off_time
    }

    pub fn is_held(&self) -> bool {
        self.off_time == 0.0
    }

    pub fn oscillators(&self) -> &[OscillatorState] {
        &self.oscillators
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Restart the envelopes at `time`, starting from wherever they are now.
    fn retrigger(&mut self, time: f64, params: &[OscillatorParams], filter: &FilterSettings) {
        for (osc, state) in params.iter().zip(self.oscillators.iter_mut()) {
            state.on_amp = osc.envelope.value(time, self.on_time, self.off_time, state.on_amp, state.off_amp);
        }
        self.filter.on_env = self.filter.envelope_level(&filter.envelope, time, self.on_time, self.off_time);

        self.on_time = time;
        self.off_time = 0.0;
    }

    /// Enter the release at `time`, starting from wherever the envelopes are now.
    fn release(&mut self, time: f64, params: &[OscillatorParams], filter: &FilterSettings) {
        for (osc, state) in params.iter().zip(self.oscillators.iter_mut()) {
            state.off_amp = osc.envelope.value(time, self.on_time, self.off_time, state.on_amp, state.off_amp);
        }
        self.filter.off_env = self.filter.envelope_level(&filter.envelope, time, self.on_time, self.off_time);

        self.off_time = time;
    }
}

/// Polyphonic virtual-analog synthesizer.
pub struct VAnalog {
    oscillators: Vec<OscillatorParams>,
    filter: FilterSettings,
    notes: Vec<NoteState>,
    osc_buf: Vec<f32>,
    note_buf: Vec<f32>,
    output: OutputPort,
    noise: NoiseSource,
}

impl VAnalog {
    /// Engine with `num_oscillators` default (sine) oscillator slots.
    pub fn new(num_oscillators: usize) -> Self {
        Self::with_max_block_size(num_oscillators, MAX_BLOCK_SIZE)
    }

    /// Engine whose scratch buffers hold blocks of up to `max_block_size` frames.
    pub fn with_max_block_size(num_oscillators: usize, max_block_size: usize) -> Self {
        Self {
            oscillators: vec![OscillatorParams::default(); num_oscillators],
            filter: FilterSettings::default(),
            notes: Vec::with_capacity(16),
            osc_buf: vec![0.0; max_block_size],
            note_buf: vec![0.0; max_block_size],
            output: OutputPort::with_capacity(max_block_size),
            noise: NoiseSource::default(),
        }
    }

    pub fn from_patch(patch: &Patch) -> Self {
        let mut synth = Self::new(patch.oscillators.len());
        synth.apply_patch(patch);
        synth
    }

    /// Replace the noise generator, e.g. with a seeded one for reproducible output.
    pub fn with_noise_source(mut self, noise: NoiseSource) -> Self {
        self.noise = noise;
        self
    }

    pub fn set_noise_source(&mut self, noise: NoiseSource) {
        self.noise = noise;
    }

    /// Load a full configuration. Sounding notes keep playing with the new settings.
    pub fn apply_patch(&mut self, patch: &Patch) {
        self.oscillators.clone_from(&patch.oscillators);
        self.filter.clone_from(&patch.filter);

        let count = self.oscillators.len();
        for state in &mut self.notes {
            state.oscillators.resize(count, OscillatorState::default());
        }
    }

    /// Snapshot the current configuration.
    pub fn patch(&self, name: impl Into<String>) -> Patch {
        Patch {
            name: name.into(),
            oscillators: self.oscillators.clone(),
            filter: self.filter.clone(),
        }
    }

    pub fn oscillators(&self) -> &[OscillatorParams] {
        &self.oscillators
    }

    pub fn oscillator_mut(&mut self, index: usize) -> Option<&mut OscillatorParams> {
        self.oscillators.get_mut(index)
    }

    pub fn filter(&self) -> &FilterSettings {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut FilterSettings {
        &mut self.filter
    }

    pub fn max_block_size(&self) -> usize {
        self.output.capacity()
    }

    pub fn active_notes(&self) -> &[NoteState] {
        &self.notes
    }

    pub fn is_sounding(&self, note: Note) -> bool {
        self.notes.iter().any(|n| n.note == note)
    }

    /// Handle one event taking effect at `time` (seconds).
    pub fn process_event(&mut self, event: &SynthEvent, time: f64) {
        match *event {
            SynthEvent::NoteOn { note } => {
                match self.notes.iter_mut().find(|n| n.note == note) {
                    Some(state) => {
                        state.retrigger(time, &self.oscillators, &self.filter);
                        debug!(%note, time, "retrigger");
                    }
                    None => {
                        self.notes.push(NoteState::new(note, time, self.oscillators.len()));
                        debug!(%note, time, voices = self.notes.len(), "note on");
                    }
                }
            }
            SynthEvent::NoteOff { note } => match self.notes.iter_mut().find(|n| n.note == note) {
                Some(state) => {
                    state.release(time, &self.oscillators, &self.filter);
                    debug!(%note, time, "note off");
                }
                None => trace!(%note, time, "note off for silent note"),
            },
            SynthEvent::AllNotesOff => {
                debug!(voices = self.notes.len(), time, "all notes off");
                self.notes.clear();
            }
            SynthEvent::PitchBend { .. } => {}
        }
    }

    /// Process every event waiting in `rx`, in arrival order.
    pub fn drain_events(&mut self, rx: &mut impl MessageReceiver) {
        while let Some(timed) = rx.pop() {
            self.process_event(&timed.event, timed.time);
        }
    }

    /// Render into a host buffer of any length, splitting it into engine-sized blocks.
    pub fn render_block(&mut self, time: f64, sample_rate: f32, out: &mut [f32]) -> Result<()> {
        let block = self.max_block_size().max(1);

        for (index, chunk) in out.chunks_mut(block).enumerate() {
            let offset = (index * block) as f64 / sample_rate as f64;
            self.update(time + offset, sample_rate, chunk.len())?;
            chunk.copy_from_slice(self.output.samples());
        }

        Ok(())
    }
}

impl SynthNode for VAnalog {
    fn update(&mut self, time: f64, sample_rate: f32, frames: usize) -> Result<()> {
        if frames > self.max_block_size() {
            self.output.silence();
            return Err(SynthError::BlockTooLarge {
                frames,
                max: self.max_block_size(),
            });
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            self.output.silence();
            return Err(SynthError::InvalidSampleRate(sample_rate));
        }

        let Self {
            oscillators,
            filter,
            notes,
            osc_buf,
            note_buf,
            output,
            noise,
        } = self;

        let out = output.clear(frames);
        if notes.is_empty() || frames == 0 {
            return Ok(());
        }

        let filter = filter.prepare().inspect_err(|err| warn!(%err, "update aborted"))?;

        let end_time = time + (frames - 1) as f64 / sample_rate as f64;
        let ramp_len = (frames - 1).max(1) as f32;
        let osc_buf = &mut osc_buf[..frames];
        let note_buf = &mut note_buf[..frames];

        notes.retain_mut(|state| {
            note_buf.fill(0.0);
            let mut max_end_amp = 0.0f32;

            for (params, osc) in oscillators.iter().zip(state.oscillators.iter_mut()) {
                oscillator::generate(osc_buf, params, osc, state.note, sample_rate, noise);

                let env = &params.envelope;
                let amp_start = params.volume * env.value(time, state.on_time, state.off_time, osc.on_amp, osc.off_amp);
                let amp_end =
                    params.volume * env.value(end_time, state.on_time, state.off_time, osc.on_amp, osc.off_amp);
                max_end_amp = max_end_amp.max(amp_end);

                for (i, (acc, sample)) in note_buf.iter_mut().zip(osc_buf.iter()).enumerate() {
                    let ratio = i as f32 / ramp_len;
                    *acc += sample * (amp_start + ratio * (amp_end - amp_start));
                }
            }

            filter.apply(time, state.on_time, state.off_time, &mut state.filter, note_buf);

            for (o, n) in out.iter_mut().zip(note_buf.iter()) {
                *o += n;
            }

            let keep = max_end_amp != 0.0;
            if !keep {
                debug!(note = %state.note, "voice finished");
            }
            keep
        });

        Ok(())
    }

    fn output(&self) -> &[f32] {
        self.output.samples()
    }
}
