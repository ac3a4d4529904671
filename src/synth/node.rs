use crate::error::Result;

/// Owned output buffer of a synth node.
///
/// Allocated once with a fixed capacity; each update only changes how much of
/// it is live, so rendering never reallocates.
#[derive(Debug, Clone)]
pub struct OutputPort {
    buffer: Vec<f32>,
    len: usize,
}

impl OutputPort {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity],
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Resize the live region to `frames` (within capacity) and zero it.
    pub(crate) fn clear(&mut self, frames: usize) -> &mut [f32] {
        self.len = frames.min(self.buffer.len());
        let live = &mut self.buffer[..self.len];
        live.fill(0.0);
        live
    }

    /// Zero the live region without changing its length.
    pub(crate) fn silence(&mut self) {
        self.buffer[..self.len].fill(0.0);
    }

    pub fn samples(&self) -> &[f32] {
        &self.buffer[..self.len]
    }
}

/// Something the host clock can pull audio from, one block at a time.
pub trait SynthNode: Send {
    /// Render `frames` samples starting at `time` (seconds) into the output port.
    fn update(&mut self, time: f64, sample_rate: f32, frames: usize) -> Result<()>;

    /// The block produced by the last `update`.
    fn output(&self) -> &[f32];
}

impl<T: SynthNode + ?Sized> SynthNode for Box<T> {
    fn update(&mut self, time: f64, sample_rate: f32, frames: usize) -> Result<()> {
        (**self).update(time, sample_rate, frames)
    }

    fn output(&self) -> &[f32] {
        (**self).output()
    }
}
