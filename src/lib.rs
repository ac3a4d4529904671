//! Polyphonic virtual-analog voice engine.
//!
//! Turns note events into a continuous audio signal, one fixed-size block at a
//! time. Each sounding note owns its own oscillator phases, envelope snapshots
//! and filter memory, so voices never bleed into each other across blocks.

pub mod dsp; // Envelope, oscillator and filter primitives
pub mod error;
pub mod patch; // Serializable engine configuration
pub mod synth; // Voice engine, events, note identity
pub mod voices; // Ready-made patches

pub use error::{Result, SynthError};
pub use synth::{
    message::{SynthEvent, TimedEvent},
    node::SynthNode,
    note::Note,
    vanalog::VAnalog,
};

/// Largest block the engine's scratch buffers are sized for by default.
pub const MAX_BLOCK_SIZE: usize = 2048;
/// Sample rate used when the host cannot report one.
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;
