use thiserror::Error;

/// Errors surfaced by the voice engine.
///
/// Configuration errors are never clamped away: an out-of-range cutoff or an
/// unknown waveform name means the host handed us something broken.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthError {
    #[error("invalid filter cutoff {0} (expected a value in [0, 1])")]
    InvalidCutoff(f32),
    #[error("invalid filter resonance {0} (expected a value in [0, 1])")]
    InvalidResonance(f32),
    #[error("invalid waveform: {0:?}")]
    UnknownWaveform(String),
    #[error("block of {frames} frames exceeds the engine's maximum of {max}")]
    BlockTooLarge { frames: usize, max: usize },
    #[error("invalid sample rate {0}")]
    InvalidSampleRate(f32),
    #[error("invalid note name: {0:?}")]
    InvalidNoteName(String),
}

pub type Result<T, E = SynthError> = std::result::Result<T, E>;
