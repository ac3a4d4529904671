// Purpose: the voice engine, the events that drive it and note identity.
// This layer sits above the dsp primitives and owns all per-voice state.

pub mod message;
pub mod node;
pub mod note;
pub mod shared;
pub mod vanalog;
