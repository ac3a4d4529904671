#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Time-Addressed ADSR Envelope
============================

The envelope here holds no running state. Every call answers one question:
"given when the key went down (and maybe up), what is the level at time t?"
The voice engine stores the on/off timestamps plus two level snapshots per
note and asks the envelope for the level at the start and the end of every
block.

Vocabulary
----------

  on_time     When the current note-on was received (seconds).
  off_time    When the note-off was received, or 0.0 while the key is held.
  on_amp      Level the note was at when it was (re)triggered. A fresh note
              starts from 0; a retriggered one starts wherever it was.
  off_amp     Level the note was at when the key was released.


The Shape
---------

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

Attack rises from on_amp to 1, decay falls from 1 to the sustain level, and
release falls from off_amp to 0. Each segment is bent by its own exponent
(2.0 by default).


The Curve
---------

For a normalized position x in [0, 1] between y_left and y_right:

  rising:   y_left  + x^e       * (y_right - y_left)
  falling:  y_right + (1 - x)^e * (y_left - y_right)

The falling form is mirrored so the curve flattens out as it approaches its
target, for both directions. A rising attack lands on 1.0 with a steep
slope; a falling release eases into silence.


Edge Cases
----------

  zero-length segment   skipped: the level jumps straight to its target.
  infinite release      the release branch never runs; the note holds its
                        off_amp forever and never reaches zero.
  t before on_time      treated as the very start of the attack.
*/

/// Attack/decay/sustain/release envelope, evaluated as a pure function of time.
///
/// One envelope is shared by every voice playing through the same oscillator
/// slot; all per-note data lives in the caller's snapshots.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrEnvelope {
    /// Seconds to go from the on-level to full scale.
    pub attack: f64,
    /// Seconds to fall from full scale to the sustain level.
    pub decay: f64,
    /// Level held while the key is down, in [0, 1].
    pub sustain: f32,
    /// Seconds to fall from the off-level to silence. May be infinite.
    #[cfg_attr(feature = "serde", serde(with = "release_time"))]
    pub release: f64,

    pub attack_curve: f32,
    pub decay_curve: f32,
    pub release_curve: f32,
}

const DEFAULT_CURVE: f32 = 2.0;

impl AdsrEnvelope {
    pub fn new(attack: f64, decay: f64, sustain: f32, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
            attack_curve: DEFAULT_CURVE,
            decay_curve: DEFAULT_CURVE,
            release_curve: DEFAULT_CURVE,
        }
    }

    /// Set the attack, decay and release exponents.
    pub fn with_curves(mut self, attack: f32, decay: f32, release: f32) -> Self {
        self.attack_curve = attack;
        self.decay_curve = decay;
        self.release_curve = release;
        self
    }

    /// Level of the envelope at `cur_time`.
    ///
    /// `off_time == 0.0` means the key is still held. `on_amp` and `off_amp`
    /// are the levels snapshotted at the last note-on and note-off.
    pub fn value(&self, cur_time: f64, on_time: f64, off_time: f64, on_amp: f32, off_amp: f32) -> f32 {
        if off_time == 0.0 {
            let t = (cur_time - on_time).max(0.0);

            if t < self.attack {
                interp(t / self.attack, on_amp, 1.0, self.attack_curve)
            } else if t < self.attack + self.decay {
                interp((t - self.attack) / self.decay, 1.0, self.sustain, self.decay_curve)
            } else {
                self.sustain
            }
        } else {
            if self.release.is_infinite() {
                return off_amp;
            }

            let t = (cur_time - off_time).max(0.0);

            if t < self.release {
                interp(t / self.release, off_amp, 0.0, self.release_curve)
            } else {
                0.0
            }
        }
    }

    /// True if a released note eventually reaches silence.
    pub fn releases(&self) -> bool {
        self.release.is_finite()
    }
}

impl Default for AdsrEnvelope {
    fn default() -> Self {
        Self::new(0.05, 0.05, 0.2, 0.1)
    }
}

#[inline]
fn interp(x: f64, y_left: f32, y_right: f32, exp: f32) -> f32 {
    let x = x as f32;

    if y_right > y_left {
        y_left + x.powf(exp) * (y_right - y_left)
    } else {
        y_right + (1.0 - x).powf(exp) * (y_left - y_right)
    }
}

/// JSON has no infinity, so an endless release is written as `null`.
#[cfg(feature = "serde")]
mod release_time {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(release: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if release.is_finite() {
            serializer.serialize_some(release)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
