use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SynthError;

/*
Note Identity
=============

A `Note` is a MIDI note number. Two events carrying the same number address
the same voice: a second note-on for C4 retriggers the C4 that is already
sounding instead of stacking another one.

The MIDI formula: note_number = 12 * (octave + 1) + semitone
Where semitone: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

Frequency uses twelve-tone equal temperament around A4 = 440 Hz, with an
extra detune in cents (100 cents = 1 semitone):

    freq = 440 * 2^((note - 69) / 12 + cents / 1200)
*/

const SEMITONE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Note(u8);

impl Note {
    pub const A4: Note = Note(69);
    pub const C4: Note = Note(60);

    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Frequency in Hz, shifted by `detune_cents`.
    #[inline]
    pub fn freq(self, detune_cents: f64) -> f64 {
        440.0 * 2.0_f64.powf((self.0 as f64 - 69.0) / 12.0 + detune_cents / 1200.0)
    }

    pub fn octave(self) -> i32 {
        self.0 as i32 / 12 - 1
    }
}

impl From<u8> for Note {
    fn from(number: u8) -> Self {
        Self(number)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SEMITONE_NAMES[self.0 as usize % 12], self.octave())
    }
}

/// Parses names like `C4`, `F#3`, `Eb5` or `A-1`.
impl FromStr for Note {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SynthError::InvalidNoteName(s.to_owned());
        let mut chars = s.chars();

        let semitone: i32 = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(invalid()),
        };

        let rest = chars.as_str();
        let (accidental, octave) = if let Some(octave) = rest.strip_prefix('#') {
            (1, octave)
        } else if let Some(octave) = rest.strip_prefix('b') {
            (-1, octave)
        } else {
            (0, rest)
        };

        let octave: i32 = octave.parse().map_err(|_| invalid())?;
        let number = 12 * (octave + 1) + semitone + accidental;

        u8::try_from(number)
            .ok()
            .filter(|n| *n <= 127)
            .map(Note)
            .ok_or_else(invalid)
    }
}
