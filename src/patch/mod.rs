#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{filter::FilterSettings, oscillator::OscillatorParams},
    error::Result,
};

/// Complete configuration of a `VAnalog`: its oscillator slots and filter.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub name: String,
    pub oscillators: Vec<OscillatorParams>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub filter: FilterSettings,
}

impl Patch {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            oscillators: Vec::new(),
            filter: FilterSettings::default(),
        }
    }

    pub fn oscillator(mut self, params: OscillatorParams) -> Self {
        self.oscillators.push(params);
        self
    }

    pub fn filter(mut self, filter: FilterSettings) -> Self {
        self.filter = filter;
        self
    }

    /// Check the settings the engine would otherwise reject at update time.
    pub fn validate(&self) -> Result<()> {
        self.filter.prepare().map(|_| ())
    }
}
