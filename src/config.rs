//! Module Configuration
//!
//! Boot-time settings. Nothing here is persisted; a config only seeds the
//! defaults the module starts from.

use crate::display::DEFAULT_SCOPE_GAIN;
use crate::engine::CvRange;
use crate::hal::Waveform;
use crate::scale::{RootNote, ScaleIndex, ROOT_NOTE_COUNT, SCALE_COUNT};
use crate::shared::Selection;
use serde::{Deserialize, Serialize};

/// Error type for configuration validation and loading
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Sample rate must be finite and positive
    InvalidSampleRate(f32),
    /// CV range must be finite, positive and increasing
    InvalidCvRange { min_hz: f32, max_hz: f32 },
    /// Scope gain must be finite
    InvalidScopeGain(f32),
    /// Initial root outside MIDI 0..=107
    RootOutOfRange(u8),
    /// Initial scale index outside the catalog
    ScaleOutOfRange(usize),
    /// JSON could not be parsed
    #[cfg(feature = "alloc")]
    Parse(alloc::string::String),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidSampleRate(rate) => write!(f, "Invalid sample rate: {}", rate),
            ConfigError::InvalidCvRange { min_hz, max_hz } => {
                write!(f, "Invalid CV range: {} Hz to {} Hz", min_hz, max_hz)
            }
            ConfigError::InvalidScopeGain(gain) => write!(f, "Invalid scope gain: {}", gain),
            ConfigError::RootOutOfRange(root) => {
                write!(f, "Root note {} outside 0..{}", root, ROOT_NOTE_COUNT)
            }
            ConfigError::ScaleOutOfRange(index) => {
                write!(f, "Scale index {} outside 0..{}", index, SCALE_COUNT)
            }
            #[cfg(feature = "alloc")]
            ConfigError::Parse(msg) => write!(f, "Failed to parse config: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Boot configuration of the module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Audio sample rate in Hz
    pub sample_rate: f32,
    /// Frequency at CV = 0
    pub cv_min_hz: f32,
    /// Frequency at CV = 1
    pub cv_max_hz: f32,
    /// Scope pixels per unit sample
    pub scope_gain: f32,
    /// Root note at boot (MIDI)
    pub initial_root: u8,
    /// Scale index at boot
    pub initial_scale: usize,
    /// Voice waveform
    pub waveform: Waveform,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000.0,
            cv_min_hz: 20.0,
            cv_max_hz: 2000.0,
            scope_gain: DEFAULT_SCOPE_GAIN,
            initial_root: RootNote::A4.midi(),
            initial_scale: 0,
            waveform: Waveform::Sine,
        }
    }
}

impl ModuleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        let range_ok = self.cv_min_hz.is_finite()
            && self.cv_max_hz.is_finite()
            && self.cv_min_hz > 0.0
            && self.cv_max_hz > self.cv_min_hz;
        if !range_ok {
            return Err(ConfigError::InvalidCvRange {
                min_hz: self.cv_min_hz,
                max_hz: self.cv_max_hz,
            });
        }
        if !self.scope_gain.is_finite() {
            return Err(ConfigError::InvalidScopeGain(self.scope_gain));
        }
        if self.initial_root >= ROOT_NOTE_COUNT {
            return Err(ConfigError::RootOutOfRange(self.initial_root));
        }
        if self.initial_scale >= SCALE_COUNT {
            return Err(ConfigError::ScaleOutOfRange(self.initial_scale));
        }
        Ok(())
    }

    pub fn cv_range(&self) -> CvRange {
        CvRange::new(self.cv_min_hz, self.cv_max_hz)
    }

    pub fn initial_selection(&self) -> Selection {
        Selection {
            scale: ScaleIndex::new(self.initial_scale),
            root: RootNote::new(self.initial_root),
        }
    }

    /// Parse and validate a JSON config; missing fields take their defaults
    #[cfg(feature = "alloc")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        use alloc::string::ToString;

        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "alloc")]
    pub fn to_json(&self) -> Result<alloc::string::String, ConfigError> {
        use alloc::string::ToString;

        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
