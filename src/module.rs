//! Startup
//!
//! Wires the shared context, oscillator bank and audio engine to the board
//! driver, and hands back the UI loop state for the caller to poll.

use crate::config::{ConfigError, ModuleConfig};
use crate::engine::AudioEngine;
use crate::hal::{AudioDriver, ControlInput, Oscillator};
use crate::oscillator::{OscillatorBank, VOICE_COUNT};
use crate::shared::SharedContext;
use crate::ui::Ui;

/// Error type for module startup
#[derive(Debug, Clone, PartialEq)]
pub enum BootError {
    /// Configuration failed validation
    Config(ConfigError),
    /// The shared context has already been split by an earlier boot
    ContextInUse,
}

impl core::fmt::Display for BootError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BootError::Config(e) => write!(f, "Invalid configuration: {}", e),
            BootError::ContextInUse => write!(f, "Shared context already in use"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BootError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootError::Config(e) => Some(e),
            BootError::ContextInUse => None,
        }
    }
}

impl From<ConfigError> for BootError {
    fn from(e: ConfigError) -> Self {
        BootError::Config(e)
    }
}

/// Validate `config`, start audio on `driver` and return the UI loop.
///
/// Each oscillator is initialized at the configured sample rate and
/// waveform before the ADC and audio callback are started, in that order.
pub fn boot<O, D, C>(
    context: &'static SharedContext,
    config: &ModuleConfig,
    oscillators: [O; VOICE_COUNT],
    driver: &mut D,
    cv: C,
) -> Result<Ui<'static>, BootError>
where
    O: Oscillator + Send + 'static,
    D: AudioDriver,
    C: ControlInput + Send + 'static,
{
    config.validate()?;
    let (audio, ui) = context.split().ok_or(BootError::ContextInUse)?;

    let selection = config.initial_selection();
    ui.set_selection(selection);

    let mut bank = OscillatorBank::new(oscillators);
    bank.init(config.sample_rate, config.waveform);

    log::info!(
        "starting at {} Hz, scale {}, root {}, CV {}-{} Hz",
        config.sample_rate,
        selection.scale.scale().name,
        selection.root,
        config.cv_min_hz,
        config.cv_max_hz
    );

    AudioEngine::new(bank, config.cv_range(), audio).run(driver, cv);

    Ok(Ui::new(ui).with_scope_gain(config.scope_gain))
}
