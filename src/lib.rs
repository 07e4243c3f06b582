//! # Subharmonic: Quantized Subharmonic Oscillator Control Core
//!
//! `subharmonic` is the control core of an embedded audio module. A control
//! voltage is mapped to a pitch, snapped onto a selectable musical scale, and
//! drives four sine voices at 1/2, 1/3, 1/4 and 1/5 of that pitch. A push
//! encoder opens a small menu to pick the scale and root note, and the OLED
//! shows the output as a waveform or an XY figure.
//!
//! ## Architecture
//!
//! Two execution contexts share one [`SharedContext`]:
//!
//! - **Audio** - [`AudioEngine`] runs inside the driver's block callback:
//!   CV → [`quantize`] → [`OscillatorBank`] → output block and scope ring.
//! - **UI** - [`Ui`] runs in the main loop: encoder → [`Menu`] → selection,
//!   then [`render`] from a scope snapshot.
//!
//! Hardware is reached only through the traits in [`hal`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use subharmonic::prelude::*;
//!
//! static CONTEXT: SharedContext = SharedContext::new();
//!
//! let (audio, ui_side) = CONTEXT.split().unwrap();
//! let mut engine = AudioEngine::new(
//!     OscillatorBank::with_sample_rate(48000.0),
//!     CvRange::default(),
//!     audio,
//! );
//! let mut ui = Ui::new(ui_side);
//!
//! // Audio callback
//! let frame = engine.tick(0.5);
//!
//! // UI loop
//! ui.handle(UiInput::toggle());
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod config;
pub mod display;
pub mod engine;
pub mod hal;
pub mod menu;
pub mod module;
pub mod oscillator;
pub mod quantizer;
pub mod scale;
pub mod scope;
pub mod shared;
pub mod ui;

/// Prelude module for convenient imports
pub mod prelude {
    // Hardware contracts
    pub use crate::hal::{AudioDriver, ControlInput, Display, Encoder, Font, Oscillator, Waveform};

    // Pitch
    pub use crate::quantizer::{frequency_to_midi, midi_to_frequency, quantize};
    pub use crate::scale::{RootNote, Scale, ScaleIndex, NOTE_LABELS, SCALES, SCALE_COUNT};

    // Audio path
    pub use crate::engine::{AudioEngine, CvRange};
    pub use crate::oscillator::{
        OscillatorBank, PhaseOscillator, StereoFrame, SUBHARMONIC_RATIOS, VOICE_COUNT,
    };
    pub use crate::scope::{WaveformRing, WaveformSnapshot, WAVEFORM_CAPACITY};

    // Shared state
    pub use crate::shared::{AtomicF32, AudioSide, Selection, SharedContext, UiSide};

    // UI path
    pub use crate::display::render;
    pub use crate::menu::{DisplayMode, Menu, MenuPage, MenuStatus, UiInput};
    pub use crate::ui::Ui;

    // Configuration and startup
    pub use crate::config::{ConfigError, ModuleConfig};
    pub use crate::module::{boot, BootError};
}

// Re-export key types at crate root for convenience
pub use prelude::*;
