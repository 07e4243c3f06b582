//! Hardware Abstraction Contracts
//!
//! The control core never touches hardware directly. Everything it needs from
//! the board (CV sampling, the push encoder, oscillator primitives, the OLED
//! and the audio driver) is expressed here as a trait and consumed through
//! generics, so the real-time path stays statically dispatched.

/// A normalized control-voltage input.
pub trait ControlInput {
    /// Read the current value, nominally in `[0, 1]`.
    ///
    /// Called once per audio sample.
    fn read(&mut self) -> f32;
}

/// A push-button rotary encoder, already debounced by the driver.
pub trait Encoder {
    /// True on the poll where the button transitioned to pressed.
    fn rising_edge(&mut self) -> bool;

    /// Detents turned since the last poll. Only the sign is meaningful to the menu.
    fn increment(&mut self) -> i32;

    /// Debounced button level.
    fn pressed(&mut self) -> bool;
}

/// Waveform shapes offered by the oscillator primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Saw,
    Square,
}

/// A single-voice oscillator primitive.
pub trait Oscillator {
    fn init(&mut self, sample_rate: f32);
    fn set_waveform(&mut self, waveform: Waveform);
    fn set_freq(&mut self, freq: f32);

    /// Advance by one sample and return it, nominally in `[-1, 1]`.
    fn process(&mut self) -> f32;
}

/// Fonts available on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// 7x10 pixel monospace
    Font7x10,
}

/// A monochrome pixel display with a framebuffer that is pushed by `update`.
pub trait Display {
    fn fill(&mut self, on: bool);
    fn set_cursor(&mut self, x: i32, y: i32);
    fn write_string(&mut self, text: &str, font: Font, invert: bool);
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, on: bool);
    fn draw_pixel(&mut self, x: i32, y: i32, on: bool);

    /// Push the framebuffer to the panel.
    fn update(&mut self);

    fn width(&self) -> i32;
    fn height(&self) -> i32;
}

/// Board audio/ADC driver.
pub trait AudioDriver {
    /// Start continuous control sampling.
    fn start_adc(&mut self);

    /// Start the audio interrupt. The callback receives the left and right
    /// output slices of each block and must fill them completely.
    fn start_audio<F>(&mut self, callback: F)
    where
        F: FnMut(&mut [f32], &mut [f32]) + Send + 'static;
}
