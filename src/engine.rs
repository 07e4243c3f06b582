//! Audio Engine
//!
//! Per-block orchestration for the real-time context. For each sample: read
//! CV, map it linearly onto the pitch range, quantize, run the oscillator bank,
//! record the frame for the scope and write it to the output block.
//!
//! Nothing here allocates, locks or blocks.

use crate::hal::{AudioDriver, ControlInput, Oscillator};
use crate::oscillator::{OscillatorBank, StereoFrame};
use crate::quantizer::quantize;
use crate::shared::AudioSide;

/// Linear mapping from normalized CV to Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CvRange {
    pub min_hz: f32,
    pub max_hz: f32,
}

impl CvRange {
    pub const fn new(min_hz: f32, max_hz: f32) -> Self {
        Self { min_hz, max_hz }
    }

    #[inline]
    pub fn to_frequency(&self, cv: f32) -> f32 {
        self.min_hz + cv * (self.max_hz - self.min_hz)
    }
}

impl Default for CvRange {
    fn default() -> Self {
        Self::new(20.0, 2000.0)
    }
}

pub struct AudioEngine<'a, O> {
    bank: OscillatorBank<O>,
    range: CvRange,
    shared: AudioSide<'a>,
}

impl<'a, O: Oscillator> AudioEngine<'a, O> {
    pub fn new(bank: OscillatorBank<O>, range: CvRange, shared: AudioSide<'a>) -> Self {
        Self {
            bank,
            range,
            shared,
        }
    }

    /// Produce one stereo frame from one CV reading
    #[inline]
    pub fn tick(&mut self, cv: f32) -> StereoFrame {
        let selection = self.shared.selection();
        let freq = quantize(
            self.range.to_frequency(cv),
            selection.scale.scale(),
            selection.root,
        );

        let frame = self.bank.process(freq);
        self.shared.push_frame(frame);
        frame
    }

    /// Fill one output block. Processes `min(left.len(), right.len())` samples.
    pub fn process_block<C: ControlInput>(
        &mut self,
        cv: &mut C,
        left: &mut [f32],
        right: &mut [f32],
    ) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let frame = self.tick(cv.read());
            *l = frame.left;
            *r = frame.right;
        }
    }

    pub fn bank(&self) -> &OscillatorBank<O> {
        &self.bank
    }
}

impl<O: Oscillator + Send + 'static> AudioEngine<'static, O> {
    /// Start the ADC, then hand the engine to the driver's audio callback
    pub fn run<D, C>(mut self, driver: &mut D, mut cv: C)
    where
        D: AudioDriver,
        C: ControlInput + Send + 'static,
    {
        driver.start_adc();
        driver.start_audio(move |left, right| self.process_block(&mut cv, left, right));
    }
}
