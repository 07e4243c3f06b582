//! Subharmonic Oscillator Bank
//!
//! Four voices tuned to fixed integer divisions of the quantized pitch. Even
//! voices feed the left channel, odd voices the right.

use crate::hal::{Oscillator, Waveform};
use core::f32::consts::TAU;
use libm::Libm;

/// Number of voices in the bank
pub const VOICE_COUNT: usize = 4;

/// Frequency divisor of each voice, fixed for the lifetime of the bank
pub const SUBHARMONIC_RATIOS: [u8; VOICE_COUNT] = [2, 3, 4, 5];

/// Per-channel gain after summing; each channel carries exactly two voices
const MIX_GAIN: f32 = 0.5;

/// One stereo output sample
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StereoFrame {
    pub left: f32,
    pub right: f32,
}

/// Phase-accumulator oscillator
///
/// Host-side implementation of the [`Oscillator`] contract, used when no
/// board primitive is available. Output is in `[-1, 1]`.
#[derive(Debug, Clone)]
pub struct PhaseOscillator {
    phase: f32,
    increment: f32,
    freq: f32,
    sample_rate: f32,
    waveform: Waveform,
}

impl PhaseOscillator {
    pub fn new(sample_rate: f32) -> Self {
        let mut osc = Self {
            phase: 0.0,
            increment: 0.0,
            freq: 100.0,
            sample_rate,
            waveform: Waveform::Sine,
        };
        osc.init(sample_rate);
        osc
    }

    pub fn freq(&self) -> f32 {
        self.freq
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    fn update_increment(&mut self) {
        self.increment = self.freq / self.sample_rate;
    }
}

impl Default for PhaseOscillator {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

impl Oscillator for PhaseOscillator {
    fn init(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.phase = 0.0;
        self.update_increment();
    }

    fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    fn set_freq(&mut self, freq: f32) {
        self.freq = freq.clamp(0.0, self.sample_rate * 0.5);
        self.update_increment();
    }

    fn process(&mut self) -> f32 {
        let out = match self.waveform {
            Waveform::Sine => Libm::<f32>::sin(self.phase * TAU),
            Waveform::Triangle => 1.0 - 4.0 * Libm::<f32>::fabs(self.phase - 0.5),
            Waveform::Saw => 2.0 * self.phase - 1.0,
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
        };

        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= Libm::<f32>::floor(self.phase);
        }
        out
    }
}

/// Four subharmonic voices summed into a stereo pair
#[derive(Debug, Clone)]
pub struct OscillatorBank<O> {
    voices: [O; VOICE_COUNT],
}

impl<O: Oscillator> OscillatorBank<O> {
    /// Take ownership of the voice primitives, one per entry of [`SUBHARMONIC_RATIOS`]
    pub fn new(voices: [O; VOICE_COUNT]) -> Self {
        Self { voices }
    }

    /// Initialize every voice at `sample_rate` with the given shape
    pub fn init(&mut self, sample_rate: f32, waveform: Waveform) {
        for voice in self.voices.iter_mut() {
            voice.init(sample_rate);
            voice.set_waveform(waveform);
        }
    }

    /// Retune every voice to `freq / ratio`, advance one sample and mix
    #[inline]
    pub fn process(&mut self, freq: f32) -> StereoFrame {
        let mut frame = StereoFrame::default();

        for (index, (voice, &ratio)) in self
            .voices
            .iter_mut()
            .zip(SUBHARMONIC_RATIOS.iter())
            .enumerate()
        {
            voice.set_freq(freq / ratio as f32);
            let sig = voice.process();
            if index % 2 == 0 {
                frame.left += sig;
            } else {
                frame.right += sig;
            }
        }

        frame.left *= MIX_GAIN;
        frame.right *= MIX_GAIN;
        frame
    }

    pub fn voices(&self) -> &[O; VOICE_COUNT] {
        &self.voices
    }
}

impl OscillatorBank<PhaseOscillator> {
    /// Bank of host oscillators at `sample_rate`
    pub fn with_sample_rate(sample_rate: f32) -> Self {
        Self::new(core::array::from_fn(|_| PhaseOscillator::new(sample_rate)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Records the last frequency and returns a fixed level
    #[derive(Default)]
    struct Probe {
        freq: f32,
        level: f32,
    }

    impl Oscillator for Probe {
        fn init(&mut self, _sample_rate: f32) {}
        fn set_waveform(&mut self, _waveform: Waveform) {}
        fn set_freq(&mut self, freq: f32) {
            self.freq = freq;
        }
        fn process(&mut self) -> f32 {
            self.level
        }
    }

    fn probes(levels: [f32; 4]) -> OscillatorBank<Probe> {
        OscillatorBank::new(levels.map(|level| Probe { freq: 0.0, level }))
    }

    #[test]
    fn test_voices_divide_frequency() {
        let mut bank = probes([0.0; 4]);
        bank.process(600.0);

        let freqs: Vec<f32> = bank.voices().iter().map(|p| p.freq).collect();
        assert_eq!(freqs, vec![300.0, 200.0, 150.0, 120.0]);
    }

    #[test]
    fn test_even_left_odd_right() {
        let mut bank = probes([1.0, 0.25, 0.5, 0.75]);
        let frame = bank.process(440.0);

        assert_abs_diff_eq!(frame.left, 0.75);
        assert_abs_diff_eq!(frame.right, 0.5);
    }

    #[test]
    fn test_mix_stays_in_range() {
        let mut bank = OscillatorBank::with_sample_rate(48000.0);
        bank.init(48000.0, Waveform::Sine);

        for _ in 0..4800 {
            let frame = bank.process(1000.0);
            assert!(frame.left.abs() <= 1.0 + 1e-6);
            assert!(frame.right.abs() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_phase_oscillator_frequency() {
        let mut osc = PhaseOscillator::new(1000.0);
        osc.set_freq(10.0);

        // Count rising zero crossings of the saw over one second
        osc.set_waveform(Waveform::Saw);
        let samples: Vec<f32> = (0..1000).map(|_| osc.process()).collect();
        let crossings = samples
            .windows(2)
            .filter(|w| w[0] <= 0.0 && w[1] > 0.0)
            .count();

        assert!((9..=11).contains(&crossings));
    }

    #[test]
    fn test_phase_oscillator_clamps_to_nyquist() {
        let mut osc = PhaseOscillator::new(1000.0);
        osc.set_freq(5000.0);
        assert_eq!(osc.freq(), 500.0);

        osc.set_freq(-1.0);
        assert_eq!(osc.freq(), 0.0);
    }

    #[test]
    fn test_sine_starts_at_zero() {
        let mut osc = PhaseOscillator::new(48000.0);
        osc.set_freq(440.0);
        assert_abs_diff_eq!(osc.process(), 0.0);
        assert!(osc.phase() > 0.0);
    }
}
