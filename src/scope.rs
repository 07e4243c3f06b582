//! Waveform Ring Buffer
//!
//! The last [`WAVEFORM_CAPACITY`] stereo frames produced by the audio path,
//! kept for the display. One writer (audio) and one reader (UI) share it
//! without a lock: every slot and the cursor are relaxed atomics, so a redraw
//! may see a mix of two consecutive blocks. That tear is tolerated.

use crate::oscillator::StereoFrame;
use crate::shared::AtomicF32;
use core::sync::atomic::{AtomicUsize, Ordering};

/// Frames kept per channel
pub const WAVEFORM_CAPACITY: usize = 128;

/// Lock-free stereo trace written one frame at a time
#[derive(Debug)]
pub struct WaveformRing {
    left: [AtomicF32; WAVEFORM_CAPACITY],
    right: [AtomicF32; WAVEFORM_CAPACITY],
    cursor: AtomicUsize,
}

impl WaveformRing {
    pub const fn new() -> Self {
        Self {
            left: [const { AtomicF32::zero() }; WAVEFORM_CAPACITY],
            right: [const { AtomicF32::zero() }; WAVEFORM_CAPACITY],
            cursor: AtomicUsize::new(0),
        }
    }

    pub const fn capacity(&self) -> usize {
        WAVEFORM_CAPACITY
    }

    /// Next slot to be written, always in `[0, capacity)`
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Relaxed)
    }

    /// Store `frame` at the cursor and advance it, wrapping at capacity.
    ///
    /// Only the audio side calls this.
    #[inline]
    pub(crate) fn push(&self, frame: StereoFrame) {
        let index = self.cursor.load(Ordering::Relaxed);
        self.left[index].set(frame.left);
        self.right[index].set(frame.right);
        self.cursor
            .store((index + 1) % WAVEFORM_CAPACITY, Ordering::Relaxed);
    }

    /// Copy the whole buffer in slot order (0..capacity)
    pub fn snapshot(&self) -> WaveformSnapshot {
        let mut snap = WaveformSnapshot::default();
        for i in 0..WAVEFORM_CAPACITY {
            snap.left[i] = self.left[i].get();
            snap.right[i] = self.right[i].get();
        }
        snap.cursor = self.cursor();
        snap
    }
}

impl Default for WaveformRing {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the ring, owned by the reader
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformSnapshot {
    pub left: [f32; WAVEFORM_CAPACITY],
    pub right: [f32; WAVEFORM_CAPACITY],
    /// Write cursor at the time of the copy; the oldest frame lives here
    pub cursor: usize,
}

impl WaveformSnapshot {
    /// Frame stored in slot `index`
    pub fn frame(&self, index: usize) -> StereoFrame {
        StereoFrame {
            left: self.left[index],
            right: self.right[index],
        }
    }

    /// Frames from oldest to newest
    pub fn chronological(&self) -> impl Iterator<Item = StereoFrame> + '_ {
        (0..WAVEFORM_CAPACITY).map(move |i| self.frame((self.cursor + i) % WAVEFORM_CAPACITY))
    }
}

impl Default for WaveformSnapshot {
    fn default() -> Self {
        Self {
            left: [0.0; WAVEFORM_CAPACITY],
            right: [0.0; WAVEFORM_CAPACITY],
            cursor: 0,
        }
    }
}
