//! Shared Context
//!
//! State crossing between the real-time audio context and the cooperative UI
//! context. Each datum has exactly one writer and one reader:
//!
//! | Datum        | Writer | Reader |
//! |--------------|--------|--------|
//! | scale index  | UI     | audio  |
//! | root note    | UI     | audio  |
//! | waveform ring| audio  | UI     |
//!
//! Ownership is enforced by the two handles returned from
//! [`SharedContext::split`]: only [`UiSide`] can change the selection and only
//! [`AudioSide`] can push frames. All accesses are `Relaxed`; there is no lock
//! and no fence, so a reader may lag its writer by up to one block.

use crate::oscillator::StereoFrame;
use crate::scale::{RootNote, ScaleIndex};
use crate::scope::{WaveformRing, WaveformSnapshot};
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// Atomic f32 for lock-free communication between contexts
///
/// Uses AtomicU32 internally since there's no native AtomicF32.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    /// Zero-initialized, usable in `const` and `static` items
    pub const fn zero() -> Self {
        Self(AtomicU32::new(0))
    }

    pub fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn set(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::zero()
    }
}

/// Current quantizer selection, as read by the audio path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub scale: ScaleIndex,
    pub root: RootNote,
}

/// Everything shared between the audio and UI contexts
///
/// Lives for the whole process, typically in a `static`.
#[derive(Debug)]
pub struct SharedContext {
    scale: AtomicU8,
    root: AtomicU8,
    scope: WaveformRing,
    taken: AtomicBool,
}

impl SharedContext {
    /// Boot defaults: first scale, root A4, empty trace
    pub const fn new() -> Self {
        Self {
            scale: AtomicU8::new(0),
            root: AtomicU8::new(RootNote::A4.midi()),
            scope: WaveformRing::new(),
            taken: AtomicBool::new(false),
        }
    }

    /// Hand out the audio and UI handles. Returns `None` after the first call.
    pub fn split(&self) -> Option<(AudioSide<'_>, UiSide<'_>)> {
        if self.taken.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some((AudioSide { ctx: self }, UiSide { ctx: self }))
    }

    fn selection(&self) -> Selection {
        Selection {
            scale: ScaleIndex::new(self.scale.load(Ordering::Relaxed) as usize),
            root: RootNote::new(self.root.load(Ordering::Relaxed)),
        }
    }
}

impl Default for SharedContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Audio-context view: reads the selection, writes the waveform trace
#[derive(Debug)]
pub struct AudioSide<'a> {
    ctx: &'a SharedContext,
}

impl AudioSide<'_> {
    #[inline]
    pub fn selection(&self) -> Selection {
        self.ctx.selection()
    }

    #[inline]
    pub fn push_frame(&self, frame: StereoFrame) {
        self.ctx.scope.push(frame);
    }
}

/// UI-context view: writes the selection, reads the waveform trace
#[derive(Debug)]
pub struct UiSide<'a> {
    ctx: &'a SharedContext,
}

impl UiSide<'_> {
    pub fn selection(&self) -> Selection {
        self.ctx.selection()
    }

    pub fn set_scale(&self, scale: ScaleIndex) {
        self.ctx.scale.store(scale.get() as u8, Ordering::Relaxed);
    }

    pub fn set_root(&self, root: RootNote) {
        self.ctx.root.store(root.midi(), Ordering::Relaxed);
    }

    pub fn set_selection(&self, selection: Selection) {
        self.set_scale(selection.scale);
        self.set_root(selection.root);
    }

    pub fn scope(&self) -> WaveformSnapshot {
        self.ctx.scope.snapshot()
    }

    pub fn scope_cursor(&self) -> usize {
        self.ctx.scope.cursor()
    }
}
