//! Scale Catalog
//!
//! The fixed set of scales the quantizer can snap to, the pitch-class labels
//! shown on the display, and the two wrap-around selectors (scale index and
//! root note) that the menu edits.

use core::fmt;

/// Number of pitch classes per octave
pub const NOTES_PER_OCTAVE: u8 = 12;

/// Number of octaves the root note can span
pub const ROOT_OCTAVES: u8 = 9;

/// Size of the root note domain (MIDI 0..=107)
pub const ROOT_NOTE_COUNT: u8 = NOTES_PER_OCTAVE * ROOT_OCTAVES;

/// A named set of semitone offsets, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub name: &'static str,
    pub offsets: &'static [u8],
}

/// All selectable scales. Index 0 is the boot default.
pub const SCALES: [Scale; 3] = [
    Scale {
        name: "Major",
        offsets: &[0, 2, 4, 5, 7, 9, 11],
    },
    Scale {
        name: "Minor",
        offsets: &[0, 2, 3, 5, 7, 8, 10],
    },
    Scale {
        name: "Pentatonic",
        offsets: &[0, 2, 5, 7, 9],
    },
];

/// Number of scales in the catalog
pub const SCALE_COUNT: usize = SCALES.len();

/// Display name of each pitch class, C first
pub const NOTE_LABELS: [&str; NOTES_PER_OCTAVE as usize] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Index into [`SCALES`], always in `[0, SCALE_COUNT)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ScaleIndex(u8);

impl ScaleIndex {
    /// Build from any integer, wrapping into the catalog
    pub const fn new(index: usize) -> Self {
        Self((index % SCALE_COUNT) as u8)
    }

    pub const fn get(self) -> usize {
        self.0 as usize
    }

    pub fn scale(self) -> &'static Scale {
        &SCALES[self.get()]
    }

    pub fn next(self) -> Self {
        Self::new(self.get() + 1)
    }

    pub fn prev(self) -> Self {
        Self::new(self.get() + SCALE_COUNT - 1)
    }
}

/// Root note as a MIDI number, always in `[0, ROOT_NOTE_COUNT)`
///
/// `Display` renders the pitch-class label followed by `midi / 12`, so MIDI 69
/// shows as `A5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootNote(u8);

impl RootNote {
    /// A4, the boot default
    pub const A4: Self = Self(69);

    /// Build from any MIDI number, wrapping into the root domain
    pub const fn new(midi: u8) -> Self {
        Self(midi % ROOT_NOTE_COUNT)
    }

    pub const fn midi(self) -> u8 {
        self.0
    }

    pub const fn pitch_class(self) -> u8 {
        self.0 % NOTES_PER_OCTAVE
    }

    pub const fn octave(self) -> u8 {
        self.0 / NOTES_PER_OCTAVE
    }

    pub fn label(self) -> &'static str {
        NOTE_LABELS[self.pitch_class() as usize]
    }

    pub fn next(self) -> Self {
        Self((self.0 + 1) % ROOT_NOTE_COUNT)
    }

    pub fn prev(self) -> Self {
        Self((self.0 + ROOT_NOTE_COUNT - 1) % ROOT_NOTE_COUNT)
    }
}

impl Default for RootNote {
    fn default() -> Self {
        Self::A4
    }
}

impl fmt::Display for RootNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.label(), self.octave())
    }
}
