//! Pitch Quantizer
//!
//! Snaps a continuous frequency onto the active scale. The input is converted
//! to a fractional MIDI note, every scale degree is placed in the input's
//! octave and shifted by the root, and the closest candidate wins. The root
//! itself is always a candidate and is checked first, so it also wins ties.
//!
//! Runs once per audio sample: no allocation, `O(scale size)`.

use crate::scale::{RootNote, Scale};
use libm::Libm;

/// Concert pitch reference (A4)
pub const A4_FREQUENCY: f32 = 440.0;

/// MIDI number of A4
pub const A4_MIDI: f32 = 69.0;

/// Highest MIDI note the quantizer emits
pub const MAX_MIDI: f32 = 127.0;

/// Frequency of MIDI note 0. Inputs at or below this, and NaN, are floored here
/// before the logarithm.
pub const MIN_FREQUENCY: f32 = 8.175_799;

/// Distance (in semitones) under which a note is treated as exactly on a semitone
const SNAP_TOLERANCE: f32 = 1.0e-3;

/// Equal-temperament MIDI note to frequency
#[inline]
pub fn midi_to_frequency(midi: f32) -> f32 {
    A4_FREQUENCY * Libm::<f32>::pow(2.0, (midi - A4_MIDI) / 12.0)
}

/// Equal-temperament frequency to fractional MIDI note
#[inline]
pub fn frequency_to_midi(freq: f32) -> f32 {
    12.0 * Libm::<f32>::log2(freq / A4_FREQUENCY) + A4_MIDI
}

/// Quantize `freq` (Hz) to the nearest candidate of `scale` relative to `root`.
///
/// Candidates are `floor(note / 12) * 12 + offset + root` for each offset in
/// declaration order, with `root` pre-seeded as the initial closest. Only a
/// strictly smaller distance replaces the current choice. The result is
/// clamped to MIDI `[0, 127]`.
pub fn quantize(freq: f32, scale: &Scale, root: RootNote) -> f32 {
    // NaN compares false and falls through to the floor as well
    let freq = if freq > MIN_FREQUENCY {
        freq
    } else {
        MIN_FREQUENCY
    };

    let mut note = frequency_to_midi(freq);
    let nearest_semitone = Libm::<f32>::round(note);
    if Libm::<f32>::fabs(note - nearest_semitone) < SNAP_TOLERANCE {
        note = nearest_semitone;
    }

    let root = root.midi() as f32;
    let octave_base = Libm::<f32>::floor(note / 12.0) * 12.0;

    let mut closest = root;
    let mut closest_dist = Libm::<f32>::fabs(note - root);
    for &offset in scale.offsets {
        let candidate = octave_base + offset as f32 + root;
        let dist = Libm::<f32>::fabs(note - candidate);
        if dist < closest_dist {
            closest = candidate;
            closest_dist = dist;
        }
    }

    midi_to_frequency(closest.clamp(0.0, MAX_MIDI))
}
