//! Note table: ascending frequency thresholds for the note binner.
//!
//! Entry `n` is the upper edge of MIDI note `n`, a quarter tone above its
//! equal-tempered center (A4 = 440 Hz = note 69). A spectrum bin belongs to
//! the first note whose edge lies above the bin frequency.

use crate::{error::ConfigError, NOTE_COUNT};

/// Convert a MIDI note number to its equal-tempered center frequency in Hz.
#[inline]
pub fn midi_note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}

/// Immutable, strictly increasing frequency thresholds (Hz).
#[derive(Debug, Clone, PartialEq)]
pub struct NoteTable {
    thresholds: Box<[f32]>,
}

impl NoteTable {
    /// The 128-entry table covering MIDI notes 0 through 127.
    pub fn equal_tempered() -> Self {
        let quarter_tone = 2.0_f32.powf(1.0 / 24.0);
        let thresholds = (0..NOTE_COUNT as u8)
            .map(|note| midi_note_to_freq(note) * quarter_tone)
            .collect();
        Self { thresholds }
    }

    /// Build a table from caller-supplied thresholds.
    pub fn from_thresholds(thresholds: Vec<f32>) -> Result<Self, ConfigError> {
        if thresholds.is_empty() {
            return Err(ConfigError::EmptyNoteTable);
        }
        if let Some(index) = thresholds
            .windows(2)
            .position(|pair| !(pair[0] < pair[1]))
        {
            return Err(ConfigError::UnorderedNoteTable { index: index + 1 });
        }
        Ok(Self {
            thresholds: thresholds.into_boxed_slice(),
        })
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn threshold(&self, index: usize) -> f32 {
        self.thresholds[index]
    }

    pub fn thresholds(&self) -> &[f32] {
        &self.thresholds
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self::equal_tempered()
    }
}
