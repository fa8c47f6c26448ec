//! Construction-time configuration for [`AnalyzerEffect`](crate::AnalyzerEffect).
//!
//! The window size is a compile-time constant; everything here is decided
//! once by the host before the first block is processed.

use crate::{analysis::NoteTable, error::ConfigError, MAX_FRAME_LEN, WINDOW_SIZE};

/// Shape of the byte payload sent for each completed analysis cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PayloadShape {
    /// One byte per note table entry (128 bytes with the standard table).
    #[default]
    Notes,
    /// One byte per magnitude bin below Nyquist (`WINDOW_SIZE / 2` bytes).
    Bins,
}

impl PayloadShape {
    /// Number of bytes in a frame of this shape, for a table of `note_count`
    /// entries and a `window_size`-point transform.
    pub fn frame_len(self, note_count: usize, window_size: usize) -> usize {
        match self {
            PayloadShape::Notes => note_count,
            PayloadShape::Bins => window_size / 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectConfig {
    pub input_channels: usize,
    pub output_channels: usize,
    pub sample_rate: f32,
    pub payload: PayloadShape,
    /// Magnitude that maps to a full byte (255). Tuned by ear against the
    /// scaled FFT magnitude, not a physical unit.
    pub full_scale: f32,
    /// Frames buffered between the audio thread and the sink before drops.
    pub queue_capacity: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            input_channels: 2,
            output_channels: 2,
            sample_rate: 48_000.0,
            payload: PayloadShape::Notes,
            full_scale: 1.0,
            queue_capacity: 32,
        }
    }
}

impl EffectConfig {
    pub fn with_channels(mut self, inputs: usize, outputs: usize) -> Self {
        self.input_channels = inputs;
        self.output_channels = outputs;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_payload(mut self, payload: PayloadShape) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_full_scale(mut self, full_scale: f32) -> Self {
        self.full_scale = full_scale;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Check the preconditions the realtime path relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_channels != self.output_channels {
            return Err(ConfigError::ChannelMismatch {
                inputs: self.input_channels,
                outputs: self.output_channels,
            });
        }
        if self.input_channels == 0 {
            return Err(ConfigError::NoChannels);
        }
        validate_sample_rate(self.sample_rate)?;
        if !(self.full_scale.is_finite() && self.full_scale > 0.0) {
            return Err(ConfigError::InvalidFullScale(self.full_scale));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::InvalidQueueCapacity);
        }
        Ok(())
    }

    /// Check that frames built from `table` fit in a telemetry frame.
    pub fn validate_note_table(&self, table: &NoteTable) -> Result<(), ConfigError> {
        let len = self.payload.frame_len(table.len(), WINDOW_SIZE);
        if len > MAX_FRAME_LEN {
            return Err(ConfigError::FrameTooLong {
                len,
                max: MAX_FRAME_LEN,
            });
        }
        Ok(())
    }
}

pub(crate) fn validate_sample_rate(sample_rate: f32) -> Result<(), ConfigError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSampleRate(sample_rate))
    }
}
