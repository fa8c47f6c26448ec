pub mod analysis; // Ring buffering, transform, note binning, byte encoding
pub mod config;
pub mod dsp;
pub mod effect; // Channel dispatch, bypass, frame emission
pub mod error;
pub mod host;
pub mod io;
pub mod params;
pub mod telemetry; // Realtime-safe handoff to the frame consumer

pub use config::{EffectConfig, PayloadShape};
pub use effect::AnalyzerEffect;
pub use error::{ConfigError, SinkError};
pub use params::DelayParams;

/// Samples per analysis cycle.
pub const WINDOW_SIZE: usize = 1024;
/// Entries in the note table and in a note-binned frame.
pub const NOTE_COUNT: usize = 128;
/// Largest payload a frame can carry (the bin-indexed variant).
pub const MAX_FRAME_LEN: usize = WINDOW_SIZE / 2;

pub const MAX_BLOCK_SIZE: usize = 2048;
/// Longest delay time; delay lines are sized for it at the current sample rate.
pub const MAX_DELAY_MS: f32 = 2_000.0;
