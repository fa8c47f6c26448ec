//! Spectral analysis pipeline.
//!
//! Raw input samples are gathered into fixed windows, transformed, folded
//! onto the note table and packed into bytes. Every stage works on buffers
//! owned by a single [`ChannelAnalyzer`], so nothing allocates once the
//! analyzer is built.

/// Per-channel owner of the whole pipeline.
pub mod analyzer;
/// Spectrum-to-note mapping.
pub mod binner;
/// Saturating byte encoding.
pub mod encoder;
/// Equal-tempered note thresholds.
pub mod notes;
/// Window accumulation across host blocks.
pub mod ring;
/// Forward FFT and magnitude extraction.
pub mod transform;

pub use analyzer::ChannelAnalyzer;
pub use binner::NoteBinner;
pub use encoder::IntensityEncoder;
pub use notes::NoteTable;
pub use ring::RingAccumulator;
pub use transform::SpectralTransform;
