use thiserror::Error;

/// Problems detected while configuring the effect.
///
/// These are raised before any audio is processed; the realtime path itself
/// never fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("input/output channel counts differ ({inputs} in, {outputs} out)")]
    ChannelMismatch { inputs: usize, outputs: usize },
    #[error("at least one channel pair is required")]
    NoChannels,
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),
    #[error("full-scale calibration must be positive and finite, got {0}")]
    InvalidFullScale(f32),
    #[error("frame queue capacity must be non-zero")]
    InvalidQueueCapacity,
    #[error("note table is empty")]
    EmptyNoteTable,
    #[error("note table threshold {index} does not increase")]
    UnorderedNoteTable { index: usize },
    #[error("frames of {len} bytes exceed the {max}-byte frame limit")]
    FrameTooLong { len: usize, max: usize },
}

/// Failure reported by a telemetry sink. Non-fatal: the frame is dropped.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink rejected frame: {0}")]
    Rejected(String),
    #[error("sink transport failed")]
    Io(#[from] std::io::Error),
}
