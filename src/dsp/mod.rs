//! Low-level DSP primitives on the live audio path.
//!
//! These components allocate only at construction and are realtime-safe, so
//! they can sit directly inside a channel strip.

/// Circular sample buffer with integer-sample reads.
pub mod delay;
/// Feedback delay effect reading shared parameters.
pub mod feedback;

pub use delay::DelayLine;
pub use feedback::FeedbackDelay;
