//! Delay parameters shared between the host and both channel strips.
//!
//! One `DelayParams` lives behind an `Arc`: the host (or UI thread) writes it,
//! the audio thread reads it once per sample. Values are stored as f32 bit
//! patterns in atomics so neither side ever blocks. Changes land on the next
//! sample with no smoothing, so large jumps in delay time can click.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::MAX_DELAY_MS;

pub const MAX_FEEDBACK: f32 = 0.98;

#[inline]
fn load(cell: &AtomicU32) -> f32 {
    f32::from_bits(cell.load(Ordering::Relaxed))
}

#[inline]
fn store(cell: &AtomicU32, value: f32) {
    cell.store(value.to_bits(), Ordering::Relaxed);
}

/// Plain copy of the parameter values, for persistence and display.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelayParamsSnapshot {
    pub delay_ms: f32,
    pub feedback: f32,
    pub mix: f32,
}

impl Default for DelayParamsSnapshot {
    fn default() -> Self {
        Self {
            delay_ms: 250.0,
            feedback: 0.35,
            mix: 0.3,
        }
    }
}

/// Lock-free delay time / feedback / dry-wet mix.
pub struct DelayParams {
    delay_ms: AtomicU32,
    feedback: AtomicU32,
    mix: AtomicU32,
}

impl DelayParams {
    /// Create a parameter set.
    ///
    /// - `delay_ms`: delay time in milliseconds (0 - `MAX_DELAY_MS`)
    /// - `feedback`: amount of the delayed signal fed back (0.0 - 0.98)
    /// - `mix`: dry/wet blend (0.0 = dry, 1.0 = wet)
    pub fn new(delay_ms: f32, feedback: f32, mix: f32) -> Self {
        let params = Self {
            delay_ms: AtomicU32::new(0),
            feedback: AtomicU32::new(0),
            mix: AtomicU32::new(0),
        };
        params.set_delay_ms(delay_ms);
        params.set_feedback(feedback);
        params.set_mix(mix);
        params
    }

    pub fn delay_ms(&self) -> f32 {
        load(&self.delay_ms)
    }

    pub fn feedback(&self) -> f32 {
        load(&self.feedback)
    }

    pub fn mix(&self) -> f32 {
        load(&self.mix)
    }

    pub fn set_delay_ms(&self, delay_ms: f32) {
        store(&self.delay_ms, sanitize(delay_ms).clamp(0.0, MAX_DELAY_MS));
    }

    pub fn set_feedback(&self, feedback: f32) {
        store(&self.feedback, sanitize(feedback).clamp(0.0, MAX_FEEDBACK));
    }

    pub fn set_mix(&self, mix: f32) {
        store(&self.mix, sanitize(mix).clamp(0.0, 1.0));
    }

    pub fn snapshot(&self) -> DelayParamsSnapshot {
        DelayParamsSnapshot {
            delay_ms: self.delay_ms(),
            feedback: self.feedback(),
            mix: self.mix(),
        }
    }

    pub fn apply(&self, snapshot: DelayParamsSnapshot) {
        self.set_delay_ms(snapshot.delay_ms);
        self.set_feedback(snapshot.feedback);
        self.set_mix(snapshot.mix);
    }
}

impl Default for DelayParams {
    fn default() -> Self {
        let snapshot = DelayParamsSnapshot::default();
        Self::new(snapshot.delay_ms, snapshot.feedback, snapshot.mix)
    }
}

impl From<DelayParamsSnapshot> for DelayParams {
    fn from(snapshot: DelayParamsSnapshot) -> Self {
        Self::new(snapshot.delay_ms, snapshot.feedback, snapshot.mix)
    }
}

impl std::fmt::Debug for DelayParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelayParams")
            .field("delay_ms", &self.delay_ms())
            .field("feedback", &self.feedback())
            .field("mix", &self.mix())
            .finish()
    }
}

// NaN would survive clamp(); treat it as zero.
fn sanitize(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_setters_clamp() {
        let params = DelayParams::new(10_000.0, 4.0, -1.0);
        assert_eq!(params.delay_ms(), MAX_DELAY_MS);
        assert_eq!(params.feedback(), MAX_FEEDBACK);
        assert_eq!(params.mix(), 0.0);

        params.set_feedback(f32::NAN);
        assert_eq!(params.feedback(), 0.0);
    }

    #[test]
    fn test_shared_updates_are_visible() {
        let params = Arc::new(DelayParams::default());
        let writer = Arc::clone(&params);

        std::thread::spawn(move || writer.set_mix(0.75))
            .join()
            .unwrap();

        assert_eq!(params.mix(), 0.75);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let params = DelayParams::default();
        let snapshot = DelayParamsSnapshot {
            delay_ms: 120.0,
            feedback: 0.5,
            mix: 1.0,
        };
        params.apply(snapshot);
        assert_eq!(params.snapshot(), snapshot);
    }
}
