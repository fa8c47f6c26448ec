//! Services the host hands over after construction.
//!
//! The effect is built with no host dependency at all; once the host is
//! ready it calls [`AnalyzerEffect::attach`](crate::AnalyzerEffect::attach)
//! with whatever capabilities it offers.

use std::fmt;
use std::sync::Arc;

/// Transport position reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInfo {
    /// Position of the current block's first sample, in samples.
    pub sample_position: f64,
    pub sample_rate: f64,
    pub tempo_bpm: Option<f64>,
    pub playing: bool,
}

/// Host transport query. May be slow; called at most once per block.
pub trait HostSequencer: Send + Sync {
    fn time_info(&self) -> Option<TimeInfo>;
}

impl<F> HostSequencer for F
where
    F: Fn() -> Option<TimeInfo> + Send + Sync,
{
    fn time_info(&self) -> Option<TimeInfo> {
        self()
    }
}

#[derive(Clone, Default)]
pub struct HostCapabilities {
    sequencer: Option<Arc<dyn HostSequencer>>,
}

impl HostCapabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sequencer(mut self, sequencer: Arc<dyn HostSequencer>) -> Self {
        self.sequencer = Some(sequencer);
        self
    }

    pub fn sequencer(&self) -> Option<&Arc<dyn HostSequencer>> {
        self.sequencer.as_ref()
    }
}

impl fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("sequencer", &self.sequencer.is_some())
            .finish()
    }
}
