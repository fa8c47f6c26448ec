//! The two-channel effect: delay on the output path, analysis on the input.
//!
//! ```text
//!            ┌──> FeedbackDelay ───────────────────────────> output[ch]
//! input[ch] ─┤
//!            └──> ChannelAnalyzer ──(every WINDOW_SIZE)──> FrameSender ("FFT{ch}")
//! ```
//!
//! There are exactly two strips. Even channel indices use the left strip, odd
//! indices the right one; hosts with more than two channels share strips by
//! parity. The analyzer always sees the unprocessed input, never the delayed
//! signal.

use std::sync::Arc;

use crate::{
    analysis::{ChannelAnalyzer, NoteTable},
    config::{validate_sample_rate, EffectConfig},
    dsp::FeedbackDelay,
    error::ConfigError,
    host::{HostCapabilities, TimeInfo},
    io::{AudioInput, AudioOutput},
    params::DelayParams,
    telemetry::{FrameSender, TelemetryStats},
    WINDOW_SIZE,
};

/// Delay and analyzer pair serving one channel parity.
pub struct ChannelStrip {
    delay: FeedbackDelay,
    analyzer: ChannelAnalyzer,
}

impl ChannelStrip {
    fn new(config: &EffectConfig, params: Arc<DelayParams>, table: Arc<NoteTable>) -> Self {
        Self {
            delay: FeedbackDelay::new(params, config.sample_rate),
            analyzer: ChannelAnalyzer::new(
                table,
                config.sample_rate,
                WINDOW_SIZE,
                config.payload,
                config.full_scale,
            ),
        }
    }

    pub fn delay(&self) -> &FeedbackDelay {
        &self.delay
    }

    pub fn analyzer(&self) -> &ChannelAnalyzer {
        &self.analyzer
    }

    fn process(
        &mut self,
        channel: usize,
        input: &[f32],
        output: &mut [f32],
        frames: &mut FrameSender,
    ) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "block length mismatch on channel {channel}"
        );

        for (out, &x) in output.iter_mut().zip(input) {
            *out = self.delay.next_sample(x);
            if let Some(frame) = self.analyzer.push(x) {
                frames.send(channel, frame);
            }
        }

        if output.len() > input.len() {
            output[input.len()..].fill(0.0);
        }
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.delay.set_sample_rate(sample_rate);
        self.analyzer.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.delay.reset();
        self.analyzer.reset();
    }
}

pub struct AnalyzerEffect {
    left: ChannelStrip,
    right: ChannelStrip,
    frames: FrameSender,
    config: EffectConfig,
    params: Arc<DelayParams>,
    bypass: bool,
    host: Option<HostCapabilities>,
    /// Cleared at the start of every block, filled lazily by `time_info()`.
    time_info: Option<TimeInfo>,
}

impl AnalyzerEffect {
    /// Build the effect with the standard equal-tempered note table.
    ///
    /// `frames` is the audio-side end of [`frame_channel`](crate::telemetry::frame_channel).
    pub fn new(
        config: EffectConfig,
        params: Arc<DelayParams>,
        frames: FrameSender,
    ) -> Result<Self, ConfigError> {
        Self::with_note_table(config, params, Arc::new(NoteTable::equal_tempered()), frames)
    }

    pub fn with_note_table(
        config: EffectConfig,
        params: Arc<DelayParams>,
        table: Arc<NoteTable>,
        frames: FrameSender,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        config.validate_note_table(&table)?;

        if config.input_channels > 2 {
            log::warn!(
                "{} channels requested; channels share the two strips by parity",
                config.input_channels
            );
        }
        log::info!(
            "analyzer effect: {} channels @ {} Hz, window {}, {:?} payload, full scale {}",
            config.input_channels,
            config.sample_rate,
            WINDOW_SIZE,
            config.payload,
            config.full_scale
        );

        Ok(Self {
            left: ChannelStrip::new(&config, Arc::clone(&params), Arc::clone(&table)),
            right: ChannelStrip::new(&config, Arc::clone(&params), table),
            frames,
            config,
            params,
            bypass: false,
            host: None,
            time_info: None,
        })
    }

    /// Second initialization phase: take the host's services.
    pub fn attach(&mut self, host: HostCapabilities) {
        log::info!("host attached: {:?}", host);
        self.host = Some(host);
        self.time_info = None;
    }

    pub fn is_attached(&self) -> bool {
        self.host.is_some()
    }

    /// Host transport info for the current block, fetched on first use.
    pub fn time_info(&mut self) -> Option<TimeInfo> {
        if self.time_info.is_none() {
            let sequencer = self.host.as_ref().and_then(HostCapabilities::sequencer);
            self.time_info = sequencer.and_then(|s| s.time_info());
        }
        self.time_info
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn params(&self) -> &Arc<DelayParams> {
        &self.params
    }

    pub fn telemetry_stats(&self) -> &Arc<TelemetryStats> {
        self.frames.stats()
    }

    pub fn bypass(&self) -> bool {
        self.bypass
    }

    pub fn set_bypass(&mut self, bypass: bool) {
        self.bypass = bypass;
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    /// Propagate a new host sample rate to both strips. Not for the audio thread.
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<(), ConfigError> {
        validate_sample_rate(sample_rate)?;
        log::debug!("sample rate {} -> {}", self.config.sample_rate, sample_rate);
        self.config.sample_rate = sample_rate;
        self.left.set_sample_rate(sample_rate);
        self.right.set_sample_rate(sample_rate);
        Ok(())
    }

    /// Strip serving `channel` (even = left, odd = right).
    pub fn strip(&self, channel: usize) -> &ChannelStrip {
        if channel % 2 == 0 {
            &self.left
        } else {
            &self.right
        }
    }

    /// Clear delay buffers and restart both analysis windows.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
    }

    /// Process one host block.
    ///
    /// `inputs` and `outputs` hold one buffer per channel, in channel order.
    /// With bypass engaged the input is copied through and the analyzers do
    /// not see the block at all.
    pub fn process<I, O>(&mut self, inputs: &[I], outputs: &mut [O])
    where
        I: AsRef<[f32]>,
        O: AsMut<[f32]>,
    {
        self.time_info = None;

        debug_assert_eq!(inputs.len(), outputs.len());
        debug_assert_eq!(inputs.len(), self.config.input_channels);

        if self.bypass {
            for (input, output) in inputs.iter().zip(outputs.iter_mut()) {
                let (input, output) = (input.as_ref(), output.as_mut());
                let n = input.len().min(output.len());
                output[..n].copy_from_slice(&input[..n]);
            }
            return;
        }

        for (channel, (input, output)) in inputs.iter().zip(outputs.iter_mut()).enumerate() {
            let strip = if channel % 2 == 0 {
                &mut self.left
            } else {
                &mut self.right
            };
            strip.process(channel, input.as_ref(), output.as_mut(), &mut self.frames);
        }
    }

    pub fn process_block(&mut self, input: &AudioInput, output: &mut AudioOutput) {
        self.process(&input.buffers, &mut output.buffers);
    }
}
