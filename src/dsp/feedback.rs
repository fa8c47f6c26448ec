use std::sync::Arc;

use crate::{
    dsp::delay::{capacity_for, DelayLine},
    params::DelayParams,
};

/*
Feedback Delay
==============

A single echo tap with regeneration:

  delayed  = line[n - T]
  line[n]  = x[n] + feedback * delayed
  y[n]     = (1 - mix) * x[n] + mix * delayed

T is the delay time converted to whole samples at the current sample rate,
never less than one sample. Parameters are read from the shared
`DelayParams` on every sample, so host changes apply immediately (and can
click; there is no interpolation between old and new values).

Both channel strips own their own `FeedbackDelay` (independent buffers and
cursors) while pointing at the same `DelayParams`.
*/

pub struct FeedbackDelay {
    line: DelayLine,
    params: Arc<DelayParams>,
    sample_rate: f32,
}

impl FeedbackDelay {
    pub fn new(params: Arc<DelayParams>, sample_rate: f32) -> Self {
        Self {
            line: DelayLine::for_sample_rate(sample_rate),
            params,
            sample_rate,
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Change the sample rate. Grows the delay line (clearing it) when the
    /// new rate needs more room for `MAX_DELAY_MS`; allocates, so not for the
    /// audio thread.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        if capacity_for(sample_rate) > self.line.max_delay() + 1 {
            self.line = DelayLine::for_sample_rate(sample_rate);
        }
    }

    pub fn params(&self) -> &Arc<DelayParams> {
        &self.params
    }

    /// Current delay time in whole samples.
    pub fn delay_samples(&self) -> usize {
        let samples = (self.params.delay_ms() / 1000.0 * self.sample_rate).round() as usize;
        samples.clamp(1, self.line.max_delay())
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let feedback = self.params.feedback();
        let mix = self.params.mix();

        let delayed = self.line.read(self.delay_samples());
        self.line.write(input + delayed * feedback);

        input * (1.0 - mix) + delayed * mix
    }

    /// Process `input` into `output` sample by sample.
    pub fn render(&mut self, input: &[f32], output: &mut [f32]) {
        for (out, &x) in output.iter_mut().zip(input) {
            *out = self.next_sample(x);
        }
    }

    pub fn reset(&mut self) {
        self.line.reset();
    }
}
