use std::sync::Arc;

use crate::{
    analysis::{
        binner::{bin_indexed, NoteBinner},
        encoder::IntensityEncoder,
        notes::NoteTable,
        ring::RingAccumulator,
        transform::SpectralTransform,
    },
    config::PayloadShape,
};

/// Everything one channel needs to turn raw input into color frames.
///
/// All buffers are allocated here, once, and overwritten every cycle:
///
/// ```text
/// push(x) -> ring (N complex) -> transform -> magnitudes (N/2)
///         -> binner -> intensities -> encoder -> frame (bytes)
/// ```
pub struct ChannelAnalyzer {
    ring: RingAccumulator,
    transform: SpectralTransform,
    binner: NoteBinner,
    encoder: IntensityEncoder,
    payload: PayloadShape,
    magnitudes: Vec<f32>,
    intensities: Vec<f32>,
    frame: Vec<u8>,
}

impl ChannelAnalyzer {
    pub fn new(
        table: Arc<NoteTable>,
        sample_rate: f32,
        window_size: usize,
        payload: PayloadShape,
        full_scale: f32,
    ) -> Self {
        let transform = SpectralTransform::new(window_size);
        let bins = transform.bin_count();
        let frame_len = payload.frame_len(table.len(), window_size);

        Self {
            ring: RingAccumulator::new(window_size),
            transform,
            binner: NoteBinner::new(table, sample_rate, window_size),
            encoder: IntensityEncoder::new(full_scale),
            payload,
            magnitudes: vec![0.0; bins],
            intensities: vec![0.0; frame_len],
            frame: vec![0; frame_len],
        }
    }

    pub fn window_size(&self) -> usize {
        self.ring.window_size()
    }

    pub fn payload(&self) -> PayloadShape {
        self.payload
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.binner.set_sample_rate(sample_rate);
    }

    /// Feed one input sample. Returns the new frame when it completed a cycle.
    #[inline]
    pub fn push(&mut self, sample: f32) -> Option<&[u8]> {
        if self.ring.push(sample) {
            Some(self.analyze())
        } else {
            None
        }
    }

    /// Run transform, binning and encoding over the current window.
    pub fn analyze(&mut self) -> &[u8] {
        self.transform.process(self.ring.window_mut(), &mut self.magnitudes);

        match self.payload {
            PayloadShape::Notes => self.binner.bin(&self.magnitudes, &mut self.intensities),
            PayloadShape::Bins => bin_indexed(&self.magnitudes, &mut self.intensities),
        }

        self.encoder.encode_into(&mut self.intensities, &mut self.frame);
        &self.frame
    }

    /// Latest encoded frame.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Latest normalized intensities, each in `[0, 1]`.
    pub fn intensities(&self) -> &[f32] {
        &self.intensities
    }

    /// Latest magnitude spectrum.
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Samples still needed before the next frame.
    pub fn samples_until_ready(&self) -> usize {
        self.ring.window_size() - self.ring.cursor()
    }

    pub fn reset(&mut self) {
        self.ring.reset();
        self.magnitudes.fill(0.0);
        self.intensities.fill(0.0);
        self.frame.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn analyzer(payload: PayloadShape) -> ChannelAnalyzer {
        ChannelAnalyzer::new(
            Arc::new(NoteTable::equal_tempered()),
            48_000.0,
            1024,
            payload,
            1.0,
        )
    }

    #[test]
    fn test_silence_yields_zero_frame() {
        let mut analyzer = analyzer(PayloadShape::Notes);
        let mut frames = 0;
        for _ in 0..1024 {
            if let Some(frame) = analyzer.push(0.0) {
                assert_eq!(frame.len(), 128);
                assert!(frame.iter().all(|&b| b == 0));
                frames += 1;
            }
        }
        assert_eq!(frames, 1);
    }

    #[test]
    fn test_tone_lights_its_note() {
        let mut analyzer = analyzer(PayloadShape::Notes);
        // Bin 10 at 48 kHz / 1024 = 468.75 Hz, note 70's band.
        let freq = 468.75;
        let mut frame = None;
        for i in 0..1024 {
            let x = 0.25 * (TAU * freq * i as f32 / 48_000.0).sin();
            if let Some(f) = analyzer.push(x) {
                frame = Some(f.to_vec());
            }
        }
        let frame = frame.expect("one cycle");

        assert_eq!(frame[70], 255);
        let loudest = frame
            .iter()
            .enumerate()
            .max_by_key(|&(_, &b)| b)
            .map(|(i, _)| i);
        assert_eq!(loudest, Some(70));
        assert!(analyzer.intensities().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_bin_payload_has_one_byte_per_bin() {
        let mut analyzer = analyzer(PayloadShape::Bins);
        for _ in 0..1023 {
            assert!(analyzer.push(1.0).is_none());
        }
        let frame = analyzer.push(1.0).expect("cycle").to_vec();
        assert_eq!(frame.len(), 512);
        // DC only: 1024 / sqrt(1024) = 32, saturates
        assert_eq!(frame[0], 255);
        assert!(frame[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_reset_restarts_cycle() {
        let mut analyzer = analyzer(PayloadShape::Notes);
        for _ in 0..100 {
            analyzer.push(0.1);
        }
        assert_eq!(analyzer.samples_until_ready(), 924);
        analyzer.reset();
        assert_eq!(analyzer.samples_until_ready(), 1024);
    }
}
