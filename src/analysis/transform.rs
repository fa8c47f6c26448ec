use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner, Length};

/// Center frequency (Hz) of spectrum bin `bin` for a `window_size`-point transform.
#[inline]
pub fn bin_frequency(bin: usize, sample_rate: f32, window_size: usize) -> f32 {
    bin as f32 * sample_rate / window_size as f32
}

/// Forward FFT producing the magnitude spectrum below Nyquist.
///
/// No window function is applied: the raw window goes straight into the
/// transform, so tones that do not land on a bin center leak into their
/// neighbours. The downstream calibration assumes this.
///
/// Magnitudes use symmetric scaling, `|X[i]| / sqrt(N)`.
pub struct SpectralTransform {
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    scale: f32,
}

impl SpectralTransform {
    pub fn new(window_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        Self {
            fft,
            scratch,
            scale: 1.0 / (window_size as f32).sqrt(),
        }
    }

    pub fn window_size(&self) -> usize {
        self.fft.len()
    }

    /// Number of magnitude bins produced (`window_size / 2`).
    pub fn bin_count(&self) -> usize {
        self.fft.len() / 2
    }

    /// Transform `buffer` in place and write `bin_count()` magnitudes to `magnitudes`.
    ///
    /// `buffer` must hold exactly `window_size()` samples; its contents are
    /// replaced by the complex spectrum.
    pub fn process(&mut self, buffer: &mut [Complex<f32>], magnitudes: &mut [f32]) {
        debug_assert_eq!(buffer.len(), self.fft.len());
        debug_assert!(magnitudes.len() >= self.bin_count());

        self.fft.process_with_scratch(buffer, &mut self.scratch);

        for (mag, bin) in magnitudes.iter_mut().zip(&buffer[..self.bin_count()]) {
            *mag = bin.norm() * self.scale;
        }
    }
}
