use rustfft::num_complex::Complex;

/// Fixed-size analysis buffer filled one sample at a time.
///
/// Samples are stored as complex values (zero imaginary part) so the
/// transform can run in place once the window is full. `push` reports a
/// completed cycle exactly when the cursor wraps back to zero, i.e. after
/// every `window_size`-th sample, no matter how the host slices its blocks.
pub struct RingAccumulator {
    buffer: Vec<Complex<f32>>,
    cursor: usize,
}

impl RingAccumulator {
    pub fn new(window_size: usize) -> Self {
        Self {
            buffer: vec![Complex::new(0.0, 0.0); window_size.max(1)],
            cursor: 0,
        }
    }

    pub fn window_size(&self) -> usize {
        self.buffer.len()
    }

    /// Next write position, always in `[0, window_size)`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Store one sample. Returns `true` when this sample completed a window.
    #[inline]
    pub fn push(&mut self, sample: f32) -> bool {
        self.buffer[self.cursor] = Complex::new(sample, 0.0);
        self.cursor += 1;
        if self.cursor == self.buffer.len() {
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    /// The full window. Only meaningful right after `push` returned `true`.
    pub fn window(&self) -> &[Complex<f32>] {
        &self.buffer
    }

    /// Mutable access for in-place transforms; the next cycle overwrites it.
    pub fn window_mut(&mut self) -> &mut [Complex<f32>] {
        &mut self.buffer
    }

    pub fn reset(&mut self) {
        self.buffer.fill(Complex::new(0.0, 0.0));
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Push `blocks` of the given lengths; returns the global sample offsets
    /// (1-based count of samples consumed) at which a cycle completed.
    fn ready_offsets(ring: &mut RingAccumulator, blocks: &[usize]) -> Vec<usize> {
        let mut offsets = Vec::new();
        let mut consumed = 0;
        for &len in blocks {
            for _ in 0..len {
                consumed += 1;
                if ring.push(consumed as f32) {
                    offsets.push(consumed);
                }
            }
        }
        offsets
    }

    #[test]
    fn test_full_window_fires_once() {
        let mut ring = RingAccumulator::new(1024);
        assert_eq!(ready_offsets(&mut ring, &[1024]), vec![1024]);
        assert_eq!(ring.cursor(), 0);
    }

    #[test]
    fn test_one_short_never_fires() {
        let mut ring = RingAccumulator::new(1024);
        assert!(ready_offsets(&mut ring, &[1023]).is_empty());
        assert_eq!(ring.cursor(), 1023);
    }

    #[test]
    fn test_irregular_blocks_fire_on_window_boundaries() {
        let mut ring = RingAccumulator::new(64);
        let blocks = [7, 100, 1, 33, 64, 13, 90];
        let total: usize = blocks.iter().sum();

        let offsets = ready_offsets(&mut ring, &blocks);

        assert_eq!(offsets.len(), total / 64);
        for (k, offset) in offsets.iter().enumerate() {
            assert_eq!(*offset, (k + 1) * 64);
        }
        assert_eq!(ring.cursor(), total % 64);
    }

    #[test]
    fn test_window_holds_last_cycle_in_order() {
        let mut ring = RingAccumulator::new(4);
        let mut fired = false;
        for s in 1..=6 {
            if ring.push(s as f32) {
                fired = true;
                let reals: Vec<f32> = ring.window().iter().map(|c| c.re).collect();
                assert_eq!(reals, vec![1.0, 2.0, 3.0, 4.0]);
                assert!(ring.window().iter().all(|c| c.im == 0.0));
            }
        }
        assert!(fired);
        assert_eq!(ring.cursor(), 2);
    }

    #[test]
    fn test_reset_rewinds_cursor() {
        let mut ring = RingAccumulator::new(8);
        ring.push(1.0);
        ring.push(1.0);
        ring.reset();
        assert_eq!(ring.cursor(), 0);
        assert!(ring.window().iter().all(|c| c.re == 0.0));
    }
}
