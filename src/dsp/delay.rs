use crate::MAX_DELAY_MS;

pub struct DelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayLine {
    /// Delay line long enough for `MAX_DELAY_MS` at `sample_rate`.
    pub fn for_sample_rate(sample_rate: f32) -> Self {
        Self::with_capacity(capacity_for(sample_rate))
    }

    /// Delay line holding `capacity` samples (at least 2).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(2)],
            write_pos: 0,
        }
    }

    /// Longest delay that can be read back.
    pub fn max_delay(&self) -> usize {
        self.buffer.len() - 1
    }

    /// Sample written `delay_samples` writes ago (1 = most recent).
    pub fn read(&self, delay_samples: usize) -> f32 {
        let len = self.buffer.len();
        let delay_samples = delay_samples.clamp(1, len - 1);
        let read_pos = (self.write_pos + len - delay_samples) % len;
        self.buffer[read_pos]
    }

    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

/// Buffer length that can read back `MAX_DELAY_MS` at `sample_rate`.
pub fn capacity_for(sample_rate: f32) -> usize {
    (MAX_DELAY_MS / 1000.0 * sample_rate).ceil() as usize + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_returns_past_writes() {
        let mut line = DelayLine::with_capacity(8);
        for s in [1.0, 2.0, 3.0] {
            line.write(s);
        }
        assert_eq!(line.read(1), 3.0);
        assert_eq!(line.read(3), 1.0);
        assert_eq!(line.read(4), 0.0);
    }

    #[test]
    fn test_wraps_around() {
        let mut line = DelayLine::with_capacity(4);
        for s in 1..=6 {
            line.write(s as f32);
        }
        assert_eq!(line.read(1), 6.0);
        assert_eq!(line.read(3), 4.0);
    }

    #[test]
    fn test_delay_clamped_to_capacity() {
        let mut line = DelayLine::with_capacity(4);
        for s in 1..=4 {
            line.write(s as f32);
        }
        assert_eq!(line.read(100), line.read(line.max_delay()));
        assert_eq!(line.read(0), line.read(1));
    }

    #[test]
    fn test_sized_for_max_delay() {
        assert_eq!(DelayLine::for_sample_rate(48_000.0).max_delay(), 96_000);
        assert_eq!(DelayLine::for_sample_rate(192_000.0).max_delay(), 384_000);
    }

    #[test]
    fn test_reset_clears() {
        let mut line = DelayLine::with_capacity(4);
        line.write(1.0);
        line.reset();
        assert_eq!(line.read(1), 0.0);
    }
}
