// Purpose - planar audio blocks exchanged with the host

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AudioInput {
    pub buffers: Vec<Vec<f32>>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AudioOutput {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioInput {
    pub fn from_channels(buffers: Vec<Vec<f32>>) -> Self {
        Self { buffers }
    }

    /// `channels` buffers of `frames` zero samples.
    pub fn silence(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    /// Split interleaved frames (`L R L R ...`) into the existing buffers,
    /// resizing each to the frame count. Allocates only when a buffer grows.
    pub fn deinterleave_from(&mut self, interleaved: &[f32], channels: usize) {
        let channels = channels.max(1);
        let frames = interleaved.len() / channels;
        self.buffers.resize_with(channels, Vec::new);
        for (ch, buffer) in self.buffers.iter_mut().enumerate() {
            buffer.clear();
            buffer.extend(interleaved.chunks_exact(channels).map(|frame| frame[ch]));
        }
        debug_assert!(self.buffers.iter().all(|b| b.len() == frames));
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }

    pub fn frames(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }
}

impl AudioOutput {
    pub fn with_shape(channels: usize, frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; frames]; channels],
        }
    }

    /// Zeroed buffers with the same per-channel lengths as `input`.
    pub fn shaped_like(input: &AudioInput) -> Self {
        let mut output = Self::default();
        output.resize_like(input);
        output
    }

    /// Match the channel count and per-channel lengths of `input`.
    pub fn resize_like(&mut self, input: &AudioInput) {
        self.buffers.resize_with(input.channels(), Vec::new);
        for (buffer, source) in self.buffers.iter_mut().zip(&input.buffers) {
            buffer.resize(source.len(), 0.0);
        }
    }

    pub fn channels(&self) -> usize {
        self.buffers.len()
    }
}
