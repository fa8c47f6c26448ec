use std::fmt;

use crate::MAX_FRAME_LEN;

/// One channel's encoded analysis result, sized for realtime handoff.
///
/// The payload lives inline so a frame can be pushed through the ring
/// without touching the allocator.
#[derive(Clone, Copy)]
pub struct ColorFrame {
    channel: usize,
    len: usize,
    bytes: [u8; MAX_FRAME_LEN],
}

impl ColorFrame {
    /// Copy `payload` into a new frame. Anything past `MAX_FRAME_LEN` is cut off.
    pub fn new(channel: usize, payload: &[u8]) -> Self {
        debug_assert!(payload.len() <= MAX_FRAME_LEN);
        let len = payload.len().min(MAX_FRAME_LEN);
        let mut bytes = [0u8; MAX_FRAME_LEN];
        bytes[..len].copy_from_slice(&payload[..len]);
        Self {
            channel,
            len,
            bytes,
        }
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    pub fn key(&self) -> FrameKey {
        FrameKey(self.channel)
    }

    pub fn payload(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl fmt::Debug for ColorFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorFrame")
            .field("key", &self.key().to_string())
            .field("len", &self.len)
            .finish()
    }
}

/// Sink key for a channel: `"FFT"` followed by the decimal channel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameKey(pub usize);

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FFT{}", self.0)
    }
}
