use crate::error::SinkError;

/// Consumer of keyed byte payloads (lighting controller, visualizer, ...).
///
/// Called from the courier, never from the audio thread, so implementations
/// are free to block or allocate. Delivery is best effort: an error drops
/// the frame and nothing is retried.
pub trait TelemetrySink {
    fn send(&mut self, key: &str, payload: &[u8]) -> Result<(), SinkError>;
}

impl<F> TelemetrySink for F
where
    F: FnMut(&str, &[u8]) -> Result<(), SinkError>,
{
    fn send(&mut self, key: &str, payload: &[u8]) -> Result<(), SinkError> {
        self(key, payload)
    }
}

/// Sink that keeps every payload it receives, in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    pub records: Vec<(String, Vec<u8>)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads received under `key`.
    pub fn payloads<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a [u8]> + 'a {
        self.records
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, p)| p.as_slice())
    }
}

impl TelemetrySink for RecordingSink {
    fn send(&mut self, key: &str, payload: &[u8]) -> Result<(), SinkError> {
        self.records.push((key.to_owned(), payload.to_vec()));
        Ok(())
    }
}
