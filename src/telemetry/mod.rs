//! Handoff of color frames from the audio thread to a telemetry sink.
//!
//! The audio thread never talks to the sink. It pushes `Copy` frames into a
//! bounded lock-free ring (`rtrb`); a [`Courier`] on another thread drains the
//! ring and calls the sink. When the ring is full the newest frame is dropped
//! and counted, so a slow or failing sink can't stall audio.
//!
//! ```text
//! audio thread                         delivery thread
//! FrameSender::send --[rtrb ring]--> Courier::deliver_pending --> TelemetrySink
//! ```

/// Fixed-size frame and key formatting.
pub mod frame;
/// Sink boundary trait.
pub mod sink;

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rtrb::{Consumer, Producer, PushError, RingBuffer};

pub use frame::{ColorFrame, FrameKey};
pub use sink::{RecordingSink, TelemetrySink};

/// Log the first sink failure and then every this many.
const FAILURE_LOG_INTERVAL: u64 = 1000;

/// Delivery counters shared by both ends of the handoff.
#[derive(Debug, Default)]
pub struct TelemetryStats {
    delivered: AtomicU64,
    dropped_full: AtomicU64,
    dropped_failed: AtomicU64,
}

impl TelemetryStats {
    /// Frames the sink accepted.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Frames dropped on the audio thread because the ring was full.
    pub fn dropped_full(&self) -> u64 {
        self.dropped_full.load(Ordering::Relaxed)
    }

    /// Frames the sink rejected.
    pub fn dropped_failed(&self) -> u64 {
        self.dropped_failed.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped_full() + self.dropped_failed()
    }
}

/// Create a connected sender/courier pair holding up to `capacity` frames.
pub fn frame_channel(capacity: usize) -> (FrameSender, Courier) {
    let (producer, consumer) = RingBuffer::<ColorFrame>::new(capacity);
    let stats = Arc::new(TelemetryStats::default());

    (
        FrameSender {
            producer,
            stats: Arc::clone(&stats),
        },
        Courier {
            consumer,
            stats,
            key: String::with_capacity(16),
        },
    )
}

/// Audio-thread end: never blocks, never allocates.
pub struct FrameSender {
    producer: Producer<ColorFrame>,
    stats: Arc<TelemetryStats>,
}

impl FrameSender {
    /// Queue `payload` for `channel`. Returns `false` if it was dropped.
    #[inline]
    pub fn send(&mut self, channel: usize, payload: &[u8]) -> bool {
        match self.producer.push(ColorFrame::new(channel, payload)) {
            Ok(()) => true,
            Err(PushError::Full(_)) => {
                self.stats.dropped_full.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    pub fn stats(&self) -> &Arc<TelemetryStats> {
        &self.stats
    }

    /// True once the courier has been dropped.
    pub fn is_abandoned(&self) -> bool {
        self.producer.is_abandoned()
    }
}

/// Delivery end: drains queued frames into a sink.
pub struct Courier {
    consumer: Consumer<ColorFrame>,
    stats: Arc<TelemetryStats>,
    key: String,
}

impl Courier {
    pub fn stats(&self) -> &Arc<TelemetryStats> {
        &self.stats
    }

    /// Frames currently waiting.
    pub fn pending(&self) -> usize {
        self.consumer.slots()
    }

    /// Hand every queued frame to `sink`. Returns the number of frames taken
    /// off the ring, delivered or not.
    pub fn deliver_pending<S: TelemetrySink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut taken = 0;
        while let Ok(frame) = self.consumer.pop() {
            taken += 1;

            self.key.clear();
            // Writing to a String cannot fail.
            let _ = write!(self.key, "{}", frame.key());

            match sink.send(&self.key, frame.payload()) {
                Ok(()) => {
                    self.stats.delivered.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) => {
                    let failures = self.stats.dropped_failed.fetch_add(1, Ordering::Relaxed);
                    if failures % FAILURE_LOG_INTERVAL == 0 {
                        log::warn!(
                            "telemetry sink failed for {} ({} failures so far): {}",
                            self.key,
                            failures + 1,
                            err
                        );
                    }
                }
            }
        }
        taken
    }

    /// Deliver on a dedicated thread, polling every `interval`.
    ///
    /// The thread exits once the `FrameSender` is dropped and the ring is
    /// empty, handing the sink back through the join handle.
    pub fn spawn<S>(mut self, mut sink: S, interval: Duration) -> JoinHandle<S>
    where
        S: TelemetrySink + Send + 'static,
    {
        thread::spawn(move || {
            loop {
                self.deliver_pending(&mut sink);
                if self.consumer.is_abandoned() && self.consumer.is_empty() {
                    break;
                }
                thread::sleep(interval);
            }
            log::debug!(
                "telemetry courier stopped: {} delivered, {} dropped",
                self.stats.delivered(),
                self.stats.dropped()
            );
            sink
        })
    }
}
