//! Benchmarks for the analysis pipeline and the delay path.
//!
//! Run with: cargo bench
//!
//! Cost is uneven across host blocks. Most blocks only run the delay and
//! copy samples into the analysis window; the block that completes a
//! 1024-sample window also pays for one FFT, the note binning and the byte
//! encoding, per channel. At 48kHz a window completes every 21.3ms, so the
//! worst-case block is the one to compare against its deadline
//! (`block_size / 48000` seconds): `dsp/analyzer/analyze` twice plus
//! `dsp/delay` for two channels.
//!
//! Benchmark groups:
//!   - dsp/delay      Feedback delay render per block
//!   - dsp/analyzer   One full analysis cycle, and window accumulation per block
//!   - scenarios/*    The full two-channel effect per host block, with delivery

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Host block sizes; a window completes every 16 to 2 blocks.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(
    benches,
    dsp::bench_delay,
    dsp::bench_analyzer,
    scenarios::bench_effect,
);
criterion_main!(benches);
