//! Benchmarks for individual processing stages.

mod analyzer;
mod delay;

pub use analyzer::bench_analyzer;
pub use delay::bench_delay;
