//! Real-world benchmark scenarios.

mod effect;

pub use effect::bench_effect;
