//! Benchmarks for the feedback delay.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use notelight::{dsp::FeedbackDelay, DelayParams};

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");

    let delay_times_ms: &[f32] = &[
        10.0,   // 480 samples at 48kHz
        100.0,  // 4800 samples
        1000.0, // 48000 samples
    ];

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut output = vec![0.0f32; size];

        for &delay_ms in delay_times_ms {
            let params = Arc::new(DelayParams::new(delay_ms, 0.4, 0.5));
            let mut delay = FeedbackDelay::new(params, 48_000.0);
            group.bench_with_input(
                BenchmarkId::new(format!("render_{}ms", delay_ms as u32), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        delay.render(black_box(&input), black_box(&mut output));
                    })
                },
            );
        }
    }

    group.finish();
}
