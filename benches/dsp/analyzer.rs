//! Benchmarks for the per-channel analysis pipeline.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use notelight::{
    analysis::{ChannelAnalyzer, NoteTable},
    PayloadShape, WINDOW_SIZE,
};

use crate::BLOCK_SIZES;

pub fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/analyzer");
    let table = Arc::new(NoteTable::equal_tempered());

    // One full cycle: transform, binning and encoding.
    for payload in [PayloadShape::Notes, PayloadShape::Bins] {
        let mut analyzer =
            ChannelAnalyzer::new(Arc::clone(&table), 48_000.0, WINDOW_SIZE, payload, 1.0);
        for i in 0..WINDOW_SIZE - 1 {
            analyzer.push((i as f32 * 0.05).sin());
        }
        group.bench_function(BenchmarkId::new("analyze", format!("{payload:?}")), |b| {
            b.iter(|| black_box(analyzer.analyze().len()))
        });
    }

    // Accumulation only, as seen by most host blocks.
    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let mut analyzer = ChannelAnalyzer::new(
            Arc::clone(&table),
            48_000.0,
            WINDOW_SIZE,
            PayloadShape::Notes,
            1.0,
        );
        group.bench_with_input(BenchmarkId::new("push", size), &size, |b, _| {
            b.iter(|| {
                let mut frames = 0usize;
                for &x in &input {
                    if analyzer.push(black_box(x)).is_some() {
                        frames += 1;
                    }
                }
                frames
            })
        });
    }

    group.finish();
}
