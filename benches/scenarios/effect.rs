//! Full two-channel effect per host block, with a courier draining frames.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion};
use notelight::{
    io::{AudioInput, AudioOutput},
    telemetry::{frame_channel, RecordingSink},
    AnalyzerEffect, DelayParams, EffectConfig,
};

use crate::BLOCK_SIZES;

pub fn bench_effect(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/effect");

    for &size in BLOCK_SIZES {
        let tone: Vec<f32> = (0..size).map(|i| (i as f32 * 0.07).sin() * 0.5).collect();
        let input = AudioInput::from_channels(vec![tone.clone(), tone]);
        let mut output = AudioOutput::with_shape(2, size);

        for bypass in [false, true] {
            let (tx, mut courier) = frame_channel(64);
            let mut effect =
                AnalyzerEffect::new(EffectConfig::default(), Arc::new(DelayParams::default()), tx)
                    .expect("default config is valid");
            effect.set_bypass(bypass);
            let mut sink = RecordingSink::new();

            let name = if bypass { "bypass" } else { "process" };
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    effect.process_block(black_box(&input), black_box(&mut output));
                    courier.deliver_pending(&mut sink);
                    sink.records.clear();
                })
            });
        }
    }

    group.finish();
}
