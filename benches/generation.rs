//! Generation Benchmarks
//!
//! Throughput of the per-sample chain and of a complete run.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use smpte_pink::dsp::{PrngTier, SignalChain};
use smpte_pink::engine::{generate, GenerationConfig, SampleRate};

fn benchmark_signal_chain(c: &mut Criterion) {
    c.bench_function("chain_48k_one_period", |b| {
        b.iter(|| {
            let chain = SignalChain::new(PrngTier::STANDARD, 48_000.0);
            black_box(chain.take(PrngTier::STANDARD.period as usize).sum::<f64>())
        })
    });
}

fn benchmark_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    group.sample_size(10);

    group.bench_function("48k_stereo_1s", |b| {
        let config = GenerationConfig::new(SampleRate::Hz48000, 1.0).with_channels(2);
        b.iter(|| generate(black_box(config)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, benchmark_signal_chain, benchmark_full_run);
criterion_main!(benches);
