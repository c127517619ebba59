use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use weather_dashboard::generators::RecordSynthesizer;
use weather_dashboard::models::WeatherTable;
use weather_dashboard::{AggregationEngine, Metric, ParallelEngine, SequentialEngine};

fn synthetic_table(records: usize) -> WeatherTable {
    WeatherTable::new(RecordSynthesizer::new().with_seed(42).synthesize(records))
}

fn benchmark_synthesizer(c: &mut Criterion) {
    let synthesizer = RecordSynthesizer::new().with_seed(7);

    c.bench_function("synthesize_1000", |b| {
        b.iter(|| black_box(synthesizer.synthesize(black_box(1000)).len()))
    });
}

fn benchmark_location_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("location_statistics_by_size");
    let parallel = ParallelEngine::new(num_cpus::get()).expect("Failed to build rayon pool");
    let sequential = SequentialEngine::new();

    for &size in &[1_000, 10_000, 100_000] {
        let table = synthetic_table(size);

        group.bench_with_input(BenchmarkId::new("parallel", size), &table, |b, table| {
            b.iter(|| black_box(parallel.location_statistics(table).map(|r| r.len())))
        });
        group.bench_with_input(BenchmarkId::new("sequential", size), &table, |b, table| {
            b.iter(|| black_box(sequential.location_statistics(table).map(|r| r.len())))
        });
    }

    group.finish();
}

fn benchmark_every_metric(c: &mut Criterion) {
    let table = synthetic_table(20_000);
    let engines: Vec<Box<dyn AggregationEngine>> = vec![
        Box::new(ParallelEngine::new(num_cpus::get()).expect("Failed to build rayon pool")),
        Box::new(SequentialEngine::new()),
    ];

    let mut group = c.benchmark_group("metrics_20k");
    for engine in &engines {
        for metric in Metric::ALL {
            group.bench_function(format!("{}/{}", engine.kind(), metric), |b| {
                b.iter(|| black_box(metric.run(engine.as_ref(), &table).map(|o| o.len())))
            });
        }
    }
    group.finish();
}

fn benchmark_chunk_sizes(c: &mut Criterion) {
    let table = synthetic_table(50_000);
    let mut group = c.benchmark_group("parallel_chunk_size");

    for &chunk_size in &[64, 256, 4096] {
        let engine = ParallelEngine::new(num_cpus::get())
            .expect("Failed to build rayon pool")
            .with_chunk_size(chunk_size);

        group.bench_with_input(
            BenchmarkId::new("temperature_by_location", chunk_size),
            &table,
            |b, table| b.iter(|| black_box(engine.temperature_by_location(table).map(|r| r.len()))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_synthesizer,
    benchmark_location_statistics,
    benchmark_every_metric,
    benchmark_chunk_sizes
);
criterion_main!(benches);
