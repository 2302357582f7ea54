use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ordstream::Stream;
use std::time::Duration;
use tokio::runtime::Runtime;

// Cheap arithmetic: synchronisation dominates, concurrency should not help
fn light_cpu_task(x: u64) -> u64 {
    let mut result = x;
    for _ in 0..5 {
        result = result.wrapping_mul(17).wrapping_add(1);
    }
    black_box(result)
}

// Simulated latency: concurrency should scale close to linearly
fn io_simulation_task(x: u64) -> u64 {
    std::thread::sleep(Duration::from_micros(500));
    black_box(x * 2)
}

fn bench_map_by_concurrency(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("ordered_map");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    for concurrency in [0usize, 1, 4, 16] {
        group.bench_with_input(
            BenchmarkId::new("light_cpu", concurrency),
            &concurrency,
            |b, &concurrency| {
                b.to_async(&rt).iter(|| async move {
                    let result = Stream::from_collection(0..2000u64, 64)
                        .concurrent(concurrency)
                        .map(light_cpu_task)
                        .count()
                        .await;
                    black_box(result)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("io_simulation", concurrency),
            &concurrency,
            |b, &concurrency| {
                b.to_async(&rt).iter(|| async move {
                    let result = Stream::from_collection(0..200u64, 64)
                        .concurrent(concurrency)
                        .map(io_simulation_task)
                        .count()
                        .await;
                    black_box(result)
                });
            },
        );
    }

    group.finish();
}

fn bench_sequential_operations(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("sequential_operations");

    group.bench_function("filter_drop_limit", |b| {
        b.to_async(&rt).iter(|| async {
            let result = Stream::from_collection(0..10_000u64, 256)
                .filter(|x| x % 3 == 0)
                .drop(10)
                .limit(1000)
                .unwrap()
                .map(|x| x + 1)
                .to_vec()
                .await;
            black_box(result)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_map_by_concurrency, bench_sequential_operations);
criterion_main!(benches);
