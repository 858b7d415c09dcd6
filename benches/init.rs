use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use intltel::metadata::DATABASE;

// Regions unlikely to have been touched elsewhere in this benchmark binary,
// so the first lookup of each still has to parse the bundled document and
// compile its regexes rather than hit the memoized cache.
const COLD_IDS: &[&str] = &[
    "CA", "KY", "GB", "DE", "IT", "NZ", "BR", "JP", "BE", "AU", "ES", "800", "979",
];

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("init");

    let next = std::sync::atomic::AtomicUsize::new(0);
    group.bench_function("compile a territory", |b| {
        b.iter_batched(
            || {
                let i = next.fetch_add(1, std::sync::atomic::Ordering::Relaxed) % COLD_IDS.len();
                COLD_IDS[i]
            },
            |id| DATABASE.by_id(black_box(id)),
            BatchSize::SmallInput,
        )
    });

    DATABASE.by_id("US");
    group.bench_function("memoized lookup", |b| {
        b.iter(|| DATABASE.by_id(black_box("US")))
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
