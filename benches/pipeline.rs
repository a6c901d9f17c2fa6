use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ddexplorer::dataset::record::RawDive;
use ddexplorer::dataset::{Board, Event, RecordStore};
use ddexplorer::filter::{visible_records, FilterState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};

fn slot(rng: &mut ChaCha8Rng) -> String {
    match rng.gen_range(0..10) {
        0 => "-".to_string(),
        1 => "x".to_string(),
        _ => format!("{:.1}", rng.gen_range(1.0..4.5)),
    }
}

/// A synthetic table of `size` dives in random board/group/number order.
fn synthetic_store(size: usize) -> RecordStore {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let raws = (0..size)
        .map(|_| {
            let board = Board::ALL[rng.gen_range(0..Board::ALL.len())];
            let group = rng.gen_range(1..=6u8);
            let dive_number = u32::from(group) * 100 + rng.gen_range(1..10);
            RawDive {
                event: board.event(),
                board,
                group,
                dive_number,
                dive_description: format!("Synthetic dive {dive_number}"),
                a: slot(&mut rng),
                b: slot(&mut rng),
                c: slot(&mut rng),
                d: slot(&mut rng),
            }
        })
        .collect();
    RecordStore::from_raw(raws)
}

fn busy_filters() -> FilterState {
    let mut filters = FilterState::default();
    filters.select_event(Event::Springboard);
    filters.toggle_group(1);
    filters.toggle_group(2);
    filters.toggle_hide_impossible();
    filters.toggle_ignore_a_dives();
    let now = Instant::now();
    filters.set_dd_limit_input("3.0", now);
    filters.apply_dd_limit();
    filters.set_dd_min_input("1.5", now);
    filters.apply_dd_min();
    filters
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_records");
    group.measurement_time(Duration::from_secs(5));

    for size in [300, 3_000, 30_000] {
        let store = synthetic_store(size);

        let defaults = FilterState::default();
        group.bench_with_input(BenchmarkId::new("defaults", size), &store, |b, store| {
            b.iter(|| black_box(visible_records(store, &defaults).len()))
        });

        let filters = busy_filters();
        group.bench_with_input(BenchmarkId::new("all_criteria", size), &store, |b, store| {
            b.iter(|| black_box(visible_records(store, &filters).len()))
        });
    }
    group.finish();
}

fn bench_load(c: &mut Criterion) {
    c.bench_function("load_bundled_table", |b| {
        b.iter(|| {
            black_box(
                RecordStore::from_json(ddexplorer::dataset::BUNDLED_DATA)
                    .map(|store| store.len())
                    .unwrap_or(0),
            )
        })
    });
}

criterion_group!(benches, bench_pipeline, bench_load);
criterion_main!(benches);
