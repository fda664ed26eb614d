// Copyright (c) 2026 Ctrie Map Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Benchmarks for the concurrent trie map.
//!
//! Compares parallel insert+read and read-only throughput of the
//! node-locked trie against two coarser-grained alternatives: a `HashMap`
//! behind a single global lock and `DashMap`. Word lengths 3/6/12 over
//! 10 000-key fixtures mirror the workloads the structure is tuned for.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput,
};
use dashmap::DashMap;
use rand::Rng;

use ctrie_map::{CtrieMap, CtrieOptions};

const KEY_CHARS: &str = "0123456789bcdefghjkmnpqrstuvwxyz";
const TRIE_WORDS: usize = 10_000;

/// Distinct fixed-length random keys mapped to random values.
fn fixture(word_length: usize) -> Vec<(String, i32)> {
    let mut rng = rand::thread_rng();
    let chars: Vec<char> = KEY_CHARS.chars().collect();
    let mut entries: HashMap<String, i32> = HashMap::with_capacity(TRIE_WORDS);
    while entries.len() < TRIE_WORDS {
        let key: String = (0..word_length)
            .map(|_| chars[rng.gen_range(0..chars.len())])
            .collect();
        entries.entry(key).or_insert_with(|| rng.gen());
    }
    entries.into_iter().collect()
}

/// Runs `op` over `entries` from one thread per available core.
fn run_parallel<F>(entries: &[(String, i32)], op: F)
where
    F: Fn(&str, i32) + Sync,
{
    let threads = num_cpus::get().max(1);
    let chunk_size = ((entries.len() + threads - 1) / threads).max(1);
    let op = &op;
    thread::scope(|scope| {
        for chunk in entries.chunks(chunk_size) {
            scope.spawn(move || {
                for (key, value) in chunk {
                    op(key, *value);
                }
            });
        }
    });
}

fn trie_options() -> CtrieOptions {
    CtrieOptions::new().with_initial_child_capacity(KEY_CHARS.chars().count())
}

/// Parallel insert immediately followed by a read of the same key, the
/// whole fixture per iteration.
fn bench_parallel_insert_read(c: &mut Criterion) {
    init_logging();

    let mut group = c.benchmark_group("parallel_insert_read");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(10));
    group.warm_up_time(Duration::from_secs(2));
    group.sample_size(10);

    for word_length in [3usize, 6, 12] {
        let entries = fixture(word_length);
        group.throughput(Throughput::Elements(entries.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("ctrie", word_length),
            &entries,
            |b, entries| {
                b.iter(|| {
                    let map = CtrieMap::with_options(trie_options());
                    run_parallel(entries, |key, value| {
                        map.add(key, value);
                        black_box(map.get_value(key));
                    });
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("locked_hashmap", word_length),
            &entries,
            |b, entries| {
                b.iter(|| {
                    let map: Mutex<HashMap<String, i32>> = Mutex::new(HashMap::new());
                    run_parallel(entries, |key, value| {
                        let mut guard = map.lock().expect("lock not poisoned");
                        guard.insert(key.to_owned(), value);
                        black_box(guard.get(key).copied());
                    });
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("dashmap", word_length),
            &entries,
            |b, entries| {
                b.iter(|| {
                    let map: DashMap<String, i32> = DashMap::new();
                    run_parallel(entries, |key, value| {
                        map.insert(key.to_owned(), value);
                        black_box(map.get(key).map(|entry| *entry));
                    });
                });
            },
        );
    }

    group.finish();
}

/// Parallel read of the whole fixture against prebuilt structures.
fn bench_parallel_read(c: &mut Criterion) {
    init_logging();

    let mut group = c.benchmark_group("parallel_read");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(10));
    group.warm_up_time(Duration::from_secs(2));
    group.sample_size(10);

    for word_length in [3usize, 6, 12] {
        let entries = fixture(word_length);
        group.throughput(Throughput::Elements(entries.len() as u64));

        let ctrie = CtrieMap::with_options(trie_options());
        run_parallel(&entries, |key, value| ctrie.add(key, value));

        let locked: Mutex<HashMap<String, i32>> = Mutex::new(HashMap::new());
        run_parallel(&entries, |key, value| {
            locked
                .lock()
                .expect("lock not poisoned")
                .insert(key.to_owned(), value);
        });

        let dashmap: DashMap<String, i32> = DashMap::new();
        run_parallel(&entries, |key, value| {
            dashmap.insert(key.to_owned(), value);
        });

        group.bench_with_input(
            BenchmarkId::new("ctrie", word_length),
            &entries,
            |b, entries| {
                b.iter(|| {
                    run_parallel(entries, |key, _| {
                        black_box(ctrie.get_value(key));
                    });
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("locked_hashmap", word_length),
            &entries,
            |b, entries| {
                b.iter(|| {
                    run_parallel(entries, |key, _| {
                        black_box(locked.lock().expect("lock not poisoned").get(key).copied());
                    });
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("dashmap", word_length),
            &entries,
            |b, entries| {
                b.iter(|| {
                    run_parallel(entries, |key, _| {
                        black_box(dashmap.get(key).map(|entry| *entry));
                    });
                });
            },
        );
    }

    group.finish();
}

/// Opt-in tracing output for benchmark debugging (RUST_LOG=ctrie_map=trace).
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

criterion_group!(benches, bench_parallel_insert_read, bench_parallel_read);
criterion_main!(benches);
