use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use tabulated_collections::cuckoo::{CuckooHashTable, CuckooHashTableConfig};

fn table(size: usize) -> CuckooHashTable<u32> {
    CuckooHashTable::from_config(
        CuckooHashTableConfig::new()
            .with_size(size)
            .with_max_displacements(20),
    )
    .unwrap()
}

fn bench_insert(c: &mut Criterion) {
    let mut initial_items = 0;
    while initial_items < 1024 - 32 {
        c.bench_function(&format!("bench insert {}", initial_items), |b| {
            b.iter_batched_ref(
                || {
                    let mut table = table(1024);
                    for i in 0..initial_items {
                        table.insert(i);
                    }
                    table
                },
                |table| table.insert(0xDEADBEEF),
                BatchSize::PerIteration,
            )
        });
        initial_items += 128;
    }
}

fn bench_contains(c: &mut Criterion) {
    let mut table = table(1024);
    for i in 0..1024u32 {
        table.insert(i);
    }
    c.bench_function("bench contains", |b| b.iter(|| table.contains(&512)));
}

criterion_group!(benches, bench_insert, bench_contains);
criterion_main!(benches);
