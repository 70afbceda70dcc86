use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pocketbook_core::{
    LocaleCurrencyFormatter, MemoryStore, SummaryService, TransactionStore,
};
use pocketbook_domain::{CategoryCatalog, TransactionKind, TransactionRecord, YearMonth};
use uuid::Uuid;

fn sample_records(count: usize) -> Vec<TransactionRecord> {
    let keys: Vec<String> = CategoryCatalog::standard()
        .iter()
        .map(|entry| entry.key.clone())
        .collect();
    let origin = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| TransactionRecord {
            id: Uuid::new_v4(),
            name: format!("txn {i}"),
            amount: 1.0 + (i % 500) as f64,
            kind: if i % 5 == 0 {
                TransactionKind::Income
            } else {
                TransactionKind::Expense
            },
            category: keys[i % keys.len()].clone(),
            date: origin + Duration::hours((i % (24 * 365)) as i64),
        })
        .collect()
}

fn bench_monthly_summary(c: &mut Criterion) {
    let formatter = LocaleCurrencyFormatter::default();
    let service = SummaryService::new(CategoryCatalog::standard(), &formatter);
    let month = YearMonth::new(2024, 6).unwrap();
    let mut group = c.benchmark_group("monthly_summary");
    for size in [100usize, 1_000, 10_000] {
        let records = sample_records(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| service.monthly_summary(black_box(records), month).unwrap())
        });
    }
    group.finish();
}

fn bench_store_load(c: &mut Criterion) {
    let store = TransactionStore::with_default_key(MemoryStore::new());
    for record in sample_records(1_000) {
        store.append(record).unwrap();
    }
    c.bench_function("store_load_1000", |b| b.iter(|| store.load().unwrap()));
}

criterion_group!(benches, bench_monthly_summary, bench_store_load);
criterion_main!(benches);
