//! Performance benchmarks for docvalue-engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docvalue_engine::{
    canonical_id, compare, equals, sort_values, Encoder, JsonEncoder, WireValue,
};
use serde_json::json;

fn sample_document(id: u64) -> WireValue {
    let encoder = JsonEncoder::default();
    encoder
        .encode(&json!({
            "id": id,
            "name": format!("User {}", id),
            "score": id as f64 * 1.5,
            "tags": ["alpha", "beta", "gamma"],
            "address": {
                "city": "Berlin",
                "zip": "10115",
                "geo": [52.52, 13.405]
            }
        }))
        .expect("sample document encodes")
}

fn nested_array(depth: usize) -> WireValue {
    let mut value = WireValue::Integer(1);
    for _ in 0..depth {
        value = WireValue::Array(vec![value, WireValue::from("x")]);
    }
    value
}

fn bench_scalars(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalars");

    group.bench_function("compare_mixed_numbers", |b| {
        let left = WireValue::Integer(1 << 60);
        let right = WireValue::Double(1.5e18);
        b.iter(|| compare(black_box(&left), black_box(&right)))
    });

    group.bench_function("equals_nan", |b| {
        let left = WireValue::Double(f64::NAN);
        let right = WireValue::Double(f64::from_bits(0x7fff_0000_0000_0000));
        b.iter(|| equals(black_box(&left), black_box(&right)))
    });

    group.bench_function("compare_strings", |b| {
        let left = WireValue::from("the quick brown fox jumps over the lazy dog");
        let right = WireValue::from("the quick brown fox jumps over the lazy cat");
        b.iter(|| compare(black_box(&left), black_box(&right)))
    });

    group.finish();
}

fn bench_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("documents");

    let a = sample_document(1);
    let b = sample_document(1);

    group.bench_function("equals", |bench| {
        bench.iter(|| equals(black_box(&a), black_box(&b)))
    });

    group.bench_function("compare", |bench| {
        bench.iter(|| compare(black_box(&a), black_box(&b)))
    });

    group.bench_function("canonical_id", |bench| {
        bench.iter(|| canonical_id(black_box(&a)))
    });

    for size in [100u64, 1000] {
        let docs: Vec<WireValue> = (0..size).rev().map(sample_document).collect();
        group.bench_with_input(BenchmarkId::new("sort", size), &docs, |bench, docs| {
            bench.iter(|| {
                let mut docs = docs.clone();
                sort_values(black_box(&mut docs));
                docs
            })
        });
    }

    group.finish();
}

fn bench_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting");

    for depth in [10usize, 100, 1000] {
        let left = nested_array(depth);
        let right = nested_array(depth);
        group.bench_with_input(BenchmarkId::new("compare", depth), &depth, |b, _| {
            b.iter(|| compare(black_box(&left), black_box(&right)))
        });
        group.bench_with_input(BenchmarkId::new("equals", depth), &depth, |b, _| {
            b.iter(|| equals(black_box(&left), black_box(&right)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scalars, bench_documents, bench_nesting);
criterion_main!(benches);
