//! Benchmarks for the normalization core on a synthetic product group.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feedpack_tools::model::{CatalogBuilder, KeyDepth, RawRecord};
use feedpack_tools::normalize::{reduce, tokenize, TokenStripper};
use std::collections::HashSet;

fn synthetic_records(members: usize) -> Vec<RawRecord> {
    (0..members)
        .map(|i| {
            RawRecord::new(
                format!("cpe:/a:acme:widget_server:1.{i}.0"),
                format!("Acme Widget Server 1.{i}.0 for distributed deployments"),
            )
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_title", |b| {
        b.iter(|| tokenize(black_box("Linux Kernel 3.10.0 on ARM64 architecture")));
    });
}

fn bench_reduce(c: &mut Criterion) {
    let sets: Vec<HashSet<String>> = synthetic_records(64)
        .iter()
        .map(|r| tokenize(&r.display_name).into_iter().collect())
        .collect();
    c.bench_function("reduce_64_members", |b| {
        b.iter(|| reduce(black_box(&sets)));
    });
}

fn bench_strip(c: &mut Criterion) {
    let tokens = ["acme", "widget", "server", "for", "distributed", "deployments"];
    let stripper = TokenStripper::new(&tokens);
    c.bench_function("strip_title", |b| {
        b.iter(|| {
            stripper.strip(
                black_box("Acme Widget Server 1.7.0 for distributed deployments"),
                black_box("1.7.0"),
            )
        });
    });
}

fn bench_build_catalog(c: &mut Criterion) {
    let records = synthetic_records(256);
    c.bench_function("build_catalog_256_records", |b| {
        b.iter(|| {
            let mut builder = CatalogBuilder::new(KeyDepth::VendorProduct);
            builder.extend(black_box(records.clone()));
            builder.finalize()
        });
    });
}

criterion_group!(
    benches,
    bench_tokenize,
    bench_reduce,
    bench_strip,
    bench_build_catalog
);
criterion_main!(benches);
