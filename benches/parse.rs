//! Benchmarks for the shelf notation and catalog paths.

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use shelf::catalog::{Catalog, HeaderStyle};
use shelf::notation::{parse_table_stream, parse_value, tokenize};

/// Generate a catalog with the shape real files have: colored headers,
/// record-style item lines, a blank line between blocks.
fn synth_catalog(categories: usize, items: usize) -> String {
    let mut text = String::new();
    for c in 0..categories {
        text.push_str(&format!(
            "-[\"Category {c}\", color({},{},{})]\r",
            c % 256,
            (c * 7) % 256,
            (c * 13) % 256
        ));
        for i in 0..items {
            text.push_str(&format!(
                "[#nm:\"Item {c}-{i}\", #tp:\"standard\", #sz:point({},{}), #tags:[\"a\", \"b\"]]\r",
                i % 12 + 1,
                i % 7 + 1
            ));
        }
        text.push('\r');
    }
    text
}

// -- Notation benchmarks --

fn bench_notation(c: &mut Criterion) {
    let mut group = c.benchmark_group("notation");

    let item = r#"[#nm:"Big Stone", #sz:point(2,2), #tags:["stone", "heavy"], #rnd:4]"#;

    group.bench_function("tokenize_item", |b| {
        b.iter(|| tokenize(black_box(item)).unwrap())
    });

    group.bench_function("parse_item", |b| {
        b.iter(|| parse_value(black_box(item)).unwrap())
    });

    // 100 hyphen-delimited tables, the bulk-definition convention
    let mut stream = String::new();
    for i in 0..100 {
        stream.push_str(&format!(
            "[#nm:\"Def {i}\", #pos:rect(0,0,{},{})]\n-\n",
            i % 20 + 1,
            i % 9 + 1
        ));
    }
    group.bench_function("parse_table_stream", |b| {
        b.iter(|| parse_table_stream(black_box(&stream)).unwrap())
    });

    group.finish();
}

// -- Catalog benchmarks --

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");

    let small = synth_catalog(4, 12);
    let large = synth_catalog(24, 40);

    group.bench_function("build_small", |b| {
        b.iter(|| {
            Catalog::from_text(
                Path::new("bench/catalog.txt"),
                HeaderStyle::Colored,
                black_box(&small),
            )
            .unwrap()
        })
    });

    group.bench_function("build_large", |b| {
        b.iter(|| {
            Catalog::from_text(
                Path::new("bench/catalog.txt"),
                HeaderStyle::Colored,
                black_box(&large),
            )
            .unwrap()
        })
    });

    let built = Catalog::from_text(Path::new("bench/catalog.txt"), HeaderStyle::Colored, &large)
        .unwrap();
    group.bench_function("serialize_large", |b| {
        b.iter(|| black_box(&built).to_text())
    });

    group.finish();
}

criterion_group!(benches, bench_notation, bench_catalog);
criterion_main!(benches);
