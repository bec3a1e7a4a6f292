//! Benchmarks for criteria composition, in-memory matching and SQL rendering

use criterion::{BenchmarkId, Criterion as Bench, Throughput, criterion_group, criterion_main};
use repairdesk_query::{Comparison, Criteria, Criterion, FilterValue, Record, compose};
use std::hint::black_box;

#[derive(Default, Clone)]
struct ModelSearch {
    brand: Option<String>,
    model: Option<String>,
    kind: Option<&'static str>,
    year_from: Option<i32>,
    year_to: Option<i32>,
}

impl Criteria for ModelSearch {
    const ENTITY: &'static str = "ApplianceModel";
    const CRITERIA: &'static [Criterion<Self>] = &[
        Criterion::text("brand", "brand", |c| c.brand.as_deref().map(FilterValue::from)),
        Criterion::text("model", "model", |c| c.model.as_deref().map(FilterValue::from)),
        Criterion::exact("kind", "kind", |c| c.kind.map(FilterValue::from)),
        Criterion::threshold("yearGreaterOrEqual", "year", Comparison::Gte, |c| {
            c.year_from.map(FilterValue::from)
        }),
        Criterion::threshold("yearLessOrEqual", "year", Comparison::Lte, |c| {
            c.year_to.map(FilterValue::from)
        }),
    ];
}

struct Row {
    brand: String,
    model: String,
    kind: &'static str,
    year: i32,
}

impl Record for Row {
    fn field(&self, path: &str) -> FilterValue {
        match path {
            "brand" => self.brand.as_str().into(),
            "model" => self.model.as_str().into(),
            "kind" => self.kind.into(),
            "year" => self.year.into(),
            _ => FilterValue::Null,
        }
    }
}

fn full_search() -> ModelSearch {
    ModelSearch {
        brand: Some("acme".into()),
        model: Some("tv".into()),
        kind: Some("TELEVISION"),
        year_from: Some(2018),
        year_to: Some(2022),
    }
}

fn rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| Row {
            brand: if i % 2 == 0 { "Acme" } else { "Globex" }.to_string(),
            model: format!("Smart TV {i}"),
            kind: if i % 3 == 0 { "OVEN" } else { "TELEVISION" },
            year: 2010 + (i % 15) as i32,
        })
        .collect()
}

// ============================================================================
// Composition Benchmarks
// ============================================================================

fn bench_compose(c: &mut Bench) {
    let mut group = c.benchmark_group("compose");

    group.bench_function("empty", |b| {
        let search = ModelSearch::default();
        b.iter(|| black_box(compose(black_box(&search))))
    });

    group.bench_function("single", |b| {
        let search = ModelSearch {
            year_from: Some(2020),
            ..Default::default()
        };
        b.iter(|| black_box(compose(black_box(&search))))
    });

    group.bench_function("all_fields", |b| {
        let search = full_search();
        b.iter(|| black_box(compose(black_box(&search))))
    });

    group.finish();
}

// ============================================================================
// Evaluation Benchmarks
// ============================================================================

fn bench_matches(c: &mut Bench) {
    let mut group = c.benchmark_group("matches");
    let filter = compose(&full_search());

    for size in [100usize, 1_000, 10_000] {
        let data = rows(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| data.iter().filter(|row| filter.matches(*row)).count())
        });
    }

    group.finish();
}

fn bench_to_sql(c: &mut Bench) {
    let mut group = c.benchmark_group("to_sql");
    let filter = compose(&full_search());

    group.bench_function("all_fields", |b| {
        b.iter(|| black_box(filter.to_sql(black_box(0))))
    });

    group.finish();
}

criterion_group!(benches, bench_compose, bench_matches, bench_to_sql);
criterion_main!(benches);
