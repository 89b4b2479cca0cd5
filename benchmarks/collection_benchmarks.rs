#![allow(
    clippy::unwrap_used,
    clippy::panic,
    clippy::expect_used,
    clippy::print_stdout
)]

/// Collection benchmarks: query parsing against the url crate, and the
/// derived-instance operations on each component type
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use url_parts::{Component, Filter, Host, Path, Query, Selector};

// Rust url crate
use url::form_urlencoded;

const QUERIES: &[&str] = &[
    "q=rust&page=2",
    "utm_source=newsletter&utm_medium=email&utm_campaign=launch&id=42",
    "a=1&b=2&c=3&d=4&e=5&f=6&g=7&h=8&i=9&j=10&k=11&l=12",
    "name=Fran%C3%A7ois&city=S%C3%A3o+Paulo&flag&empty=",
];

fn bench_query_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_parse");

    group.bench_function("url_parts", |b| {
        b.iter(|| {
            for query in QUERIES {
                black_box(Query::parse(black_box(query)).unwrap());
            }
        });
    });

    group.bench_function("form_urlencoded", |b| {
        b.iter(|| {
            for query in QUERIES {
                let pairs: Vec<(String, String)> =
                    form_urlencoded::parse(black_box(query).as_bytes())
                        .into_owned()
                        .collect();
                black_box(pairs);
            }
        });
    });

    group.finish();
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");

    let query = Query::parse(QUERIES[2]).unwrap();
    group.bench_function("query_without_offsets", |b| {
        b.iter(|| {
            black_box(
                query
                    .without(vec!["a".to_string(), "f".to_string(), "l".to_string()])
                    .unwrap(),
            )
        });
    });
    group.bench_function("query_without_predicate", |b| {
        b.iter(|| {
            black_box(
                query
                    .without(Selector::predicate(|name: &String| name.as_str() < "f"))
                    .unwrap(),
            )
        });
    });

    let path = Path::parse("/api/v2/users/42/posts/7/comments").unwrap();
    group.bench_function("path_filter_by_value", |b| {
        b.iter(|| {
            black_box(
                path.filter(Filter::by_value(|s: &String| {
                    !s.bytes().all(|b| b.is_ascii_digit())
                }))
                .unwrap(),
            )
        });
    });

    let host = Host::parse("static.cdn.eu-west.example.com").unwrap();
    group.bench_function("host_filter_by_offset", |b| {
        b.iter(|| black_box(host.filter(Filter::by_offset(|i: &usize| *i >= 3)).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_query_parse, bench_derive);
criterion_main!(benches);
