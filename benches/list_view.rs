//! Benchmarks for the table pipeline.
//!
//! These benchmarks measure search, sort and pagination over a fake country
//! collection of realistic size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fake::{Fake, Faker};
use hrms_console::entity::Country;
use hrms_console::list_view::ListView;

fn countries(count: usize) -> Vec<Country> {
    (0..count).map(|_| Faker.fake::<Country>()).collect()
}

fn populated(count: usize) -> ListView<Country> {
    let mut view = ListView::new(10, &["name", "code"]);
    view.set_records(countries(count));
    view
}

fn bench_filter(c: &mut Criterion) {
    let mut view = populated(1_000);
    view.set_search_term("an");
    c.bench_function("filter_1000", |b| b.iter(|| black_box(view.filtered().len())));
}

fn bench_sort(c: &mut Criterion) {
    let mut view = populated(1_000);
    view.sort_by("name");
    c.bench_function("sort_1000", |b| b.iter(|| black_box(view.sorted().len())));
}

fn bench_paginate(c: &mut Criterion) {
    let mut view = populated(1_000);
    view.sort_by("code");
    view.go_to_page(50);
    c.bench_function("paginate_1000", |b| {
        b.iter(|| black_box(view.paginated().len()))
    });
}

criterion_group!(benches, bench_filter, bench_sort, bench_paginate);
criterion_main!(benches);
