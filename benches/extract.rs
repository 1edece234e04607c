// benches/extract.rs
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use es_scrape::core::Dom;
use es_scrape::extract;

const PAGE: &str = include_str!("../tests/fixtures/agenda_sample.html");

fn bench_extract(c: &mut Criterion) {
    c.bench_function("dom_parse", |b| {
        b.iter(|| {
            let dom = Dom::parse(black_box(PAGE)).unwrap();
            black_box(dom.root())
        })
    });

    c.bench_function("agenda_record", |b| {
        b.iter(|| {
            let rec = extract::agenda_record(black_box(PAGE)).unwrap();
            black_box(rec.agenda_items.len())
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
