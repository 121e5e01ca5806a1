//! Run these benches with `cargo bench --bench decode -- --verbose`
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use winds_aloft::decoder::{decode_cell, parse_altitude_header};
use winds_aloft::{WindsAloftDecoder, decode_product};

const FD1_TEXT: &str = include_str!("../tests/fixtures/fd1us1.txt");

fn build_tester() -> Criterion {
    Criterion::default()
        .sample_size(200)
        .measurement_time(std::time::Duration::from_secs(5))
        .noise_threshold(0.03)
}

criterion_main!(decode_benches);

criterion_group!(
    name = decode_benches;
    config = build_tester();
    targets = decode_product_bench, header_bench, cell_bench
);

fn decode_product_bench(c: &mut Criterion) {
    let decoder = WindsAloftDecoder::default();

    c.bench_function("decode_product", |b| {
        b.iter(|| decode_product(black_box(FD1_TEXT), "").expect("fixture decodes"));
    });

    c.bench_function("decode_with_stats", |b| {
        b.iter(|| decoder.decode(black_box(FD1_TEXT), "").expect("fixture decodes"));
    });
}

fn header_bench(c: &mut Criterion) {
    let header = "FT  3000    6000    9000   12000   18000   24000  30000  34000  39000";

    c.bench_function("altitude_header", |b| {
        b.iter(|| parse_altitude_header(black_box(header)).expect("header parses"));
    });
}

fn cell_bench(c: &mut Criterion) {
    let cells = ["2815", "2925-06", "9900+19", "780050", "22X0+14", "       "];

    c.bench_function("decode_cell", |b| {
        b.iter(|| {
            for cell in &cells {
                let _x = decode_cell(black_box(cell), 6000, 24000);
            }
        });
    });
}
