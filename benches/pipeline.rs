use criterion::{black_box, criterion_group, criterion_main, Criterion};

use datalab::ingestion::csv::load_csv_from_reader;
use datalab::processing::{normalize, NormalizeOptions};
use datalab::statistics::{compute, StatRequest};

fn people_csv(rows: usize) -> String {
    let cities = ["Stockholm", "Malmö", "Uppsala", "Göteborg"];
    let mut out = String::from("name,age,city,salary\n");
    for i in 0..rows {
        let age = if i % 50 == 0 { "n/a".to_string() } else { (20 + i % 40).to_string() };
        out.push_str(&format!("p{i},{age},{},{}\n", cities[i % cities.len()], 30_000 + i % 5_000));
    }
    out
}

fn bench_pipeline(c: &mut Criterion) {
    let input = people_csv(10_000);
    let opts = NormalizeOptions::numeric(["age", "salary"]);
    let requests = [
        StatRequest::Count,
        StatRequest::mean("age"),
        StatRequest::min("salary"),
        StatRequest::max("salary"),
        StatRequest::group_count("city"),
    ];

    c.bench_function("load_normalize_compute_10k", |b| {
        b.iter(|| {
            let mut rdr = csv::ReaderBuilder::new()
                .has_headers(true)
                .from_reader(input.as_bytes());
            let raw = load_csv_from_reader(&mut rdr).unwrap();
            let clean = normalize(&raw, &opts).unwrap();
            black_box(compute(&clean.dataset, &requests).unwrap())
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
