use std::fmt::Write as _;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use logview::domain::Severity;
use logview::filter::classify::severity_of_line;
use logview::filter::{self, FilterOutcome, FilterRequest};

fn make_log(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        let label = match i % 10 {
            0 => "WARNING",
            1..=2 => "INFO",
            _ => "DEBUG",
        };
        writeln!(
            text,
            "2013-09-27 18:15:{:02}.{:03} 12345 {label} nova.api [-] request {i} handled",
            i % 60,
            i % 1000
        )
        .unwrap();
    }
    text
}

fn bench_classify(c: &mut Criterion) {
    let text = make_log(10_000);
    c.bench_function("classify_10k_lines", |b| {
        b.iter(|| {
            let mut severity = Severity::None;
            for line in text.lines() {
                severity = severity_of_line(black_box(line), severity);
            }
            black_box(severity)
        })
    });
}

fn bench_pipeline_drain(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bench.txt"), make_log(10_000)).unwrap();

    let mut group = c.benchmark_group("pipeline_drain_10k");
    for (name, min_level, html) in [
        ("plain_all", Severity::None, false),
        ("plain_warning", Severity::Warning, false),
        ("html_all", Severity::None, true),
    ] {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(min_level, html),
            |b, &(min_level, html)| {
                b.iter(|| {
                    let request = FilterRequest {
                        root: dir.path().to_path_buf(),
                        file: "bench.txt".to_string(),
                        min_level,
                        html,
                    };
                    match filter::run(&request) {
                        FilterOutcome::Stream(chunks) => black_box(chunks.count()),
                        FilterOutcome::Denied(reason) => panic!("unexpected sentinel: {reason}"),
                    }
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_pipeline_drain);
criterion_main!(benches);
