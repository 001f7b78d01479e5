//! Performance benchmarks for header parsing and mock generation.
//!
//! - Fixtures: the headers under `test_headers/`
//! - Scaling: a synthetic header with many classes
//! - Styles: legacy vs modern rendering of the same AST

use bumpalo::Bump;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use mockgen::{MockConfig, MockStyle, generate_mocks};
use mockgen_parser::parse_lenient;
use std::hint::black_box;

/// A header with `count` interface classes in nested namespaces.
fn synthetic_header(count: usize) -> String {
    let mut source = String::from("namespace app {\nnamespace detail {\n");
    for i in 0..count {
        source.push_str(&format!(
            "class Service{i} : public Base {{\n public:\n  virtual ~Service{i}();\n  \
             virtual int Run(const std::vector<int>& input, std::map<int, std::string>* out) = 0;\n  \
             virtual std::string Name() const;\n  virtual void Reset(int level = 0);\n \
             private:\n  int state_;\n}};\n\n"
        ));
    }
    source.push_str("}  // namespace detail\n}  // namespace app\n");
    source
}

fn fixture_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/fixtures");

    for (name, source) in [
        ("turtle", include_str!("../test_headers/turtle.h")),
        ("painter", include_str!("../test_headers/painter.h")),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                let unit = parse_lenient(black_box(source), &arena);
                let output = generate_mocks(source, &unit, None, &MockConfig::default());
                black_box(output.lines.len())
            });
        });
    }

    group.finish();
}

fn scaling_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/scaling");

    for count in [10, 100, 1000] {
        let source = synthetic_header(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(format!("parse_{count}_classes"), |b| {
            b.iter(|| {
                let arena = Bump::new();
                let unit = parse_lenient(black_box(&source), &arena);
                black_box(unit.declarations().len())
            });
        });
    }

    group.finish();
}

fn style_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/styles");
    let source = synthetic_header(200);
    let arena = Bump::new();
    let unit = parse_lenient(&source, &arena);

    for style in [MockStyle::Legacy, MockStyle::Modern] {
        let config = MockConfig::new(style);
        group.bench_function(format!("{style:?}").to_lowercase(), |b| {
            b.iter(|| black_box(generate_mocks(&source, &unit, None, &config).lines.len()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    fixture_benchmarks,
    scaling_benchmarks,
    style_benchmarks
);
criterion_main!(benches);
