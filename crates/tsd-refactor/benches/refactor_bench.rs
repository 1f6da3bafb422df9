//! Refactor Benchmark
//!
//! Measures applicability queries and edit computation over generated
//! sources with many destructurable parameters.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tsd_common::{FormatCodeSettings, PositionOrRange};
use tsd_refactor::{Project, RefactorService};

const FILE_NAME: &str = "bench.ts";

const SIMPLE_SOURCE: &str = r#"
interface Point {
    x: number;
    y: number;
    z: number;
}

function length(point: Point): number {
    return Math.sqrt(point.x * point.x + point.y * point.y + point.z * point.z);
}
"#;

fn generate_large_source(functions: usize) -> String {
    let mut source = String::from("interface Options {\n    a: number;\n    b: string;\n    c: boolean;\n}\n\n");
    for i in 0..functions {
        source.push_str(&format!(
            "function handler{i}(options: Options) {{\n    const {{ a, b, ...rest }} = options;\n    console.log(a, b, rest);\n}}\n\n"
        ));
    }
    source
}

fn project_with(source: &str) -> Project {
    let mut project = Project::new();
    project.set_file(FILE_NAME, source);
    project
}

fn offset_of(source: &str, needle: &str) -> u32 {
    source.find(needle).map_or(0, |offset| offset as u32)
}

/// Benchmark: applicable refactors at a parameter name
fn bench_applicable_simple(c: &mut Criterion) {
    let project = project_with(SIMPLE_SOURCE);
    let service = RefactorService::new();
    let position = PositionOrRange::Position(offset_of(SIMPLE_SOURCE, "point: Point"));
    c.bench_function("applicable_simple", |b| {
        b.iter(|| black_box(service.get_applicable_refactors(&project, FILE_NAME, position)))
    });
}

/// Benchmark: edits for destructuring a parameter into a constant
fn bench_edits_simple(c: &mut Criterion) {
    let project = project_with(SIMPLE_SOURCE);
    let service = RefactorService::new();
    let position = PositionOrRange::Position(offset_of(SIMPLE_SOURCE, "point: Point"));
    let settings = FormatCodeSettings::with_indent_size(4);
    c.bench_function("edits_simple", |b| {
        b.iter(|| {
            black_box(service.get_edits_for_refactor(
                &project,
                FILE_NAME,
                &settings,
                position,
                "destructure-to-constant",
                "destructure-to-constant",
            ))
        })
    });
}

/// Benchmark: applicability at the last function of growing files
fn bench_applicable_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("refactor_throughput");
    for functions in [10, 50, 100].iter() {
        let source = generate_large_source(*functions);
        let project = project_with(&source);
        let service = RefactorService::new();
        let position = PositionOrRange::Position(
            source.rfind("options: Options").map_or(0, |offset| offset as u32),
        );
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("applicable", format!("{functions}fn")),
            &position,
            |b, position| {
                b.iter(|| black_box(service.get_applicable_refactors(&project, FILE_NAME, *position)))
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_applicable_simple,
    bench_edits_simple,
    bench_applicable_throughput
);
criterion_main!(benches);
