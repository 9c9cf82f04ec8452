use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use leo_parser::{tokenize, Parser};

fn expr(source: &str) {
    let tokens = tokenize(source).unwrap();
    let (_ast, _ty) = Parser::new(&tokens).parse_typed_expr().unwrap();
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    source.push(';');
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| expr(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = "true".to_string();
    for _i in 0..200 {
        source.push_str(" && 2 < 3 + 5 * 5 || 1 == 2 - 1");
    }
    source.push(';');
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| expr(&source)));
}

fn file(c: &mut Criterion) {
    let mut group = c.benchmark_group("file");

    let mut source = String::new();
    for i in 0..200 {
        source.push_str(&format!(
            "fn f{}(int a, int b) int {{ var c = a * b + {}; return c - f{}(a, b); }}\n",
            i,
            i,
            (i + 1) % 200
        ));
    }
    source.push_str("fn main() int { return f0(1, 2); }");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("file", |b| {
        b.iter(|| leo_parser::parse_file(&tokenize(&source).unwrap()).unwrap())
    });
}

criterion_group!(benches, long_expr, stress_precedence, file);
criterion_main!(benches);
