use calc_rs::ast::{CompiledExpression, Evaluator, Parser};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use evalexpr::*;

/// Benchmark simple arithmetic expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let expr = "2.0 + 3.0 * 4.0";
    let ast = Parser::parse_expression(expr).unwrap();
    let compiled: CompiledExpression = ast.compile();
    let precompiled_evalexpr = build_operator_tree::<DefaultNumericTypes>(expr).unwrap();

    group.bench_function("parse_and_evaluate_arithmetic", |b| {
        b.iter(|| calc_rs::evaluate_expression(black_box(expr)).unwrap())
    });

    group.bench_function("interpreted_arithmetic", |b| {
        b.iter(|| Evaluator::evaluate(black_box(&ast)))
    });

    group.bench_function("compiled_arithmetic", |b| {
        b.iter(|| black_box(&compiled).call())
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0) + black_box(3.0) * black_box(4.0))
    });

    group.bench_function("meval_arithmetic", |b| {
        b.iter(|| meval::eval_str(black_box(expr)).unwrap())
    });

    group.bench_function("evalexpr_arithmetic", |b| {
        b.iter(|| evalexpr::eval(black_box(expr)).unwrap())
    });

    group.bench_function("precompiled_evalexpr_arithmetic", |b| {
        b.iter(|| precompiled_evalexpr.eval().unwrap())
    });

    group.finish();
}

/// Benchmark expressions dominated by function calls
fn benchmark_function_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("Function call Expression Evaluation");

    let expr = "Sin(PI / 6) * Exp(1.5) + Sqrt(Abs(-16)) - Pow(2, 10) % 7";
    let meval_expr = "sin(pi / 6) * exp(1.5) + sqrt(abs(-16)) - (2 ^ 10) % 7";
    let ast = Parser::parse_expression(expr).unwrap();
    let compiled = ast.compile();

    group.bench_function("parse_and_evaluate_functions", |b| {
        b.iter(|| calc_rs::evaluate_expression(black_box(expr)).unwrap())
    });

    group.bench_function("interpreted_functions", |b| {
        b.iter(|| Evaluator::evaluate(black_box(&ast)))
    });

    group.bench_function("compiled_functions", |b| {
        b.iter(|| black_box(&compiled).call())
    });

    group.bench_function("native_rust_functions", |b| {
        b.iter(|| {
            (black_box(std::f64::consts::PI) / 6.0).sin() * black_box(1.5f64).exp()
                + black_box(-16.0f64).abs().sqrt()
                - black_box(2.0f64).powf(10.0) % 7.0
        })
    });

    group.bench_function("meval_functions", |b| {
        b.iter(|| meval::eval_str(black_box(meval_expr)).unwrap())
    });

    group.finish();
}

/// Benchmark deeply nested expressions, where tree walking costs the most
fn benchmark_nested_expression(c: &mut Criterion) {
    let mut group = c.benchmark_group("Nested Expression Evaluation");

    let expr = "((((1 + 2) * (3 - 4)) / ((5 + 6) * (7 - 8))) ^ 2 + Max(Min(9, 10), 11)) % 12";
    let ast = Parser::parse_expression(expr).unwrap();
    let compiled = ast.compile();

    group.bench_function("parse_only_nested", |b| {
        b.iter(|| Parser::parse_expression(black_box(expr)).unwrap())
    });

    group.bench_function("interpreted_nested", |b| {
        b.iter(|| Evaluator::evaluate(black_box(&ast)))
    });

    group.bench_function("compiled_nested", |b| {
        b.iter(|| black_box(&compiled).call())
    });

    #[cfg(feature = "jit")]
    {
        let jitted = calc_rs::jit::JitCompiler::new()
            .unwrap()
            .compile(&ast)
            .unwrap();
        group.bench_function("jit_nested", |b| b.iter(|| black_box(&jitted).call()));
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_function_calls,
    benchmark_nested_expression
);
criterion_main!(benches);
