//! Performance benchmarks for the payroll engine.
//!
//! Covers the calculation core on its own and the HTTP path end to end:
//! - Single calculation (engine only)
//! - Single calculation through the router
//! - Batches of 100 and 1000 staff (rayon)
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{BatchEntry, compute_payroll, compute_payroll_batch};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::PayrollInput;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/conjuss").expect("Failed to load config");
    AppState::new(config)
}

/// Creates `count` entries spread over every grade and step.
fn create_entries(count: usize) -> Vec<BatchEntry> {
    (0..count)
        .map(|i| {
            let mut input = PayrollInput::new(format!("GL{:02}", i % 17 + 1), (i % 15) as u32 + 1);
            if i % 4 == 0 {
                input.deductions.loan_deduction = Some(rust_decimal::Decimal::from(5_000));
            }
            BatchEntry {
                staff_id: format!("S-{:05}", i),
                input,
            }
        })
        .collect()
}

/// Benchmark: one calculation without the HTTP layer.
fn bench_compute_single(c: &mut Criterion) {
    let loader = ConfigLoader::builtin().expect("Failed to load config");
    let input = PayrollInput::new("GL08", 5);

    c.bench_function("compute_single", |b| {
        b.iter(|| black_box(compute_payroll(black_box(&input), loader.config())))
    });
}

/// Benchmark: one calculation through the router.
fn bench_http_single(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::to_string(&PayrollInput::new("GL08", 5)).unwrap();

    c.bench_function("http_single", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batches of increasing size.
fn bench_batch(c: &mut Criterion) {
    let loader = ConfigLoader::builtin().expect("Failed to load config");

    let mut group = c.benchmark_group("batch_processing");
    for size in [100usize, 1000] {
        let entries = create_entries(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &entries, |b, entries| {
            b.iter(|| black_box(compute_payroll_batch(entries, loader.config())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_single, bench_http_single, bench_batch);
criterion_main!(benches);
