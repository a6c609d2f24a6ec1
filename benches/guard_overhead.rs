//! Benchmarks for instrumentation and raise overhead.
//!
//! Run with: cargo bench
//! Compare strategies: cargo bench --features minimal-trace

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use errtrail::{FrameLog, ScopedFrame, StructuredError, frame, raise};

// ============================================================================
// Baseline: uninstrumented call
// ============================================================================

fn plain_call(n: u64) -> u64 {
    if n == 0 { 0 } else { n.wrapping_mul(2) }
}

// ============================================================================
// Instrumented call (thread-local guard)
// ============================================================================

fn guarded_call(n: u64) -> u64 {
    let _frame = frame!();
    if n == 0 { 0 } else { n.wrapping_mul(2) }
}

// ============================================================================
// Instrumented call (explicit log)
// ============================================================================

fn explicit_guarded_call(log: &FrameLog, n: u64) -> u64 {
    let _frame = ScopedFrame::create(log);
    if n == 0 { 0 } else { n.wrapping_mul(2) }
}

// ============================================================================
// Raise on the error path
// ============================================================================

fn failing_call(n: u64) -> Result<u64, StructuredError<u64>> {
    let _frame = frame!();
    Err(raise("benchmark failure", n))
}

fn bench_guard_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("guard_overhead");

    group.bench_function("plain_call", |b| {
        b.iter(|| plain_call(black_box(42)));
    });

    group.bench_function("guarded_call", |b| {
        b.iter(|| guarded_call(black_box(42)));
    });

    let log = FrameLog::new();
    group.bench_function("explicit_guarded_call", |b| {
        b.iter(|| explicit_guarded_call(&log, black_box(42)));
    });

    group.bench_function("guarded_call_nested_5", |b| {
        b.iter(|| {
            let _a = frame!();
            let _b = frame!();
            let _c = frame!();
            let _d = frame!();
            let _e = frame!();
            guarded_call(black_box(42))
        });
    });

    group.finish();
}

fn bench_raise(c: &mut Criterion) {
    let mut group = c.benchmark_group("raise");

    group.bench_function("raise_uninstrumented", |b| {
        b.iter(|| raise("benchmark failure", black_box(42u64)));
    });

    group.bench_function("raise_3_frames_deep", |b| {
        b.iter(|| {
            let _a = frame!();
            let _b = frame!();
            failing_call(black_box(42)).unwrap_err()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_guard_overhead, bench_raise);
criterion_main!(benches);
