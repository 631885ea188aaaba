//! Criterion benchmarks for rust_buffered_logger

use chrono::Local;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_buffered_logger::appenders::rotating_file::cut_point;
use rust_buffered_logger::core::format::{short_caller_path, LineHeader};
use rust_buffered_logger::core::BufferPool;
use rust_buffered_logger::prelude::*;
use rust_buffered_logger::info;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Logger whose console output is discarded, flushed by the timer only
fn sink_logger() -> Logger {
    Logger::builder()
        .stderr(false)
        .flush_interval(Duration::from_millis(50))
        .console_writer(io::sink())
        .build()
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("build_and_close", |b| {
        b.iter(|| {
            let logger = sink_logger();
            logger.close();
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger();

    group.bench_function("verbatim", |b| {
        b.iter(|| {
            logger.info(black_box("Info message"));
        });
    });

    group.bench_function("format_args", |b| {
        let user_id = 12345u64;
        b.iter(|| {
            info!(logger, "User {} performed action {}", black_box(user_id), "login");
        });
    });

    group.bench_function("values", |b| {
        let latency = 1.25f64;
        b.iter(|| {
            info!(logger; "status=", black_box(200), " latency_ms=", black_box(latency));
        });
    });

    group.bench_function("without_caller", |b| {
        logger.config().set_caller(false);
        b.iter(|| {
            logger.info(black_box("Info message"));
        });
        logger.config().set_caller(true);
    });

    group.bench_function("filtered_out", |b| {
        logger.config().set_level(LogLevel::Error);
        b.iter(|| {
            info!(logger, "Filtered {}", black_box(1));
        });
        logger.config().set_level(LogLevel::Trace);
    });

    group.finish();
    logger.close();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4, 8] {
        const PER_THREAD: usize = 100;
        group.throughput(Throughput::Elements((threads * PER_THREAD) as u64));

        let logger = Arc::new(sink_logger());
        group.bench_function(format!("{}_threads", threads), |b| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for i in 0..PER_THREAD {
                                info!(logger, "Thread {} message {}", t, i);
                            }
                        })
                    })
                    .collect();

                for handle in handles {
                    let _ = handle.join();
                }
            });
        });
        logger.close();
    }

    group.finish();
}

// ============================================================================
// Formatter Benchmarks
// ============================================================================

fn bench_formatter(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatter");
    group.throughput(Throughput::Elements(1));

    let now = Local::now();
    group.bench_function("line_header", |b| {
        b.iter(|| {
            let header = LineHeader::render(
                black_box(&now),
                black_box(4242),
                black_box("core/logger.rs"),
                black_box(188),
                LogLevel::Info,
            );
            black_box(header.len())
        });
    });

    group.bench_function("short_caller_path", |b| {
        b.iter(|| short_caller_path(black_box("/home/build/project/src/core/logger.rs")));
    });

    let pool = BufferPool::new();
    group.bench_function("pooled_render", |b| {
        let args = [Arg::from("id="), Arg::from(42u32), Arg::from(" ok")];
        b.iter(|| {
            let mut scratch = pool.acquire();
            Payload::from(black_box(&args)).render_into(&mut scratch);
            black_box(scratch.len())
        });
    });

    group.finish();
}

// ============================================================================
// Rotation Benchmarks
// ============================================================================

fn bench_cut_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotation");

    let data: Vec<u8> = (0..1000)
        .flat_map(|i| {
            format!("2025-01-08 10:30:45.123456 4242 src/main.rs:12 INF | line {}\n", i)
                .into_bytes()
        })
        .collect();
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("cut_point_64k", |b| {
        b.iter(|| cut_point(black_box(&data), black_box(64 * 1024)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_concurrent_logging,
    bench_formatter,
    bench_cut_point,
);

criterion_main!(benches);
