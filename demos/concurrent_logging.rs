//! Concurrent logging example
//!
//! Demonstrates many threads sharing one logger, and the flush metrics.
//!
//! Run with: cargo run --example concurrent_logging

use rust_buffered_logger::prelude::*;
use rust_buffered_logger::info;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() {
    println!("=== Rust Buffered Logger - Concurrent Logging Example ===\n");

    let path = std::env::temp_dir().join("rust_buffered_logger_concurrent.log");
    let logger = Arc::new(
        Logger::builder()
            .file(&path)
            .stdout(false)
            .flush_interval(Duration::from_millis(100))
            .build(),
    );

    let start = Instant::now();
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for job in 0..10_000 {
                    info!(logger; "worker=", worker, " job=", job);
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            eprintln!("a worker panicked");
        }
    }
    let produced = start.elapsed();
    logger.close();

    let metrics = logger.metrics();
    println!("Logged {} lines in {:?}", metrics.total_logged(), produced);
    println!("Flush cycles: {}", metrics.flush_cycles());
    println!("Bytes flushed: {}", metrics.bytes_flushed());
    println!("Average flush: {:.0} bytes", metrics.average_flush_bytes());
    println!("Output: {}", path.display());

    println!("\n=== Example completed successfully! ===");
}
