//! Basic logger usage example
//!
//! Demonstrates console logging, level filtering and the two payload styles.
//!
//! Run with: cargo run --example basic_usage

use rust_buffered_logger::prelude::*;
use rust_buffered_logger::{debug, info, warn};
use std::thread;
use std::time::Duration;

/// Give the flush worker a moment so demo sections don't interleave
fn settle(logger: &Logger) {
    logger.flush();
    thread::sleep(Duration::from_millis(100));
}

fn main() {
    println!("=== Rust Buffered Logger - Basic Usage Example ===\n");

    // stdout and stderr are on by default
    let logger = Logger::new();

    println!("1. Logging at different levels:");
    logger.trace("This is a trace message");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.fatal("This is a fatal message");
    settle(&logger);

    println!("\n2. Logging with different minimum levels:");
    logger.config().set_level(LogLevel::Info);
    println!("   Minimum level set to INFO - trace and debug won't show:");
    logger.trace("Trace message (hidden)");
    logger.debug("Debug message (hidden)");
    logger.info("Info message (visible)");
    logger.warn("Warning message (visible)");
    settle(&logger);

    println!("\n3. Payload styles:");
    let port = 8080;
    let user = "alice";
    info!(logger, "listening on port {}", port);
    warn!(logger; "user=", user, " attempts=", 3, " locked=", true);
    debug!(logger, "not evaluated: {}", expensive());
    settle(&logger);

    println!("\n4. Without caller capture:");
    logger.config().set_caller(false);
    logger.info("caller shown as ???:0");

    logger.close();
    println!("\n=== Example completed successfully! ===");
}

fn expensive() -> String {
    unreachable!("debug is filtered out, so the argument is never built")
}
