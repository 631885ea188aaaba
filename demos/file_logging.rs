//! File logging example
//!
//! Demonstrates logging to a size-rotated file with a bounded archive count.
//!
//! Run with: cargo run --example file_logging

use rust_buffered_logger::prelude::*;
use std::fs;

fn main() -> Result<()> {
    println!("=== Rust Buffered Logger - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("rust_buffered_logger_demo");
    let path = dir.join("application.log");

    let logger = Logger::builder()
        .file(&path)
        .max_size(4 * 1024)
        .max_files(3)
        .stdout(false)
        .build();

    println!("1. Logging to '{}':", path.display());
    logger.info("Application started");
    logger.debug("Loading configuration...");
    logger.warn("Using default settings for some options");
    logger.error("Failed to load optional plugin");

    println!("\n2. Writing enough lines to rotate:");
    for i in 1..=500 {
        logger.info(format_args!("Processing item {}/500", i));
    }

    logger.close();

    let archives = logger.archives();
    println!("   {} rotations, {} archives kept:", logger.metrics().rotations(), archives.len());
    for archive in &archives {
        let size = fs::metadata(archive).map(|m| m.len()).unwrap_or(0);
        println!("   - {} ({} bytes)", archive.display(), size);
    }

    println!("\n3. Loading a configuration from JSON:");
    let config =
        LoggerConfig::from_json_str(r#"{ "level": "warn", "stdout": true, "caller": false }"#)?;
    let from_json = Logger::with_config(std::sync::Arc::new(config));
    from_json.info("hidden");
    from_json.warn("configured from JSON");
    from_json.close();

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
