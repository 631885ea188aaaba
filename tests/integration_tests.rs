//! Integration tests for the buffered logger
//!
//! These tests verify:
//! - The persisted line format
//! - Size rotation and the retention window
//! - Runtime reconfiguration
//! - Flush and close semantics
//! - Error reporting for unwritable targets

use parking_lot::Mutex;
use rust_buffered_logger::prelude::*;
use rust_buffered_logger::{info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("utf-8 output")
    }
}

/// Logger writing only to `path`, flushed only on request or close
fn file_logger(path: &Path) -> Logger {
    Logger::builder()
        .stdout(false)
        .stderr(false)
        .file(path)
        .flush_interval(Duration::from_secs(3600))
        .build()
}

fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

fn message_of(line: &str) -> &str {
    line.split_once(" | ").map(|(_, m)| m).expect("header delimiter")
}

/// Archives on disk next to `live`, oldest first by name
fn archives_on_disk(dir: &Path, live: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = fs::read_dir(dir)
        .expect("Failed to read log dir")
        .map(|e| e.expect("dir entry").path())
        .filter(|p| p != live)
        .collect();
    found.sort();
    found
}

#[test]
fn test_file_line_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("format.log");

    let logger = file_logger(&log_file);
    let line = line!() + 1;
    logger.warn("disk at 91%");
    logger.close();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let fields: Vec<&str> = content.trim_end().splitn(6, ' ').collect();

    let date = fields[0].as_bytes();
    assert_eq!(date.len(), 10);
    assert_eq!((date[4], date[7]), (b'-', b'-'));
    let time = fields[1].as_bytes();
    assert_eq!(time.len(), 15);
    assert_eq!((time[2], time[5], time[8]), (b':', b':', b'.'));
    assert_eq!(fields[2], std::process::id().to_string());
    assert_eq!(fields[3], format!("tests/integration_tests.rs:{}", line));
    assert_eq!(fields[4], "WAR");
    assert_eq!(fields[5], "| disk at 91%");
    assert!(content.ends_with('\n'));
}

#[test]
fn test_message_is_not_escaped() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("raw.log");

    let logger = file_logger(&log_file);
    logger.info(r#"path="C:\temp" status="ok""#);
    logger.close();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(message_of(content.trim_end()), r#"path="C:\temp" status="ok""#);
}

#[test]
fn test_rotation_bounds_file_sizes() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("rotate.log");

    let logger = file_logger(&log_file);
    logger.config().set_max_size(1024).set_max_files(5);

    for i in 0..100 {
        logger.info(format_args!("event {:>8}", i));
    }
    logger.close();

    let archives = logger.archives();
    assert!(!archives.is_empty(), "expected at least one rotation");
    assert!(archives.len() < 5);
    assert_eq!(archives, archives_on_disk(temp_dir.path(), &log_file));

    for archive in &archives {
        let size = fs::metadata(archive).expect("archive metadata").len();
        assert!(size <= 1024, "{} is {} bytes", archive.display(), size);
        let name = archive.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("rotate_") && name.ends_with(".log"), "{}", name);
        assert_eq!(name.len(), "rotate_".len() + 29 + ".log".len());
    }

    let live = fs::read_to_string(&log_file).expect("Failed to read live file");
    assert!(!live.is_empty());
    assert!((live.len() as u64) < 1024);
    assert!(live.ends_with(&format!("| event {:>8}\n", 99)));
}

#[test]
fn test_rotation_preserves_every_line_without_count_limit() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("all.log");

    let logger = file_logger(&log_file);
    logger.config().set_max_size(512);

    for i in 0..200 {
        logger.info(format_args!("seq={:04}", i));
    }
    logger.close();

    let mut messages = Vec::new();
    for archive in logger.archives() {
        let content = fs::read_to_string(&archive).expect("Failed to read archive");
        messages.extend(content.lines().map(|l| message_of(l).to_string()));
    }
    let live = fs::read_to_string(&log_file).expect("Failed to read live file");
    messages.extend(live.lines().map(|l| message_of(l).to_string()));

    let expected: Vec<String> = (0..200).map(|i| format!("seq={:04}", i)).collect();
    assert_eq!(messages, expected);
    assert_eq!(logger.metrics().rotations() as usize, logger.archives().len());
}

#[test]
fn test_retention_removes_earliest_archives() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("window.log");

    let logger = file_logger(&log_file);
    logger.config().set_max_size(256).set_max_files(3);

    let mut seen = Vec::new();
    for round in 0..6 {
        for i in 0..10 {
            logger.info(format_args!("round {} line {}", round, i));
        }
        logger.flush();
        let flushed = || logger.pending_bytes() == 0 && logger.metrics().flush_cycles() > round;
        assert!(wait_until(flushed));
        for archive in logger.archives() {
            if !seen.contains(&archive) {
                seen.push(archive);
            }
        }
        assert!(logger.archives().len() < 3);
    }
    logger.close();

    let kept = logger.archives();
    assert!(seen.len() > kept.len());
    assert_eq!(&seen[seen.len() - kept.len()..], kept.as_slice());
    for evicted in &seen[..seen.len() - kept.len()] {
        assert!(!evicted.exists(), "{} should be removed", evicted.display());
    }
    assert_eq!(kept, archives_on_disk(temp_dir.path(), &log_file));
}

#[test]
fn test_preexisting_archives_are_not_counted() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("restart.log");
    let stale = temp_dir.path().join("restart_2000-01-01_00-00-00_000000000.log");
    fs::write(&stale, "from a previous run\n").expect("Failed to seed archive");

    let logger = file_logger(&log_file);
    logger.config().set_max_size(128).set_max_files(2);
    for i in 0..50 {
        logger.info(format_args!("line {}", i));
    }
    logger.close();

    assert!(stale.exists());
    assert!(!logger.archives().contains(&stale));
}

#[test]
fn test_runtime_reconfiguration() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = temp_dir.path().join("first.log");
    let second = temp_dir.path().join("nested/second.log");

    let logger = file_logger(&first);
    logger.info("to first");
    logger.flush();
    assert!(wait_until(|| first.exists()));

    logger
        .config()
        .set_file(&second)
        .set_level(LogLevel::Error)
        .set_caller(false);
    logger.info("filtered out");
    logger.error("to second");
    logger.close();

    let first_content = fs::read_to_string(&first).expect("Failed to read first");
    let second_content = fs::read_to_string(&second).expect("Failed to read second");
    assert_eq!(first_content.lines().count(), 1);
    assert!(first_content.contains("| to first"));
    assert_eq!(second_content.lines().count(), 1);
    assert!(second_content.contains(" ???:0 ERR | to second"));
}

#[test]
fn test_stdout_level_scenario() {
    let out = Captured::default();
    let logger = Logger::builder()
        .stderr(false)
        .min_level(LogLevel::Warn)
        .flush_interval(Duration::from_secs(3600))
        .console_writer(out.clone())
        .build();

    info!(logger, "not shown");
    warn!(logger, "shown");
    logger.flush();

    assert!(wait_until(|| !out.text().is_empty()));
    let text = out.text();
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains(" WAR | shown\n"));
}

#[test]
fn test_close_many_times() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("close.log");

    let logger = file_logger(&log_file);
    logger.info("exactly once");
    for _ in 0..5 {
        logger.close();
    }
    drop(logger);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_lines_after_close_are_not_written() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("late.log");

    let logger = file_logger(&log_file);
    logger.info("before");
    logger.close();
    logger.info("after");
    assert_eq!(logger.pending_bytes(), 0);
    assert_eq!(logger.flush(), FlushRequest::Closed);
    drop(logger);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("| before"));
    assert!(!content.contains("| after"));
}

#[test]
fn test_unwritable_file_is_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("not-a-dir");
    fs::write(&blocker, "").expect("Failed to create blocker file");

    let errors = Captured::default();
    let logger = Logger::builder()
        .stdout(false)
        .file(blocker.join("app.log"))
        .flush_interval(Duration::from_secs(3600))
        .error_writer(errors.clone())
        .build();

    logger.error("nowhere to go");
    logger.close();

    let text = errors.text();
    assert!(text.starts_with("[LOGGER ERROR] "), "{}", text);
    assert!(text.contains("creating log directory"));
    assert_eq!(logger.metrics().io_errors(), 1);
}

#[test]
fn test_unwritable_file_is_silent_without_stderr() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let errors = Captured::default();
    let logger = Logger::builder()
        .stdout(false)
        .stderr(false)
        .file(temp_dir.path())
        .flush_interval(Duration::from_secs(3600))
        .error_writer(errors.clone())
        .build();

    logger.info("lost");
    logger.close();

    assert!(errors.text().is_empty());
    assert_eq!(logger.metrics().io_errors(), 1);
}

#[test]
fn test_config_loaded_from_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("json.log");
    let config_file = temp_dir.path().join("logger.json");

    let snapshot = ConfigSnapshot {
        file: log_file.clone(),
        max_size: 4096,
        max_files: 4,
        level: LogLevel::Debug,
        stderr: false,
        stdout: false,
        caller: true,
        flush_interval_ms: 100,
    };
    fs::write(&config_file, serde_json::to_string_pretty(&snapshot).unwrap())
        .expect("Failed to write config");

    let config = Arc::new(LoggerConfig::from_json_file(&config_file).expect("valid config"));
    assert_eq!(config.snapshot(), snapshot);

    let logger = Logger::with_config(Arc::clone(&config));
    logger.trace("below debug");
    logger.debug("kept");
    logger.close();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains(" DBG | kept"));
}

#[test]
fn test_metrics_reflect_activity() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("metrics.log");

    let logger = file_logger(&log_file);
    logger.config().set_max_size(200).set_max_files(2);
    for i in 0..40 {
        logger.info(format_args!("metric line {}", i));
    }
    logger.close();

    let metrics = logger.metrics();
    assert_eq!(metrics.total_logged(), 40);
    assert!(metrics.rotations() > 2);
    assert_eq!(metrics.archives_removed(), metrics.rotations() - logger.archives().len() as u64);
    assert_eq!(metrics.io_errors(), 0);
}
