//! Basic logger usage example
//!
//! Demonstrates emitting events at every level to the console and changing
//! the process level at runtime.
//!
//! Run with: cargo run --example basic_usage

use rust_event_logger::prelude::*;
use rust_event_logger::{event_error, event_info, kv};

fn main() -> Result<()> {
    println!("=== Rust Event Logger - Basic Usage Example ===\n");

    let logger = EventLogger::builder()
        .process_level(LogLevel::Trace)
        .appender(ConsoleAppender::new())
        .build();
    let ctx = RequestContext::background();

    println!("1. Events at every level:");
    logger.trace(&ctx, "cache_probe", kv!["key", "user:7"]);
    logger.debug(&ctx, "config_loaded", kv!["entries", 12]);
    logger.info(&ctx, "server_started", kv!["port", 8080, "tls", true]);
    logger.notice(&ctx, "maintenance_window", kv!["starts_in_min", 30]);
    logger.warn(&ctx, "slow_query", kv!["ms", 1250.7]);
    let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    logger.error_with_cause(&ctx, Some(&err), "upstream_failed", kv!["host", "db-1"]);
    logger.fatal(&ctx, "out_of_disk", kv!["mount", "/var"]);

    println!("\n2. Process level set to WARN - trace to notice are hidden:");
    logger.set_process_level(LogLevel::Warn);
    logger.debug(&ctx, "hidden", Vec::new());
    event_info!(logger, ctx, "hidden_too", "k", "v");
    logger.warn(&ctx, "visible", Vec::new());
    event_error!(logger, ctx, None, "visible_with_nil_error");

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
