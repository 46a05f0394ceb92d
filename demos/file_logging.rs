//! File logging example
//!
//! Demonstrates building a logger from the environment: console plus a
//! daily JSON file under `./run_log`, or the file only when `RUN_ENV=prod`.
//!
//! Run with: cargo run --example file_logging
//!      or:  RUN_ENV=prod LOG_LEVEL=info cargo run --example file_logging

use rust_event_logger::prelude::*;
use rust_event_logger::{global, kv};

fn main() -> Result<()> {
    println!("=== Rust Event Logger - File Logging Example ===\n");

    let config = LoggerConfig::from_env();
    println!(
        "console: {}, file: {}, level: {}, dir: {}",
        config.console,
        config.file,
        config.process_level,
        config.log_dir.display()
    );

    global::init_global(EventLogger::from_config(&config)?)?;

    let ctx = RequestContext::background().with_log_id("job-2025");
    global::event_info(&ctx, "job_started", kv!["items", 5]);

    for i in 1..=5 {
        global::event_debug(&ctx, "item_processed", kv!["item", i]);
        if i == 3 {
            global::event_warn(&ctx, "item_slow", kv!["item", i, "ms", 870]);
        }
    }

    let err = std::io::Error::new(std::io::ErrorKind::NotFound, "optional plugin missing");
    global::event_error(&ctx, Some(&err), "plugin_skipped", kv!["plugin", "metrics"]);
    global::event_info(&ctx, "job_finished", Vec::new());

    global::logger().flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the JSON log lines", config.log_dir.display());

    Ok(())
}
