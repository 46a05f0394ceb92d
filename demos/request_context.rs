//! Request context example
//!
//! Demonstrates carrying a log id, a per-request level override and a
//! suffix value through a request, and the panic event a broken value
//! produces.
//!
//! Run with: cargo run --example request_context

use rust_event_logger::prelude::*;
use rust_event_logger::{event_debug, event_warn, kv};
use serde::Serialize;

#[derive(Serialize)]
struct Tenant {
    id: u32,
    plan: &'static str,
}

struct Unprintable;

impl LogObject for Unprintable {
    fn log_text(&self) -> Option<String> {
        panic!("cannot render this value")
    }
}

fn handle_request(logger: &EventLogger, ctx: &RequestContext, path: &str) {
    event_debug!(logger, ctx, "request_received", "path", path);
    event_warn!(logger, ctx, "rate_limit_near", "remaining", 3);
}

fn main() -> Result<()> {
    println!("=== Rust Event Logger - Request Context Example ===\n");

    let logger = EventLogger::builder()
        .process_level(LogLevel::Info)
        .appender(ConsoleAppender::new())
        .build();

    println!("1. Ordinary request (debug hidden by process level INFO):");
    let ctx = RequestContext::background().with_log_id("req-1001");
    handle_request(&logger, &ctx, "/orders");

    println!("\n2. Request with a DEBUG override and a tenant suffix:");
    let traced = ctx
        .with_log_id("req-1002")
        .with_level_name("debug")
        .with_serialized_suffix(&Tenant { id: 9, plan: "pro" });
    handle_request(&logger, &traced, "/orders/42");

    println!("\n3. A value that panics while rendering:");
    logger.info(
        &traced,
        "render_attempt",
        vec![PayloadValue::from("value"), PayloadValue::object(Unprintable)],
    );
    logger.info(&traced, "still_running", kv!["panics_recovered", logger.metrics().panics_recovered()]);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
