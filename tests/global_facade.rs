//! Tests for the process-wide logger
//!
//! All tests in this file share one installed logger, so each test uses
//! its own log id and only checks its own records.

use rust_event_logger::appenders::MemoryAppender;
use rust_event_logger::global;
use rust_event_logger::prelude::*;
use rust_event_logger::kv;
use std::sync::OnceLock;

fn installed() -> &'static MemoryAppender {
    static MEMORY: OnceLock<MemoryAppender> = OnceLock::new();
    MEMORY.get_or_init(|| {
        let memory = MemoryAppender::new();
        let logger = EventLogger::builder()
            .process_level(LogLevel::Trace)
            .appender(memory.clone())
            .build();
        global::init_global(logger).expect("first installation succeeds");
        memory
    })
}

fn records_for(log_id: &str) -> Vec<EventRecord> {
    installed()
        .records()
        .into_iter()
        .filter(|r| r.log_id == log_id)
        .collect()
}

#[test]
fn test_second_install_is_rejected() {
    installed();
    let result = global::init_global(EventLogger::new());
    assert!(matches!(result, Err(LoggerError::AlreadyInitialized)));
}

#[test]
fn test_free_functions_reach_installed_logger() {
    installed();
    let ctx = RequestContext::new()
        .with_log_id("global-1")
        .with_level(LogLevel::Trace);
    let err = std::io::Error::new(std::io::ErrorKind::Other, "this is error");

    global::event_trace(&ctx, "t", Vec::new());
    global::event_debug(&ctx, "d", Vec::new());
    global::event_info(&ctx, "i", kv!["k", "v"]);
    global::event_notice(&ctx, "n", Vec::new());
    global::event_warn(&ctx, "w", Vec::new());
    global::event_error(&ctx, Some(&err), "e", kv!["k", 1]);
    global::event_fatal(&ctx, "f", Vec::new());

    let records = records_for("global-1");
    let events: Vec<&str> = records.iter().map(|r| r.event.as_str()).collect();
    assert_eq!(events, vec!["t", "d", "i", "n", "w", "e", "f"]);
    assert_eq!(records[5].payload_value("err"), Some("this is error"));
    assert_eq!(records[0].file, file!());
}

#[test]
fn test_process_level_and_override() {
    installed();
    let overridden = RequestContext::new()
        .with_log_id("global-2")
        .with_level(LogLevel::Error);

    assert_eq!(global::effective_level(&overridden), LogLevel::Error);

    // Other tests share the process level; only the override path is checked
    // against emission here.
    global::event_warn(&overridden, "hidden", Vec::new());
    global::event_error(&overridden, None, "shown", Vec::new());

    let records = records_for("global-2");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].payload_value("err"), Some("nil"));
}

#[test]
fn test_set_process_level_round_trip() {
    installed();
    let ctx = RequestContext::new();

    global::set_process_level(LogLevel::Trace);
    assert_eq!(global::effective_level(&ctx), LogLevel::Trace);

    global::set_process_level(LogLevel::Unset);
    assert_eq!(global::effective_level(&ctx), LogLevel::Debug);

    global::set_process_level(LogLevel::Trace);
}
