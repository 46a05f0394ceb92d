//! # Rust Event Logger
//!
//! A structured, level-filtered event logger. Every event carries a
//! severity, a short event name, an ordered list of key/value pairs and
//! the request context it was emitted under.
//!
//! ## Features
//!
//! - **Request Scoped**: A [`RequestContext`] carries the log id, an optional
//!   level override and a suffix value through a request
//! - **Level Filtering**: Context overrides win over the process-wide level,
//!   which can be changed at runtime from any thread
//! - **Never Fails**: Emitting never returns an error; a panic while
//!   formatting becomes a `Fatal` [`PANIC_EVENT`] record instead
//! - **Multiple Appenders**: Console, daily file, in-memory and custom sinks
//!
//! ## Example
//!
//! ```
//! use rust_event_logger::prelude::*;
//! use rust_event_logger::{event_info, kv};
//!
//! let memory = MemoryAppender::new();
//! let logger = EventLogger::builder().appender(memory.clone()).build();
//! let ctx = RequestContext::new().with_log_id("req-42");
//!
//! event_info!(logger, ctx, "user_login", "uid", 7, "remember", true);
//! logger.warn(&ctx, "slow_query", kv!["ms", 1250]);
//!
//! assert_eq!(memory.len(), 2);
//! assert_eq!(memory.records()[0].payload_value("uid"), Some("7"));
//! ```

pub mod appenders;
pub mod core;
pub mod global;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, EventLogger, EventRecord, LogLevel, LogObject, LoggerBuilder, LoggerConfig,
        LoggerError, LoggerMetrics, OutputFormat, PayloadValue, RequestContext, Result,
        TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, FileAppender, MemoryAppender};
pub use core::{
    effective_level, Appender, DebugText, EventLogger, EventRecord, LogLevel, LogObject,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, PayloadValue,
    ProcessLevel, RequestContext, Result, Serialized, TimestampFormat, DEFAULT_PROCESS_LEVEL,
    PANIC_EVENT,
};
