//! Process-wide event logger
//!
//! Free functions that log through one shared [`EventLogger`]. The logger
//! is either installed explicitly with [`init_global`] or built on first
//! use from the environment (see [`LoggerConfig::from_env`]).

use crate::appenders::ConsoleAppender;
use crate::core::{
    EventLogger, LogLevel, LoggerConfig, LoggerError, PayloadValue, RequestContext, Result,
};
use std::error::Error as StdError;
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<EventLogger> = OnceLock::new();

/// Install `logger` as the process-wide logger.
///
/// Fails with [`LoggerError::AlreadyInitialized`] once a logger is in
/// place, including one created lazily by an earlier call to [`logger`].
pub fn init_global(logger: EventLogger) -> Result<()> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The process-wide logger, built from the environment on first use.
pub fn logger() -> &'static EventLogger {
    GLOBAL_LOGGER.get_or_init(|| {
        let config = LoggerConfig::from_env();
        EventLogger::from_config(&config).unwrap_or_else(|e| {
            eprintln!(
                "[LOGGER ERROR] Failed to initialize global logger: {}. Falling back to console output.",
                e
            );
            EventLogger::builder()
                .process_level(config.process_level)
                .appender(ConsoleAppender::with_colors(config.use_colors))
                .build()
        })
    })
}

pub fn set_process_level(level: LogLevel) {
    logger().set_process_level(level);
}

pub fn effective_level(ctx: &RequestContext) -> LogLevel {
    logger().effective_level(ctx)
}

#[track_caller]
pub fn event_trace(ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
    logger().trace(ctx, event, kv);
}

#[track_caller]
pub fn event_debug(ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
    logger().debug(ctx, event, kv);
}

#[track_caller]
pub fn event_info(ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
    logger().info(ctx, event, kv);
}

#[track_caller]
pub fn event_notice(ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
    logger().notice(ctx, event, kv);
}

#[track_caller]
pub fn event_warn(ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
    logger().warn(ctx, event, kv);
}

/// Emit an Error event with `err` as the leading `"err"` pair.
#[track_caller]
pub fn event_error(
    ctx: &RequestContext,
    err: Option<&dyn StdError>,
    event: &str,
    kv: Vec<PayloadValue>,
) {
    logger().error_with_cause(ctx, err, event, kv);
}

/// Emit a Fatal event. Unlike many loggers this does not exit the process.
#[track_caller]
pub fn event_fatal(ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
    logger().fatal(ctx, event, kv);
}
