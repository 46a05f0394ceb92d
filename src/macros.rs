//! Logging macros for ergonomic event emission.
//!
//! The event macros check whether the event would be delivered before
//! evaluating any payload expression, so a filtered call costs one level
//! comparison.
//!
//! # Examples
//!
//! ```
//! use rust_event_logger::prelude::*;
//! use rust_event_logger::{event, event_warn};
//!
//! let logger = EventLogger::new();
//! let ctx = RequestContext::new().with_log_id("abc");
//!
//! // Explicit level
//! event!(logger, LogLevel::Info, ctx, "server_started", "port", 8080);
//!
//! // Per-severity shorthand
//! event_warn!(logger, ctx, "retrying", "attempt", 1, "of", 3);
//! ```

/// Build a `Vec<PayloadValue>` from a flat list of keys and values.
///
/// # Examples
///
/// ```
/// use rust_event_logger::{kv, PayloadValue};
///
/// let pairs = kv!["user", "ann", "age", 31, "admin", false];
/// assert_eq!(pairs.len(), 6);
/// assert_eq!(pairs[3].to_text(), "31");
///
/// let empty: Vec<PayloadValue> = kv![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! kv {
    ($($value:expr),* $(,)?) => {{
        let pairs: ::std::vec::Vec<$crate::PayloadValue> =
            ::std::vec![$($crate::PayloadValue::from($value)),*];
        pairs
    }};
}

/// Emit an event at an explicit level.
///
/// # Examples
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = EventLogger::new();
/// # let ctx = RequestContext::new();
/// use rust_event_logger::event;
/// event!(logger, LogLevel::Notice, ctx, "config_reloaded");
/// event!(logger, LogLevel::Error, ctx, "upstream_status", "code", 500);
/// ```
#[macro_export]
macro_rules! event {
    ($logger:expr, $level:expr, $ctx:expr, $event:expr $(, $value:expr)* $(,)?) => {{
        let logger: &$crate::EventLogger = &$logger;
        let ctx: &$crate::RequestContext = &$ctx;
        let level: $crate::LogLevel = $level;
        if logger.enabled(ctx, level) {
            logger.log_event(level, ctx, $event, $crate::kv![$($value),*]);
        }
    }};
}

/// Emit a trace-level event.
#[macro_export]
macro_rules! event_trace {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::event!($logger, $crate::LogLevel::Trace, $ctx, $($arg)+)
    };
}

/// Emit a debug-level event.
#[macro_export]
macro_rules! event_debug {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::event!($logger, $crate::LogLevel::Debug, $ctx, $($arg)+)
    };
}

/// Emit an info-level event.
///
/// # Examples
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = EventLogger::new();
/// # let ctx = RequestContext::new();
/// use rust_event_logger::event_info;
/// event_info!(logger, ctx, "cache_hit", "key", "user:7");
/// ```
#[macro_export]
macro_rules! event_info {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::event!($logger, $crate::LogLevel::Info, $ctx, $($arg)+)
    };
}

/// Emit a notice-level event.
#[macro_export]
macro_rules! event_notice {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::event!($logger, $crate::LogLevel::Notice, $ctx, $($arg)+)
    };
}

/// Emit a warn-level event.
#[macro_export]
macro_rules! event_warn {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::event!($logger, $crate::LogLevel::Warn, $ctx, $($arg)+)
    };
}

/// Emit a fatal-level event. The process keeps running.
#[macro_export]
macro_rules! event_fatal {
    ($logger:expr, $ctx:expr, $($arg:tt)+) => {
        $crate::event!($logger, $crate::LogLevel::Fatal, $ctx, $($arg)+)
    };
}

/// Emit an error-level event whose first pair is `("err", <message>)`,
/// or `("err", "nil")` for `None`.
///
/// # Examples
///
/// ```
/// # use rust_event_logger::prelude::*;
/// # let logger = EventLogger::new();
/// # let ctx = RequestContext::new();
/// use rust_event_logger::event_error;
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such user");
/// event_error!(logger, ctx, Some(&err), "lookup_failed", "uid", 7);
/// event_error!(logger, ctx, None, "lookup_failed", "uid", 8);
/// ```
#[macro_export]
macro_rules! event_error {
    ($logger:expr, $ctx:expr, $err:expr, $event:expr $(, $value:expr)* $(,)?) => {{
        let logger: &$crate::EventLogger = &$logger;
        let ctx: &$crate::RequestContext = &$ctx;
        if logger.enabled(ctx, $crate::LogLevel::Error) {
            let err: ::std::option::Option<&dyn ::std::error::Error> = $err;
            logger.error_with_cause(ctx, err, $event, $crate::kv![$($value),*]);
        }
    }};
}
