//! Event logger implementation
//!
//! [`EventLogger`] is the emission surface: one method per severity, each
//! taking a [`RequestContext`], an event name and a flat key/value list.
//! An event is delivered only if its severity is at least the context's
//! effective level. Delivered events are assembled into an
//! [`EventRecord`] and handed to every registered [`Appender`].
//!
//! Logging never fails from the caller's point of view. A panic raised
//! while assembling a record, or inside an appender, is contained and
//! reported as a separate `Fatal` event named [`PANIC_EVENT`].

use super::{
    appender::Appender,
    config::LoggerConfig,
    error::{LoggerError, Result},
    event_record::EventRecord,
    level_resolver::{effective_level, ProcessLevel, DEFAULT_PROCESS_LEVEL},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    payload::PayloadValue,
    request_context::RequestContext,
};
use crate::appenders::{ConsoleAppender, FileAppender};
use parking_lot::RwLock;
use std::any::Any;
use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe, Location};

/// Event name of the record emitted when formatting an event panics.
pub const PANIC_EVENT: &str = "ilog_panic";

/// Error attached in front of the caller's pairs by `error_with_cause`.
#[derive(Clone, Copy)]
enum Cause<'a> {
    Absent,
    Nil,
    Error(&'a (dyn StdError + 'a)),
}

enum AppenderFailure {
    Error(LoggerError),
    Panic(String),
}

pub struct EventLogger {
    process_level: ProcessLevel,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    metrics: LoggerMetrics,
}

impl EventLogger {
    /// A logger with no appenders and the default process level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            process_level: ProcessLevel::default(),
            appenders: RwLock::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Build a logger from configuration, creating the log directory and
    /// opening today's log file when file output is enabled.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Self::builder().process_level(config.process_level);

        if config.console {
            builder = builder.appender(
                ConsoleAppender::with_colors(config.use_colors)
                    .with_output_format(config.console_format.clone())
                    .with_timestamp_format(config.timestamp_format.clone()),
            );
        }

        if config.file {
            builder = builder.appender(
                FileAppender::daily(&config.log_dir)?
                    .with_output_format(config.file_format.clone())
                    .with_timestamp_format(config.timestamp_format.clone()),
            );
        }

        Ok(builder.build())
    }

    pub fn add_appender(&mut self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Replace the process-wide level. Takes effect for every subsequent
    /// call on every thread; contexts carrying an override are unaffected.
    pub fn set_process_level(&self, level: LogLevel) {
        self.process_level.set(level);
    }

    pub fn process_level(&self) -> LogLevel {
        self.process_level.get()
    }

    /// The level events on `ctx` are filtered against.
    pub fn effective_level(&self, ctx: &RequestContext) -> LogLevel {
        effective_level(ctx, &self.process_level)
    }

    /// Whether an event at `level` on `ctx` would be delivered.
    #[inline]
    pub fn enabled(&self, ctx: &RequestContext, level: LogLevel) -> bool {
        !level.is_unset() && level >= self.effective_level(ctx)
    }

    /// Emit `event` at `level`. Odd-length `kv` lists are padded with an
    /// empty value.
    #[track_caller]
    pub fn log_event(
        &self,
        level: LogLevel,
        ctx: &RequestContext,
        event: &str,
        kv: Vec<PayloadValue>,
    ) {
        let location = Location::caller();
        if !self.enabled(ctx, level) {
            return;
        }
        self.emit(level, ctx, event, Cause::Absent, kv, location);
    }

    #[track_caller]
    #[inline]
    pub fn trace(&self, ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
        self.log_event(LogLevel::Trace, ctx, event, kv);
    }

    #[track_caller]
    #[inline]
    pub fn debug(&self, ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
        self.log_event(LogLevel::Debug, ctx, event, kv);
    }

    #[track_caller]
    #[inline]
    pub fn info(&self, ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
        self.log_event(LogLevel::Info, ctx, event, kv);
    }

    #[track_caller]
    #[inline]
    pub fn notice(&self, ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
        self.log_event(LogLevel::Notice, ctx, event, kv);
    }

    #[track_caller]
    #[inline]
    pub fn warn(&self, ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
        self.log_event(LogLevel::Warn, ctx, event, kv);
    }

    #[track_caller]
    #[inline]
    pub fn error(&self, ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
        self.log_event(LogLevel::Error, ctx, event, kv);
    }

    #[track_caller]
    #[inline]
    pub fn fatal(&self, ctx: &RequestContext, event: &str, kv: Vec<PayloadValue>) {
        self.log_event(LogLevel::Fatal, ctx, event, kv);
    }

    /// Emit an Error event whose payload starts with `("err", <message>)`,
    /// or `("err", "nil")` when `err` is `None`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_event_logger::prelude::*;
    /// use rust_event_logger::kv;
    ///
    /// let logger = EventLogger::new();
    /// let ctx = RequestContext::new().with_log_id("req-1");
    /// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
    ///
    /// logger.error_with_cause(&ctx, Some(&err), "save_failed", kv!["path", "/tmp/a"]);
    /// logger.error_with_cause(&ctx, None, "save_failed", kv!["path", "/tmp/b"]);
    /// ```
    #[track_caller]
    pub fn error_with_cause(
        &self,
        ctx: &RequestContext,
        err: Option<&dyn StdError>,
        event: &str,
        kv: Vec<PayloadValue>,
    ) {
        let location = Location::caller();
        if !self.enabled(ctx, LogLevel::Error) {
            return;
        }
        let cause = err.map_or(Cause::Nil, Cause::Error);
        self.emit(LogLevel::Error, ctx, event, cause, kv, location);
    }

    /// Assemble and deliver a record. Only called for events that passed
    /// filtering.
    fn emit(
        &self,
        level: LogLevel,
        ctx: &RequestContext,
        event: &str,
        cause: Cause<'_>,
        kv: Vec<PayloadValue>,
        location: &'static Location<'static>,
    ) {
        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            Self::build_record(level, ctx, event, cause, kv, location)
        }));

        match built {
            Ok(record) => self.dispatch(ctx, &record, location),
            Err(panic_info) => self.report_panic(ctx, panic_info.as_ref(), location),
        }
    }

    fn build_record(
        level: LogLevel,
        ctx: &RequestContext,
        event: &str,
        cause: Cause<'_>,
        mut kv: Vec<PayloadValue>,
        location: &'static Location<'static>,
    ) -> EventRecord {
        if kv.len() % 2 == 1 {
            kv.push(PayloadValue::Text(String::new()));
        }

        let mut payload = Vec::with_capacity(kv.len() / 2 + 1);
        match cause {
            Cause::Absent => {}
            Cause::Nil => payload.push(("err".to_string(), "nil".to_string())),
            Cause::Error(err) => payload.push(("err".to_string(), err.to_string())),
        }
        payload.extend(
            kv.chunks_exact(2)
                .map(|pair| (pair[0].to_text(), pair[1].to_text())),
        );

        EventRecord::new(level, event, location)
            .with_log_id(ctx.log_id())
            .with_payload(payload)
            .with_suffix(ctx.suffix().cloned())
    }

    /// Report a formatting panic as a Fatal event on a fresh context that
    /// keeps only the original log identifier.
    fn report_panic(
        &self,
        ctx: &RequestContext,
        panic_info: &(dyn Any + Send),
        location: &'static Location<'static>,
    ) {
        self.metrics.record_panic();

        let detached = ctx.detached();
        let report = Self::panic_record(&detached, panic_message(panic_info), location);
        self.dispatch(&detached, &report, location);
    }

    fn panic_record(
        ctx: &RequestContext,
        message: String,
        location: &'static Location<'static>,
    ) -> EventRecord {
        EventRecord::new(LogLevel::Fatal, PANIC_EVENT, location)
            .with_log_id(ctx.log_id())
            .with_payload(vec![
                ("panic".to_string(), message),
                ("stack".to_string(), Backtrace::force_capture().to_string()),
            ])
            .with_suffix(ctx.suffix().cloned())
    }

    /// Hand a record to every appender. An appender that panics is skipped
    /// from then on for this call, and the others receive a panic record
    /// describing it.
    fn dispatch(
        &self,
        ctx: &RequestContext,
        record: &EventRecord,
        location: &'static Location<'static>,
    ) {
        let mut appenders = self.appenders.write();
        let detached = ctx.detached();
        let mut skip: Vec<usize> = Vec::new();
        let mut pending = self.deliver(&mut appenders, record, &skip);

        while !pending.is_empty() {
            skip.extend(pending.iter().map(|(index, _)| *index));
            let mut next = Vec::new();
            for (_, message) in pending {
                self.metrics.record_panic();
                let report = Self::panic_record(&detached, message, location);
                next.extend(self.deliver(&mut appenders, &report, &skip));
            }
            pending = next;
        }
    }

    /// Deliver one record, isolating failures per appender. Returns the
    /// index and panic message of every appender that panicked.
    fn deliver(
        &self,
        appenders: &mut [Box<dyn Appender>],
        record: &EventRecord,
        skip: &[usize],
    ) -> Vec<(usize, String)> {
        let mut has_error = false;
        let mut panicked = Vec::new();

        for (index, appender) in appenders.iter_mut().enumerate() {
            if skip.contains(&index) {
                continue;
            }

            let outcome = isolate(|| appender.append(record))
                .and_then(|()| isolate(|| appender.flush()));

            match outcome {
                Ok(()) => {}
                Err(AppenderFailure::Error(e)) => {
                    eprintln!("[LOGGER ERROR] Appender '{}' failed: {}", appender.name(), e);
                    has_error = true;
                }
                Err(AppenderFailure::Panic(msg)) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender '{}' panicked: {}. \
                         Other appenders continue to function.",
                        appender.name(),
                        msg
                    );
                    has_error = true;
                    panicked.push((index, msg));
                }
            }
        }

        if has_error {
            self.metrics.record_dropped();
        } else {
            self.metrics.record_logged();
        }
        panicked
    }

    /// Get the number of records at least one appender failed to write
    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.write();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    /// Create a builder for EventLogger
    ///
    /// # Example
    /// ```
    /// use rust_event_logger::prelude::*;
    ///
    /// let logger = EventLogger::builder()
    ///     .process_level(LogLevel::Info)
    ///     .appender(MemoryAppender::new())
    ///     .build();
    /// assert_eq!(logger.process_level(), LogLevel::Info);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let dropped = self.metrics.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} dropped records (drop rate: {:.2}%)",
                dropped,
                self.metrics.drop_rate()
            );
        }
    }
}

fn isolate<F>(op: F) -> std::result::Result<(), AppenderFailure>
where
    F: FnOnce() -> Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(AppenderFailure::Error(e)),
        Err(panic_info) => Err(AppenderFailure::Panic(panic_message(panic_info.as_ref()))),
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Builder for constructing an EventLogger with a fluent API
pub struct LoggerBuilder {
    process_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            process_level: DEFAULT_PROCESS_LEVEL,
            appenders: Vec::new(),
        }
    }

    /// Set the initial process level
    #[must_use = "builder methods return a new value"]
    pub fn process_level(mut self, level: LogLevel) -> Self {
        self.process_level = level;
        self
    }

    /// Add an appender
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Build the EventLogger
    pub fn build(self) -> EventLogger {
        let mut logger = EventLogger::new();
        logger.set_process_level(self.process_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
