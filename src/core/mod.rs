//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod error;
pub mod event_record;
pub mod level_resolver;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod payload;
pub mod request_context;
pub mod timestamp;

pub use appender::Appender;
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use event_record::EventRecord;
pub use level_resolver::{effective_level, ProcessLevel, DEFAULT_PROCESS_LEVEL};
pub use log_level::LogLevel;
pub use logger::{EventLogger, LoggerBuilder, PANIC_EVENT};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use payload::{DebugText, LogObject, PayloadValue, Serialized};
pub use request_context::RequestContext;
pub use timestamp::TimestampFormat;
