//! Timestamp formatting utilities
//!
//! Provides the timestamp layouts appenders can render an event record with.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

const STANDARD_LAYOUT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Layout used when rendering [`chrono`] timestamps.
///
/// # Examples
///
/// ```
/// use rust_event_logger::TimestampFormat;
/// use chrono::Utc;
///
/// let rendered = TimestampFormat::UnixMillis.format(&Utc::now());
/// assert!(rendered.parse::<i64>().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local time with microseconds: `2025-01-08 10:30:45.123456`
    #[default]
    Standard,

    /// RFC 3339 in UTC: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, rendered in local time.
    ///
    /// A format chrono cannot render falls back to the `Standard` layout.
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Standard => datetime
                .with_timezone(&Local)
                .format(STANDARD_LAYOUT)
                .to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let local = datetime.with_timezone(&Local);
                let mut rendered = String::new();
                match write!(rendered, "{}", local.format(format_str)) {
                    Ok(()) => rendered,
                    Err(_) => local.format(STANDARD_LAYOUT).to_string(),
                }
            }
        }
    }

    /// Whether every strftime specifier of a `Custom` format is known
    #[must_use]
    pub fn is_valid(&self) -> bool {
        match self {
            TimestampFormat::Custom(format_str) => !StrftimeItems::new(format_str)
                .any(|item| matches!(item, Item::Error)),
            _ => true,
        }
    }

    /// Whether the rendered value is a bare number
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::UnixMillis)
    }
}
