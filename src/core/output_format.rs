//! Output format configuration for event records
//!
//! Provides the formats appenders render records with:
//! - Text: Human-readable single line (console default)
//! - Json: One JSON object per line (file default)

use super::event_record::{EventRecord, OrderedPairs};
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Output format for event records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    ///
    /// Example: `2025-01-08 10:30:45.123456 INFO   src/main.rs:42 > user_login log_id=abc payload={uid=7}`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"time":"2025-01-08 10:30:45.123456","level":"info","caller":"src/main.rs:42","log_id":"abc","event":"user_login","payload":{"uid":"7"},"suffix":null}`
    Json,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    time: serde_json::Value,
    level: String,
    caller: String,
    log_id: &'a str,
    event: &'a str,
    payload: OrderedPairs<'a>,
    suffix: Option<&'a serde_json::Value>,
}

impl OutputFormat {
    /// Format a record according to this output format
    pub fn format(&self, record: &EventRecord, timestamp_format: &TimestampFormat) -> String {
        match self {
            OutputFormat::Text => Self::format_text(record, timestamp_format),
            OutputFormat::Json => Self::format_json(record, timestamp_format),
        }
    }

    /// Format as human-readable text
    fn format_text(record: &EventRecord, timestamp_format: &TimestampFormat) -> String {
        format!(
            "{} {:6} {}",
            timestamp_format.format(&record.timestamp),
            record.level.to_str(),
            Self::format_body(record)
        )
    }

    /// Everything after the level column; shared with the colored console output.
    pub(crate) fn format_body(record: &EventRecord) -> String {
        let payload = record
            .payload
            .iter()
            .map(|(k, v)| format!("{}={}", sanitize(k), sanitize(v)))
            .collect::<Vec<_>>()
            .join(" ");

        let mut line = format!(
            "{} > {} log_id={} payload={{{}}}",
            record.caller(),
            sanitize(&record.event),
            sanitize(&record.log_id),
            payload
        );

        if let Some(ref suffix) = record.suffix {
            line.push_str(" suffix=");
            line.push_str(&serde_json::to_string(suffix).unwrap_or_default());
        }

        line
    }

    /// Format as JSON
    fn format_json(record: &EventRecord, timestamp_format: &TimestampFormat) -> String {
        let rendered = timestamp_format.format(&record.timestamp);
        let time = match rendered.parse::<i64>() {
            Ok(millis) if timestamp_format.is_numeric() => serde_json::Value::from(millis),
            _ => serde_json::Value::String(rendered),
        };

        let line = JsonLine {
            time,
            level: record.level.to_str().to_lowercase(),
            caller: record.caller(),
            log_id: &record.log_id,
            event: &record.event,
            payload: OrderedPairs(&record.payload),
            suffix: record.suffix.as_ref(),
        };

        serde_json::to_string(&line).unwrap_or_default()
    }
}

/// Escape line breaks and tabs so one record stays on one line
/// and cannot forge additional entries.
fn sanitize(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogLevel;
    use serde_json::json;
    use std::panic::Location;

    fn sample_record() -> EventRecord {
        EventRecord::new(LogLevel::Info, "user_login", Location::caller())
            .with_log_id("req-1")
            .with_payload(vec![
                ("uid".to_string(), "7".to_string()),
                ("name".to_string(), "ann\nERROR forged".to_string()),
            ])
            .with_suffix(Some(json!({"app": "billing"})))
    }

    #[test]
    fn test_text_format() {
        let output = OutputFormat::Text.format(&sample_record(), &TimestampFormat::UnixMillis);
        assert!(output.contains("INFO"));
        assert!(output.contains("> user_login log_id=req-1"));
        assert!(output.contains("payload={uid=7 name=ann\\nERROR forged}"));
        assert!(output.contains(r#"suffix={"app":"billing"}"#));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn test_text_format_without_suffix() {
        let record = sample_record().with_suffix(None);
        let output = OutputFormat::Text.format(&record, &TimestampFormat::Standard);
        assert!(!output.contains("suffix="));
    }

    #[test]
    fn test_json_format() {
        let output = OutputFormat::Json.format(&sample_record(), &TimestampFormat::UnixMillis);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "user_login");
        assert_eq!(parsed["log_id"], "req-1");
        assert_eq!(parsed["payload"]["uid"], "7");
        assert_eq!(parsed["payload"]["name"], "ann\nERROR forged");
        assert_eq!(parsed["suffix"]["app"], "billing");
        assert!(parsed["caller"].as_str().unwrap().contains(".rs:"));
    }

    #[test]
    fn test_json_numeric_time() {
        let output = OutputFormat::Json.format(&sample_record(), &TimestampFormat::UnixMillis);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["time"].is_i64());

        let output = OutputFormat::Json.format(&sample_record(), &TimestampFormat::Rfc3339);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["time"].is_string());
    }

    #[test]
    fn test_json_null_suffix() {
        let record = sample_record().with_suffix(None);
        let output = OutputFormat::Json.format(&record, &TimestampFormat::Standard);
        assert!(output.contains("\"suffix\":null"));
    }
}
