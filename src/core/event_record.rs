//! Event record structure

use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cell::RefCell;
use std::panic::Location;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// One emitted event, ready to be rendered by an appender.
///
/// Payload pairs keep the order in which the caller supplied them.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(serialize_with = "serialize_level")]
    pub level: LogLevel,
    pub file: String,
    pub line: u32,
    pub log_id: String,
    pub event: String,
    #[serde(serialize_with = "serialize_pairs")]
    pub payload: Vec<(String, String)>,
    pub suffix: Option<serde_json::Value>,
    pub thread_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
}

impl EventRecord {
    pub fn new(level: LogLevel, event: impl Into<String>, location: &Location<'_>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            file: location.file().to_string(),
            line: location.line(),
            log_id: String::new(),
            event: event.into(),
            payload: Vec::new(),
            suffix: None,
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
        }
    }

    pub fn with_log_id(mut self, log_id: impl Into<String>) -> Self {
        self.log_id = log_id.into();
        self
    }

    pub fn with_payload(mut self, payload: Vec<(String, String)>) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_suffix(mut self, suffix: Option<serde_json::Value>) -> Self {
        self.suffix = suffix;
        self
    }

    /// Call site as `file:line`.
    pub fn caller(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }

    /// First payload value stored under `key`.
    pub fn payload_value(&self, key: &str) -> Option<&str> {
        self.payload
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize to a single-line JSON object
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Same lowercase names as the JSON line format.
fn serialize_level<S: Serializer>(level: &LogLevel, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&level.to_str().to_lowercase())
}

fn serialize_pairs<S: Serializer>(pairs: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error> {
    OrderedPairs(pairs).serialize(serializer)
}

/// Serializes key/value pairs as a JSON object without reordering keys.
pub(crate) struct OrderedPairs<'a>(pub &'a [(String, String)]);

impl Serialize for OrderedPairs<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_recorded() {
        let location = Location::caller();
        let record = EventRecord::new(LogLevel::Info, "user_login", location);
        assert_eq!(record.file, location.file());
        assert_eq!(record.line, location.line());
        assert!(record.caller().ends_with(&format!(":{}", location.line())));
    }

    #[test]
    fn test_payload_json_keeps_order() {
        let record = EventRecord::new(LogLevel::Warn, "cache_miss", Location::caller())
            .with_log_id("req-9")
            .with_payload(vec![
                ("zeta".to_string(), "1".to_string()),
                ("alpha".to_string(), "2".to_string()),
            ]);

        let json = record.to_json().unwrap();
        let zeta = json.find("\"zeta\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        assert!(zeta < alpha);
        assert!(json.contains("\"log_id\":\"req-9\""));
        assert!(json.contains("\"level\":\"warn\""));
        assert!(json.contains("\"suffix\":null"));
    }

    #[test]
    fn test_level_matches_json_line_format() {
        use crate::core::output_format::OutputFormat;
        use crate::core::timestamp::TimestampFormat;

        let record = EventRecord::new(LogLevel::Notice, "cache_warm", Location::caller());
        let direct: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        let line: serde_json::Value = serde_json::from_str(
            &OutputFormat::Json.format(&record, &TimestampFormat::UnixMillis),
        )
        .unwrap();

        assert_eq!(direct["level"], "notice");
        assert_eq!(direct["level"], line["level"]);
    }

    #[test]
    fn test_payload_value_lookup() {
        let record = EventRecord::new(LogLevel::Error, "db_error", Location::caller()).with_payload(vec![
            ("err".to_string(), "nil".to_string()),
            ("table".to_string(), "users".to_string()),
        ]);
        assert_eq!(record.payload_value("err"), Some("nil"));
        assert_eq!(record.payload_value("missing"), None);
    }
}
