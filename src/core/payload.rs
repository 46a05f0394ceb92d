//! Payload values and their text encoding
//!
//! Every key and value passed to an event is a [`PayloadValue`]. When an
//! event is actually emitted, each one is rendered with
//! [`PayloadValue::to_text`], which is total: it never fails and returns an
//! empty string in the worst case.
//!
//! Rendering follows a fixed order, first match wins:
//!
//! 1. nil renders as `""`
//! 2. text is returned unchanged
//! 3. objects exposing [`LogObject::debug_text`]
//! 4. objects exposing [`LogObject::log_text`]
//! 5. booleans render as `true` / `false`
//! 6. errors (and objects exposing [`LogObject::as_error`]) render their message
//! 7. integers of every width render in decimal, sign-correct and full width
//! 8. floats are truncated toward zero and rendered as integers
//! 9. everything else is serialized to JSON, or `""` if that fails
//!
//! Float truncation is intentional: `3.124567889` renders as `"3"`.

use super::log_level::LogLevel;
use serde::Serialize;
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Capabilities a custom payload object may expose.
///
/// All methods default to "not supported". The encoder consults them in
/// declaration order, so an object providing both a debug text and a log
/// text is rendered with its debug text.
///
/// # Example
///
/// ```
/// use rust_event_logger::{LogObject, PayloadValue};
///
/// struct UserId(u64);
///
/// impl LogObject for UserId {
///     fn log_text(&self) -> Option<String> {
///         Some(format!("user-{}", self.0))
///     }
/// }
///
/// assert_eq!(PayloadValue::object(UserId(7)).to_text(), "user-7");
/// ```
pub trait LogObject: Send + Sync {
    /// Developer-oriented representation.
    fn debug_text(&self) -> Option<String> {
        None
    }

    /// Representation tailored for log lines.
    fn log_text(&self) -> Option<String> {
        None
    }

    /// The object viewed as an error; its message is used.
    fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
        None
    }

    /// Structured fallback. `None` (or a serialization failure) renders as `""`.
    fn to_json(&self) -> Option<serde_json::Value> {
        None
    }
}

/// Wraps any `Debug` value so it renders through its `{:?}` form.
pub struct DebugText<T>(pub T);

impl<T: fmt::Debug + Send + Sync> LogObject for DebugText<T> {
    fn debug_text(&self) -> Option<String> {
        Some(format!("{:?}", self.0))
    }
}

/// Wraps any `Serialize` value so it renders as JSON.
///
/// Serialization happens lazily, only if the event is emitted.
pub struct Serialized<T>(pub T);

impl<T: Serialize + Send + Sync> LogObject for Serialized<T> {
    fn to_json(&self) -> Option<serde_json::Value> {
        serde_json::to_value(&self.0).ok()
    }
}

/// A single key or value of an event payload.
#[derive(Clone)]
pub enum PayloadValue {
    Nil,
    Text(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Error(Arc<dyn StdError + Send + Sync>),
    Json(serde_json::Value),
    Object(Arc<dyn LogObject>),
}

impl PayloadValue {
    /// Render this value as text.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            PayloadValue::Nil => String::new(),
            PayloadValue::Text(s) => s.clone(),
            PayloadValue::Object(obj) => encode_object(obj.as_ref()),
            PayloadValue::Bool(b) => b.to_string(),
            PayloadValue::Error(err) => err.to_string(),
            PayloadValue::Int(i) => i.to_string(),
            PayloadValue::Uint(u) => u.to_string(),
            PayloadValue::Float(f) => truncate_float(*f).to_string(),
            PayloadValue::Json(value) => serde_json::to_string(value).unwrap_or_default(),
        }
    }

    /// Wrap a custom [`LogObject`].
    pub fn object<T: LogObject + 'static>(value: T) -> Self {
        PayloadValue::Object(Arc::new(value))
    }

    /// Render a value through its `Debug` implementation.
    pub fn debug<T: fmt::Debug + Send + Sync + 'static>(value: T) -> Self {
        PayloadValue::object(DebugText(value))
    }

    /// Render a value as JSON when the event is emitted.
    pub fn serialized<T: Serialize + Send + Sync + 'static>(value: T) -> Self {
        PayloadValue::object(Serialized(value))
    }

    /// Wrap an error; it renders as its message.
    pub fn error<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        PayloadValue::Error(Arc::new(err))
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, PayloadValue::Nil)
    }
}

fn encode_object(obj: &dyn LogObject) -> String {
    if let Some(text) = obj.debug_text() {
        return text;
    }
    if let Some(text) = obj.log_text() {
        return text;
    }
    if let Some(err) = obj.as_error() {
        return err.to_string();
    }
    obj.to_json()
        .and_then(|value| serde_json::to_string(&value).ok())
        .unwrap_or_default()
}

/// Truncate toward zero. NaN maps to 0, infinities saturate.
#[inline]
fn truncate_float(value: f64) -> i64 {
    value as i64
}

impl fmt::Debug for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadValue::Nil => write!(f, "Nil"),
            PayloadValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            PayloadValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            PayloadValue::Int(i) => f.debug_tuple("Int").field(i).finish(),
            PayloadValue::Uint(u) => f.debug_tuple("Uint").field(u).finish(),
            PayloadValue::Float(fl) => f.debug_tuple("Float").field(fl).finish(),
            PayloadValue::Error(err) => f.debug_tuple("Error").field(&err.to_string()).finish(),
            PayloadValue::Json(value) => f.debug_tuple("Json").field(value).finish(),
            PayloadValue::Object(_) => write!(f, "Object(..)"),
        }
    }
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for PayloadValue {
    fn from(s: &str) -> Self {
        PayloadValue::Text(s.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(s: String) -> Self {
        PayloadValue::Text(s)
    }
}

impl From<&String> for PayloadValue {
    fn from(s: &String) -> Self {
        PayloadValue::Text(s.clone())
    }
}

impl From<Cow<'_, str>> for PayloadValue {
    fn from(s: Cow<'_, str>) -> Self {
        PayloadValue::Text(s.into_owned())
    }
}

impl From<bool> for PayloadValue {
    fn from(b: bool) -> Self {
        PayloadValue::Bool(b)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PayloadValue {
                fn from(v: $t) -> Self {
                    PayloadValue::Int(v as i64)
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for PayloadValue {
                fn from(v: $t) -> Self {
                    PayloadValue::Uint(v as u64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for PayloadValue {
    fn from(f: f32) -> Self {
        PayloadValue::Float(f64::from(f))
    }
}

impl From<f64> for PayloadValue {
    fn from(f: f64) -> Self {
        PayloadValue::Float(f)
    }
}

impl From<()> for PayloadValue {
    fn from(_: ()) -> Self {
        PayloadValue::Nil
    }
}

impl<T: Into<PayloadValue>> From<Option<T>> for PayloadValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PayloadValue::Nil, Into::into)
    }
}

impl From<serde_json::Value> for PayloadValue {
    fn from(value: serde_json::Value) -> Self {
        PayloadValue::Json(value)
    }
}

impl From<std::io::Error> for PayloadValue {
    fn from(err: std::io::Error) -> Self {
        PayloadValue::error(err)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for PayloadValue {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        PayloadValue::Error(Arc::from(err))
    }
}

impl<T: fmt::Debug + Send + Sync + 'static> From<DebugText<T>> for PayloadValue {
    fn from(value: DebugText<T>) -> Self {
        PayloadValue::object(value)
    }
}

impl<T: Serialize + Send + Sync + 'static> From<Serialized<T>> for PayloadValue {
    fn from(value: Serialized<T>) -> Self {
        PayloadValue::object(value)
    }
}

impl From<LogLevel> for PayloadValue {
    fn from(level: LogLevel) -> Self {
        PayloadValue::Text(level.to_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Both;

    impl LogObject for Both {
        fn debug_text(&self) -> Option<String> {
            Some("debug".to_string())
        }

        fn log_text(&self) -> Option<String> {
            Some("log".to_string())
        }
    }

    struct LogOnly;

    impl LogObject for LogOnly {
        fn log_text(&self) -> Option<String> {
            Some("log-only".to_string())
        }

        fn to_json(&self) -> Option<serde_json::Value> {
            Some(serde_json::json!({"ignored": true}))
        }
    }

    #[derive(Debug)]
    struct Timeout;

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "upstream timed out")
        }
    }

    impl StdError for Timeout {}

    struct ErrorObject(Timeout);

    impl LogObject for ErrorObject {
        fn as_error(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[derive(Serialize)]
    struct Order {
        id: u32,
        sku: &'static str,
    }

    #[test]
    fn test_basic_values() {
        assert_eq!(PayloadValue::from("x").to_text(), "x");
        assert_eq!(PayloadValue::from(true).to_text(), "true");
        assert_eq!(PayloadValue::from(false).to_text(), "false");
        assert_eq!(PayloadValue::from(-7_i64).to_text(), "-7");
        assert_eq!(PayloadValue::Nil.to_text(), "");
        assert_eq!(PayloadValue::from(None::<i32>).to_text(), "");
        assert_eq!(PayloadValue::from(Some(12345)).to_text(), "12345");
    }

    #[test]
    fn test_integers_full_width() {
        assert_eq!(PayloadValue::from(i64::MIN).to_text(), "-9223372036854775808");
        assert_eq!(PayloadValue::from(u64::MAX).to_text(), "18446744073709551615");
        assert_eq!(PayloadValue::from(-128_i8).to_text(), "-128");
        assert_eq!(PayloadValue::from(255_u8).to_text(), "255");
        assert_eq!(PayloadValue::from(usize::MAX).to_text(), usize::MAX.to_string());
    }

    #[test]
    fn test_float_truncation() {
        assert_eq!(PayloadValue::from(3.124567889).to_text(), "3");
        assert_eq!(PayloadValue::from(23412353.12412).to_text(), "23412353");
        assert_eq!(PayloadValue::from(-3.9).to_text(), "-3");
        assert_eq!(PayloadValue::from(0.99_f32).to_text(), "0");
        assert_eq!(PayloadValue::from(f64::NAN).to_text(), "0");
        assert_eq!(PayloadValue::from(f64::INFINITY).to_text(), i64::MAX.to_string());
    }

    #[test]
    fn test_debug_text_wins_over_log_text() {
        assert_eq!(PayloadValue::object(Both).to_text(), "debug");
    }

    #[test]
    fn test_log_text_wins_over_json() {
        assert_eq!(PayloadValue::object(LogOnly).to_text(), "log-only");
    }

    #[test]
    fn test_error_values() {
        assert_eq!(PayloadValue::error(Timeout).to_text(), "upstream timed out");
        assert_eq!(PayloadValue::object(ErrorObject(Timeout)).to_text(), "upstream timed out");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        assert_eq!(PayloadValue::from(io).to_text(), "missing file");
    }

    #[test]
    fn test_debug_wrapper() {
        assert_eq!(PayloadValue::debug(vec![1, 2]).to_text(), "[1, 2]");
    }

    #[test]
    fn test_serialized_fallback() {
        let order = Order { id: 9, sku: "A-1" };
        assert_eq!(PayloadValue::serialized(order).to_text(), r#"{"id":9,"sku":"A-1"}"#);
        assert_eq!(
            PayloadValue::from(serde_json::json!(["a", 1])).to_text(),
            r#"["a",1]"#
        );
    }

    #[test]
    fn test_unserializable_is_empty() {
        let mut map = HashMap::new();
        map.insert((1, 2), "tuple keys are not valid JSON object keys");
        assert_eq!(PayloadValue::serialized(map).to_text(), "");
    }

    #[test]
    fn test_level_renders_name() {
        assert_eq!(PayloadValue::from(LogLevel::Notice).to_text(), "NOTICE");
    }
}
