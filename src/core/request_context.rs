//! Request-scoped logging metadata
//!
//! A [`RequestContext`] travels with one request or operation and carries
//! the metadata every event emitted on its behalf should see:
//! - a log identifier used to correlate lines of the same request
//! - an optional severity override for this request only
//! - an optional suffix value appended verbatim to every record
//!
//! Contexts are immutable. Each `with_*` method returns a derived copy and
//! leaves the receiver untouched, so siblings derived from the same parent
//! never observe each other's overrides.

use super::log_level::LogLevel;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    log_id: Option<Arc<str>>,
    level: Option<LogLevel>,
    suffix: Option<Arc<serde_json::Value>>,
}

impl RequestContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty context with no identifier, override or suffix.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context carrying `log_id`.
    #[must_use]
    pub fn with_log_id(&self, log_id: impl AsRef<str>) -> Self {
        Self {
            log_id: Some(Arc::from(log_id.as_ref())),
            ..self.clone()
        }
    }

    /// Derive a context whose events are filtered against `level`
    /// instead of the process level. `Unset` clears the override.
    #[must_use]
    pub fn with_level(&self, level: LogLevel) -> Self {
        Self {
            level: (!level.is_unset()).then_some(level),
            ..self.clone()
        }
    }

    /// Derive a context from a textual override, e.g. a request header.
    ///
    /// Text that does not name a level leaves the derived context without
    /// an override.
    #[must_use]
    pub fn with_level_name(&self, name: &str) -> Self {
        self.with_level(name.parse().unwrap_or(LogLevel::Unset))
    }

    /// Derive a context carrying `suffix`.
    #[must_use]
    pub fn with_suffix(&self, suffix: impl Into<serde_json::Value>) -> Self {
        Self {
            suffix: Some(Arc::new(suffix.into())),
            ..self.clone()
        }
    }

    /// Derive a context carrying any serializable value as its suffix.
    ///
    /// If serialization fails the derived context has no suffix.
    #[must_use]
    pub fn with_serialized_suffix<T: Serialize + ?Sized>(&self, suffix: &T) -> Self {
        Self {
            suffix: serde_json::to_value(suffix).ok().map(Arc::new),
            ..self.clone()
        }
    }

    /// The log identifier, or `""` when none was attached.
    pub fn log_id(&self) -> &str {
        self.log_id.as_deref().unwrap_or("")
    }

    pub fn has_log_id(&self) -> bool {
        self.log_id.is_some()
    }

    /// The severity override, if any.
    pub fn level_override(&self) -> Option<LogLevel> {
        self.level.filter(|level| !level.is_unset())
    }

    pub fn suffix(&self) -> Option<&serde_json::Value> {
        self.suffix.as_deref()
    }

    /// A fresh context keeping only this context's log identifier.
    ///
    /// Used when a failure must be reported without reusing whatever
    /// state caused it.
    pub(crate) fn detached(&self) -> Self {
        RequestContext::background().with_log_id(self.log_id())
    }
}
