//! Effective level resolution
//!
//! The level an event is filtered against comes from two places: an
//! override carried by the request context, and the process-wide level.
//! The override always wins when present.

use super::log_level::LogLevel;
use super::request_context::RequestContext;
use parking_lot::RwLock;

/// Process level used until one is set explicitly.
pub const DEFAULT_PROCESS_LEVEL: LogLevel = LogLevel::Debug;

/// Process-wide minimum level, safe to read and write from any thread.
#[derive(Debug)]
pub struct ProcessLevel {
    level: RwLock<LogLevel>,
}

impl ProcessLevel {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level: RwLock::new(level),
        }
    }

    #[inline]
    pub fn get(&self) -> LogLevel {
        *self.level.read()
    }

    /// Replace the process level. `Unset` restores [`DEFAULT_PROCESS_LEVEL`].
    pub fn set(&self, level: LogLevel) {
        let level = if level.is_unset() {
            DEFAULT_PROCESS_LEVEL
        } else {
            level
        };
        *self.level.write() = level;
    }
}

impl Default for ProcessLevel {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESS_LEVEL)
    }
}

/// The level events on `ctx` are filtered against.
#[inline]
pub fn effective_level(ctx: &RequestContext, process: &ProcessLevel) -> LogLevel {
    ctx.level_override().unwrap_or_else(|| process.get())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_default_is_debug() {
        let process = ProcessLevel::default();
        assert_eq!(effective_level(&RequestContext::new(), &process), LogLevel::Debug);
    }

    #[test]
    fn test_override_wins() {
        let process = ProcessLevel::new(LogLevel::Warn);
        let ctx = RequestContext::new().with_level(LogLevel::Info);
        assert_eq!(effective_level(&ctx, &process), LogLevel::Info);

        let sibling = RequestContext::new();
        assert_eq!(effective_level(&sibling, &process), LogLevel::Warn);
    }

    #[test]
    fn test_set_unset_restores_default() {
        let process = ProcessLevel::new(LogLevel::Error);
        process.set(LogLevel::Unset);
        assert_eq!(process.get(), DEFAULT_PROCESS_LEVEL);
    }

    #[test]
    fn test_concurrent_set_and_read() {
        let process = Arc::new(ProcessLevel::default());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let process = Arc::clone(&process);
                thread::spawn(move || {
                    for j in 0..1000 {
                        let level = LogLevel::EMITTABLE[(i + j) % LogLevel::EMITTABLE.len()];
                        process.set(level);
                        let seen = effective_level(&RequestContext::new(), &process);
                        assert!(!seen.is_unset());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("thread should not panic");
        }
    }
}
