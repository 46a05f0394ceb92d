//! In-memory appender
//!
//! Keeps every delivered record. Clones share the same buffer, so a test
//! can hand one clone to the logger and inspect the other.

use crate::core::{Appender, EventRecord, Result};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct MemoryAppender {
    records: Arc<Mutex<Vec<EventRecord>>>,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records delivered so far, oldest first.
    pub fn records(&self) -> Vec<EventRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, record: &EventRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use std::panic::Location;

    #[test]
    fn test_clones_share_buffer() {
        let memory = MemoryAppender::new();
        let mut sink = memory.clone();

        sink.append(&EventRecord::new(LogLevel::Info, "a", Location::caller()))
            .unwrap();
        sink.append(&EventRecord::new(LogLevel::Warn, "b", Location::caller()))
            .unwrap();

        assert_eq!(memory.len(), 2);
        assert_eq!(memory.records()[1].event, "b");

        memory.clear();
        assert!(sink.is_empty());
    }
}
