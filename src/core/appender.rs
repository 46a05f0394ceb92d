//! Appender trait for event record destinations

use super::{error::Result, event_record::EventRecord};

/// A destination for emitted records (console, file, memory, ...).
///
/// The record's `level` tells the appender which severity it was emitted
/// at. Calls are made with the logger's appender lock held, one record at
/// a time.
pub trait Appender: Send + Sync {
    fn append(&mut self, record: &EventRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
