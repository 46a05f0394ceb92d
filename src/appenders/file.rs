//! File appender implementation

use crate::core::{Appender, EventRecord, LoggerError, OutputFormat, Result, TimestampFormat};
use chrono::{Local, NaiveDate};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileAppender {
    path: PathBuf,
    writer: BufWriter<File>,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl FileAppender {
    /// Open `path` for appending, creating it if needed.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "open log file",
                    format!("Failed to open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::Json,
        })
    }

    /// Open today's log file, `<dir>/YYYY-MM-DD.log` in local time,
    /// creating `dir` if it does not exist.
    ///
    /// The file is chosen once; a long-running process keeps writing to
    /// the file it opened at startup.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_event_logger::appenders::FileAppender;
    /// use rust_event_logger::TimestampFormat;
    ///
    /// let appender = FileAppender::daily("./run_log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    pub fn daily(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| {
            LoggerError::io_operation(
                "create log directory",
                format!("Failed to create directory '{}'", dir.display()),
                e,
            )
        })?;

        Self::new(dir.join(daily_file_name(Local::now().date_naive())))
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the timestamp format for this appender
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn daily_file_name(date: NaiveDate) -> String {
    format!("{}.log", date.format("%Y-%m-%d"))
}

impl Appender for FileAppender {
    fn append(&mut self, record: &EventRecord) -> Result<()> {
        let mut output = self.output_format.format(record, &self.timestamp_format);
        output.push('\n');

        self.writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
