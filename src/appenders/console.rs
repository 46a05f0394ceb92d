//! Console appender implementation

use crate::core::{Appender, EventRecord, LogLevel, OutputFormat, Result, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;

pub struct ConsoleAppender {
    #[cfg_attr(not(feature = "console"), allow(dead_code))]
    use_colors: bool,
    timestamp_format: TimestampFormat,
    output_format: OutputFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
            output_format: OutputFormat::default(),
        }
    }

    /// Set the output format for this appender
    ///
    /// # Example
    ///
    /// ```
    /// use rust_event_logger::appenders::ConsoleAppender;
    /// use rust_event_logger::OutputFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_output_format(OutputFormat::Json);
    /// ```
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

    /// Format as text with an optionally colored level column
    fn format_text(&self, record: &EventRecord) -> String {
        let level_str = format!("{:6}", record.level.to_str());

        #[cfg(feature = "console")]
        let level_str = if self.use_colors {
            level_str.color(record.level.color_code()).to_string()
        } else {
            level_str
        };

        format!(
            "{} {} {}",
            self.timestamp_format.format(&record.timestamp),
            level_str,
            OutputFormat::format_body(record)
        )
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &EventRecord) -> Result<()> {
        let output = match self.output_format {
            OutputFormat::Text => self.format_text(record),
            OutputFormat::Json => self.output_format.format(record, &self.timestamp_format),
        };

        // Route Error and Fatal levels to stderr, others to stdout
        match record.level {
            LogLevel::Error | LogLevel::Fatal => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
