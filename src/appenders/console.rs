//! Console appender: human-readable, severity-colorized lines on stderr

use crate::core::{Appender, LogRecord, LoggerError, Result, TimestampFormat};
use chrono::Utc;
use colored::Colorize;
use std::io::Write;

pub struct ConsoleAppender {
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use recon_logger::appenders::ConsoleAppender;
    /// use recon_logger::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_timestamp_format(TimestampFormat::TimeOnly);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Replace newlines, carriage returns and tabs with escape sequences so one
    /// record can never masquerade as several console lines
    fn sanitize(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    fn format_text(&self, record: &LogRecord) -> String {
        let level_str = if self.use_colors {
            format!("{:8}", record.level.to_str())
                .color(record.level.color_code())
                .to_string()
        } else {
            format!("{:8}", record.level.to_str())
        };

        let mut line = format!(
            "[{}] [{}] {} {} - {}",
            self.timestamp_format.format(&Utc::now()),
            level_str,
            record.logger,
            record.module,
            Self::sanitize(&record.message)
        );

        if !record.context.is_empty() {
            line.push(' ');
            line.push_str(&Self::sanitize(&record.context.format_fields()));
        }
        if let Some(ref exc_info) = record.exc_info {
            line.push_str(" | ");
            line.push_str(&Self::sanitize(exc_info));
        }

        line
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let output = self.format_text(record);
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", output).map_err(|e| LoggerError::sink_write("console", e.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
