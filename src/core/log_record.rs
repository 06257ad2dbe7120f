//! Transient per-call log record

use super::log_context::LogContext;
use super::log_level::LogLevel;
use std::panic::Location;
use std::path::Path;

/// One log call, alive only until it has been written to every sink.
///
/// The record deliberately carries no timestamp: the formatter stamps it
/// when the record is serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub message: String,
    pub logger: String,
    pub module: String,
    pub line: Option<u32>,
    pub context: LogContext,
    pub exc_info: Option<String>,
}

impl LogRecord {
    pub fn new(level: LogLevel, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            logger: logger.into(),
            module: String::from("unknown"),
            line: None,
            context: LogContext::new(),
            exc_info: None,
        }
    }

    /// Record the calling code unit: the file stem of the caller, plus its line
    pub fn with_location(mut self, location: &Location<'_>) -> Self {
        self.module = module_from_file(location.file());
        self.line = Some(location.line());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_error(mut self, error: &dyn std::error::Error) -> Self {
        self.exc_info = Some(render_error_chain(error));
        self
    }
}

fn module_from_file(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file)
        .to_string()
}

/// Render an error and its `source()` chain, one `Caused by:` line per link
pub fn render_error_chain(error: &dyn std::error::Error) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str("\nCaused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "could not read workbook")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_location_uses_file_stem() {
        let record = LogRecord::new(LogLevel::Info, "app", "hello")
            .with_location(Location::caller());
        assert_eq!(record.module, "log_record");
        assert!(record.line.is_some());
    }

    #[test]
    fn test_error_chain_rendering() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::NotFound, "cartera.xlsx missing"));
        let record = LogRecord::new(LogLevel::Error, "error", "load failed").with_error(&err);

        assert_eq!(
            record.exc_info.as_deref(),
            Some("could not read workbook\nCaused by: cartera.xlsx missing")
        );
    }
}
