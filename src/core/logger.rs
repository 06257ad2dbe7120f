//! Named logger: a severity threshold plus the sinks bound to one logger name

use super::{
    appender::Appender,
    error::Result,
    log_context::LogContext,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
};
use parking_lot::{Mutex, RwLock};
use std::panic::Location;
use std::path::{Path, PathBuf};

/// A live logger.
///
/// Writes are synchronous: every call reaches all attached sinks before it
/// returns. Sink failures are reported on stderr and counted, never returned
/// to the caller.
pub struct Logger {
    name: String,
    output_path: Option<PathBuf>,
    min_level: RwLock<LogLevel>,
    appenders: Mutex<Vec<Box<dyn Appender>>>,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_path: None,
            min_level: RwLock::new(LogLevel::Info),
            appenders: Mutex::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved path of the structured file sink, if the logger has one
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn min_level(&self) -> LogLevel {
        *self.min_level.read()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.min_level.write() = level;
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= *self.min_level.read()
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.lock().push(appender);
    }

    /// Detach every attached sink and attach `appenders` in their place, as
    /// one step under the sink lock. Detached sinks are flushed before drop.
    pub fn replace_appenders(&self, appenders: Vec<Box<dyn Appender>>) {
        let mut guard = self.appenders.lock();
        for (idx, old) in guard.iter_mut().enumerate() {
            if let Err(e) = old.flush() {
                eprintln!("[LOGGER ERROR] Appender #{} flush on detach failed: {}", idx, e);
            }
        }
        *guard = appenders;
    }

    /// Names of the attached sinks, in dispatch order
    pub fn appender_names(&self) -> Vec<String> {
        self.appenders
            .lock()
            .iter()
            .map(|a| a.name().to_string())
            .collect()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    /// Flush every sink, even after one fails; returns the first failure
    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.appenders.lock();
        let mut first_error = None;
        for appender in appenders.iter_mut() {
            if let Err(e) = appender.flush() {
                eprintln!("[LOGGER ERROR] Appender ({}) flush failed: {}", appender.name(), e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Log at `level`; severity dispatch for all the named operations
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>, context: LogContext) {
        self.log_at(level, message, context, None, Location::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, context: LogContext) {
        self.log_at(LogLevel::Debug, message, context, None, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>, context: LogContext) {
        self.log_at(LogLevel::Info, message, context, None, Location::caller());
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<String>, context: LogContext) {
        self.log_at(LogLevel::Warning, message, context, None, Location::caller());
    }

    /// Log an error, optionally attaching `exc_info` rendered from `error`
    #[track_caller]
    pub fn error(
        &self,
        message: impl Into<String>,
        error: Option<&dyn std::error::Error>,
        context: LogContext,
    ) {
        self.log_at(LogLevel::Error, message, context, error, Location::caller());
    }

    #[track_caller]
    pub fn critical(
        &self,
        message: impl Into<String>,
        error: Option<&dyn std::error::Error>,
        context: LogContext,
    ) {
        self.log_at(LogLevel::Critical, message, context, error, Location::caller());
    }

    /// Threshold check happens before the record is built, so suppressed
    /// calls never pay for formatting
    pub fn log_at(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
        error: Option<&dyn std::error::Error>,
        location: &Location<'_>,
    ) {
        if !self.is_enabled(level) {
            self.metrics.record_suppressed();
            return;
        }

        let mut record = LogRecord::new(level, self.name.as_str(), message)
            .with_location(location)
            .with_context(context);
        if let Some(err) = error {
            record = record.with_error(err);
        }
        self.dispatch(&record);
    }

    fn dispatch(&self, record: &LogRecord) {
        let mut appenders = self.appenders.lock();
        if Self::process_sync(&mut appenders, record) {
            self.metrics.record_dropped();
        } else {
            self.metrics.record_logged();
        }
    }

    /// Write to every sink with per-appender panic isolation; a failing sink
    /// never stops the remaining ones. Returns whether any sink failed.
    fn process_sync(appenders: &mut [Box<dyn Appender>], record: &LogRecord) -> bool {
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(record)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx, panic_msg
                    );
                    has_error = true;
                }
            }
        }

        has_error
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("output_path", &self.output_path)
            .field("min_level", &self.min_level())
            .field("appenders", &self.appender_names())
            .finish()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use recon_logger::prelude::*;
///
/// let logger = Logger::builder("app")
///     .min_level(LogLevel::Debug)
///     .appender(ConsoleAppender::new())
///     .build();
/// assert_eq!(logger.name(), "app");
/// ```
pub struct LoggerBuilder {
    name: String,
    output_path: Option<PathBuf>,
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_path: None,
            min_level: LogLevel::Info,
            appenders: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_appenders(mut self, appenders: Vec<Box<dyn Appender>>) -> Self {
        self.appenders.extend(appenders);
        self
    }

    pub fn build(self) -> Logger {
        Logger {
            name: self.name,
            output_path: self.output_path,
            min_level: RwLock::new(self.min_level),
            appenders: Mutex::new(self.appenders),
            metrics: LoggerMetrics::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, LoggerError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Captures every record it receives
    struct CaptureAppender {
        records: Arc<parking_lot::Mutex<Vec<LogRecord>>>,
    }

    impl Appender for CaptureAppender {
        fn append(&mut self, record: &LogRecord) -> Result<()> {
            self.records.lock().push(record.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "capture"
        }
    }

    struct FailingAppender {
        calls: Arc<AtomicUsize>,
    }

    impl Appender for FailingAppender {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Err(LoggerError::sink_write("failing", "disk full"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Counts flushes; optionally fails every one of them
    struct FlushCountingAppender {
        flushes: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Appender for FlushCountingAppender {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes.fetch_add(1, Ordering::Relaxed);
            if self.fail {
                Err(LoggerError::sink_write("rotating_file", "disk full"))
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &str {
            "flush_counter"
        }
    }

    struct PanickingAppender;

    impl Appender for PanickingAppender {
        fn append(&mut self, _record: &LogRecord) -> Result<()> {
            panic!("sink exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn capture() -> (CaptureAppender, Arc<parking_lot::Mutex<Vec<LogRecord>>>) {
        let records = Arc::new(parking_lot::Mutex::new(Vec::new()));
        (
            CaptureAppender {
                records: Arc::clone(&records),
            },
            records,
        )
    }

    #[test]
    fn test_threshold_suppresses_before_dispatch() {
        let (appender, records) = capture();
        let logger = Logger::builder("app")
            .min_level(LogLevel::Warning)
            .appender(appender)
            .build();

        logger.debug("hidden", LogContext::new());
        logger.info("hidden", LogContext::new());
        logger.warning("shown", LogContext::new());

        assert_eq!(records.lock().len(), 1);
        assert_eq!(logger.metrics().suppressed_count(), 2);
        assert_eq!(logger.metrics().total_logged(), 1);
    }

    #[test]
    fn test_record_carries_name_module_and_context() {
        let (appender, records) = capture();
        let logger = Logger::builder("excel")
            .min_level(LogLevel::Debug)
            .appender(appender)
            .build();

        logger.info("sheet written", LogContext::new().with_field("rows", 12));

        let records = records.lock();
        assert_eq!(records[0].logger, "excel");
        assert_eq!(records[0].module, "logger");
        assert_eq!(records[0].context.get("rows"), Some(&FieldValue::Int(12)));
    }

    #[test]
    fn test_error_attaches_exc_info() {
        let (appender, records) = capture();
        let logger = Logger::builder("error").appender(appender).build();
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");

        logger.error("failed", Some(&io_err), LogContext::new());
        logger.error("failed quietly", None, LogContext::new());

        let records = records.lock();
        assert_eq!(records[0].exc_info.as_deref(), Some("boom"));
        assert!(records[1].exc_info.is_none());
    }

    #[test]
    fn test_failing_sink_does_not_block_others() {
        let (appender, records) = capture();
        let calls = Arc::new(AtomicUsize::new(0));
        let logger = Logger::builder("app")
            .appender(FailingAppender {
                calls: Arc::clone(&calls),
            })
            .appender(PanickingAppender)
            .appender(appender)
            .build();

        for _ in 0..3 {
            logger.info("still delivered", LogContext::new());
        }

        assert_eq!(calls.load(Ordering::Relaxed), 3);
        assert_eq!(records.lock().len(), 3);
        assert_eq!(logger.dropped_count(), 3);
    }

    #[test]
    fn test_flush_reaches_every_sink_after_a_failure() {
        let failing = Arc::new(AtomicUsize::new(0));
        let healthy = Arc::new(AtomicUsize::new(0));
        let logger = Logger::builder("app")
            .appender(FlushCountingAppender {
                flushes: Arc::clone(&failing),
                fail: true,
            })
            .appender(FlushCountingAppender {
                flushes: Arc::clone(&healthy),
                fail: false,
            })
            .build();

        let err = logger.flush().unwrap_err();

        assert!(matches!(err, LoggerError::SinkWrite { .. }));
        assert_eq!(failing.load(Ordering::Relaxed), 1);
        assert_eq!(healthy.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_replace_appenders_never_duplicates() {
        let (first, first_records) = capture();
        let (second, second_records) = capture();
        let logger = Logger::builder("siigo").appender(first).build();

        logger.replace_appenders(vec![Box::new(second)]);
        logger.info("after swap", LogContext::new());

        assert_eq!(logger.appender_names(), vec!["capture".to_string()]);
        assert!(first_records.lock().is_empty());
        assert_eq!(second_records.lock().len(), 1);
    }

    #[test]
    fn test_log_dispatches_by_level() {
        let (appender, records) = capture();
        let logger = Logger::builder("app")
            .min_level(LogLevel::Debug)
            .appender(appender)
            .build();

        for level in LogLevel::ALL {
            logger.log(level, level.to_str(), LogContext::new());
        }

        let levels: Vec<_> = records.lock().iter().map(|r| r.level).collect();
        assert_eq!(levels, LogLevel::ALL.to_vec());
    }
}
