//! Logger factory: one cached logger per type name
//!
//! The first request for a type name opens `<log_dir>/<type>/<type>.log`.
//! Every later request returns the same logger after reconciling its sinks
//! with the settings in force at that moment, so a swapped configuration
//! reaches loggers that were created before the swap.

use crate::appenders::SinkBuilder;
use crate::config::{LoggingConfig, SharedSettings};
use crate::core::{Logger, LoggerError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct LoggerFactory {
    settings: SharedSettings,
    sink_builder: SinkBuilder,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerFactory {
    pub fn new(settings: SharedSettings) -> Self {
        Self {
            settings,
            sink_builder: SinkBuilder::default(),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_sink_builder(mut self, sink_builder: SinkBuilder) -> Self {
        self.sink_builder = sink_builder;
        self
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    /// `<log_dir>/<type_name>/<type_name>.log`
    pub fn output_path_for(log_dir: &Path, type_name: &str) -> PathBuf {
        log_dir.join(type_name).join(format!("{}.log", type_name))
    }

    /// Return the logger for `type_name`, creating it on first use.
    ///
    /// Repeated calls with the same name return the same `Arc` after
    /// [`reconcile`](Self::reconcile). Lookup and reconciliation run under
    /// one lock, so concurrent callers never interleave a sink swap.
    ///
    /// # Errors
    ///
    /// `DirectoryCreation` if the logger's directory cannot be created, or
    /// an I/O error if its file cannot be opened.
    pub fn get_logger(&self, type_name: &str) -> Result<Arc<Logger>> {
        let settings = self.settings.current();
        let mut loggers = self.loggers.lock();

        if let Some(entry) = loggers.get(type_name) {
            let entry = Arc::clone(entry);
            self.reconcile(&entry, &settings.logging)?;
            return Ok(entry);
        }

        let logger = Arc::new(self.create(type_name, &settings.logging)?);
        loggers.insert(type_name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    fn create(&self, type_name: &str, logging: &LoggingConfig) -> Result<Logger> {
        let output_path = Self::output_path_for(&logging.log_dir, type_name);
        if let Some(dir) = output_path.parent() {
            fs::create_dir_all(dir).map_err(|e| LoggerError::directory_creation(dir, e))?;
        }

        let sinks = self
            .sink_builder
            .build(type_name, &output_path, logging.rotation_policy())?;

        Ok(Logger::builder(type_name)
            .min_level(logging.level)
            .output_path(output_path)
            .boxed_appenders(sinks.into_appenders())
            .build())
    }

    /// Rebuild `entry`'s sinks from `logging` and apply its severity
    /// threshold. The entry keeps its name and output path; the previous
    /// sinks are flushed and detached in the same step the new ones attach.
    /// On error the previous sinks stay attached.
    pub fn reconcile(&self, entry: &Logger, logging: &LoggingConfig) -> Result<()> {
        let output_path = entry
            .output_path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| Self::output_path_for(&logging.log_dir, entry.name()));

        let sinks = self
            .sink_builder
            .build(entry.name(), &output_path, logging.rotation_policy())?;

        entry.replace_appenders(sinks.into_appenders());
        entry.set_min_level(logging.level);
        entry.metrics().record_reconciliation();
        Ok(())
    }

    /// Names of every cached logger, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn flush_all(&self) -> Result<()> {
        let loggers: Vec<Arc<Logger>> = self.loggers.lock().values().cloned().collect();
        for logger in loggers {
            logger.flush()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for LoggerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerFactory")
            .field("loggers", &self.logger_names())
            .finish()
    }
}
