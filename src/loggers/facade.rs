//! The application's logging entry point: four fixed handles
//!
//! ```no_run
//! use recon_logger::prelude::*;
//!
//! # fn main() -> recon_logger::Result<()> {
//! let settings = Settings::load(".")?;
//! let factory = LoggerFactory::new(SharedSettings::new(settings));
//! let log = LoggerFacade::new(&factory)?;
//!
//! log.app().info("Iniciando la aplicación", LogContext::new());
//! log.excel().info(
//!     "Plantilla generada",
//!     LogContext::new().with_field("path", "reporte.xlsx"),
//! );
//! # Ok(())
//! # }
//! ```

use super::factory::LoggerFactory;
use crate::core::{Logger, Result};
use std::sync::Arc;

/// Type names of the facade handles, in field order
pub const FACADE_HANDLES: [&str; 4] = ["app", "error", "excel", "siigo"];

/// Construct once at startup and pass by reference to whatever logs.
#[derive(Debug, Clone)]
pub struct LoggerFacade {
    app: Arc<Logger>,
    error: Arc<Logger>,
    excel: Arc<Logger>,
    siigo: Arc<Logger>,
}

impl LoggerFacade {
    /// Obtain each handle from `factory` once
    pub fn new(factory: &LoggerFactory) -> Result<Self> {
        Ok(Self {
            app: factory.get_logger("app")?,
            error: factory.get_logger("error")?,
            excel: factory.get_logger("excel")?,
            siigo: factory.get_logger("siigo")?,
        })
    }

    /// General application events
    pub fn app(&self) -> &Logger {
        &self.app
    }

    /// Failures worth a dedicated trail
    pub fn error(&self) -> &Logger {
        &self.error
    }

    /// Spreadsheet generation
    pub fn excel(&self) -> &Logger {
        &self.excel
    }

    /// Accounting API calls
    pub fn siigo(&self) -> &Logger {
        &self.siigo
    }

    pub fn handles(&self) -> [&Arc<Logger>; 4] {
        [&self.app, &self.error, &self.excel, &self.siigo]
    }

    /// Flush every handle, even after one fails; returns the first failure
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for handle in self.handles() {
            if let Err(e) = handle.flush() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appenders::SinkBuilder;
    use crate::config::{Settings, SharedSettings};
    use crate::core::{Appender, LogContext, LogRecord, LoggerError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct FlushCounter {
        flushes: Arc<AtomicUsize>,
        fail: bool,
    }

    impl Appender for FlushCounter {
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

    fn counted(name: &str, flushes: &Arc<AtomicUsize>, fail: bool) -> Arc<Logger> {
        Arc::new(
            Logger::builder(name)
                .appender(FlushCounter {
                    flushes: Arc::clone(flushes),
                    fail,
                })
                .build(),
        )
    }

    #[test]
    fn test_handles_match_factory_entries() {
        let dir = tempdir().unwrap();
        let factory = LoggerFactory::new(SharedSettings::new(Settings::defaults(dir.path())))
            .with_sink_builder(SinkBuilder::default().with_colors(false));

        let facade = LoggerFacade::new(&factory).unwrap();

        let names: Vec<&str> = facade.handles().into_iter().map(|l| l.name()).collect();
        assert_eq!(names, FACADE_HANDLES.to_vec());
        assert!(Arc::ptr_eq(&facade.app, &factory.get_logger("app").unwrap()));
    }

    #[test]
    fn test_each_handle_writes_its_own_file() {
        let dir = tempdir().unwrap();
        let factory = LoggerFactory::new(SharedSettings::new(Settings::defaults(dir.path())))
            .with_sink_builder(SinkBuilder::default().with_colors(false));
        let facade = LoggerFacade::new(&factory).unwrap();

        facade.siigo().warning("token expiring", LogContext::new());
        facade.flush().unwrap();

        let siigo = std::fs::read_to_string(dir.path().join("logs/siigo/siigo.log")).unwrap();
        let app = std::fs::read_to_string(dir.path().join("logs/app/app.log")).unwrap();
        assert_eq!(siigo.lines().count(), 1);
        assert!(app.is_empty());
    }

    #[test]
    fn test_flush_continues_past_failing_handle() {
        let flushes = Arc::new(AtomicUsize::new(0));
        let facade = LoggerFacade {
            app: counted("app", &flushes, true),
            error: counted("error", &flushes, false),
            excel: counted("excel", &flushes, false),
            siigo: counted("siigo", &flushes, false),
        };

        assert!(facade.flush().is_err());
        assert_eq!(flushes.load(Ordering::Relaxed), 4);
    }
}
