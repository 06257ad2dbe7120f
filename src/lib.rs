//! # recon_logger
//!
//! Structured, rotating, multi-sink logging for the accounts-receivable
//! reconciliation helper.
//!
//! ## Features
//!
//! - **Settings**: `configuracion.ini` with defaults and `RECON__` environment overrides
//! - **Structured files**: one JSON record per line, size-based rotation
//! - **Console**: severity-colorized lines on stderr for live observation
//! - **Factory + facade**: one cached logger per type name, four fixed handles
//!
//! ## Quick start
//!
//! ```no_run
//! use recon_logger::prelude::*;
//! use recon_logger::info;
//!
//! # fn main() -> recon_logger::Result<()> {
//! let settings = Settings::from_env()?;
//! let factory = LoggerFactory::new(SharedSettings::new(settings));
//! let log = LoggerFacade::new(&factory)?;
//!
//! info!(log.app(), "Iniciando la aplicación"; version = env!("CARGO_PKG_VERSION"));
//! # Ok(())
//! # }
//! ```

pub mod appenders;
pub mod config;
pub mod core;
pub mod loggers;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy, SinkBuilder};
    pub use crate::config::{LoggingConfig, Settings, SharedSettings, SiigoConfig};
    pub use crate::core::{
        Appender, FieldValue, JsonFormatter, LogContext, LogLevel, LogRecord, Logger,
        LoggerBuilder, LoggerError, LoggerMetrics, Result, TimestampFormat,
    };
    pub use crate::loggers::{LoggerFacade, LoggerFactory};
}

pub use appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy, SinkBuilder};
pub use config::{LoggingConfig, Settings, SharedSettings, SiigoConfig};
pub use core::{
    Appender, FieldValue, JsonFormatter, LogContext, LogLevel, LogRecord, Logger, LoggerBuilder,
    LoggerError, LoggerMetrics, Result, TimestampFormat,
};
pub use loggers::{LoggerFacade, LoggerFactory};
