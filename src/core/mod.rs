//! Core logger types and traits

pub mod appender;
pub mod error;
pub mod formatter;
pub mod log_context;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod timestamp;

pub use appender::Appender;
pub use error::{LoggerError, Result};
pub use formatter::{JsonFormatter, PROPS_FIELD, RESERVED_FIELDS};
pub use log_context::{FieldValue, LogContext};
pub use log_level::LogLevel;
pub use log_record::{render_error_chain, LogRecord};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use timestamp::TimestampFormat;
