//! Logging macros with `format!`-style messages and inline context fields.
//!
//! Context fields follow a `;` after the message arguments as `key = value`
//! pairs; each value goes through `Into<FieldValue>`.
//!
//! # Examples
//!
//! ```
//! use recon_logger::prelude::*;
//! use recon_logger::{info, warning};
//!
//! let logger = Logger::builder("app").build();
//!
//! info!(logger, "Server started");
//!
//! let rows = 120;
//! info!(logger, "Wrote {} rows", rows; sheet = "cartera", rows = rows);
//!
//! warning!(logger, "Retrying"; attempt = 3);
//! ```

/// Log at a runtime-selected level.
///
/// ```
/// # use recon_logger::prelude::*;
/// # let logger = Logger::builder("app").build();
/// use recon_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500; endpoint = "/invoices");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),+ $(,)?) => {
        $logger.log(
            $level,
            format!($fmt $(, $arg)*),
            $crate::LogContext::new()$(.with_field(stringify!($key), $value))+,
        )
    };
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        $logger.log($level, format!($fmt $(, $arg)*), $crate::LogContext::new())
    };
}

/// ```
/// # use recon_logger::prelude::*;
/// # let logger = Logger::builder("app").min_level(LogLevel::Debug).build();
/// use recon_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message, optionally attaching an error as `exc_info`.
///
/// ```
/// # use recon_logger::prelude::*;
/// # let logger = Logger::builder("error").build();
/// use recon_logger::error;
///
/// let err = std::io::Error::new(std::io::ErrorKind::NotFound, "plantilla.xlsx");
/// error!(logger, source = &err, "Template missing"; step = "load");
/// error!(logger, "Request failed with {}", 503);
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, source = $err:expr, $($arg:tt)+) => {
        $crate::__log_with_source!($logger, $crate::LogLevel::Error, $err, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Same forms as [`error!`] at critical level.
#[macro_export]
macro_rules! critical {
    ($logger:expr, source = $err:expr, $($arg:tt)+) => {
        $crate::__log_with_source!($logger, $crate::LogLevel::Critical, $err, $($arg)+)
    };
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_with_source {
    ($logger:expr, $level:expr, $err:expr, $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),+ $(,)?) => {{
        let source: &dyn ::std::error::Error = $err;
        $logger.log_at(
            $level,
            format!($fmt $(, $arg)*),
            $crate::LogContext::new()$(.with_field(stringify!($key), $value))+,
            Some(source),
            ::std::panic::Location::caller(),
        )
    }};
    ($logger:expr, $level:expr, $err:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        let source: &dyn ::std::error::Error = $err;
        $logger.log_at(
            $level,
            format!($fmt $(, $arg)*),
            $crate::LogContext::new(),
            Some(source),
            ::std::panic::Location::caller(),
        )
    }};
}
