//! Appender implementations

pub mod console;
pub mod rotating_file;
pub mod sink_builder;

pub use console::ConsoleAppender;
pub use rotating_file::{
    parse_size, RotatingFileAppender, RotationPolicy, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_BYTES,
};
pub use sink_builder::{SinkBuilder, SinkPair};

pub use crate::core::Appender;
