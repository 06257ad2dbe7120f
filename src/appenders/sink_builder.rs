//! Builds the pair of sinks attached to one logger name

use super::console::ConsoleAppender;
use super::rotating_file::{RotatingFileAppender, RotationPolicy};
use crate::core::{Appender, JsonFormatter, Result};
use std::path::Path;

/// The rotating file sink and the interactive console sink of one logger
pub struct SinkPair {
    pub logger_name: String,
    pub file: RotatingFileAppender,
    pub console: ConsoleAppender,
}

impl SinkPair {
    /// File sink first: a console failure must not delay the audit trail
    pub fn into_appenders(self) -> Vec<Box<dyn Appender>> {
        vec![Box::new(self.file), Box::new(self.console)]
    }
}

#[derive(Debug, Clone)]
pub struct SinkBuilder {
    formatter: JsonFormatter,
    use_colors: bool,
}

impl Default for SinkBuilder {
    fn default() -> Self {
        Self {
            formatter: JsonFormatter::default(),
            use_colors: true,
        }
    }
}

impl SinkBuilder {
    pub fn new(formatter: JsonFormatter) -> Self {
        Self {
            formatter,
            use_colors: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Open the file sink at `output_path` under `policy` and create the
    /// console sink.
    ///
    /// # Errors
    ///
    /// Fails if the output directory or file cannot be created.
    pub fn build(
        &self,
        logger_name: &str,
        output_path: &Path,
        policy: RotationPolicy,
    ) -> Result<SinkPair> {
        let file = RotatingFileAppender::with_policy(output_path, policy)?
            .with_formatter(self.formatter.clone());
        let console = ConsoleAppender::with_colors(self.use_colors);

        Ok(SinkPair {
            logger_name: logger_name.to_string(),
            file,
            console,
        })
    }
}
