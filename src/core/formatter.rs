//! Structured record formatter
//!
//! Turns a [`LogRecord`] into a flat JSON object suitable for one-record-per-line
//! output. Reserved fields (`timestamp`, `level`, `module`, `logger`) are always
//! written last so caller context can never overwrite them.

use super::error::Result;
use super::log_record::LogRecord;
use super::timestamp::TimestampFormat;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Fields owned by the formatter; caller context never overrides these
pub const RESERVED_FIELDS: [&str; 4] = ["timestamp", "level", "module", "logger"];

/// Key under which the caller context is also nested, for consumers that read
/// `record.props.<key>` instead of the flattened field
pub const PROPS_FIELD: &str = "props";

#[derive(Debug, Clone)]
pub struct JsonFormatter {
    timestamp_format: TimestampFormat,
    nest_props: bool,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::Iso8601Micros,
            nest_props: true,
        }
    }
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable the nested `props` copy of the caller context
    #[must_use]
    pub fn without_props(mut self) -> Self {
        self.nest_props = false;
        self
    }

    /// Format a record, stamping it with the current UTC time
    pub fn format(&self, record: &LogRecord) -> Map<String, Value> {
        self.format_at(record, &Utc::now())
    }

    pub fn format_at(&self, record: &LogRecord, now: &DateTime<Utc>) -> Map<String, Value> {
        let mut json_obj = Map::new();

        json_obj.insert("message".to_string(), Value::String(record.message.clone()));
        if let Some(ref exc_info) = record.exc_info {
            json_obj.insert("exc_info".to_string(), Value::String(exc_info.clone()));
        }
        if let Some(line) = record.line {
            json_obj.insert("lineno".to_string(), Value::Number(line.into()));
        }

        if !record.context.is_empty() {
            let context = record.context.to_json_map();
            if self.nest_props {
                json_obj.insert(PROPS_FIELD.to_string(), Value::Object(context.clone()));
            }
            json_obj.extend(context);
        }

        json_obj.insert(
            "timestamp".to_string(),
            Value::String(self.timestamp_format.format(now)),
        );
        json_obj.insert(
            "level".to_string(),
            Value::String(record.level.to_str().to_string()),
        );
        json_obj.insert("module".to_string(), Value::String(record.module.clone()));
        json_obj.insert("logger".to_string(), Value::String(record.logger.clone()));

        json_obj
    }

    /// Format a record as a single line of JSON, without the trailing newline
    ///
    /// Control characters inside values are escaped by the JSON encoder, so the
    /// output never spans more than one line.
    pub fn format_line(&self, record: &LogRecord) -> Result<String> {
        Ok(serde_json::to_string(&Value::Object(self.format(record)))?)
    }
}
