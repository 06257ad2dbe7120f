//! Rotating file appender with size-based rollover
//!
//! Writes one structured JSON record per line. When the next record would push
//! the active file to `max_bytes`, the file is shifted into the backup sequence
//! (`app.log` → `app.log.1` → `app.log.2` …) and a fresh file is opened. At most
//! `max_backups` rotated files are kept; the oldest is discarded first.

use crate::core::appender::Appender;
use crate::core::error::{LoggerError, Result};
use crate::core::formatter::JsonFormatter;
use crate::core::log_record::LogRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Threshold used when the configured size string cannot be read at all
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

pub const DEFAULT_MAX_BACKUPS: usize = 5;

/// Parse a size string such as `"1 MB"` or `"500 kb"` into bytes.
///
/// Units B, KB, MB and GB are recognized case-insensitively. A missing or
/// unrecognized unit counts as bytes rather than failing; only a missing or
/// non-integer number is an error.
///
/// ```
/// use recon_logger::appenders::parse_size;
///
/// assert_eq!(parse_size("1 KB").unwrap(), 1024);
/// assert_eq!(parse_size("3 parsecs").unwrap(), 3);
/// assert!(parse_size("lots").is_err());
/// ```
pub fn parse_size(size_str: &str) -> Result<u64> {
    let trimmed = size_str.trim();
    let split_at = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split_at);

    let size: u64 = number.parse().map_err(|e| {
        LoggerError::config(
            "logging.rotation_size",
            format!("'{}' does not start with an integer: {}", size_str, e),
        )
    })?;

    let multiplier: u64 = match unit.trim().to_uppercase().as_str() {
        "KB" => 1024,
        "MB" => 1024 * 1024,
        "GB" => 1024 * 1024 * 1024,
        _ => 1,
    };

    Ok(size.saturating_mul(multiplier))
}

/// Size threshold and retention count for a rotating file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Maximum bytes in the active file; 0 disables rotation
    pub max_bytes: u64,
    /// Maximum rotated files kept; 0 disables rotation
    pub max_backups: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new(max_bytes: u64, max_backups: usize) -> Self {
        Self {
            max_bytes,
            max_backups,
        }
    }

    /// Build a policy from the configured size string and backup count.
    ///
    /// Never fails: an unreadable size string falls back to
    /// [`DEFAULT_MAX_BYTES`] with a warning on stderr.
    #[must_use]
    pub fn from_size_string(rotation_size: &str, max_backups: usize) -> Self {
        let max_bytes = parse_size(rotation_size).unwrap_or_else(|e| {
            eprintln!(
                "[WARN] {}. Falling back to {} bytes per log file.",
                e, DEFAULT_MAX_BYTES
            );
            DEFAULT_MAX_BYTES
        });
        Self::new(max_bytes, max_backups)
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    pub fn rotation_enabled(&self) -> bool {
        self.max_bytes > 0 && self.max_backups > 0
    }
}

/// Structured file sink with size-based rotation
pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    formatter: JsonFormatter,
    writer: Option<BufWriter<File>>,
    current_size: u64,
    rotations: u64,
}

impl RotatingFileAppender {
    /// Create a new rotating file appender with the default policy
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or opened
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Create a new rotating file appender with a custom policy
    ///
    /// Appends to an existing file; its current length counts toward the
    /// rotation threshold.
    ///
    /// # Errors
    ///
    /// Returns error if the parent directory or the file cannot be created
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| LoggerError::directory_creation(parent, e))?;
        }

        let (file, current_size) = Self::open_append(&base_path)?;

        Ok(Self {
            base_path,
            policy,
            formatter: JsonFormatter::default(),
            writer: Some(BufWriter::new(file)),
            current_size,
            rotations: 0,
        })
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: JsonFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    fn open_append(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok((file, size))
    }

    /// Rotate before writing `incoming` bytes if they would reach the
    /// threshold. An empty file is never rotated, so one oversized record
    /// cannot produce a run of empty backups.
    fn should_rotate(&self, incoming: u64) -> bool {
        self.policy.rotation_enabled()
            && self.current_size > 0
            && self.current_size + incoming >= self.policy.max_bytes
    }

    fn rotate(&mut self) -> Result<()> {
        // Release the file handle before renaming
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        let oldest_backup = self.backup_path(self.policy.max_backups);
        if oldest_backup.exists() {
            if let Err(e) = fs::remove_file(&oldest_backup) {
                eprintln!(
                    "[WARN] Failed to remove oldest backup {}: {}",
                    oldest_backup.display(),
                    e
                );
            }
        }

        for i in (1..self.policy.max_backups).rev() {
            let old_path = self.backup_path(i);
            if !old_path.exists() {
                continue;
            }
            let new_path = self.backup_path(i + 1);
            if fs::rename(&old_path, &new_path).is_err() {
                // Some platforms refuse to rename over an existing file
                if new_path.exists() {
                    if let Err(e) = fs::remove_file(&new_path) {
                        eprintln!(
                            "[WARN] Failed to remove backup {} before rename: {}",
                            new_path.display(),
                            e
                        );
                    }
                }
                fs::rename(&old_path, &new_path).map_err(|e| {
                    LoggerError::file_rotation(
                        old_path.display().to_string(),
                        format!("Failed to rotate backup files: {}", e),
                    )
                })?;
            }
        }

        if self.base_path.exists() {
            fs::rename(&self.base_path, self.backup_path(1)).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;
        }

        let (file, size) = Self::open_append(&self.base_path)?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = size;
        self.rotations += 1;

        Ok(())
    }

    /// Backup path for a given index: `<file name>.<index>`
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut path = self.base_path.clone();
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app.log")
            .to_string();
        path.set_file_name(format!("{}.{}", filename, index));
        path
    }

    /// Reopen the active file after a failed rotation
    fn recover_writer(&mut self) -> Result<()> {
        if self.writer.is_none() {
            let (file, size) = Self::open_append(&self.base_path)?;
            self.writer = Some(BufWriter::new(file));
            self.current_size = size;
        }
        Ok(())
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Number of rotations this appender has performed
    #[must_use]
    pub fn rotations(&self) -> u64 {
        self.rotations
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "rotating_file"
    }

    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let mut line = self.formatter.format_line(record)?;
        line.push('\n');
        let bytes = line.len() as u64;

        if self.should_rotate(bytes) {
            if let Err(e) = self.rotate() {
                eprintln!(
                    "[WARN] Log rotation failed: {}. Continuing with current file.",
                    e
                );
                self.recover_writer()?;
            }
        }

        let writer = self.writer.as_mut().ok_or_else(|| {
            LoggerError::sink_write(self.base_path.display().to_string(), "writer not initialized")
        })?;

        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| {
                LoggerError::sink_write(
                    self.base_path.display().to_string(),
                    format!("Failed to write log record: {}", e),
                )
            })?;
        self.current_size += bytes;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}
