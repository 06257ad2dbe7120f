//! Settings resolver
//!
//! Loads `configuracion.ini` from the base directory, layering built-in
//! defaults, the file, and `RECON__<SECTION>__<KEY>` environment overrides.
//! A missing file is created with the default values so later runs see a
//! concrete configuration.

use crate::appenders::RotationPolicy;
use crate::core::{LogLevel, LoggerError, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "configuracion.ini";
pub const LOG_DIR_NAME: &str = "logs";
pub const ENV_PREFIX: &str = "RECON";
pub const BASE_DIR_ENV: &str = "RECON_BASE_DIR";

/// One directory per facade handle, created under the log directory at load
pub const LOG_SUBDIRECTORIES: [&str; 4] = ["app", "errors", "excel", "siigo"];

pub const DEFAULT_LEVEL: &str = "INFO";
pub const DEFAULT_ROTATION_SIZE: &str = "1 MB";
pub const DEFAULT_BACKUP_COUNT: usize = 5;

/// Logging policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub rotation_size: String,
    pub backup_count: usize,
    pub log_dir: PathBuf,
}

impl LoggingConfig {
    pub fn defaults(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: LogLevel::Info,
            rotation_size: DEFAULT_ROTATION_SIZE.to_string(),
            backup_count: DEFAULT_BACKUP_COUNT,
            log_dir: log_dir.into(),
        }
    }

    /// Rotation policy derived from `rotation_size` and `backup_count`
    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::from_size_string(&self.rotation_size, self.backup_count)
    }
}

/// Accounting API connection settings; carried, never interpreted here
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiigoConfig {
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub tenant_id: String,
}

#[derive(Debug, Deserialize)]
struct RawSettings {
    logging: RawLogging,
    siigo: SiigoConfig,
}

#[derive(Debug, Deserialize)]
struct RawLogging {
    level: String,
    rotation_size: String,
    backup_count: usize,
}

/// Immutable configuration groups resolved at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_dir: PathBuf,
    pub config_file: PathBuf,
    pub logging: LoggingConfig,
    pub siigo: SiigoConfig,
}

impl Settings {
    /// Resolve settings under `base_dir`.
    ///
    /// Creates `configuracion.ini` with defaults when absent, and the log
    /// directory tree when missing.
    ///
    /// # Errors
    ///
    /// `Configuration` when a present value cannot be parsed (for example a
    /// non-integer `backup_count` or an unknown `level`), `DirectoryCreation`
    /// when the log tree cannot be created.
    pub fn load(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let config_file = base_dir.join(CONFIG_FILE_NAME);

        if !config_file.exists() {
            Self::write_default_config(&config_file)?;
        }

        let config = Config::builder()
            .set_default("logging.level", DEFAULT_LEVEL)?
            .set_default("logging.rotation_size", DEFAULT_ROTATION_SIZE)?
            .set_default("logging.backup_count", DEFAULT_BACKUP_COUNT as i64)?
            .set_default("siigo.api_url", "")?
            .set_default("siigo.api_key", "")?
            .set_default("siigo.tenant_id", "")?
            .add_source(File::new(&config_file.to_string_lossy(), FileFormat::Ini).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let raw: RawSettings = config.try_deserialize()?;
        let level = raw
            .logging
            .level
            .parse::<LogLevel>()
            .map_err(|e| LoggerError::config("logging.level", e))?;

        let settings = Self {
            logging: LoggingConfig {
                level,
                rotation_size: raw.logging.rotation_size,
                backup_count: raw.logging.backup_count,
                log_dir: base_dir.join(LOG_DIR_NAME),
            },
            siigo: raw.siigo,
            base_dir,
            config_file,
        };

        settings.ensure_log_directories()?;
        Ok(settings)
    }

    /// Resolve settings under `$RECON_BASE_DIR`, or the working directory
    pub fn from_env() -> Result<Self> {
        let base_dir = match std::env::var_os(BASE_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().map_err(|e| {
                LoggerError::io_operation("resolving base directory", "current_dir failed", e)
            })?,
        };
        Self::load(base_dir)
    }

    /// In-memory defaults; touches no files
    pub fn defaults(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            config_file: base_dir.join(CONFIG_FILE_NAME),
            logging: LoggingConfig::defaults(base_dir.join(LOG_DIR_NAME)),
            siigo: SiigoConfig::default(),
            base_dir,
        }
    }

    /// Copy of these settings with the logging group replaced wholesale
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    pub fn ensure_log_directories(&self) -> Result<()> {
        for dir_name in LOG_SUBDIRECTORIES {
            let dir = self.logging.log_dir.join(dir_name);
            fs::create_dir_all(&dir).map_err(|e| LoggerError::directory_creation(&dir, e))?;
        }
        Ok(())
    }

    /// The INI text written on first run
    pub fn default_config_text() -> String {
        format!(
            "[logging]\n\
             level = {}\n\
             rotation_size = {}\n\
             backup_count = {}\n\
             \n\
             [siigo]\n\
             api_url = \n\
             api_key = \n\
             tenant_id = \n",
            DEFAULT_LEVEL, DEFAULT_ROTATION_SIZE, DEFAULT_BACKUP_COUNT
        )
    }

    fn write_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LoggerError::directory_creation(parent, e))?;
        }
        fs::write(path, Self::default_config_text()).map_err(|e| {
            LoggerError::io_operation(
                "writing default configuration",
                format!("cannot create '{}'", path.display()),
                e,
            )
        })
    }
}
