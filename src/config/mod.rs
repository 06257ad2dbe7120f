pub mod settings;
pub mod shared;

pub use settings::{
    LoggingConfig, Settings, SiigoConfig, BASE_DIR_ENV, CONFIG_FILE_NAME, DEFAULT_BACKUP_COUNT,
    DEFAULT_LEVEL, DEFAULT_ROTATION_SIZE, ENV_PREFIX, LOG_DIR_NAME, LOG_SUBDIRECTORIES,
};
pub use shared::SharedSettings;
