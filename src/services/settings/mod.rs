mod service;

pub use service::{
    resolve_settings_path, SettingsError, SettingsService, CONFIG_PATH_ENV, SETTINGS_FILE_NAME,
};
