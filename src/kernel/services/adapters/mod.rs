//! Service adapters: OS specific implementations (filesystem probing and settings files).

pub mod paths;
pub mod probe;
pub mod root_service;
pub mod settings;

pub use paths::{ensure_log_dir, get_cache_dir, get_log_dir};
pub use probe::LocalFsProbe;
pub use root_service::RootService;
pub use settings::{
    ensure_settings_file, ensure_settings_file_at, get_settings_path, load_settings,
    load_settings_from, SettingsError,
};
