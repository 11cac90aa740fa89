//! Default locations for the registry and the folders offered during setup

use std::path::PathBuf;

/// Registry file name relative to the home directory
pub const REGISTRY_FILE_NAME: &str = ".logics.yml";

/// Display name for user messages
pub const REGISTRY_DISPLAY: &str = "~/.logics.yml";

fn home() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Get the default registry file path
pub fn get_default_registry_path() -> PathBuf {
    home().join(REGISTRY_FILE_NAME)
}

/// Shared folder suggested by `setup`
pub fn get_default_shared_folder() -> PathBuf {
    home().join("Dropbox").join("logic")
}

/// Project folder suggested by `setup`
pub fn get_default_project_folder() -> PathBuf {
    home().join("Music").join("Logic")
}
