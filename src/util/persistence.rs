use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::warn;

use crate::domain::DashboardSettings;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "MarkdownLab";
const APP_NAME: &str = "MarkdownLab";

fn settings_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("settings.json"))
}

pub fn load_settings() -> Option<DashboardSettings> {
    load_settings_from(&settings_file()?)
}

pub fn save_settings(settings: &DashboardSettings) -> Result<(), PersistSaveError> {
    let path = settings_file().ok_or(PersistSaveError::StorageUnavailable)?;
    save_settings_to(&path, settings)
}

/// Missing files are silent; unreadable ones are logged and ignored. Out-of-range
/// values fall back to their defaults.
pub fn load_settings_from(path: &Path) -> Option<DashboardSettings> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<DashboardSettings>(&data) {
        Ok(settings) => Some(settings.validated()),
        Err(err) => {
            warn!(path = %path.display(), "ignoring unreadable settings: {err}");
            None
        }
    }
}

pub fn save_settings_to(path: &Path, settings: &DashboardSettings) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
