use std::path::{Path, PathBuf};

use super::errors::SettingsError;
use super::model::SidebarSettings;

/// Return the path to the sidebar settings JSON file.
pub fn settings_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("folio")
            .join("sidebar.json");
    }
    std::env::temp_dir().join("folio").join("sidebar.json")
}

/// Load settings from the default location.
pub fn load_settings() -> Result<SidebarSettings, SettingsError> {
    load_settings_from(&settings_path())
}

/// Load and validate settings from `path`.
///
/// A missing file yields the defaults.
pub fn load_settings_from(
    path: &Path,
) -> Result<SidebarSettings, SettingsError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(SidebarSettings::default());
        },
        Err(err) => return Err(err.into()),
    };
    let settings: SidebarSettings = serde_json::from_str(&content)?;
    settings.validate()?;
    Ok(settings)
}

/// Save settings to the default location atomically.
pub fn save_settings(settings: &SidebarSettings) -> Result<(), SettingsError> {
    save_settings_to(&settings_path(), settings)
}

pub fn save_settings_to(
    path: &Path,
    settings: &SidebarSettings,
) -> Result<(), SettingsError> {
    settings.validate()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let payload = serde_json::to_string_pretty(settings)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, payload.as_bytes())?;
    std::fs::rename(tmp_path, path)?;
    Ok(())
}

/// Load settings from `path` (or the default location), falling back to
/// defaults on error.
pub fn load_initial_settings(path: Option<&Path>) -> SidebarSettings {
    let result = match path {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    };
    match result {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!(
                "Failed to load sidebar settings, using defaults: {err}"
            );
            SidebarSettings::default()
        },
    }
}
