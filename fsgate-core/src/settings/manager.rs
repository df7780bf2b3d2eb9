use crate::settings::config::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::ops::DerefMut;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Settings shared by the sandbox and reader. Each process holds its own
/// in-memory copy which may be updated without touching disk; saved settings
/// are picked up by future processes.
#[derive(Clone)]
pub struct SettingsManager {
    settings_path: PathBuf,
    inner: Arc<Mutex<Settings>>,
}

impl SettingsManager {
    /// Create a settings manager at the default location, or for a named
    /// profile (`~/.fsgate/settings_<profile>.toml`).
    pub fn new(profile: Option<&str>) -> Result<Self> {
        let settings_path = Self::default_settings_path(profile)?;

        if let Some(parent) = settings_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }

        Self::from_path(settings_path)
    }

    /// Create a settings manager from a specific path
    pub fn from_path(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            let default_settings = Settings::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {parent:?}"))?;
            }
            let contents = toml::to_string_pretty(&default_settings)
                .context("Failed to serialize default settings")?;
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write default settings to {path:?}"))?;
        }

        let loaded = Self::load_from_file_with_backup(&path)?;

        Ok(Self {
            settings_path: path,
            inner: Arc::new(Mutex::new(loaded)),
        })
    }

    fn default_settings_path(profile: Option<&str>) -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        let file_name = match profile {
            Some(name) if !name.is_empty() => format!("settings_{name}.toml"),
            _ => "settings.toml".to_string(),
        };
        Ok(home.join(".fsgate").join(file_name))
    }

    /// Load settings from a TOML file with backup on parse failure
    fn load_from_file_with_backup(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {path:?}"))?;

        match toml::from_str(&contents) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(?e, "Settings file is corrupt, restoring defaults");
                let backup_path = path.with_extension("toml.backup");
                fs::rename(path, &backup_path).with_context(|| {
                    format!("Failed to backup corrupted settings to {backup_path:?}")
                })?;

                let default_settings = Settings::default();
                let contents = toml::to_string_pretty(&default_settings)
                    .context("Failed to serialize default settings")?;
                fs::write(path, contents)
                    .with_context(|| format!("Failed to write default settings to {path:?}"))?;

                Ok(default_settings)
            }
        }
    }

    /// Snapshot of the in-memory settings
    pub fn settings(&self) -> Settings {
        self.inner.lock().expect("Settings lock poisoned").clone()
    }

    /// Update in-memory settings with a closure. Note: settings are not saved to disk
    pub fn update_setting<F>(&self, updater: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut guard = self.inner.lock().expect("Settings lock poisoned");
        updater(guard.deref_mut());
    }

    /// Save provided settings
    pub fn save_settings(&self, settings: Settings) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }

        let contents = toml::to_string_pretty(&settings).context("Failed to serialize settings")?;

        fs::write(&self.settings_path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", self.settings_path))?;
        *self.inner.lock().expect("Settings lock poisoned") = settings;

        Ok(())
    }

    /// Explicitly persist in-memory settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_settings(self.settings())
    }

    pub fn path(&self) -> &Path {
        &self.settings_path
    }

    /// Profile name inferred from a `settings_<name>.toml` file name.
    pub fn current_profile(&self) -> Option<&str> {
        let file_name = self.settings_path.file_name()?.to_str()?;
        let name = file_name
            .strip_prefix("settings_")?
            .strip_suffix(".toml")?;
        if name.is_empty() {
            return None;
        }
        Some(name)
    }

    pub fn allow_directory(&self, dir: impl Into<String>) {
        let dir = dir.into();
        self.update_setting(|settings| {
            if !settings.allowed_directories.contains(&dir) {
                settings.allowed_directories.push(dir);
            }
        });
    }

    pub fn set_allowed_directories(&self, dirs: Vec<String>) {
        self.update_setting(|settings| settings.allowed_directories = dirs);
    }
}
