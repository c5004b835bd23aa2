//! Settings service shared by the triggers, the locator and the recognizer

use anyhow::Result;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::{load_config, save_config, SettingField, Settings, DEFAULT_OCR_LANG};

/// Holds the current settings and writes them back on every change
#[derive(Debug)]
pub struct SettingsStore {
    /// Backing file, `None` for a store that is never persisted
    path: Option<PathBuf>,
    settings: RwLock<Settings>,
}

impl SettingsStore {
    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = if path.exists() {
            match load_config(&path) {
                Ok(settings) => {
                    info!("Loaded configuration from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Ignoring unreadable configuration {:?}: {}", path, e);
                    Settings::default()
                }
            }
        } else {
            info!("Using default configuration");
            Settings::default()
        };

        Self {
            path: Some(path),
            settings: RwLock::new(normalize(settings)),
        }
    }

    /// A store that lives only for this process
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            path: None,
            settings: RwLock::new(normalize(settings)),
        }
    }

    /// Copy of the current settings
    pub fn snapshot(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Current OCR language code
    pub fn ocr_lang(&self) -> String {
        self.settings.read().ocr_lang.clone()
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Update one field and persist immediately.
    ///
    /// A blank language resets to the default code. A blank folder is kept
    /// and means the vault root.
    pub fn set(&self, field: SettingField, value: &str) -> Result<()> {
        let snapshot = {
            let mut settings = self.settings.write();
            match field {
                SettingField::DefaultImageFolder => {
                    settings.default_image_folder = value.trim().to_string();
                }
                SettingField::OcrLang => {
                    let value = value.trim();
                    settings.ocr_lang = if value.is_empty() {
                        DEFAULT_OCR_LANG.to_string()
                    } else {
                        value.to_string()
                    };
                }
            }
            settings.clone()
        };

        debug!("Setting {} changed", field.key());
        self.persist(&snapshot)
    }

    fn persist(&self, settings: &Settings) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        save_config(settings, path)?;
        debug!("Saved configuration to {:?}", path);
        Ok(())
    }
}

fn normalize(mut settings: Settings) -> Settings {
    if settings.ocr_lang.trim().is_empty() {
        settings.ocr_lang = DEFAULT_OCR_LANG.to_string();
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_IMAGE_FOLDER;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::load(dir.path().join("config.toml"));

        assert_eq!(store.snapshot(), Settings::default());
    }

    #[test]
    fn test_set_survives_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let store = SettingsStore::load(&path);
        store.set(SettingField::OcrLang, "fra").unwrap();
        drop(store);

        let reloaded = SettingsStore::load(&path);
        let settings = reloaded.snapshot();
        assert_eq!(settings.ocr_lang, "fra");
        assert_eq!(settings.default_image_folder, DEFAULT_IMAGE_FOLDER);
    }

    #[test]
    fn test_set_creates_config_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let store = SettingsStore::load(&path);
        store.set(SettingField::DefaultImageFolder, "media").unwrap();

        assert!(path.exists());
        assert_eq!(SettingsStore::load(&path).snapshot().default_image_folder, "media");
    }

    #[test]
    fn test_blank_language_resets_to_default() {
        let store = SettingsStore::in_memory(Settings::default());
        store.set(SettingField::OcrLang, "ara").unwrap();
        store.set(SettingField::OcrLang, "   ").unwrap();

        assert_eq!(store.ocr_lang(), "eng");
    }

    #[test]
    fn test_language_is_not_validated() {
        let store = SettingsStore::in_memory(Settings::default());
        store.set(SettingField::OcrLang, "not-a-language").unwrap();

        assert_eq!(store.ocr_lang(), "not-a-language");
    }

    #[test]
    fn test_blank_folder_is_kept() {
        let store = SettingsStore::in_memory(Settings::default());
        store.set(SettingField::DefaultImageFolder, "").unwrap();

        assert_eq!(store.snapshot().default_image_folder, "");
    }

    #[test]
    fn test_unreadable_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ocrLang = [").unwrap();

        let store = SettingsStore::load(&path);
        assert_eq!(store.ocr_lang(), "eng");
    }

    #[test]
    fn test_in_memory_store_has_no_path() {
        let store = SettingsStore::in_memory(Settings::default());
        assert!(store.path().is_none());
        store.set(SettingField::OcrLang, "deu").unwrap();
        assert_eq!(store.ocr_lang(), "deu");
    }
}
