//! Application Configuration
//!
//! User settings stored in TOML format. Keys missing from the file fall back
//! to the compiled-in defaults.

pub mod store;

pub use store::SettingsStore;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Folder embedded note images are looked up in
pub const DEFAULT_IMAGE_FOLDER: &str = "attachments/";

/// Tesseract language code used when none is configured
pub const DEFAULT_OCR_LANG: &str = "eng";

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vault folder that `![[image]]` embeds are resolved against
    #[serde(rename = "defaultImageFolder")]
    pub default_image_folder: String,
    /// Language code handed to the OCR engine (e.g. "eng", "ara", "eng+fra")
    #[serde(rename = "ocrLang")]
    pub ocr_lang: String,
    /// Engine tuning
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_image_folder: DEFAULT_IMAGE_FOLDER.to_string(),
            ocr_lang: DEFAULT_OCR_LANG.to_string(),
            engine: EngineConfig::default(),
        }
    }
}

/// Optional Tesseract tuning, passed through as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Source resolution hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<i32>,
    /// Page segmentation mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psm: Option<i32>,
}

/// A user-editable settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    DefaultImageFolder,
    OcrLang,
}

impl SettingField {
    /// Key under which the field is persisted
    pub fn key(&self) -> &'static str {
        match self {
            SettingField::DefaultImageFolder => "defaultImageFolder",
            SettingField::OcrLang => "ocrLang",
        }
    }

    /// Label used in the settings form
    pub fn label(&self) -> &'static str {
        match self {
            SettingField::DefaultImageFolder => "Default image folder",
            SettingField::OcrLang => "OCR language",
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    let config: Settings = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &Settings, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
