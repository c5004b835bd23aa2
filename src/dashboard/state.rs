//! Dashboard view state management

use crate::config::Settings;
use crate::dashboard::components::PromptState;
use crate::pipeline::ImageReference;
use crate::vault::VaultFile;

/// Current view in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Vault,
    Settings,
}

impl DashboardView {
    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            DashboardView::Vault => "Vault",
            DashboardView::Settings => "Settings",
        }
    }

    /// Get the icon character for this view
    pub fn icon(&self) -> &'static str {
        match self {
            DashboardView::Vault => "V",
            DashboardView::Settings => "S",
        }
    }
}

/// Something the user asked for during this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    /// Start an OCR run
    RunOcr(ImageReference),
    /// Make a note the active note
    SelectNote(VaultFile),
    /// Open the image path prompt
    PromptImagePath,
    /// Open the language prompt
    PromptLanguage,
    /// Re-scan the vault
    RefreshFiles,
    /// Copy the panel text again
    CopyPanelText,
    /// Close the result panel
    ClosePanel,
}

/// Overall dashboard state
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Current active view
    pub current_view: DashboardView,
    /// Vault view state
    pub vault: VaultViewState,
    /// Settings view state
    pub settings: SettingsFormState,
    /// Modal prompt, if one is open
    pub prompt: Option<PromptState>,
}

/// Vault view state
#[derive(Debug, Default)]
pub struct VaultViewState {
    /// Files found in the vault on the last scan
    pub files: Vec<VaultFile>,
    /// Currently active note
    pub active_note: Option<VaultFile>,
    /// Text of the active note
    pub note_preview: Option<String>,
    /// Filter for the file list
    pub filter: String,
}

impl VaultViewState {
    /// Files matching the filter, notes and images only
    pub fn visible_files(&self) -> impl Iterator<Item = &VaultFile> {
        let filter = self.filter.trim().to_lowercase();
        self.files.iter().filter(move |file| {
            (file.is_note() || file.is_image())
                && (filter.is_empty() || file.path.to_lowercase().contains(&filter))
        })
    }
}

/// Edit buffers of the settings form
#[derive(Debug, Clone, Default)]
pub struct SettingsFormState {
    pub default_image_folder: String,
    pub ocr_lang: String,
}

impl SettingsFormState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            default_image_folder: settings.default_image_folder.clone(),
            ocr_lang: settings.ocr_lang.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_files_filters_kind_and_text() {
        let state = VaultViewState {
            files: vec![
                VaultFile::new("Daily/Today.md"),
                VaultFile::new("attachments/scan.PNG"),
                VaultFile::new("attachments/doc.pdf"),
                VaultFile::new("Projects/Plan.md"),
            ],
            filter: "  ATTACH ".to_string(),
            ..Default::default()
        };

        let paths: Vec<&str> = state.visible_files().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["attachments/scan.PNG"]);
    }

    #[test]
    fn test_visible_files_without_filter() {
        let state = VaultViewState {
            files: vec![VaultFile::new("a.md"), VaultFile::new("b.txt"), VaultFile::new("c.jpg")],
            ..Default::default()
        };

        assert_eq!(state.visible_files().count(), 2);
    }

    #[test]
    fn test_settings_form_from_settings() {
        let form = SettingsFormState::from_settings(&Settings::default());
        assert_eq!(form.default_image_folder, "attachments/");
        assert_eq!(form.ocr_lang, "eng");
    }
}
