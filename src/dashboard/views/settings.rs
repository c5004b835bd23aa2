//! Settings view - default image folder and OCR language

use egui::RichText;

use crate::config::{SettingField, SettingsStore};
use crate::dashboard::state::SettingsFormState;
use crate::dashboard::theme::ThemeColors;
use crate::delivery::{NoticeLevel, Notifier};

/// Render the settings view. Every edit is written through to the store.
pub fn render_settings_view(
    ui: &mut egui::Ui,
    form: &mut SettingsFormState,
    settings: &SettingsStore,
    notifier: &mut dyn Notifier,
    languages: &[String],
) {
    ui.heading(RichText::new("Settings").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("Where images are looked up and which language the engine reads")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY)
    );

    ui.add_space(24.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.heading(RichText::new("OCR").size(16.0));
                ui.add_space(12.0);

                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([16.0, 10.0])
                    .show(ui, |ui| {
                        setting_row(
                            ui,
                            SettingField::DefaultImageFolder,
                            &mut form.default_image_folder,
                            settings,
                            notifier,
                        );
                        setting_row(ui, SettingField::OcrLang, &mut form.ocr_lang, settings, notifier);
                    });

                ui.add_space(8.0);
                ui.label(
                    RichText::new("An empty folder means the vault root. An empty language falls back to eng.")
                        .size(12.0)
                        .color(ThemeColors::TEXT_MUTED)
                );
            });

        ui.add_space(16.0);

        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.heading(RichText::new("Installed languages").size(16.0));
                ui.add_space(12.0);

                if languages.is_empty() {
                    ui.label(
                        RichText::new("No language data found. Is tesseract installed?")
                            .color(ThemeColors::ACCENT_WARNING)
                    );
                } else {
                    ui.horizontal_wrapped(|ui| {
                        for code in languages {
                            let selected = form.ocr_lang.trim() == code;
                            if ui.selectable_label(selected, code).clicked() && !selected {
                                form.ocr_lang = code.clone();
                                apply(SettingField::OcrLang, code, settings, notifier);
                            }
                        }
                    });
                }
            });

        ui.add_space(16.0);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Config file:").color(ThemeColors::TEXT_MUTED));
            match settings.path() {
                Some(path) => ui.monospace(path.display().to_string()),
                None => ui.label(RichText::new("not persisted").italics()),
            };
        });
    });
}

fn setting_row(
    ui: &mut egui::Ui,
    field: SettingField,
    buffer: &mut String,
    settings: &SettingsStore,
    notifier: &mut dyn Notifier,
) {
    ui.label(field.label());
    let response = ui.add(egui::TextEdit::singleline(buffer).desired_width(240.0));
    if response.changed() {
        apply(field, buffer, settings, notifier);
    }
    ui.end_row();
}

fn apply(field: SettingField, value: &str, settings: &SettingsStore, notifier: &mut dyn Notifier) {
    if let Err(e) = settings.set(field, value) {
        tracing::error!("Failed to save {}: {:#}", field.key(), e);
        notifier.notify(NoticeLevel::Error, format!("Could not save {}", field.label()));
    }
}
