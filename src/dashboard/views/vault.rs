//! Vault view - notes, images and the OCR commands

use egui::RichText;
use std::path::Path;

use crate::dashboard::state::{DashboardAction, VaultViewState};
use crate::dashboard::theme::ThemeColors;
use crate::pipeline::{find_last_embedded_image, ImageReference};

/// Render the vault view
pub fn render_vault_view(
    ui: &mut egui::Ui,
    view_state: &mut VaultViewState,
    vault_root: &Path,
) -> Vec<DashboardAction> {
    let mut actions = Vec::new();

    ui.heading(RichText::new("Vault").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new(vault_root.display().to_string())
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY)
    );

    ui.add_space(16.0);

    ui.horizontal(|ui| {
        let has_note = view_state.active_note.is_some();
        if ui
            .add_enabled(has_note, egui::Button::new("OCR last image in note"))
            .on_hover_text("Ctrl+Shift+O")
            .on_disabled_hover_text("Select a note first")
            .clicked()
        {
            actions.push(DashboardAction::RunOcr(ImageReference::LastInNote));
        }
        if ui.button("OCR image at path...").clicked() {
            actions.push(DashboardAction::PromptImagePath);
        }
        if ui.button("Set OCR language...").clicked() {
            actions.push(DashboardAction::PromptLanguage);
        }
        if ui.button("Refresh").clicked() {
            actions.push(DashboardAction::RefreshFiles);
        }
    });

    ui.add_space(16.0);

    ui.columns(2, |columns| {
        render_file_list(&mut columns[0], view_state, &mut actions);
        render_note_preview(&mut columns[1], view_state);
    });

    actions
}

/// Notes are selectable, images carry the OCR context menu
fn render_file_list(ui: &mut egui::Ui, view_state: &mut VaultViewState, actions: &mut Vec<DashboardAction>) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Files").strong());
        ui.add(
            egui::TextEdit::singleline(&mut view_state.filter)
                .hint_text("Filter")
                .desired_width(160.0),
        );
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("vault_files")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let mut any = false;
            for file in view_state.visible_files() {
                any = true;
                let is_active = view_state.active_note.as_ref() == Some(file);

                if file.is_note() {
                    let response = ui.selectable_label(is_active, file.path.as_str());
                    if response.clicked() && !is_active {
                        actions.push(DashboardAction::SelectNote(file.clone()));
                    }
                } else {
                    let response = ui
                        .selectable_label(false, RichText::new(file.path.as_str()).color(ThemeColors::ACCENT_PRIMARY))
                        .on_hover_text("Right-click to extract text");
                    response.context_menu(|ui| {
                        if ui.button("Extract text (OCR)").clicked() {
                            actions.push(DashboardAction::RunOcr(ImageReference::ExplicitFile(file.clone())));
                            ui.close_menu();
                        }
                    });
                }
            }

            if !any {
                ui.label(
                    RichText::new("No notes or images found")
                        .italics()
                        .color(ThemeColors::TEXT_MUTED)
                );
            }
        });
}

fn render_note_preview(ui: &mut egui::Ui, view_state: &VaultViewState) {
    let Some(note) = &view_state.active_note else {
        ui.label(
            RichText::new("Select a note to OCR its last embedded image")
                .italics()
                .color(ThemeColors::TEXT_MUTED)
        );
        return;
    };

    ui.label(RichText::new(note.name()).strong());
    let text = view_state.note_preview.as_deref().unwrap_or("");
    let last_image = find_last_embedded_image(text);
    ui.label(
        RichText::new(match &last_image {
            Some(name) => format!("Last embedded image: {}", name),
            None => "No embedded images".to_string(),
        })
        .size(12.0)
        .color(ThemeColors::TEXT_SECONDARY)
    );
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("note_preview")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add(egui::Label::new(RichText::new(text).monospace()).wrap_mode(egui::TextWrapMode::Wrap));
        });
}
