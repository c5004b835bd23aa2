//! Right-hand panel showing the latest OCR result

use egui::{Align, Layout, RichText};

use crate::dashboard::state::DashboardAction;
use crate::dashboard::theme::ThemeColors;
use crate::delivery::{DisplayPanel, TextDirection};

/// Render the result panel when it has content
pub fn render_result_panel(ctx: &egui::Context, panel: &DisplayPanel) -> Option<DashboardAction> {
    if !panel.is_open() {
        return None;
    }
    let result = panel.content()?;
    let title = panel.title()?;

    let mut action = None;
    let direction = panel.direction();

    egui::SidePanel::right("ocr_result_panel")
        .resizable(true)
        .default_width(340.0)
        .min_width(240.0)
        .show(ctx, |ui| {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new(title).size(16.0).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.small_button("x").on_hover_text("Close").clicked() {
                        action = Some(DashboardAction::ClosePanel);
                    }
                });
            });
            ui.separator();

            egui::TopBottomPanel::bottom("ocr_result_footer")
                .show_separator_line(true)
                .show_inside(ui, |ui| {
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(format!(
                                "{} | {} chars",
                                result.language_code,
                                result.text.chars().count()
                            ))
                            .size(12.0)
                            .color(ThemeColors::TEXT_MUTED),
                        );
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.button("Copy").clicked() {
                                action = Some(DashboardAction::CopyPanelText);
                            }
                        });
                    });
                    ui.add_space(6.0);
                });

            egui::ScrollArea::vertical()
                .id_salt("ocr_result_text")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let text = if result.text.is_empty() {
                        RichText::new("No text recognized").italics().color(ThemeColors::TEXT_MUTED)
                    } else {
                        RichText::new(&result.text).color(ThemeColors::TEXT_PRIMARY)
                    };
                    let label = egui::Label::new(text)
                        .selectable(true)
                        .wrap_mode(egui::TextWrapMode::Wrap);

                    let layout = match direction {
                        TextDirection::LeftToRight => Layout::top_down(Align::Min),
                        TextDirection::RightToLeft => Layout::top_down(Align::Max),
                    };
                    ui.with_layout(layout, |ui| {
                        ui.add(label);
                    });
                });
        });

    action
}
