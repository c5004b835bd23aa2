//! Sidebar navigation component

use egui::{Color32, RichText, Rounding, Sense, Vec2};
use crate::dashboard::state::DashboardView;
use crate::dashboard::theme::{ThemeColors, color_with_alpha};

/// Status lines shown under the navigation
pub struct SidebarStatus<'a> {
    pub language: &'a str,
    pub jobs_in_flight: usize,
}

/// Render the sidebar navigation
pub fn render_sidebar(ui: &mut egui::Ui, current_view: &mut DashboardView, status: &SidebarStatus<'_>) {
    ui.vertical(|ui| {
        ui.add_space(16.0);

        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new("OCR")
                    .size(24.0)
                    .color(ThemeColors::ACCENT_PRIMARY)
                    .strong()
            );
        });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new("Vault OCR")
                    .size(11.0)
                    .color(ThemeColors::TEXT_MUTED)
            );
        });

        ui.add_space(24.0);
        ui.separator();
        ui.add_space(16.0);

        for view in [DashboardView::Vault, DashboardView::Settings] {
            let is_selected = *current_view == view;
            if nav_button(ui, view.icon(), view.name(), is_selected) {
                *current_view = view;
            }
            ui.add_space(4.0);
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(concat!("v", env!("CARGO_PKG_VERSION")))
                        .size(10.0)
                        .color(ThemeColors::TEXT_MUTED)
                );
            });
            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                if status.jobs_in_flight > 0 {
                    ui.spinner();
                    ui.label(
                        RichText::new(format!("{} running", status.jobs_in_flight))
                            .size(12.0)
                            .color(ThemeColors::ACCENT_WARNING)
                    );
                } else {
                    ui.label(
                        RichText::new("Idle")
                            .size(12.0)
                            .color(ThemeColors::TEXT_MUTED)
                    );
                }
            });
            ui.horizontal(|ui| {
                ui.add_space(12.0);
                ui.label(
                    RichText::new(format!("Language: {}", status.language))
                        .size(12.0)
                        .color(ThemeColors::TEXT_SECONDARY)
                );
            });
        });
    });
}

/// Render a navigation button
fn nav_button(ui: &mut egui::Ui, icon: &str, label: &str, is_selected: bool) -> bool {
    let desired_size = Vec2::new(ui.available_width() - 16.0, 36.0);
    let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

    if ui.is_rect_visible(rect) {
        let (bg_color, text_color) = if is_selected {
            (color_with_alpha(ThemeColors::ACCENT_PRIMARY, 51), ThemeColors::ACCENT_PRIMARY)
        } else if response.hovered() {
            (ThemeColors::BG_HOVER, ThemeColors::TEXT_PRIMARY)
        } else {
            (Color32::TRANSPARENT, ThemeColors::TEXT_SECONDARY)
        };

        let painter = ui.painter();
        painter.rect_filled(rect.shrink2(Vec2::new(8.0, 0.0)), Rounding::same(6.0), bg_color);

        if is_selected {
            let indicator_rect = egui::Rect::from_min_size(
                rect.left_top() + Vec2::new(8.0, 6.0),
                Vec2::new(3.0, rect.height() - 12.0),
            );
            painter.rect_filled(indicator_rect, Rounding::same(1.5), ThemeColors::ACCENT_PRIMARY);
        }

        for (offset, text) in [(24.0, icon), (48.0, label)] {
            painter.text(
                rect.left_center() + Vec2::new(offset, 0.0),
                egui::Align2::LEFT_CENTER,
                text,
                egui::FontId::proportional(14.0),
                text_color,
            );
        }
    }

    response.clicked()
}
