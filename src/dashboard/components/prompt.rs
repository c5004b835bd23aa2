//! Modal text prompt used for the image path and language commands

use egui::RichText;

use crate::dashboard::theme::ThemeColors;

/// What the prompt asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    ImagePath,
    Language,
}

impl PromptKind {
    pub fn title(&self) -> &'static str {
        match self {
            PromptKind::ImagePath => "OCR image at path",
            PromptKind::Language => "Set OCR language",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            PromptKind::ImagePath => "attachments/scan.png or /absolute/path.jpg",
            PromptKind::Language => "eng, fra, ara, eng+deu ...",
        }
    }
}

/// An open prompt and its input buffer
#[derive(Debug, Clone)]
pub struct PromptState {
    pub kind: PromptKind,
    pub input: String,
    focus_requested: bool,
}

impl PromptState {
    pub fn new(kind: PromptKind, initial: impl Into<String>) -> Self {
        Self {
            kind,
            input: initial.into(),
            focus_requested: false,
        }
    }
}

/// Result of showing the prompt for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Pending,
    Submitted(String),
    Cancelled,
}

/// Render the prompt window. `suggestions` are shown as clickable chips.
pub fn render_prompt(ctx: &egui::Context, prompt: &mut PromptState, suggestions: &[String]) -> PromptOutcome {
    let mut outcome = PromptOutcome::Pending;

    egui::Window::new(prompt.kind.title())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, [0.0, 96.0])
        .show(ctx, |ui| {
            ui.set_min_width(360.0);

            let response = ui.add(
                egui::TextEdit::singleline(&mut prompt.input)
                    .hint_text(prompt.kind.hint())
                    .desired_width(f32::INFINITY),
            );
            if !prompt.focus_requested {
                response.request_focus();
                prompt.focus_requested = true;
            }

            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if enter {
                outcome = PromptOutcome::Submitted(prompt.input.clone());
            }

            if !suggestions.is_empty() {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Installed languages")
                        .size(12.0)
                        .color(ThemeColors::TEXT_MUTED),
                );
                ui.horizontal_wrapped(|ui| {
                    for code in suggestions {
                        if ui.small_button(code).clicked() {
                            prompt.input = code.clone();
                        }
                    }
                });
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("Submit").clicked() {
                    outcome = PromptOutcome::Submitted(prompt.input.clone());
                }
                if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    outcome = PromptOutcome::Cancelled;
                }
            });
        });

    outcome
}
