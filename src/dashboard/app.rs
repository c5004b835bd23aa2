//! Dashboard application entry point

use crossbeam_channel::Receiver;
use eframe::egui;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::app::OcrService;
use crate::config::SettingField;
use crate::dashboard::clipboard::EguiClipboard;
use crate::dashboard::components::{
    render_notices, render_prompt, render_sidebar, Notices, PromptKind, PromptOutcome, PromptState,
    SidebarStatus,
};
use crate::dashboard::state::{DashboardAction, DashboardState, DashboardView, SettingsFormState};
use crate::dashboard::theme;
use crate::dashboard::views::{render_result_panel, render_settings_view, render_vault_view};
use crate::delivery::{deliver, recopy_panel_text, report_failure, DisplayPanel, NoticeLevel, Notifier};
use crate::pipeline::ImageReference;
use crate::vault::{FsVault, VaultFile};
use crate::vision::TesseractRecognizer;

/// Repaint interval while runs are pending or notices are fading
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// The main dashboard application
pub struct DashboardApp {
    /// Background OCR runs
    service: OcrService,
    /// Vault the file browser shows
    vault: Arc<FsVault>,
    /// Dashboard-specific state
    state: DashboardState,
    /// Latest OCR result
    panel: DisplayPanel,
    notices: Notices,
    /// Languages reported by the engine
    languages: Vec<String>,
    /// Pending language query
    languages_rx: Option<Receiver<Vec<String>>>,
    /// Pending note read for the preview
    note_rx: Option<Receiver<(VaultFile, Option<String>)>>,
    /// Whether theme has been applied
    theme_applied: bool,
}

impl DashboardApp {
    /// Create a new dashboard application
    pub fn new(ctx: &egui::Context, service: OcrService, vault: Arc<FsVault>) -> Self {
        let repaint = ctx.clone();
        let languages_rx = service.spawn_query(
            || match TesseractRecognizer::available_languages() {
                Ok(languages) => languages,
                Err(e) => {
                    warn!("Could not list OCR languages: {}", e);
                    Vec::new()
                }
            },
            move || repaint.request_repaint(),
        );

        let mut state = DashboardState {
            settings: SettingsFormState::from_settings(&service.settings().snapshot()),
            ..Default::default()
        };
        state.vault.files = vault.list_files();

        let mut app = Self {
            service,
            vault,
            state,
            panel: DisplayPanel::default(),
            notices: Notices::default(),
            languages: Vec::new(),
            languages_rx: Some(languages_rx),
            note_rx: None,
            theme_applied: false,
        };
        if let Some(note) = app.vault.active_note() {
            app.select_note(ctx, note);
        }
        app
    }

    /// Create eframe options for the dashboard window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 760.0])
                .with_min_inner_size([800.0, 500.0])
                .with_title("Vault OCR"),
            ..Default::default()
        }
    }

    /// Hand finished runs to the sinks
    fn process_completions(&mut self, ctx: &egui::Context) {
        while let Some(completion) = self.service.try_next_completion() {
            match completion.outcome {
                Ok(result) => {
                    let mut clipboard = EguiClipboard(ctx);
                    let report = deliver(result, &mut clipboard, &mut self.panel, &mut self.notices);
                    if !report.all_ok() {
                        debug!("Partial delivery for {} run: {:?}", completion.reference.kind(), report);
                    }
                }
                Err(e) => report_failure(&e, &mut self.notices),
            }
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: DashboardAction) {
        match action {
            DashboardAction::RunOcr(reference) => {
                let ctx = ctx.clone();
                self.service.submit(reference, move || ctx.request_repaint());
            }
            DashboardAction::SelectNote(note) => self.select_note(ctx, note),
            DashboardAction::PromptImagePath => {
                self.state.prompt = Some(PromptState::new(PromptKind::ImagePath, ""));
            }
            DashboardAction::PromptLanguage => {
                let current = self.service.settings().ocr_lang();
                self.state.prompt = Some(PromptState::new(PromptKind::Language, current));
            }
            DashboardAction::RefreshFiles => {
                self.state.vault.files = self.vault.list_files();
                info!("Vault rescanned: {} files", self.state.vault.files.len());
            }
            DashboardAction::CopyPanelText => {
                let mut clipboard = EguiClipboard(ctx);
                recopy_panel_text(&self.panel, &mut clipboard, &mut self.notices);
            }
            DashboardAction::ClosePanel => self.panel.close(),
        }
    }

    /// Make `note` the active note and start loading its text for the preview
    fn select_note(&mut self, ctx: &egui::Context, note: VaultFile) {
        self.vault.set_active_note(Some(note.clone()));
        self.state.vault.active_note = Some(note.clone());
        self.state.vault.note_preview = None;

        let path = self.vault.absolute_path(&note);
        let repaint = ctx.clone();
        self.note_rx = Some(self.service.spawn_query(
            move || {
                let text = match std::fs::read_to_string(&path) {
                    Ok(text) => Some(text),
                    Err(e) => {
                        warn!("Failed to read note {:?}: {}", path, e);
                        None
                    }
                };
                (note, text)
            },
            move || repaint.request_repaint(),
        ));
    }

    /// Pick up finished background queries
    fn process_queries(&mut self) {
        if let Some(languages) = self.languages_rx.as_ref().and_then(|rx| rx.try_recv().ok()) {
            debug!("{} OCR languages installed", languages.len());
            self.languages = languages;
            self.languages_rx = None;
        }

        if let Some((note, text)) = self.note_rx.as_ref().and_then(|rx| rx.try_recv().ok()) {
            if self.state.vault.active_note.as_ref() == Some(&note) {
                self.state.vault.note_preview = text;
            }
            self.note_rx = None;
        }
    }

    fn submit_prompt(&mut self, ctx: &egui::Context, kind: PromptKind, input: String) {
        match kind {
            PromptKind::ImagePath => {
                self.handle_action(ctx, DashboardAction::RunOcr(ImageReference::TypedPath(input)));
            }
            PromptKind::Language => {
                let settings = self.service.settings().clone();
                match settings.set(SettingField::OcrLang, &input) {
                    Ok(()) => {
                        let lang = settings.ocr_lang();
                        self.state.settings.ocr_lang = lang.clone();
                        self.notices.notify(NoticeLevel::Success, format!("OCR language set to {}", lang));
                    }
                    Err(e) => {
                        tracing::error!("Failed to save OCR language: {:#}", e);
                        self.notices.notify(NoticeLevel::Error, "Could not save OCR language".to_string());
                    }
                }
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.process_completions(ctx);
        self.process_queries();
        self.notices.prune(Instant::now());

        let mut actions = Vec::new();

        let shortcut = egui::KeyboardShortcut::new(egui::Modifiers::CTRL | egui::Modifiers::SHIFT, egui::Key::O);
        if self.state.prompt.is_none() && ctx.input_mut(|i| i.consume_shortcut(&shortcut)) {
            actions.push(DashboardAction::RunOcr(ImageReference::LastInNote));
        }

        let language = self.service.settings().ocr_lang();
        let status = SidebarStatus {
            language: &language,
            jobs_in_flight: self.service.in_flight(),
        };

        // Sidebar panel
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                render_sidebar(ui, &mut self.state.current_view, &status);
            });

        if let Some(action) = render_result_panel(ctx, &self.panel) {
            actions.push(action);
        }

        // Main content panel
        let settings = self.service.settings().clone();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none()
                .inner_margin(24.0)
                .show(ui, |ui| match self.state.current_view {
                    DashboardView::Vault => {
                        actions.extend(render_vault_view(ui, &mut self.state.vault, self.vault.root()));
                    }
                    DashboardView::Settings => {
                        render_settings_view(
                            ui,
                            &mut self.state.settings,
                            &settings,
                            &mut self.notices,
                            &self.languages,
                        );
                    }
                });
        });

        if let Some(prompt) = self.state.prompt.as_mut() {
            let suggestions: &[String] = match prompt.kind {
                PromptKind::Language => &self.languages,
                PromptKind::ImagePath => &[],
            };
            let kind = prompt.kind;
            match render_prompt(ctx, prompt, suggestions) {
                PromptOutcome::Pending => {}
                PromptOutcome::Cancelled => self.state.prompt = None,
                PromptOutcome::Submitted(input) => {
                    self.state.prompt = None;
                    self.submit_prompt(ctx, kind, input);
                }
            }
        }

        for action in actions {
            self.handle_action(ctx, action);
        }

        render_notices(ctx, &self.notices);

        if self.service.in_flight() > 0 || !self.notices.is_empty() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}

/// Run the dashboard application
pub fn run_dashboard(service: OcrService, vault: Arc<FsVault>) -> Result<(), eframe::Error> {
    eframe::run_native(
        "Vault OCR",
        DashboardApp::options(),
        Box::new(|cc| Ok(Box::new(DashboardApp::new(&cc.egui_ctx, service, vault)))),
    )
}
