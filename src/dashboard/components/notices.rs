//! Transient notices shown in the bottom-right corner

use egui::{Color32, RichText, Rounding};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::dashboard::theme::ThemeColors;
use crate::delivery::{NoticeLevel, Notifier};

/// How long a notice stays on screen
pub const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Oldest notices are dropped beyond this
const MAX_NOTICES: usize = 5;

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub created: Instant,
}

/// Queue of live notices
#[derive(Debug)]
pub struct Notices {
    items: VecDeque<Notice>,
    ttl: Duration,
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(NOTICE_TTL)
    }
}

impl Notices {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn push_at(&mut self, level: NoticeLevel, message: String, now: Instant) {
        self.items.push_back(Notice {
            level,
            message,
            created: now,
        });
        while self.items.len() > MAX_NOTICES {
            self.items.pop_front();
        }
    }

    /// Drop notices older than the TTL
    pub fn prune(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.items
            .retain(|notice| now.saturating_duration_since(notice.created) < ttl);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.items.iter()
    }
}

impl Notifier for Notices {
    fn notify(&mut self, level: NoticeLevel, message: String) {
        debug!("Notice ({:?}): {}", level, message);
        self.push_at(level, message, Instant::now());
    }
}

fn level_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Info => ThemeColors::ACCENT_PRIMARY,
        NoticeLevel::Success => ThemeColors::ACCENT_SUCCESS,
        NoticeLevel::Error => ThemeColors::ACCENT_ERROR,
    }
}

/// Render all live notices
pub fn render_notices(ctx: &egui::Context, notices: &Notices) {
    if notices.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notices"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .interactable(false)
        .show(ctx, |ui| {
            for notice in notices.iter() {
                egui::Frame::none()
                    .fill(ThemeColors::BG_LIGHT)
                    .stroke(egui::Stroke::new(1.0, level_color(notice.level)))
                    .rounding(Rounding::same(6.0))
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.label(RichText::new(&notice.message).color(ThemeColors::TEXT_PRIMARY));
                    });
                ui.add_space(6.0);
            }
        });
}
