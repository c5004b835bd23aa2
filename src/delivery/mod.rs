//! Result Sink Coordinator
//!
//! Hands a successful [`OcrResult`] to the clipboard and to the result panel.
//! The two sinks are independent: one failing never stops the other, and
//! each outcome gets its own notice.

pub mod panel;

pub use panel::{DisplayPanel, TextDirection};

use tracing::{debug, warn};

use crate::error::{PipelineError, SinkError};
use crate::pipeline::OcrResult;

/// System clipboard
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), SinkError>;
}

/// Something that shows the latest result
pub trait ResultView {
    /// Show `result`, replacing whatever was shown before
    fn replace_content(&mut self, result: OcrResult) -> Result<(), SinkError>;
}

/// Severity of a user notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient user notifications
pub trait Notifier {
    fn notify(&mut self, level: NoticeLevel, message: String);
}

/// Outcome of each sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReport {
    pub clipboard: Result<(), SinkError>,
    pub panel: Result<(), SinkError>,
}

impl SinkReport {
    pub fn all_ok(&self) -> bool {
        self.clipboard.is_ok() && self.panel.is_ok()
    }
}

/// Copy the text and show it in the panel
pub fn deliver(
    result: OcrResult,
    clipboard: &mut dyn ClipboardWriter,
    panel: &mut dyn ResultView,
    notifier: &mut dyn Notifier,
) -> SinkReport {
    let clipboard_outcome = copy_text(&result.text, clipboard, notifier);

    let label = result.source_label.clone();
    let panel_outcome = panel.replace_content(result);
    match &panel_outcome {
        Ok(()) => {
            debug!("Result panel now shows {}", label);
            notifier.notify(NoticeLevel::Info, format!("OCR result for {} is in the side panel", label));
        }
        Err(e) => {
            warn!("Panel sink failed: {}", e);
            notifier.notify(NoticeLevel::Error, "Could not show the OCR result".to_string());
        }
    }

    SinkReport {
        clipboard: clipboard_outcome,
        panel: panel_outcome,
    }
}

/// Copy the text the panel shows again. Does nothing while the panel is closed.
pub fn recopy_panel_text(
    panel: &DisplayPanel,
    clipboard: &mut dyn ClipboardWriter,
    notifier: &mut dyn Notifier,
) -> Option<Result<(), SinkError>> {
    let result = panel.content()?;
    Some(copy_text(&result.text, clipboard, notifier))
}

fn copy_text(
    text: &str,
    clipboard: &mut dyn ClipboardWriter,
    notifier: &mut dyn Notifier,
) -> Result<(), SinkError> {
    let outcome = clipboard.write_text(text);
    match &outcome {
        Ok(()) => notifier.notify(NoticeLevel::Success, "Text copied to clipboard".to_string()),
        Err(e) => {
            warn!("Clipboard sink failed: {}", e);
            notifier.notify(NoticeLevel::Error, "Could not copy text to clipboard".to_string());
        }
    }
    outcome
}

/// Turn a pipeline failure into one notice. Detail was already logged by the
/// pipeline.
pub fn report_failure(error: &PipelineError, notifier: &mut dyn Notifier) {
    notifier.notify(NoticeLevel::Error, error.notice());
}
