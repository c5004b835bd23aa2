//! Display Panel state
//!
//! The panel is a singleton. It is closed until the first delivery, each
//! delivery replaces what it shows, and closing it drops the content.

use super::ResultView;
use crate::error::SinkError;
use crate::pipeline::OcrResult;

/// Tesseract codes of right-to-left scripts
pub const RTL_LANGUAGES: &[&str] = &[
    "ara", // Arabic
    "heb", // Hebrew
    "fas", // Persian
    "urd", // Urdu
    "yid", // Yiddish
    "pus", // Pashto
    "syr", // Syriac
    "div", // Dhivehi
    "snd", // Sindhi
    "uig", // Uyghur
];

/// Whether text in `language` reads right to left.
///
/// For combined codes such as `ara+eng` the first language decides.
pub fn is_rtl_language(language: &str) -> bool {
    let primary = language.split('+').next().unwrap_or("").trim();
    RTL_LANGUAGES
        .iter()
        .any(|code| code.eq_ignore_ascii_case(primary))
}

/// Layout direction of the panel text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    pub fn for_language(language: &str) -> Self {
        if is_rtl_language(language) {
            TextDirection::RightToLeft
        } else {
            TextDirection::LeftToRight
        }
    }
}

/// The OCR result side panel
#[derive(Debug, Default)]
pub struct DisplayPanel {
    content: Option<OcrResult>,
}

impl DisplayPanel {
    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&OcrResult> {
        self.content.as_ref()
    }

    /// Title line derived from the image source
    pub fn title(&self) -> Option<String> {
        self.content
            .as_ref()
            .map(|result| format!("OCR: {}", result.source_label))
    }

    pub fn direction(&self) -> TextDirection {
        self.content
            .as_ref()
            .map(|result| TextDirection::for_language(&result.language_code))
            .unwrap_or(TextDirection::LeftToRight)
    }

    /// Close the panel and clear its content
    pub fn close(&mut self) {
        self.content = None;
    }
}

impl ResultView for DisplayPanel {
    fn replace_content(&mut self, result: OcrResult) -> Result<(), SinkError> {
        self.content = Some(result);
        Ok(())
    }
}
