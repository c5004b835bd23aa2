//! Tesseract OCR backend
//!
//! Drives the `tesseract` binary through `rusty-tesseract`. The image is
//! decoded first so malformed bytes fail before the engine is spawned, then
//! written to a scratch file the engine can read.

use async_trait::async_trait;
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

use super::ocr::{normalize_text, Recognizer};
use crate::config::EngineConfig;
use crate::error::OcrError;

/// Tesseract engine wrapper
#[derive(Debug, Clone, Default)]
pub struct TesseractRecognizer {
    dpi: Option<i32>,
    psm: Option<i32>,
}

impl TesseractRecognizer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            dpi: config.dpi,
            psm: config.psm,
        }
    }

    /// Languages installed for the local tesseract, if it can be queried
    pub fn available_languages() -> Result<Vec<String>, OcrError> {
        rusty_tesseract::get_tesseract_langs().map_err(|e| OcrError::EngineFailure(e.to_string()))
    }

    fn recognize_blocking(&self, image: &[u8], language: &str) -> Result<String, OcrError> {
        let format = image::guess_format(image)
            .map_err(|e| OcrError::EngineFailure(format!("unrecognized image data: {}", e)))?;
        let decoded = image::load_from_memory_with_format(image, format)
            .map_err(|e| OcrError::EngineFailure(format!("failed to decode image: {}", e)))?;
        debug!(
            "Tesseract: {:?} image {}x{}, lang {}",
            format,
            decoded.width(),
            decoded.height(),
            language
        );

        let extension = format.extensions_str().first().copied().unwrap_or("png");
        let mut scratch = tempfile::Builder::new()
            .prefix("vault-ocr-")
            .suffix(&format!(".{}", extension))
            .tempfile()
            .map_err(|e| OcrError::EngineFailure(format!("failed to create scratch file: {}", e)))?;
        scratch
            .write_all(image)
            .and_then(|_| scratch.flush())
            .map_err(|e| OcrError::EngineFailure(format!("failed to write scratch file: {}", e)))?;

        let input = rusty_tesseract::Image::from_path(scratch.path())
            .map_err(|e| OcrError::EngineFailure(e.to_string()))?;

        let defaults = rusty_tesseract::Args::default();
        let args = rusty_tesseract::Args {
            lang: language.to_string(),
            dpi: self.dpi.or(defaults.dpi),
            psm: self.psm.or(defaults.psm),
            ..defaults
        };

        let raw = rusty_tesseract::image_to_string(&input, &args)
            .map_err(|e| OcrError::EngineFailure(e.to_string()))?;

        Ok(normalize_text(&raw))
    }
}

#[async_trait]
impl Recognizer for TesseractRecognizer {
    async fn recognize(&self, image: Vec<u8>, language: &str) -> Result<String, OcrError> {
        let engine = self.clone();
        let language = language.to_string();
        let start = Instant::now();

        let text = tokio::task::spawn_blocking(move || engine.recognize_blocking(&image, &language))
            .await
            .map_err(|e| OcrError::EngineFailure(format!("recognition task aborted: {}", e)))??;

        info!(
            "Tesseract recognized {} characters in {:?}",
            text.chars().count(),
            start.elapsed()
        );
        Ok(text)
    }
}
