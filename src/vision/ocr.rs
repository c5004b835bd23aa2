//! OCR (Optical Character Recognition) engine contract

use async_trait::async_trait;

use crate::error::OcrError;

/// A text recognition engine.
///
/// Called exactly once per pipeline run. Implementations must not retry and
/// must map every engine failure to [`OcrError::EngineFailure`].
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(&self, image: Vec<u8>, language: &str) -> Result<String, OcrError>;
}

/// Normalize raw engine output to plain text.
///
/// Line endings become `\n`, trailing whitespace is removed from every line
/// and trailing blank lines are dropped.
pub fn normalize_text(raw: &str) -> String {
    let lines: Vec<&str> = raw
        .split('\n')
        .map(|line| line.trim_end_matches('\r').trim_end())
        .collect();

    let end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map(|i| i + 1)
        .unwrap_or(0);

    lines[..end].join("\n")
}
