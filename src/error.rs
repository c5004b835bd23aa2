//! Error types for the OCR pipeline
//!
//! Each stage has its own error kind. `PipelineError` wraps them at the
//! trigger boundary, where they are turned into a single user notice.

use thiserror::Error;

/// Failure to turn an image reference into a readable file
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("no active note")]
    NoActiveNote,

    #[error("no embedded image found in the active note")]
    NoImageFound,

    #[error("no image path given")]
    EmptyPath,

    #[error("image not found: {0}")]
    NotFound(String),

    #[error("not a file: {0}")]
    NotAFile(String),

    #[error("the vault storage cannot read files outside of it")]
    UnsupportedSource,
}

/// Failure to read image bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to read image: {0}")]
    IoFailure(String),
}

/// Failure reported by the recognition engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OcrError {
    #[error("OCR engine failed: {0}")]
    EngineFailure(String),
}

/// Failure of one of the result sinks. The egui sinks never fail, other
/// `ClipboardWriter`/`ResultView` implementations may.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("clipboard write failed: {0}")]
    ClipboardFailure(String),

    #[error("result panel could not be updated: {0}")]
    PanelRenderFailure(String),
}

/// Any failure between a trigger and a successful recognition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Locate(#[from] LocateError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Ocr(#[from] OcrError),
}

impl PipelineError {
    /// Plain-language summary shown to the user.
    ///
    /// Engine and io details stay out of the notice; they are logged instead.
    pub fn notice(&self) -> String {
        match self {
            PipelineError::Locate(LocateError::NoActiveNote) => {
                "Open a note first".to_string()
            }
            PipelineError::Locate(LocateError::NoImageFound) => {
                "No image found in the current note".to_string()
            }
            PipelineError::Locate(LocateError::EmptyPath) => {
                "Enter an image path".to_string()
            }
            PipelineError::Locate(LocateError::NotFound(path)) => {
                format!("Image not found: {}", path)
            }
            PipelineError::Locate(LocateError::NotAFile(path)) => {
                format!("Not an image file: {}", path)
            }
            PipelineError::Locate(LocateError::UnsupportedSource) => {
                "This vault cannot read files outside of it".to_string()
            }
            PipelineError::Load(_) => "Could not read the image file".to_string(),
            PipelineError::Ocr(_) => "Text extraction failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_hides_engine_detail() {
        let err = PipelineError::from(OcrError::EngineFailure(
            "Error opening data file /usr/share/tessdata/xyz.traineddata".to_string(),
        ));
        let notice = err.notice();
        assert_eq!(notice, "Text extraction failed");
        assert!(!notice.contains("tessdata"));
    }

    #[test]
    fn test_notice_hides_io_detail() {
        let err = PipelineError::from(LoadError::IoFailure("permission denied (os error 13)".into()));
        assert!(!err.notice().contains("os error"));
    }

    #[test]
    fn test_notice_names_missing_path() {
        let err = PipelineError::from(LocateError::NotFound("attachments/a.png".into()));
        assert!(err.notice().contains("attachments/a.png"));
    }

    #[test]
    fn test_notice_for_blank_path() {
        let notice = PipelineError::from(LocateError::EmptyPath).notice();
        assert_eq!(notice, "Enter an image path");
    }

    #[test]
    fn test_display_keeps_detail_for_logs() {
        let err = PipelineError::from(OcrError::EngineFailure("bad language".into()));
        assert_eq!(err.to_string(), "OCR engine failed: bad language");
    }
}
