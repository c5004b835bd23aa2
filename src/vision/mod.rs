//! Vision/OCR Layer
//!
//! Text recognition behind the [`Recognizer`] trait. The production backend
//! is Tesseract.

pub mod ocr;
pub mod tesseract;

pub use ocr::Recognizer;
pub use tesseract::TesseractRecognizer;
