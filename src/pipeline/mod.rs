//! OCR pipeline
//!
//! Locate → load → recognize, shared by every trigger. Delivery to the
//! clipboard and the result panel happens afterwards on the UI thread, see
//! [`crate::delivery`].

pub mod loader;
pub mod locator;

pub use loader::load_bytes;
pub use locator::{find_last_embedded_image, locate};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::SettingsStore;
use crate::error::PipelineError;
use crate::vault::{VaultFile, Workspace};
use crate::vision::Recognizer;

/// What the user pointed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// The last `![[image]]` embed in the active note
    LastInNote,
    /// A path typed by the user
    TypedPath(String),
    /// A file picked in the vault browser
    ExplicitFile(VaultFile),
}

impl ImageReference {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ImageReference::LastInNote => "last-in-note",
            ImageReference::TypedPath(_) => "typed-path",
            ImageReference::ExplicitFile(_) => "explicit-file",
        }
    }
}

/// Where the image bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Read through the vault
    Vault(VaultFile),
    /// Read straight from disk
    Filesystem(PathBuf),
}

/// A resolved, readable image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedImage {
    pub source: ImageSource,
    /// Shown to the user, never resolved again
    pub display_label: String,
}

/// Text recognized from one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrResult {
    pub text: String,
    pub source_label: String,
    pub language_code: String,
}

/// Locate → load → recognize
pub struct OcrPipeline {
    workspace: Arc<dyn Workspace>,
    recognizer: Arc<dyn Recognizer>,
    settings: Arc<SettingsStore>,
}

impl OcrPipeline {
    pub fn new(
        workspace: Arc<dyn Workspace>,
        recognizer: Arc<dyn Recognizer>,
        settings: Arc<SettingsStore>,
    ) -> Self {
        Self {
            workspace,
            recognizer,
            settings,
        }
    }

    pub fn settings(&self) -> &Arc<SettingsStore> {
        &self.settings
    }

    /// Run the pipeline for one reference.
    ///
    /// Errors are logged with their full detail before being returned.
    pub async fn run(&self, reference: ImageReference) -> Result<OcrResult, PipelineError> {
        let span = info_span!("ocr", request_id = %Uuid::new_v4(), trigger = reference.kind());

        async move {
            let start = Instant::now();
            let outcome = self.run_stages(&reference).await;
            match &outcome {
                Ok(result) => info!(
                    "Recognized {} characters from {} in {:?}",
                    result.text.chars().count(),
                    result.source_label,
                    start.elapsed()
                ),
                Err(e) => warn!("OCR failed: {}", e),
            }
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run_stages(&self, reference: &ImageReference) -> Result<OcrResult, PipelineError> {
        let settings = self.settings.snapshot();

        let located = locate(self.workspace.as_ref(), reference, &settings).await?;
        let bytes = load_bytes(self.workspace.as_ref(), &located.source).await?;
        let text = self.recognizer.recognize(bytes, &settings.ocr_lang).await?;

        Ok(OcrResult {
            text,
            source_label: located.display_label,
            language_code: settings.ocr_lang,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::{SettingField, Settings};
    use crate::delivery::{deliver, report_failure, DisplayPanel};
    use crate::delivery::tests::{RecordingClipboard, RecordingNotifier};
    use crate::error::{LocateError, OcrError};
    use crate::vault::memory::MemoryVault;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Recognizer double that records its calls
    pub(crate) struct MockRecognizer {
        reply: Result<String, OcrError>,
        pub calls: Mutex<Vec<(Vec<u8>, String)>>,
    }

    impl MockRecognizer {
        pub fn ok(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(OcrError::EngineFailure(message.to_string())),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Recognizer for MockRecognizer {
        async fn recognize(&self, image: Vec<u8>, language: &str) -> Result<String, OcrError> {
            self.calls.lock().push((image, language.to_string()));
            self.reply.clone()
        }
    }

    fn pipeline(vault: MemoryVault, recognizer: Arc<MockRecognizer>, folder: &str) -> OcrPipeline {
        let settings = SettingsStore::in_memory(Settings {
            default_image_folder: folder.to_string(),
            ..Settings::default()
        });
        OcrPipeline::new(Arc::new(vault), recognizer, Arc::new(settings))
    }

    #[tokio::test]
    async fn test_end_to_end_last_image_in_note() {
        let vault = MemoryVault::new()
            .with_active_note("see ![[img1.png]] and ![[img2.jpg]]")
            .with_file("attach/img1.png", vec![1])
            .with_file("attach/img2.jpg", vec![2]);
        let recognizer = Arc::new(MockRecognizer::ok("HELLO"));
        let pipeline = pipeline(vault, recognizer.clone(), "attach/");

        let result = pipeline.run(ImageReference::LastInNote).await.unwrap();
        assert_eq!(recognizer.calls.lock().as_slice(), &[(vec![2u8], "eng".to_string())]);

        let mut clipboard = RecordingClipboard::default();
        let mut panel = DisplayPanel::default();
        let mut notifier = RecordingNotifier::default();
        let report = deliver(result, &mut clipboard, &mut panel, &mut notifier);

        assert!(report.all_ok());
        assert_eq!(clipboard.contents.as_deref(), Some("HELLO"));
        let shown = panel.content().unwrap();
        assert_eq!(shown.text, "HELLO");
        assert!(panel.title().unwrap().contains("img2.jpg"));
    }

    #[tokio::test]
    async fn test_language_comes_from_settings() {
        let vault = MemoryVault::new().with_file("scan.png", vec![7]);
        let recognizer = Arc::new(MockRecognizer::ok("مرحبا"));
        let pipeline = pipeline(vault, recognizer.clone(), "");
        pipeline.settings().set(SettingField::OcrLang, "ara").unwrap();

        let result = pipeline
            .run(ImageReference::TypedPath("scan.png".into()))
            .await
            .unwrap();

        assert_eq!(result.language_code, "ara");
        assert_eq!(recognizer.calls.lock()[0].1, "ara");
    }

    #[tokio::test]
    async fn test_locate_failure_skips_engine() {
        let recognizer = Arc::new(MockRecognizer::ok("unused"));
        let pipeline = pipeline(MemoryVault::new().with_active_note("no images"), recognizer.clone(), "a");

        let err = pipeline.run(ImageReference::LastInNote).await.unwrap_err();

        assert_eq!(err, PipelineError::Locate(LocateError::NoImageFound));
        assert!(recognizer.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_engine_failure_leaves_sinks_untouched() {
        let vault = MemoryVault::new()
            .with_file("a.png", vec![1])
            .with_file("b.png", vec![2]);
        let good = pipeline(vault, Arc::new(MockRecognizer::ok("FIRST")), "");

        let mut clipboard = RecordingClipboard::default();
        let mut panel = DisplayPanel::default();
        let mut notifier = RecordingNotifier::default();

        let first = good.run(ImageReference::TypedPath("a.png".into())).await.unwrap();
        deliver(first, &mut clipboard, &mut panel, &mut notifier);
        let writes_before = clipboard.writes;

        let vault = MemoryVault::new().with_file("b.png", vec![2]);
        let bad = pipeline(vault, Arc::new(MockRecognizer::failing("engine crashed")), "");
        match bad.run(ImageReference::TypedPath("b.png".into())).await {
            Ok(result) => {
                deliver(result, &mut clipboard, &mut panel, &mut notifier);
            }
            Err(e) => report_failure(&e, &mut notifier),
        }

        assert_eq!(clipboard.writes, writes_before);
        assert_eq!(clipboard.contents.as_deref(), Some("FIRST"));
        assert_eq!(panel.content().unwrap().text, "FIRST");
        assert_eq!(
            notifier.messages.last().map(|(_, m)| m.as_str()),
            Some("Text extraction failed")
        );
    }

    #[tokio::test]
    async fn test_engine_called_once_without_retry() {
        let vault = MemoryVault::new().with_file("a.png", vec![1]);
        let recognizer = Arc::new(MockRecognizer::failing("boom"));
        let pipeline = pipeline(vault, recognizer.clone(), "");

        let err = pipeline.run(ImageReference::TypedPath("a.png".into())).await.unwrap_err();

        assert_eq!(err, PipelineError::Ocr(OcrError::EngineFailure("boom".into())));
        assert_eq!(recognizer.calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_runs_are_independent() {
        let vault = MemoryVault::new()
            .with_file("a.png", vec![1])
            .with_file("b.png", vec![2]);
        let recognizer = Arc::new(MockRecognizer::ok("TEXT"));
        let pipeline = pipeline(vault, recognizer.clone(), "");

        let (a, b) = tokio::join!(
            pipeline.run(ImageReference::TypedPath("a.png".into())),
            pipeline.run(ImageReference::TypedPath("b.png".into())),
        );

        assert_eq!(a.unwrap().source_label, "a.png");
        assert_eq!(b.unwrap().source_label, "b.png");
        assert_eq!(recognizer.calls.lock().len(), 2);
    }
}
