//! Vault OCR - extract text from images embedded in a notes vault
//!
//! Finds an image (the last one embedded in the active note, a typed path, or
//! a file picked in the browser), runs Tesseract on it, copies the text to the
//! clipboard and shows it in a side panel.

mod app;
mod config;
mod dashboard;
mod delivery;
mod error;
mod pipeline;
mod shared;
mod storage;
mod vault;
mod vision;

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::app::OcrService;
use crate::config::{SettingField, SettingsStore};
use crate::pipeline::{ImageReference, OcrPipeline};
use crate::vault::{FsVault, VaultFile};
use crate::vision::TesseractRecognizer;

/// Vault OCR - text extraction for note vaults
#[derive(Parser, Debug)]
#[command(name = "vault-ocr")]
#[command(about = "Extract text from images in a notes vault")]
struct Args {
    /// Vault root directory
    #[arg(long, default_value = ".")]
    vault: PathBuf,

    /// Vault-relative path of the note to open as active
    #[arg(long)]
    note: Option<String>,

    /// Run OCR on this image, print the text and exit
    #[arg(long)]
    print: Option<String>,

    /// Language for a --print run, not persisted
    #[arg(long, requires = "print")]
    lang: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Vault OCR starting...");

    let settings = Arc::new(load_settings());
    let vault = Arc::new(FsVault::new(args.vault.clone()));
    info!("Vault root: {:?}", vault.root());

    if let Some(note) = &args.note {
        vault.set_active_note(Some(VaultFile::new(note.as_str())));
    }

    if let Some(path) = args.print {
        return run_print(vault, settings, path, args.lang);
    }

    let service = build_service(vault.clone(), settings)?;

    // Run the dashboard (blocking)
    if let Err(e) = dashboard::run_dashboard(service, vault) {
        tracing::error!("Dashboard error: {}", e);
    }

    info!("Vault OCR shutdown complete");

    Ok(())
}

/// Load persisted settings, or defaults that live only for this process
fn load_settings() -> SettingsStore {
    match storage::get_config_path() {
        Ok(path) => SettingsStore::load(path),
        Err(e) => {
            tracing::warn!("No config directory, settings will not be saved: {}", e);
            SettingsStore::in_memory(Default::default())
        }
    }
}

fn build_service(vault: Arc<FsVault>, settings: Arc<SettingsStore>) -> Result<OcrService> {
    let recognizer = Arc::new(TesseractRecognizer::new(&settings.snapshot().engine));
    let pipeline = OcrPipeline::new(vault, recognizer, settings);
    OcrService::new(pipeline)
}

/// Headless typed-path run
fn run_print(
    vault: Arc<FsVault>,
    settings: Arc<SettingsStore>,
    path: String,
    lang: Option<String>,
) -> Result<()> {
    let settings = match lang {
        Some(lang) => {
            let session = SettingsStore::in_memory(settings.snapshot());
            session.set(SettingField::OcrLang, &lang)?;
            Arc::new(session)
        }
        None => settings,
    };

    let service = build_service(vault, settings)?;
    let result = service
        .run_blocking(ImageReference::TypedPath(path))
        .map_err(|e| anyhow!(e.notice()))?;

    println!("{}", result.text);
    Ok(())
}
