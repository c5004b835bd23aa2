//! Vault access
//!
//! A vault is a folder of markdown notes and their attachments. The OCR
//! pipeline only talks to it through the [`Workspace`] trait.

pub mod fs;
#[cfg(test)]
pub mod memory;

pub use fs::FsVault;

use async_trait::async_trait;

use crate::error::{LoadError, LocateError};

/// File extensions treated as OCR-able images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// File extension of notes
pub const NOTE_EXTENSION: &str = "md";

/// A file inside the vault, addressed by its vault-relative path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VaultFile {
    /// Path relative to the vault root, `/`-separated
    pub path: String,
}

impl VaultFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: normalize_vault_path(&path.into()),
        }
    }

    /// Final path component
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Lowercased extension, if any
    pub fn extension(&self) -> Option<String> {
        let name = self.name();
        let (stem, ext) = name.rsplit_once('.')?;
        if stem.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn is_image(&self) -> bool {
        self.extension()
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
    }

    pub fn is_note(&self) -> bool {
        self.extension().is_some_and(|ext| ext == NOTE_EXTENSION)
    }

    /// Whether a `..` component takes the path out of the vault
    pub fn escapes_root(&self) -> bool {
        self.path.split('/').any(|part| part == "..")
    }
}

/// Host capabilities the pipeline needs
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Text of the note the user is looking at, if any
    async fn active_note_text(&self) -> Option<String>;

    /// Resolve a vault-relative path to an existing file
    async fn resolve(&self, path: &str) -> Result<VaultFile, LocateError>;

    /// Read a vault file's bytes
    async fn read_binary(&self, file: &VaultFile) -> Result<Vec<u8>, LoadError>;

    /// Whether paths outside the vault can be read straight from disk
    fn supports_raw_filesystem(&self) -> bool;
}

/// Use `/` separators and drop leading `./` and `/` components
pub fn normalize_vault_path(path: &str) -> String {
    let path = path.trim().replace('\\', "/");
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_extension() {
        let file = VaultFile::new("attachments/Scan 01.PNG");
        assert_eq!(file.name(), "Scan 01.PNG");
        assert_eq!(file.extension().as_deref(), Some("png"));
        assert!(file.is_image());
        assert!(!file.is_note());
    }

    #[test]
    fn test_image_extensions_case_insensitive() {
        for path in ["a.png", "a.JPG", "a.Jpeg", "dir/b.jpeg"] {
            assert!(VaultFile::new(path).is_image(), "{path}");
        }
        for path in ["a.gif", "a.png.md", ".png", "png"] {
            assert!(!VaultFile::new(path).is_image(), "{path}");
        }
    }

    #[test]
    fn test_note_detection() {
        assert!(VaultFile::new("Daily/2024-01-01.md").is_note());
        assert!(!VaultFile::new("Daily/image.png").is_note());
    }

    #[test]
    fn test_normalize_vault_path() {
        assert_eq!(normalize_vault_path("./a//b/c.png"), "a/b/c.png");
        assert_eq!(normalize_vault_path("\\a\\b.png"), "a/b.png");
        assert_eq!(normalize_vault_path(" /x.png "), "x.png");
    }

    #[test]
    fn test_escapes_root() {
        assert!(VaultFile::new("../outside.png").escapes_root());
        assert!(VaultFile::new("a/../../b.png").escapes_root());
        assert!(VaultFile::new("..\\b.png").escapes_root());
        assert!(!VaultFile::new("a/..b.png").escapes_root());
        assert!(!VaultFile::new("./a/b.png").escapes_root());
    }
}
