//! In-memory vault used by tests

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::{normalize_vault_path, VaultFile, Workspace};
use crate::error::{LoadError, LocateError};

/// Vault whose files only exist in memory. It has no raw filesystem access.
#[derive(Debug, Default)]
pub struct MemoryVault {
    files: RwLock<HashMap<String, Vec<u8>>>,
    active_note: RwLock<Option<String>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, contents: Vec<u8>) -> Self {
        self.files.write().insert(normalize_vault_path(path), contents);
        self
    }

    pub fn with_active_note(self, text: &str) -> Self {
        *self.active_note.write() = Some(text.to_string());
        self
    }

    pub fn remove_file(&self, path: &str) {
        self.files.write().remove(&normalize_vault_path(path));
    }

    fn is_dir(&self, path: &str) -> bool {
        let prefix = format!("{}/", path);
        self.files.read().keys().any(|k| k.starts_with(&prefix))
    }
}

#[async_trait]
impl Workspace for MemoryVault {
    async fn active_note_text(&self) -> Option<String> {
        self.active_note.read().clone()
    }

    async fn resolve(&self, path: &str) -> Result<VaultFile, LocateError> {
        let file = VaultFile::new(path);
        if self.files.read().contains_key(&file.path) {
            Ok(file)
        } else if !file.path.is_empty() && self.is_dir(&file.path) {
            Err(LocateError::NotAFile(file.path))
        } else {
            Err(LocateError::NotFound(file.path))
        }
    }

    async fn read_binary(&self, file: &VaultFile) -> Result<Vec<u8>, LoadError> {
        self.files
            .read()
            .get(&file.path)
            .cloned()
            .ok_or_else(|| LoadError::IoFailure(format!("{}: file vanished", file.path)))
    }

    fn supports_raw_filesystem(&self) -> bool {
        false
    }
}
