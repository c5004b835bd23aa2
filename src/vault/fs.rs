//! Vault backed by a directory on disk

use async_trait::async_trait;
use parking_lot::RwLock;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{VaultFile, Workspace};
use crate::error::{LoadError, LocateError};

/// Directory-backed vault with a single active note
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    active_note: RwLock<Option<VaultFile>>,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            active_note: RwLock::new(None),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a vault file
    pub fn absolute_path(&self, file: &VaultFile) -> PathBuf {
        file.path
            .split('/')
            .fold(self.root.clone(), |acc, part| acc.join(part))
    }

    pub fn active_note(&self) -> Option<VaultFile> {
        self.active_note.read().clone()
    }

    pub fn set_active_note(&self, note: Option<VaultFile>) {
        debug!("Active note: {:?}", note.as_ref().map(|n| n.path.as_str()));
        *self.active_note.write() = note;
    }

    /// All files in the vault, sorted by path. Hidden entries are skipped.
    pub fn list_files(&self) -> Vec<VaultFile> {
        let mut files = Vec::new();
        collect_files(&self.root, "", &mut files);
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }
}

fn collect_files(dir: &Path, prefix: &str, out: &mut Vec<VaultFile>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Failed to read vault directory {:?}: {}", dir, e);
            return;
        }
    };

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        let rel = if prefix.is_empty() {
            name
        } else {
            format!("{}/{}", prefix, name)
        };

        match entry.file_type() {
            Ok(kind) if kind.is_dir() => collect_files(&entry.path(), &rel, out),
            Ok(kind) if kind.is_file() => out.push(VaultFile::new(rel)),
            _ => {}
        }
    }
}

#[async_trait]
impl Workspace for FsVault {
    async fn active_note_text(&self) -> Option<String> {
        let note = self.active_note()?;
        let path = self.absolute_path(&note);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Failed to read active note {:?}: {}", path, e);
                None
            }
        }
    }

    async fn resolve(&self, path: &str) -> Result<VaultFile, LocateError> {
        let file = VaultFile::new(path);
        if file.path.is_empty() {
            return Err(LocateError::NotFound(path.to_string()));
        }
        if file.escapes_root() {
            debug!("Refusing path outside the vault: {}", file.path);
            return Err(LocateError::NotFound(file.path));
        }

        let absolute = self.absolute_path(&file);
        match tokio::fs::metadata(&absolute).await {
            Ok(meta) if meta.is_file() => Ok(file),
            Ok(_) => Err(LocateError::NotAFile(file.path)),
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!("Failed to stat {:?}: {}", absolute, e);
                }
                Err(LocateError::NotFound(file.path))
            }
        }
    }

    async fn read_binary(&self, file: &VaultFile) -> Result<Vec<u8>, LoadError> {
        if file.escapes_root() {
            return Err(LoadError::IoFailure(format!("{}: outside the vault", file.path)));
        }
        let path = self.absolute_path(file);
        tokio::fs::read(&path)
            .await
            .map_err(|e| LoadError::IoFailure(format!("{}: {}", file.path, e)))
    }

    fn supports_raw_filesystem(&self) -> bool {
        true
    }
}
