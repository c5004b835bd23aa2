//! Image Loader

use tracing::debug;

use super::ImageSource;
use crate::error::LoadError;
use crate::vault::Workspace;

/// Read the located image's bytes from the vault or straight from disk
pub async fn load_bytes(workspace: &dyn Workspace, source: &ImageSource) -> Result<Vec<u8>, LoadError> {
    let bytes = match source {
        ImageSource::Vault(file) => workspace.read_binary(file).await?,
        ImageSource::Filesystem(path) => tokio::fs::read(path)
            .await
            .map_err(|e| LoadError::IoFailure(format!("{}: {}", path.display(), e)))?,
    };

    if bytes.is_empty() {
        return Err(LoadError::IoFailure("file is empty".to_string()));
    }

    debug!("Loaded {} bytes", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::memory::MemoryVault;
    use crate::vault::VaultFile;

    #[tokio::test]
    async fn test_load_from_vault() {
        let vault = MemoryVault::new().with_file("a.png", vec![9, 9]);

        let bytes = load_bytes(&vault, &ImageSource::Vault(VaultFile::new("a.png")))
            .await
            .unwrap();
        assert_eq!(bytes, vec![9, 9]);
    }

    #[tokio::test]
    async fn test_vanished_vault_file() {
        let vault = MemoryVault::new().with_file("a.png", vec![1]);
        vault.remove_file("a.png");

        let err = load_bytes(&vault, &ImageSource::Vault(VaultFile::new("a.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::IoFailure(_)));
    }

    #[tokio::test]
    async fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.jpg");
        std::fs::write(&path, [4u8, 5]).unwrap();

        let bytes = load_bytes(&MemoryVault::new(), &ImageSource::Filesystem(path))
            .await
            .unwrap();
        assert_eq!(bytes, vec![4, 5]);
    }

    #[tokio::test]
    async fn test_missing_disk_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_bytes(&MemoryVault::new(), &ImageSource::Filesystem(dir.path().join("nope.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::IoFailure(_)));
    }

    #[tokio::test]
    async fn test_empty_file() {
        let vault = MemoryVault::new().with_file("empty.png", Vec::new());

        let err = load_bytes(&vault, &ImageSource::Vault(VaultFile::new("empty.png")))
            .await
            .unwrap_err();
        assert_eq!(err, LoadError::IoFailure("file is empty".into()));
    }
}
