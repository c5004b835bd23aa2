//! Image Locator
//!
//! Turns an [`ImageReference`] into a readable [`LocatedImage`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{ImageReference, ImageSource, LocatedImage};
use crate::config::Settings;
use crate::error::LocateError;
use crate::vault::Workspace;

/// `![[name.png]]`, `![[name.JPG|300]]`, ... A match never crosses `]]` or a
/// line break.
static EMBED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)!\[\[([^\[\]|\r\n]+?\.(?:png|jpe?g))(?:\|[^\[\]\r\n]*)?\]\]").unwrap()
});

/// File name of the last embedded image in the note, by position
pub fn find_last_embedded_image(note: &str) -> Option<String> {
    EMBED_PATTERN
        .captures_iter(note)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Join an embed name onto the image folder. Leading and trailing separators
/// on the folder are ignored; an empty folder means the vault root.
pub fn join_image_folder(folder: &str, name: &str) -> String {
    let folder = folder.trim().trim_matches(|c| c == '/' || c == '\\');
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

/// Resolve a reference against the workspace
pub async fn locate(
    workspace: &dyn Workspace,
    reference: &ImageReference,
    settings: &Settings,
) -> Result<LocatedImage, LocateError> {
    match reference {
        ImageReference::LastInNote => {
            let note = workspace
                .active_note_text()
                .await
                .ok_or(LocateError::NoActiveNote)?;
            let name = find_last_embedded_image(&note).ok_or(LocateError::NoImageFound)?;
            let path = join_image_folder(&settings.default_image_folder, &name);
            debug!("Last embedded image {:?} resolves to {:?}", name, path);

            let file = workspace.resolve(&path).await?;
            Ok(LocatedImage {
                source: ImageSource::Vault(file),
                display_label: name,
            })
        }
        ImageReference::TypedPath(typed) => {
            let typed = typed.trim();
            if typed.is_empty() {
                return Err(LocateError::EmptyPath);
            }

            let source = if Path::new(typed).is_absolute() {
                if !workspace.supports_raw_filesystem() {
                    return Err(LocateError::UnsupportedSource);
                }
                ImageSource::Filesystem(resolve_on_disk(typed).await?)
            } else {
                ImageSource::Vault(workspace.resolve(typed).await?)
            };

            Ok(LocatedImage {
                source,
                display_label: typed.to_string(),
            })
        }
        ImageReference::ExplicitFile(file) => Ok(LocatedImage {
            display_label: file.name().to_string(),
            source: ImageSource::Vault(file.clone()),
        }),
    }
}

async fn resolve_on_disk(path: &str) -> Result<PathBuf, LocateError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(PathBuf::from(path)),
        Ok(_) => Err(LocateError::NotAFile(path.to_string())),
        Err(_) => Err(LocateError::NotFound(path.to_string())),
    }
}
