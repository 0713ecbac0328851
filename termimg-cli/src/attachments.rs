// ABOUTME: Builds attachment descriptors from a JSON manifest or an attachments directory
// ABOUTME: Content types for directory entries are guessed from file extensions

use anyhow::{Context, Result};
use image::ImageFormat;
use std::path::{Path, PathBuf};
use termimg_core::AttachmentDescriptor;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Descriptors plus the directory their locations are relative to
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentSet {
    pub base_dir: PathBuf,
    pub attachments: Vec<AttachmentDescriptor>,
}

impl AttachmentSet {
    pub fn empty() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            attachments: Vec::new(),
        }
    }

    /// Resolve attachments from the manifest, the directory, or both.
    ///
    /// With a manifest, locations resolve against `dir` when given, otherwise
    /// against the manifest's own directory. Without one, every file in `dir`
    /// becomes an attachment.
    pub fn resolve(manifest: Option<&Path>, dir: Option<&Path>) -> Result<Self> {
        match (manifest, dir) {
            (Some(manifest), dir) => {
                let attachments = load_manifest(manifest)?;
                let base_dir = dir
                    .map(Path::to_path_buf)
                    .or_else(|| manifest.parent().map(Path::to_path_buf))
                    .unwrap_or_else(|| PathBuf::from("."));
                Ok(Self {
                    base_dir,
                    attachments,
                })
            }
            (None, Some(dir)) => Ok(Self {
                base_dir: dir.to_path_buf(),
                attachments: scan_directory(dir)?,
            }),
            (None, None) => Ok(Self::empty()),
        }
    }
}

/// Parse a JSON array of attachment descriptors
pub fn load_manifest(path: &Path) -> Result<Vec<AttachmentDescriptor>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse manifest JSON: {}", path.display()))
}

/// One descriptor per regular file in `dir`, sorted by filename
pub fn scan_directory(dir: &Path) -> Result<Vec<AttachmentDescriptor>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read attachments directory: {}", dir.display()))?;

    let mut attachments = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            log::debug!("Skipping non-UTF-8 file name in {}", dir.display());
            continue;
        };
        attachments.push(AttachmentDescriptor::new(
            filename,
            guess_content_type(&path),
            filename,
        ));
    }

    attachments.sort_by(|a, b| a.filename.cmp(&b.filename));
    Ok(attachments)
}

pub fn guess_content_type(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}
