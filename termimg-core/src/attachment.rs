// ABOUTME: Attachment descriptors, image attachment matching, and byte sources
// ABOUTME: Sources are the seam where callers plug in how attachment bytes are fetched

use crate::constants::limits;
use crate::error::FetchError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// An attachment record supplied by the caller. Read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    pub filename: String,
    pub content_type: String,
    /// Where the source can find the bytes (a path, key, or URL)
    pub location: String,
}

impl AttachmentDescriptor {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            location: location.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.content_type
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
    }
}

/// Return the attachments whose filename equals one of `filenames` exactly and
/// whose content type is an `image/*` type.
pub fn match_attachments<'a, S: AsRef<str>>(
    attachments: &'a [AttachmentDescriptor],
    filenames: &[S],
) -> Vec<&'a AttachmentDescriptor> {
    attachments
        .iter()
        .filter(|a| a.is_image() && filenames.iter().any(|f| f.as_ref() == a.filename))
        .collect()
}

/// Fetches raw encoded bytes for an attachment
pub trait AttachmentSource {
    fn fetch(&self, attachment: &AttachmentDescriptor) -> Result<Vec<u8>, FetchError>;
}

/// Reads attachments from disk, resolving locations against a base directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    base_dir: PathBuf,
    max_bytes: u64,
}

impl DirectorySource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_bytes: limits::MAX_ATTACHMENT_BYTES,
        }
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

impl AttachmentSource for DirectorySource {
    fn fetch(&self, attachment: &AttachmentDescriptor) -> Result<Vec<u8>, FetchError> {
        let path = self.base_dir.join(&attachment.location);
        let name = attachment.filename.as_str();

        let metadata = std::fs::metadata(&path).map_err(|e| FetchError::from_io(name, e))?;
        if metadata.len() > self.max_bytes {
            return Err(FetchError::TooLarge {
                name: name.to_string(),
                size: metadata.len(),
                limit: self.max_bytes,
            });
        }

        log::debug!("Reading attachment {} from {}", name, path.display());
        std::fs::read(&path).map_err(|e| FetchError::from_io(name, e))
    }
}

/// In-memory source keyed by attachment location
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, bytes: Vec<u8>) {
        self.blobs.insert(location.into(), bytes);
    }

    pub fn with(mut self, location: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(location, bytes);
        self
    }
}

impl AttachmentSource for MemorySource {
    fn fetch(&self, attachment: &AttachmentDescriptor) -> Result<Vec<u8>, FetchError> {
        self.blobs
            .get(&attachment.location)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(attachment.filename.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn attachments() -> Vec<AttachmentDescriptor> {
        vec![
            AttachmentDescriptor::new("plan.png", "image/png", "plan.png"),
            AttachmentDescriptor::new("notes.txt", "text/plain", "notes.txt"),
            AttachmentDescriptor::new("photo.JPG", "IMAGE/JPEG", "photo.JPG"),
            AttachmentDescriptor::new("fake.png", "application/octet-stream", "fake.png"),
        ]
    }

    #[test]
    fn test_match_by_filename_and_image_type() {
        let all = attachments();
        let matched = match_attachments(&all, &["plan.png", "notes.txt", "fake.png"]);

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].filename, "plan.png");
    }

    #[test]
    fn test_content_type_is_case_insensitive() {
        let all = attachments();
        let matched = match_attachments(&all, &["photo.JPG"]);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_filename_match_is_exact() {
        let all = attachments();
        assert!(match_attachments(&all, &["PLAN.png"]).is_empty());
        assert!(match_attachments(&all, &["plan"]).is_empty());
        assert!(match_attachments(&all, &["photo.jpg"]).is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let none: [&str; 0] = [];
        assert!(match_attachments(&attachments(), &none).is_empty());
        assert!(match_attachments(&[], &["plan.png"]).is_empty());
    }

    #[test]
    fn test_short_content_type_is_not_image() {
        let a = AttachmentDescriptor::new("x", "img", "x");
        assert!(!a.is_image());
    }

    #[test]
    fn test_directory_source_reads_relative_location() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("plan.png"), b"bytes").unwrap();

        let source = DirectorySource::new(dir.path());
        let attachment = AttachmentDescriptor::new("plan.png", "image/png", "plan.png");

        assert_eq!(source.fetch(&attachment).unwrap(), b"bytes");
    }

    #[test]
    fn test_directory_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path());
        let attachment = AttachmentDescriptor::new("gone.png", "image/png", "gone.png");

        assert!(matches!(
            source.fetch(&attachment),
            Err(FetchError::NotFound(name)) if name == "gone.png"
        ));
    }

    #[test]
    fn test_directory_source_size_limit() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("big.png"), vec![0u8; 64]).unwrap();

        let source = DirectorySource::new(dir.path()).with_max_bytes(16);
        let attachment = AttachmentDescriptor::new("big.png", "image/png", "big.png");

        assert!(matches!(
            source.fetch(&attachment),
            Err(FetchError::TooLarge { size: 64, limit: 16, .. })
        ));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new().with("a", vec![1, 2, 3]);

        let present = AttachmentDescriptor::new("a.png", "image/png", "a");
        let missing = AttachmentDescriptor::new("b.png", "image/png", "b");

        assert_eq!(source.fetch(&present).unwrap(), vec![1, 2, 3]);
        assert!(source.fetch(&missing).is_err());
    }

    #[test]
    fn test_descriptor_deserializes_from_json() {
        let json = r#"{"filename":"plan.png","content_type":"image/png","location":"files/plan.png"}"#;
        let parsed: AttachmentDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed,
            AttachmentDescriptor::new("plan.png", "image/png", "files/plan.png")
        );
    }
}
