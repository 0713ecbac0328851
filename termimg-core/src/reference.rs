// ABOUTME: Detects inline image references in markdown and wiki-style markup
// ABOUTME: Produces located matches sorted by their start offset in the source text

use once_cell::sync::Lazy;
use regex::Regex;

/// `![alt](filename)`
static MARKDOWN_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*\]\(([^()]*)\)").expect("valid markdown image regex"));

/// `{{thumbnail(filename)}}` and `{{image(filename)}}`, with optional trailing options
static WIKI_IMAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*(thumbnail|image)\s*\(([^()]*)\)\s*\}\}").expect("valid wiki image regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Markdown,
    WikiImage,
    WikiThumbnail,
}

/// A located image reference. Offsets are byte offsets into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub start: usize,
    pub end: usize,
    pub filename: String,
    pub kind: ReferenceKind,
}

impl ImageReference {
    /// The literal markup this reference was detected from
    pub fn span<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Scan `text` for image references.
///
/// Both notations are matched independently and merged in order of `start`;
/// overlapping matches are kept as-is. References whose filename is blank are
/// treated as plain text.
pub fn detect(text: &str) -> Vec<ImageReference> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut references: Vec<ImageReference> = MARKDOWN_IMAGE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let filename = caps.get(1)?.as_str().trim();
            (!filename.is_empty()).then(|| ImageReference {
                start: whole.start(),
                end: whole.end(),
                filename: filename.to_string(),
                kind: ReferenceKind::Markdown,
            })
        })
        .collect();

    references.extend(WIKI_IMAGE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let kind = match caps.get(1)?.as_str() {
            "thumbnail" => ReferenceKind::WikiThumbnail,
            _ => ReferenceKind::WikiImage,
        };
        // Options such as `size=300` follow the filename after a comma
        let filename = caps.get(2)?.as_str().split(',').next()?.trim();
        (!filename.is_empty()).then(|| ImageReference {
            start: whole.start(),
            end: whole.end(),
            filename: filename.to_string(),
            kind,
        })
    }));

    references.sort_by_key(|r| r.start);
    references
}
