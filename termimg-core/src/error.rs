// ABOUTME: Error types for attachment fetching with user-friendly messages
// ABOUTME: Decode and encode steps never fail loudly, so fetching is the only error surface

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Attachment {0} not found")]
    NotFound(String),

    #[error("Attachment {name} is too large: {size} bytes (max: {limit} bytes)")]
    TooLarge { name: String, size: u64, limit: u64 },

    #[error("Failed to read attachment {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            FetchError::NotFound(_) => {
                Some("Check that the attachment location exists relative to the attachments directory")
            }
            FetchError::TooLarge { .. } => Some("Resize the image or raise the attachment size limit"),
            FetchError::Io { .. } => None,
        }
    }

    /// Display message followed by the help text, when there is one
    pub fn detailed_message(&self) -> String {
        match self.help_text() {
            Some(help) => format!("{} ({})", self, help),
            None => self.to_string(),
        }
    }

    pub(crate) fn from_io(name: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            FetchError::NotFound(name.to_string())
        } else {
            FetchError::Io {
                name: name.to_string(),
                source: err,
            }
        }
    }
}
