//! Local archive of APOD records and their media.
//!
//! Records live as one pretty-printed JSON file per date under the metadata
//! root, media as raw bytes under the media root. [`ArchivePaths`] derives
//! both locations, [`ArchiveStore`] reads, writes and fetches records and
//! [`MediaRetriever`] downloads images.

use std::{fmt, io};

use crate::{nasa::FetchError, types::RecordError};

mod archive;
mod media;
mod paths;

pub use archive::ArchiveStore;
pub use media::MediaRetriever;
pub use paths::ArchivePaths;
pub use paths::is_record_file_name;

#[derive(Debug)]
pub enum ArchiveError {
    Record(RecordError),
    Fetch(FetchError),
    NotFound(String),
    UnsupportedMedia {
        media_type: String,
        extension: String,
    },
    Http(reqwest::Error),
    IoError(io::Error),
    SerdeError(serde_json::Error),
}

impl ArchiveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ArchiveError::NotFound(_))
    }

    pub fn is_unsupported_media(&self) -> bool {
        matches!(self, ArchiveError::UnsupportedMedia { .. })
    }
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveError::Record(e) => write!(f, "{}", e),
            ArchiveError::Fetch(e) => write!(f, "{}", e),
            ArchiveError::NotFound(date) => write!(f, "APOD for {} is not archived", date),
            ArchiveError::UnsupportedMedia {
                media_type,
                extension,
            } => write!(f, "invalid media type: {} -> {}", media_type, extension),
            ArchiveError::Http(e) => write!(f, "media download failed: {}", e),
            ArchiveError::IoError(e) => write!(f, "archive I/O failed: {}", e),
            ArchiveError::SerdeError(e) => write!(f, "cannot encode APOD: {}", e),
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArchiveError::Record(e) => Some(e),
            ArchiveError::Fetch(e) => Some(e),
            ArchiveError::Http(e) => Some(e),
            ArchiveError::IoError(e) => Some(e),
            ArchiveError::SerdeError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RecordError> for ArchiveError {
    fn from(err: RecordError) -> Self {
        ArchiveError::Record(err)
    }
}

impl From<FetchError> for ArchiveError {
    fn from(err: FetchError) -> Self {
        ArchiveError::Fetch(err)
    }
}

impl From<reqwest::Error> for ArchiveError {
    fn from(err: reqwest::Error) -> Self {
        ArchiveError::Http(err)
    }
}

impl From<io::Error> for ArchiveError {
    fn from(err: io::Error) -> Self {
        ArchiveError::IoError(err)
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        ArchiveError::SerdeError(err)
    }
}
