use std::path::PathBuf;

use reqwest::Client;

use crate::{config::Config, types::Apod};

use super::{ArchiveError, ArchivePaths};

/// Downloads the image behind an archived record into the media root.
#[derive(Debug, Clone)]
pub struct MediaRetriever {
    paths: ArchivePaths,
    client: Client,
}

impl MediaRetriever {
    /// Creates a retriever that writes under `paths` using `client`.
    pub fn new(paths: ArchivePaths, client: Client) -> Self {
        Self { paths, client }
    }

    /// Builds a retriever with the configured media root and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, ArchiveError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::new(ArchivePaths::from_config(config), client))
    }

    /// Fetches `apod.best_url()` and stores the bytes at the record's media path.
    ///
    /// Only images are downloadable; anything else fails with
    /// [`ArchiveError::UnsupportedMedia`] before a request is made. The bytes
    /// land in a `.part` file first and are renamed into place once complete.
    pub async fn download(&self, apod: &Apod) -> Result<PathBuf, ArchiveError> {
        if !apod.is_image() {
            return Err(ArchiveError::UnsupportedMedia {
                media_type: apod.media_type().to_string(),
                extension: apod.media_extension().to_string(),
            });
        }

        let path = self.paths.media_path(apod);
        let response = self
            .client
            .get(apod.best_url())
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;

        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let partial = path.with_extension(format!("{}.part", apod.media_extension()));
        async_fs::write(&partial, &bytes).await?;
        async_fs::rename(&partial, &path).await?;

        Ok(path)
    }

    /// Path the media for `apod` is (or would be) stored at.
    pub fn media_path(&self, apod: &Apod) -> PathBuf {
        self.paths.media_path(apod)
    }
}
