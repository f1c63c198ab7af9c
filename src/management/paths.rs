use std::path::{Path, PathBuf};

use crate::{config::Config, types::Apod, utils};

const RECORD_EXTENSION: &str = "json";

/// Maps dates and records to their place in the archive.
///
/// Pure: no I/O and no validation. The same inputs always give the same
/// paths, which is what lets the store treat file existence as a cache hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePaths {
    apods_root: PathBuf,
    media_root: PathBuf,
}

impl ArchivePaths {
    /// Creates a layout with separate roots for metadata and media.
    pub fn new(apods_root: impl Into<PathBuf>, media_root: impl Into<PathBuf>) -> Self {
        Self {
            apods_root: apods_root.into(),
            media_root: media_root.into(),
        }
    }

    /// Takes both roots from the configured `apods_path` and `apods_media_path`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.apods_path(), config.apods_media_path())
    }

    /// Directory holding the `YYYY-MM-DD.json` records.
    pub fn apods_root(&self) -> &Path {
        &self.apods_root
    }

    /// Directory holding downloaded media files.
    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    /// `<apods_root>/<date>.json`
    pub fn metadata_path_for_date(&self, date: &str) -> PathBuf {
        self.apods_root
            .join(format!("{date}.{ext}", date = date, ext = RECORD_EXTENSION))
    }

    pub fn metadata_path(&self, apod: &Apod) -> PathBuf {
        self.metadata_path_for_date(apod.date())
    }

    /// `<media_root>/<date>.<media_extension>`
    pub fn media_path(&self, apod: &Apod) -> PathBuf {
        self.media_root.join(format!(
            "{date}.{ext}",
            date = apod.date(),
            ext = apod.media_extension()
        ))
    }
}

/// Returns `true` for `YYYY-MM-DD.json` file names.
pub fn is_record_file_name(name: &str) -> bool {
    name.strip_suffix(".json")
        .is_some_and(utils::is_canonical_date_shape)
}
