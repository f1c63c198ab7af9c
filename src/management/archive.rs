use std::path::PathBuf;

use futures::stream::{BoxStream, StreamExt};

use crate::{nasa::ApodSource, types::Apod, utils::DateArg};

use super::{ArchiveError, ArchivePaths, paths::is_record_file_name};

/// Date-addressed store of APOD records backed by a remote source.
///
/// Single dates are fetched only if absent: once a date is archived it is
/// served from disk and the source is never asked for it again. Range and
/// random fetches always go to the source and write every returned record.
pub struct ArchiveStore<S> {
    paths: ArchivePaths,
    source: S,
}

impl<S: ApodSource> ArchiveStore<S> {
    /// Creates a store over `paths` that fetches missing records from `source`.
    ///
    /// Nothing is touched on disk until the first read or write.
    ///
    /// # Example
    ///
    /// ```
    /// let store = ArchiveStore::new(ArchivePaths::from_config(&config), ApodClient::from_config(&config)?);
    /// ```
    pub fn new(paths: ArchivePaths, source: S) -> Self {
        Self { paths, source }
    }

    /// The path layout records are read from and written to.
    pub fn paths(&self) -> &ArchivePaths {
        &self.paths
    }

    /// The remote source consulted on archive misses.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns `true` when a record file for `date` is present.
    ///
    /// Existence alone counts as a hit; the file is not opened or validated.
    /// `date` is expected in canonical `YYYY-MM-DD` form.
    pub async fn exists_for_date(&self, date: &str) -> bool {
        async_fs::metadata(self.paths.metadata_path_for_date(date))
            .await
            .is_ok_and(|meta| meta.is_file())
    }

    /// Reads and validates the archived record for `date`.
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::NotFound`] if no record file exists for `date`
    /// - [`ArchiveError::Record`] if the file cannot be read, is not valid JSON
    ///   or holds an invalid record
    ///
    /// # Example
    ///
    /// ```
    /// match store.load_for_date("2024-02-15").await {
    ///     Ok(apod) => println!("{}", apod),
    ///     Err(e) if e.is_not_found() => warning!("not archived yet"),
    ///     Err(e) => return Err(e.into()),
    /// }
    /// ```
    pub async fn load_for_date(&self, date: &str) -> Result<Apod, ArchiveError> {
        if !self.exists_for_date(date).await {
            return Err(ArchiveError::NotFound(date.to_string()));
        }

        Ok(Apod::from_persisted_file(self.paths.metadata_path_for_date(date)).await?)
    }

    /// Writes `apod` to its metadata path, replacing any previous file.
    ///
    /// The metadata root is created on demand. Returns the path written.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::IoError`] if the directory or file cannot be
    /// written.
    pub async fn persist(&self, apod: &Apod) -> Result<PathBuf, ArchiveError> {
        let path = self.paths.metadata_path(apod);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(apod)?;
        async_fs::write(&path, json).await?;
        Ok(path)
    }

    /// Lazily reads every `YYYY-MM-DD.json` record under the metadata root.
    ///
    /// Order follows directory enumeration and is unspecified; sort by
    /// [`Apod::calendar_value`] when order matters. Each call rescans.
    pub async fn list_all(
        &self,
    ) -> Result<BoxStream<'static, Result<Apod, ArchiveError>>, ArchiveError> {
        let entries = async_fs::read_dir(self.paths.apods_root()).await?;

        Ok(entries
            .filter_map(|entry| async move {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => return Some(Err(ArchiveError::from(e))),
                };
                let name = entry.file_name();
                if !is_record_file_name(name.to_str()?) {
                    return None;
                }

                Some(
                    Apod::from_persisted_file(entry.path())
                        .await
                        .map_err(ArchiveError::from),
                )
            })
            .boxed())
    }

    /// Serves `date` from the archive, fetching and persisting it only if absent.
    ///
    /// `None` means today. The date is validated before the archive or the
    /// source is touched.
    pub async fn fetch_or_load_single(&self, date: Option<DateArg>) -> Result<Apod, ArchiveError> {
        let date = date
            .unwrap_or_else(|| DateArg::Calendar(crate::utils::today()))
            .normalize()?;

        if self.exists_for_date(&date).await {
            return self.load_for_date(&date).await;
        }

        let apod = self.source.fetch_one(Some(DateArg::Text(date))).await?;
        self.persist(&apod).await?;
        Ok(apod)
    }

    /// Fetches every record from `start` to `end` inclusive and archives them.
    ///
    /// The source is always consulted, even for dates already on disk, and
    /// existing files are overwritten. Nothing is written unless the whole
    /// batch is valid.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Fetch`] for bad dates or a failed request, and
    /// [`ArchiveError::IoError`] if a record cannot be written.
    pub async fn fetch_range(&self, start: DateArg, end: DateArg) -> Result<Vec<Apod>, ArchiveError> {
        let apods = self.source.fetch_range(start, end).await?;
        self.persist_all(&apods).await?;
        Ok(apods)
    }

    /// Fetches `count` random records (1 to 100) and archives them.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Fetch`] for an out-of-range `count` (before any
    /// request) or a failed request, and [`ArchiveError::IoError`] if a record
    /// cannot be written.
    pub async fn fetch_random(&self, count: u32) -> Result<Vec<Apod>, ArchiveError> {
        let apods = self.source.fetch_random(count).await?;
        self.persist_all(&apods).await?;
        Ok(apods)
    }

    async fn persist_all(&self, apods: &[Apod]) -> Result<(), ArchiveError> {
        for apod in apods {
            self.persist(apod).await?;
        }
        Ok(())
    }
}
