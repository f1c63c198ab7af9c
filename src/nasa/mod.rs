//! # NASA APOD Integration Module
//!
//! This module is the boundary between the archive and the remote Astronomy
//! Picture of the Day API. It turns the three query shapes the API supports
//! into HTTP requests and their JSON answers into validated [`Apod`] records.
//!
//! ## Query Shapes
//!
//! | Operation        | Query parameters                    | Response          |
//! |------------------|-------------------------------------|-------------------|
//! | `fetch_one`      | `api_key`, `date`                   | one JSON object   |
//! | `fetch_range`    | `api_key`, `start_date`, `end_date` | array of objects  |
//! | `fetch_random`   | `api_key`, `count`                  | array of objects  |
//!
//! ## Fail Fast
//!
//! Inputs are validated before any request is sent: a malformed date yields
//! [`RecordError::DateFormat`] wrapped in [`FetchError::Record`] and an
//! out-of-range count yields [`FetchError::CountOutOfRange`].
//!
//! ## Batches
//!
//! Range and random answers are validated element by element. The first
//! invalid element fails the whole call, so a batch is either returned in
//! full or not at all.
//!
//! ## Side Effects
//!
//! Network I/O only. Persisting what was fetched is the job of
//! [`crate::management::ArchiveStore`].

use std::{fmt, future::Future};

use crate::{
    types::{Apod, RecordError},
    utils::DateArg,
};

mod apod;

pub use apod::ApodClient;

/// Smallest `count` accepted by the random query.
pub const MIN_RANDOM_COUNT: u32 = 1;
/// Largest `count` accepted by the random query.
pub const MAX_RANDOM_COUNT: u32 = 100;

#[derive(Debug)]
pub enum FetchError {
    Record(RecordError),
    CountOutOfRange(u32),
    Http(reqwest::Error),
    Parse(serde_json::Error),
}

impl FetchError {
    pub fn is_date_format(&self) -> bool {
        matches!(self, FetchError::Record(e) if e.is_date_format())
    }

    pub fn is_range(&self) -> bool {
        matches!(self, FetchError::CountOutOfRange(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Record(e) => write!(f, "{}", e),
            FetchError::CountOutOfRange(count) => write!(
                f,
                "count must be between {} and {}, got {}",
                MIN_RANDOM_COUNT, MAX_RANDOM_COUNT, count
            ),
            FetchError::Http(e) => write!(f, "request to the APOD API failed: {}", e),
            FetchError::Parse(e) => write!(f, "unexpected response from the APOD API: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Record(e) => Some(e),
            FetchError::Http(e) => Some(e),
            FetchError::Parse(e) => Some(e),
            FetchError::CountOutOfRange(_) => None,
        }
    }
}

impl From<RecordError> for FetchError {
    fn from(err: RecordError) -> Self {
        FetchError::Record(err)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err)
    }
}

/// Where APOD records come from.
///
/// [`ApodClient`] is the production implementation; the archive only depends
/// on this trait so it can be exercised without the network.
pub trait ApodSource {
    /// Fetches the record for `date`, or for today when `date` is `None`.
    fn fetch_one(
        &self,
        date: Option<DateArg>,
    ) -> impl Future<Output = Result<Apod, FetchError>>;

    fn fetch_range(
        &self,
        start: DateArg,
        end: DateArg,
    ) -> impl Future<Output = Result<Vec<Apod>, FetchError>>;

    fn fetch_random(&self, count: u32) -> impl Future<Output = Result<Vec<Apod>, FetchError>>;
}

/// Fails with [`FetchError::CountOutOfRange`] unless `1 <= count <= 100`.
pub fn check_random_count(count: u32) -> Result<(), FetchError> {
    if (MIN_RANDOM_COUNT..=MAX_RANDOM_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(FetchError::CountOutOfRange(count))
    }
}
