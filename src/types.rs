use std::{fmt, io, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::utils;

#[derive(Debug)]
pub enum RecordError {
    DateFormat(String),
    Validation(String),
    IoError(io::Error),
    SerdeError(serde_json::Error),
}

impl RecordError {
    pub fn is_date_format(&self) -> bool {
        matches!(self, RecordError::DateFormat(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, RecordError::Validation(_))
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::DateFormat(value) => write!(
                f,
                "date must follow format {}, got '{}'",
                utils::DATE_FORMAT,
                value
            ),
            RecordError::Validation(msg) => write!(f, "invalid APOD: {}", msg),
            RecordError::IoError(e) => write!(f, "cannot read APOD file: {}", e),
            RecordError::SerdeError(e) => write!(f, "cannot decode APOD: {}", e),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::IoError(e) => Some(e),
            RecordError::SerdeError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RecordError {
    fn from(err: io::Error) -> Self {
        RecordError::IoError(err)
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(err: serde_json::Error) -> Self {
        RecordError::SerdeError(err)
    }
}

/// Raw APOD document as served by the API and as written to disk.
///
/// Carries no guarantees. Convert it into an [`Apod`] to validate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApodPayload {
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub url: Option<String>,
    pub media_type: String,
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub concepts: Option<serde_json::Value>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub resources: Option<serde_json::Value>,
    #[serde(default)]
    pub service_version: Option<String>,
}

/// One validated Astronomy Picture of the Day entry.
///
/// Instances only come out of [`Apod::try_from`], [`Apod::from_api_payload`]
/// or [`Apod::from_persisted_file`], so every `Apod` has a canonical date, a
/// title and at least one media URL. Serializing an `Apod` writes every
/// attribute, unset optionals included as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Apod {
    date: String,
    title: String,
    explanation: String,
    url: Option<String>,
    media_type: String,
    hdurl: Option<String>,
    concepts: Option<serde_json::Value>,
    thumbnail_url: Option<String>,
    copyright: Option<String>,
    resources: Option<serde_json::Value>,
    service_version: Option<String>,
    #[serde(skip)]
    calendar: NaiveDate,
}

impl TryFrom<ApodPayload> for Apod {
    type Error = RecordError;

    fn try_from(payload: ApodPayload) -> Result<Self, Self::Error> {
        let calendar = utils::parse_canonical_date(&payload.date)?;

        if payload.title.trim().is_empty() {
            return Err(RecordError::Validation("APOD must have a title".to_string()));
        }

        let url = non_blank(payload.url);
        let hdurl = non_blank(payload.hdurl);
        if url.is_none() && hdurl.is_none() {
            return Err(RecordError::Validation(
                "APOD must have at least url or hdurl".to_string(),
            ));
        }

        Ok(Self {
            date: payload.date,
            title: payload.title,
            explanation: payload.explanation,
            url,
            media_type: payload.media_type,
            hdurl,
            concepts: payload.concepts,
            thumbnail_url: payload.thumbnail_url,
            copyright: payload.copyright,
            resources: payload.resources,
            service_version: payload.service_version,
            calendar,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Apod {
    /// Validates a JSON value as returned by the APOD endpoint.
    ///
    /// # Errors
    ///
    /// - [`RecordError::SerdeError`] if `json` is not an APOD object
    /// - [`RecordError::DateFormat`] if the date is not a real `YYYY-MM-DD` day
    /// - [`RecordError::Validation`] if the title or both URLs are missing
    pub fn from_api_payload(json: serde_json::Value) -> Result<Self, RecordError> {
        let payload: ApodPayload = serde_json::from_value(json)?;
        Self::try_from(payload)
    }

    /// Reads and validates a record written by the archive.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::IoError`] if the file cannot be read, and the
    /// same errors as [`Apod::from_api_payload`] otherwise.
    pub async fn from_persisted_file(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let content = async_fs::read_to_string(path.as_ref()).await?;
        let payload: ApodPayload = serde_json::from_str(&content)?;
        Self::try_from(payload)
    }

    /// Canonical `YYYY-MM-DD` date; also the record's archive key.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn hdurl(&self) -> Option<&str> {
        self.hdurl.as_deref()
    }

    /// `image`, `video` or whatever else the service reports.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn concepts(&self) -> Option<&serde_json::Value> {
        self.concepts.as_ref()
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    pub fn resources(&self) -> Option<&serde_json::Value> {
        self.resources.as_ref()
    }

    pub fn service_version(&self) -> Option<&str> {
        self.service_version.as_deref()
    }

    /// The high resolution URL when there is one, the standard URL otherwise.
    pub fn best_url(&self) -> &str {
        self.hdurl
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or_default()
    }

    /// Only images can be downloaded as media.
    pub fn is_image(&self) -> bool {
        self.media_type == "image"
    }

    /// File extension of [`Apod::best_url`].
    ///
    /// Anything after the last `.` longer than four characters is not a
    /// plausible extension (a video embed, a query string) and yields `jpg`.
    pub fn media_extension(&self) -> &str {
        match self.best_url().rsplit_once('.') {
            Some((_, ext)) if ext.chars().count() <= 4 => ext,
            _ => "jpg",
        }
    }

    /// The date as a calendar value, for ordering.
    pub fn calendar_value(&self) -> NaiveDate {
        self.calendar
    }

    /// Attribute name/value pairs in declaration order, for detail views.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        fn opt(value: Option<&str>) -> String {
            value.unwrap_or("None").to_string()
        }
        fn opt_json(value: Option<&serde_json::Value>) -> String {
            value.map_or_else(|| "None".to_string(), |v| v.to_string())
        }

        vec![
            ("date", self.date.clone()),
            ("title", self.title.clone()),
            ("explanation", self.explanation.clone()),
            ("url", opt(self.url())),
            ("media_type", self.media_type.clone()),
            ("hdurl", opt(self.hdurl())),
            ("concepts", opt_json(self.concepts())),
            ("thumbnail_url", opt(self.thumbnail_url())),
            ("copyright", opt(self.copyright())),
            ("resources", opt_json(self.resources())),
            ("service_version", opt(self.service_version())),
        ]
    }
}

impl fmt::Display for Apod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.date, self.media_type, self.title)
    }
}

#[derive(Tabled)]
pub struct ApodTableRow {
    pub date: String,
    pub media_type: String,
    pub title: String,
}

impl From<&Apod> for ApodTableRow {
    fn from(apod: &Apod) -> Self {
        Self {
            date: apod.date().to_string(),
            media_type: apod.media_type().to_string(),
            title: apod.title().to_string(),
        }
    }
}
