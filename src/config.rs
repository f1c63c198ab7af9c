//! Configuration management for the APOD archive.
//!
//! This module loads the archive configuration: the NASA API key, the root
//! directory for metadata records and the root directory for downloaded media.
//! The configuration is loaded once by the binary and handed by reference to
//! every component that needs it; nothing in the crate reads it from ambient
//! state afterwards.
//!
//! Values are resolved in this order:
//! 1. Environment variables (`APOD_API_KEY`), optionally loaded from a `.env`
//!    file in the local data directory
//! 2. The JSON configuration file (`apod-manager.cfg.json`)
//! 3. Application defaults for the optional keys

use std::{
    env, fmt, io,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

pub const API_KEY: &str = "api_key";
pub const APODS_PATH: &str = "apods_path";
pub const APODS_MEDIA_PATH: &str = "apods_media_path";

pub const DEFAULT_API_ENDPOINT: &str = "https://api.nasa.gov/planetary/apod";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const CONFIGURATION_FILE_NAME: &str = "apod-manager.cfg.json";

const ENV_API_KEY: &str = "APOD_API_KEY";
const ENV_CONFIG_PATH: &str = "APOD_CONFIG";

#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    MissingKey(&'static str),
    BlankApiKey,
    IoError(io::Error),
    SerdeError(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(path) => write!(
                f,
                "configuration file {} does not exist, create it with make-configuration",
                path.display()
            ),
            ConfigError::MissingKey(key) => {
                write!(f, "{} is a required key in the configuration file", key)
            }
            ConfigError::BlankApiKey => write!(f, "API key must not be blank"),
            ConfigError::IoError(e) => write!(f, "cannot access configuration: {}", e),
            ConfigError::SerdeError(e) => write!(f, "malformed configuration file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::SerdeError(err)
    }
}

/// On-disk shape of the configuration file. Every key is optional here so a
/// missing one can be reported by name.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    api_key: Option<String>,
    apods_path: Option<PathBuf>,
    apods_media_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

/// Validated archive configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_key: String,
    apods_path: PathBuf,
    apods_media_path: PathBuf,
    api_endpoint: String,
    timeout: Duration,
}

impl Config {
    /// Creates a configuration with the default endpoint and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlankApiKey`] if `api_key` is empty or whitespace.
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::new("DEMO_KEY", "/data/apods", "/data/images")?
    ///     .with_timeout(Duration::from_secs(5));
    /// ```
    pub fn new(
        api_key: impl Into<String>,
        apods_path: impl Into<PathBuf>,
        apods_media_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::BlankApiKey);
        }

        Ok(Self {
            api_key,
            apods_path: apods_path.into(),
            apods_media_path: apods_media_path.into(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Points the client at another APOD endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads and validates the configuration file at `path`.
    ///
    /// `APOD_API_KEY`, when set, takes precedence over the file's key.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NotFound`] if the file does not exist
    /// - [`ConfigError::MissingKey`] if a required key is absent
    /// - [`ConfigError::BlankApiKey`] if the resolved key is blank
    pub async fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = match async_fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(ConfigError::IoError(e)),
        };

        let api_key_override = env::var(ENV_API_KEY)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self::from_json(&content, api_key_override)
    }

    /// Builds a configuration from the JSON document `content`.
    ///
    /// `api_key_override` replaces the document's `api_key`, but the document
    /// must still carry the key: an override never stands in for a missing one.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::SerdeError`] if `content` is not a configuration document
    /// - [`ConfigError::MissingKey`] if a required key is absent
    /// - [`ConfigError::BlankApiKey`] if the resolved key is blank
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::from_json(
    ///     r#"{"api_key": "", "apods_path": "a", "apods_media_path": "b"}"#,
    ///     Some("from-env".to_string()),
    /// )?;
    /// assert_eq!(config.api_key(), "from-env");
    /// ```
    pub fn from_json(content: &str, api_key_override: Option<String>) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(content)?;
        let file_key = file.api_key.ok_or(ConfigError::MissingKey(API_KEY))?;
        let api_key = api_key_override.unwrap_or(file_key);
        let apods_path = file.apods_path.ok_or(ConfigError::MissingKey(APODS_PATH))?;
        let apods_media_path = file
            .apods_media_path
            .ok_or(ConfigError::MissingKey(APODS_MEDIA_PATH))?;

        let mut config = Self::new(api_key, apods_path, apods_media_path)?;
        if let Some(endpoint) = file.api_endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(secs) = file.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    /// Loads from `APOD_CONFIG` if set, otherwise from [`default_config_path`].
    pub async fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_path()).await
    }

    /// Creates both archive roots if they do not exist yet.
    pub async fn prepare(&self) -> Result<(), ConfigError> {
        async_fs::create_dir_all(&self.apods_path).await?;
        async_fs::create_dir_all(&self.apods_media_path).await?;
        Ok(())
    }

    /// The NASA API key sent with every request.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Root directory for metadata records.
    pub fn apods_path(&self) -> &Path {
        &self.apods_path
    }

    /// Root directory for downloaded media.
    pub fn apods_media_path(&self) -> &Path {
        &self.apods_media_path
    }

    /// Defaults to [`DEFAULT_API_ENDPOINT`].
    pub fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is optional: a missing `.env` is not an error, a malformed one is.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/apodctl/.env`
/// - macOS: `~/Library/Application Support/apodctl/.env`
/// - Windows: `%LOCALAPPDATA%/apodctl/.env`
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("apodctl/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Default archive root: `~/apods`, or `~/Pictures/apods` on Windows.
pub fn default_apods_path() -> PathBuf {
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    if cfg!(windows) {
        path.push("Pictures");
    }
    path.push("apods");
    path
}

pub fn default_apods_media_path() -> PathBuf {
    default_apods_path().join("images")
}

pub fn default_config_path() -> PathBuf {
    default_apods_path().join(CONFIGURATION_FILE_NAME)
}

/// The configuration file in effect: `APOD_CONFIG` or the default location.
pub fn config_path() -> PathBuf {
    env::var_os(ENV_CONFIG_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Writes a default configuration document to `path` and returns the path.
///
/// The API key is left blank; loading fails until the user fills it in.
pub async fn generate_default(path: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    let defaults = ConfigFile {
        api_key: Some(String::new()),
        apods_path: Some(default_apods_path()),
        apods_media_path: Some(default_apods_media_path()),
        api_endpoint: None,
        timeout_secs: None,
    };
    let json = serde_json::to_string_pretty(&defaults)?;
    async_fs::write(path, json).await?;
    Ok(path.to_path_buf())
}
