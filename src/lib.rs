//! APOD Archive CLI Library
//!
//! This library keeps a personal archive of NASA's Astronomy Picture of the
//! Day. It fetches APOD records for single dates, date ranges or random
//! samples, stores them as local JSON files addressed by date, downloads the
//! associated images and can apply one as the desktop background.
//!
//! # Modules
//!
//! - `background` - Per-OS desktop background setters
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading and validation
//! - `management` - The local archive: paths, record store, media downloads
//! - `nasa` - APOD API client
//! - `types` - The validated APOD record and its raw payload
//! - `utils` - Date parsing and formatting helpers
//!
//! # Example
//!
//! ```
//! use apodctl::{config::Config, management::{ArchivePaths, ArchiveStore}, nasa::ApodClient};
//!
//! #[tokio::main]
//! async fn main() -> apodctl::Res<()> {
//!     let config = Config::load().await?;
//!     let store = ArchiveStore::new(ArchivePaths::from_config(&config), ApodClient::from_config(&config)?);
//!     let apod = store.fetch_or_load_single(None).await?;
//!     println!("{}", apod);
//!     Ok(())
//! }
//! ```

pub mod background;
pub mod cli;
pub mod config;
pub mod management;
pub mod nasa;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the command-line glue where the concrete error type does not
/// matter; the library modules return their own typed errors.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching APOD for {}", date);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Saved media for {} to {}", date, path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("APOD for {} does not exist, fetch using fetch {}", date, date);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
