//! # CLI Module
//!
//! This module provides the command-line interface layer for apodctl. Every
//! command receives the already loaded [`Config`], builds the archive
//! components it needs from it and reports the outcome through the crate's
//! output macros (`info!`, `success!`, `warning!`, `error!`).
//!
//! ## Commands
//!
//! ### Fetching
//!
//! - [`fetch_single`] - Serves one date from the archive, fetching it only if absent
//! - [`fetch_range`] - Fetches and stores every APOD between two dates
//! - [`fetch_random`] - Fetches and stores `count` random APODs
//!
//! ### Browsing
//!
//! - [`list`] - Table of every archived APOD, oldest first
//! - [`details`] - All attributes of one archived APOD
//!
//! ### Media
//!
//! - [`save_media`] - Downloads the image of an archived APOD
//! - [`set_background`] - Uses a downloaded image as desktop background
//!
//! ### Setup
//!
//! - [`make_configuration`] - Writes a default configuration file
//!
//! ## Usage
//!
//! ```bash
//! apodctl make-configuration        # then fill in api_key
//! apodctl fetch today
//! apodctl save-media today
//! apodctl set-bg today
//! apodctl fetch-range 2024-01-01 2024-01-31
//! apodctl list
//! ```
//!
//! Date arguments accept `YYYY-MM-DD` or the literal `today`.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Config,
    error,
    management::{ArchivePaths, ArchiveStore},
    nasa::ApodClient,
};

mod configure;
mod details;
mod fetch;
mod list;
mod media;

pub use configure::make_configuration;
pub use details::details;
pub use fetch::fetch_random;
pub use fetch::fetch_range;
pub use fetch::fetch_single;
pub use list::list;
pub use media::save_media;
pub use media::set_background;

fn open_archive(config: &Config) -> ArchiveStore<ApodClient> {
    let client = match ApodClient::from_config(config) {
        Ok(client) => client,
        Err(e) => error!("Cannot create APOD client. Err: {}", e),
    };
    ArchiveStore::new(ArchivePaths::from_config(config), client)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
