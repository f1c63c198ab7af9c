use futures::StreamExt;
use tabled::Table;

use crate::{
    config::Config,
    error, info,
    types::{Apod, ApodTableRow},
    utils, warning,
};

use super::open_archive;

/// Prints every archived APOD as a table, oldest first.
pub async fn list(config: &Config) {
    let store = open_archive(config);

    let mut stream = match store.list_all().await {
        Ok(stream) => stream,
        Err(e) => error!("Cannot read archive. Err: {}", e),
    };

    let mut apods: Vec<Apod> = Vec::new();
    while let Some(result) = stream.next().await {
        match result {
            Ok(apod) => apods.push(apod),
            Err(e) => warning!("Skipping unreadable APOD. Err: {}", e),
        }
    }

    if apods.is_empty() {
        info!("No APODs archived yet, fetch one using fetch today");
        return;
    }

    utils::sort_by_calendar(&mut apods);
    let rows: Vec<ApodTableRow> = apods.iter().map(ApodTableRow::from).collect();
    println!("{}", Table::new(rows));
}
