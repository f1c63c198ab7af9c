use crate::{config::Config, error, success, utils};

use super::{open_archive, spinner};

/// Shows the APOD for `date` (today when `None`), fetching it if not archived.
pub async fn fetch_single(config: &Config, date: Option<String>) {
    let store = open_archive(config);
    let date = date.as_deref().map(utils::resolve_date_arg);

    let pb = spinner("Fetching APOD...");
    let result = store.fetch_or_load_single(date).await;
    pb.finish_and_clear();

    match result {
        Ok(apod) => success!("{}", apod),
        Err(e) => error!("Cannot fetch APOD. Err: {}", e),
    }
}

pub async fn fetch_range(config: &Config, start_date: String, end_date: String) {
    let store = open_archive(config);

    let pb = spinner(&format!("Fetching APODs from {} to {}...", start_date, end_date));
    let result = store
        .fetch_range(
            utils::resolve_date_arg(&start_date),
            utils::resolve_date_arg(&end_date),
        )
        .await;
    pb.finish_and_clear();

    match result {
        Ok(apods) => {
            for apod in &apods {
                println!("{}", apod);
            }
            success!("Stored {} APODs", apods.len());
        }
        Err(e) => error!("Cannot fetch APOD range. Err: {}", e),
    }
}

pub async fn fetch_random(config: &Config, count: u32) {
    let store = open_archive(config);

    let pb = spinner(&format!("Fetching {} random APODs...", count));
    let result = store.fetch_random(count).await;
    pb.finish_and_clear();

    match result {
        Ok(apods) => {
            for apod in &apods {
                println!("{}", apod);
            }
            success!("Stored {} APODs", apods.len());
        }
        Err(e) => error!("Cannot fetch random APODs. Err: {}", e),
    }
}
