use colored::Colorize;

use crate::{config::Config, error, utils, warning};

use super::open_archive;

pub async fn details(config: &Config, date: String) {
    let date = match utils::resolve_date_arg(&date).normalize() {
        Ok(date) => date,
        Err(e) => error!("{}", e),
    };

    let store = open_archive(config);
    if !store.exists_for_date(&date).await {
        warning!(
            "APOD for {} does not exist, fetch using fetch {}",
            date,
            date
        );
        return;
    }

    match store.load_for_date(&date).await {
        Ok(apod) => {
            for (name, value) in apod.attributes() {
                println!("{}: {}", name.bold(), value);
            }
        }
        Err(e) => error!("Cannot load APOD for {}. Err: {}", date, e),
    }
}
