use crate::{
    background,
    config::Config,
    error,
    management::MediaRetriever,
    success,
    types::Apod,
    utils, warning,
};

use super::{open_archive, spinner};

pub async fn save_media(config: &Config, date: String) {
    let Some(apod) = load_archived(config, &date).await else {
        return;
    };

    let retriever = match MediaRetriever::from_config(config) {
        Ok(retriever) => retriever,
        Err(e) => error!("Cannot create media client. Err: {}", e),
    };

    let pb = spinner(&format!("Downloading {}...", apod.best_url()));
    let result = retriever.download(&apod).await;
    pb.finish_and_clear();

    match result {
        Ok(path) => success!("Saved media for {} to {}", apod.date(), path.display()),
        Err(e) => error!("Cannot save media for {}. Err: {}", apod.date(), e),
    }
}

pub async fn set_background(config: &Config, date: String) {
    let Some(apod) = load_archived(config, &date).await else {
        return;
    };

    let retriever = match MediaRetriever::from_config(config) {
        Ok(retriever) => retriever,
        Err(e) => error!("Cannot create media client. Err: {}", e),
    };
    let media_path = retriever.media_path(&apod);
    if !media_path.is_file() {
        warning!(
            "Media for {} does not exist, save using save-media {}",
            apod.date(),
            apod.date()
        );
        return;
    }

    let result = background::for_current_os().and_then(|setter| setter.set_background(&media_path));
    match result {
        Ok(()) => success!("Using {} as background", media_path.display()),
        Err(e) => error!("{}", e),
    }
}

async fn load_archived(config: &Config, date: &str) -> Option<Apod> {
    let date = match utils::resolve_date_arg(date).normalize() {
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
        return None;
    }

    match store.load_for_date(&date).await {
        Ok(apod) => Some(apod),
        Err(e) => error!("Cannot load APOD for {}. Err: {}", date, e),
    }
}
