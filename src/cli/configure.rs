use crate::{config, error, info, success};

pub async fn make_configuration() {
    let path = config::config_path();
    if path.exists() {
        info!("Overwriting existing configuration at {}", path.display());
    }

    match config::generate_default(&path).await {
        Ok(path) => {
            success!("Wrote default configuration to {}", path.display());
            info!("Set api_key before fetching, see https://api.nasa.gov");
        }
        Err(e) => error!("Cannot write configuration. Err: {}", e),
    }
}
