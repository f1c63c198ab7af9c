use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    types::{Apod, ApodPayload},
    utils::{self, DateArg},
};

use super::{ApodSource, FetchError, check_random_count};

/// HTTP client for the APOD endpoint.
#[derive(Debug, Clone)]
pub struct ApodClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ApodClient {
    /// Builds a client for the endpoint, key and timeout in `config`.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: config.api_endpoint().to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    /// The URL every request is sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get<T: DeserializeOwned>(&self, params: &[(&str, String)]) -> Result<T, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?
            .error_for_status()?;

        // read as text first so a bad body surfaces as a parse error, not a transport one
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_batch(&self, params: &[(&str, String)]) -> Result<Vec<Apod>, FetchError> {
        let payloads: Vec<ApodPayload> = self.get(params).await?;
        payloads
            .into_iter()
            .map(|payload| Apod::try_from(payload).map_err(FetchError::from))
            .collect()
    }
}

impl ApodSource for ApodClient {
    async fn fetch_one(&self, date: Option<DateArg>) -> Result<Apod, FetchError> {
        let date = date
            .unwrap_or_else(|| DateArg::Calendar(utils::today()))
            .normalize()?;

        let payload: ApodPayload = self.get(&[("date", date)]).await?;
        Ok(Apod::try_from(payload)?)
    }

    async fn fetch_range(&self, start: DateArg, end: DateArg) -> Result<Vec<Apod>, FetchError> {
        let start_date = start.normalize()?;
        let end_date = end.normalize()?;

        self.get_batch(&[("start_date", start_date), ("end_date", end_date)])
            .await
    }

    async fn fetch_random(&self, count: u32) -> Result<Vec<Apod>, FetchError> {
        check_random_count(count)?;

        self.get_batch(&[("count", count.to_string())]).await
    }
}
