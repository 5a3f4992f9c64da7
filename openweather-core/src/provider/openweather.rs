use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::{
    config::ClientConfig,
    decode::decode,
    error::{ApiError, Result},
    model::{CurrentConditions, Forecast},
    request::{Endpoint, build_url, redact},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    config: ClientConfig,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| ApiError::Network {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self { config, http })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        build_url(
            &self.config.base_url,
            endpoint.path(),
            &self.config.app_id,
            self.config.coordinates,
        )
    }

    /// GET the endpoint and return the raw body of a 200 response.
    pub async fn fetch(&self, endpoint: Endpoint) -> Result<Vec<u8>> {
        let url = self.endpoint_url(endpoint)?;
        let shown = redact(&url);
        debug!("GET {endpoint}: {shown}");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| ApiError::Network {
                url: shown.clone(),
                source: source.without_url(),
            })?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = match res.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!("could not read {status} body from {shown}: {}", e.without_url());
                    String::new()
                }
            };
            return Err(ApiError::UnexpectedStatus {
                url: shown,
                status,
                body: truncate_body(&body),
            });
        }

        let body = res.bytes().await.map_err(|source| ApiError::Read {
            url: shown.clone(),
            source: source.without_url(),
        })?;
        debug!("read {} bytes from {shown}", body.len());

        Ok(body.to_vec())
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T> {
        let body = self.fetch(endpoint).await?;
        decode(&body)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(&self) -> Result<CurrentConditions> {
        let cur: CurrentConditions = self.get(Endpoint::Current).await?;
        info!(
            "current conditions for {} ({}) at {:?}",
            cur.name,
            cur.coord,
            cur.observed_at()
        );
        Ok(cur)
    }

    async fn forecast(&self) -> Result<Forecast> {
        let fc: Forecast = self.get(Endpoint::Forecast).await?;
        info!("forecast for {} with {} items", fc.city.name, fc.len());
        Ok(fc)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
