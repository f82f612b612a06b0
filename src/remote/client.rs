//! HTTP client for the remote `/shoes` resource.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::CatalogRemote;
use crate::config::{check_base_url, Config};
use crate::errors::{ConfigError, TransportError};
use crate::models::{ShoeInput, ShoeRecord};

/// Header carrying the optional pre-shared API key.
pub const API_KEY_HEADER: &str = "x-api-key";

const COLLECTION: &str = "shoes";

/// Thin REST client. No retries and no timeout beyond the transport default.
#[derive(Debug, Clone)]
pub struct RemoteCatalogClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RemoteCatalogClient {
    /// Build a client from configuration, attaching the API key header when one is set.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| ConfigError::InvalidApiKey)?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ConfigError::HttpClient)?;

        Self::with_client(client, config.base_url.clone())
    }

    /// Use a caller-built `reqwest::Client`. `base_url` must be an http(s) URL that can
    /// carry a path.
    pub fn with_client(client: reqwest::Client, base_url: Url) -> Result<Self, ConfigError> {
        check_base_url(&base_url)?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/shoes` or `{base}/shoes/{id}`, with the id percent-encoded as one segment.
    fn endpoint(&self, id: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // Never fails: `check_base_url` rejected cannot-be-a-base URLs at construction.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(COLLECTION);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        url
    }
}

/// Turn a non-2xx response into `TransportError::Status`, keeping the body for diagnostics.
async fn check_status(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl CatalogRemote for RemoteCatalogClient {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_all(&self) -> Result<Vec<ShoeRecord>, TransportError> {
        let url = self.endpoint(None);
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        decode(check_status(response).await?).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_one(&self, id: &str) -> Result<Option<ShoeRecord>, TransportError> {
        let url = self.endpoint(Some(id));
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(check_status(response).await?).await.map(Some)
    }

    #[instrument(skip(self, input), fields(base_url = %self.base_url))]
    async fn create(&self, input: &ShoeInput) -> Result<ShoeRecord, TransportError> {
        let url = self.endpoint(None);
        tracing::debug!("POST {}", url);

        let response = self.client.post(url).json(input).send().await?;
        let record: ShoeRecord = decode(check_status(response).await?).await?;
        if record.id.trim().is_empty() {
            return Err(TransportError::Malformed(
                "created record has no id".to_string(),
            ));
        }
        Ok(record)
    }

    #[instrument(skip(self, input), fields(base_url = %self.base_url))]
    async fn update(&self, id: &str, input: &ShoeInput) -> Result<(), TransportError> {
        let url = self.endpoint(Some(id));
        tracing::debug!("PUT {}", url);

        let response = self.client.put(url).json(input).send().await?;
        // The echoed record is not needed: the submitted fields are what gets applied.
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn delete(&self, id: &str) -> Result<(), TransportError> {
        let url = self.endpoint(Some(id));
        tracing::debug!("DELETE {}", url);

        let response = self.client.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
