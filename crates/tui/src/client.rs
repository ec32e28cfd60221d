//! Fatwa API client module
//!
//! Minimal wrapper around reqwest. Every call goes through [`FatwaClient`],
//! which turns any non-success status into a typed error carrying the
//! method, URL, and status code. No retry and no timeout; failures
//! propagate to the caller unrecovered.

use fatwa_common::error::{ClientError, Error, Result};
use fatwa_common::models::TopicsResponse;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

/// Thin HTTP client for the fatwa API.
#[derive(Debug, Clone)]
pub struct FatwaClient {
    http: reqwest::Client,
    base_url: String,
}

impl FatwaClient {
    /// Create a new client for the given server base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET a JSON endpoint with the given query pairs.
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Client(ClientError::from(e)))?;

        Self::decode("GET", &url, response).await
    }

    /// POST a JSON body and parse the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "POST");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Client(ClientError::from(e)))?;

        Self::decode("POST", &url, response).await
    }

    async fn decode<T>(method: &str, url: &str, response: reqwest::Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Client(ClientError::Http {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        response.json::<T>().await.map_err(|e| {
            Error::Client(ClientError::ParseError {
                endpoint: url.to_string(),
                source: Box::new(e),
            })
        })
    }
}

/// Probe the server by fetching the topic list.
#[instrument(fields(server_url = %server_url))]
pub async fn test_connection(server_url: &str) -> Result<TopicsResponse> {
    let client = FatwaClient::new(server_url);
    client.get_json("/api/topics", &[]).await
}
