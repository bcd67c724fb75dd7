use crate::domain::ports::PopularityOracle;
use crate::utils::error::{DepsyncError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_DOWNLOADS_ENDPOINT: &str = "https://api.npmjs.org/downloads/point/last-month";

#[derive(Debug, Deserialize)]
struct DownloadsResponse {
    downloads: u64,
}

/// Queries the npm download statistics API.
pub struct NpmDownloadsOracle {
    client: Client,
    endpoint: String,
}

impl NpmDownloadsOracle {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl PopularityOracle for NpmDownloadsOracle {
    async fn downloads(&self, name: &str) -> Result<u64> {
        let url = self.url_for(name);
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(&url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(DepsyncError::OracleError {
                name: name.to_string(),
                message: format!("unexpected status {}", response.status()),
            });
        }

        let body: DownloadsResponse = response.json().await?;
        Ok(body.downloads)
    }
}
