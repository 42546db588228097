use super::TextFetcher;
use crate::{
    config,
    error::{ReleaseError, Result},
};
use async_trait::async_trait;
use reqwest::{Client, header};
use tracing::debug;

#[async_trait]
impl TextFetcher for Client {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching text from {}...", url);

        let failed = |reason: String| ReleaseError::SignatureFetch {
            url: url.to_string(),
            reason,
        };

        let response = self
            .get(url)
            .header(header::USER_AGENT, config::USER_AGENT)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| failed(e.to_string()))?;

        response.text().await.map_err(|e| failed(e.to_string()))
    }
}
