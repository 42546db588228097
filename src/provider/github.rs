use super::{Asset, Release, ReleaseSource};
use crate::{
    config::{self, RepoPath},
    error::{ReleaseError, Result, response_snippet},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, header};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GitHubRelease {
    tag_name: String,
    body: Option<String>,
    published_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    #[serde(default)]
    assets: Vec<GitHubAsset>,
}

#[derive(Debug, Deserialize)]
struct GitHubAsset {
    name: String,
    browser_download_url: String,
}

impl From<GitHubRelease> for Release {
    fn from(r: GitHubRelease) -> Self {
        Release {
            tag_name: r.tag_name,
            body: r.body,
            published_at: r.published_at.unwrap_or(r.created_at),
            assets: r
                .assets
                .into_iter()
                .map(|a| Asset {
                    name: a.name,
                    url: a.browser_download_url,
                })
                .collect(),
        }
    }
}

pub struct GitHub {
    pub client: Client,
    pub api_url: String,
}

impl GitHub {
    pub fn new(client: Client, api_url: Option<String>) -> Self {
        let api_url = api_url
            .unwrap_or_else(|| config::DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self { client, api_url }
    }
}

#[async_trait]
impl ReleaseSource for GitHub {
    #[tracing::instrument(skip(self))]
    async fn latest_release(&self, repo: &RepoPath) -> Result<Release> {
        fetch_latest_release(
            &self.client,
            &self.api_url,
            repo,
            config::auth_token().as_deref(),
        )
        .await
    }
}

/// Single attempt against `GET /repos/{owner}/{repo}/releases/latest`.
pub async fn fetch_latest_release(
    client: &Client,
    api_url: &str,
    repo: &RepoPath,
    token: Option<&str>,
) -> Result<Release> {
    let url = format!(
        "{}/repos/{}/{}/releases/latest",
        api_url, repo.owner, repo.repo
    );

    debug!("Fetching latest release from {}...", url);

    let mut request = client
        .get(&url)
        .header(header::ACCEPT, "application/vnd.github+json")
        .header(header::USER_AGENT, config::USER_AGENT);
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(ReleaseError::Request)?;

    if !response.status().is_success() {
        let status = response.status();
        let body_snippet = response
            .text()
            .await
            .ok()
            .map(|body| response_snippet(&body, 160))
            .unwrap_or_default();
        return Err(ReleaseError::UpstreamStatus {
            status,
            body_snippet,
        });
    }

    let release: GitHubRelease = response.json().await.map_err(ReleaseError::Decode)?;

    debug!(
        "Latest release of {} is {} with {} assets",
        repo,
        release.tag_name,
        release.assets.len()
    );

    Ok(release.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELEASE_JSON: &str = r#"{
        "tag_name": "v2.0.0",
        "body": "Bug fixes",
        "published_at": "2024-03-01T12:30:00Z",
        "created_at": "2024-03-01T12:00:00Z",
        "html_url": "https://github.com/ihsanvp/credo/releases/tag/v2.0.0",
        "assets": [
            {"name": "Credo_2.0.0_x64_en-US.msi", "browser_download_url": "https://dl/msi", "size": 10},
            {"name": "Credo_2.0.0_x64.dmg", "browser_download_url": "https://dl/dmg", "size": 20}
        ]
    }"#;

    fn repo() -> RepoPath {
        RepoPath::default()
    }

    #[tokio::test]
    async fn test_fetch_latest_release_success() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/ihsanvp/credo/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(RELEASE_JSON)
            .create_async()
            .await;

        let release = fetch_latest_release(&Client::new(), &url, &repo(), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(release.tag_name, "v2.0.0");
        assert_eq!(release.body.as_deref(), Some("Bug fixes"));
        assert_eq!(release.published_at.to_rfc3339(), "2024-03-01T12:30:00+00:00");
        assert_eq!(release.assets.len(), 2);
        assert_eq!(release.assets[0].name, "Credo_2.0.0_x64_en-US.msi");
        assert_eq!(release.assets[0].url, "https://dl/msi");
    }

    #[tokio::test]
    async fn test_fetch_latest_release_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/ihsanvp/credo/releases/latest")
            .match_header("authorization", "Bearer secret-token")
            .with_status(200)
            .with_body(RELEASE_JSON)
            .create_async()
            .await;

        let release =
            fetch_latest_release(&Client::new(), &url, &repo(), Some("secret-token")).await;

        mock.assert_async().await;
        assert!(release.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_latest_release_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/ihsanvp/credo/releases/latest")
            .with_status(403)
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .expect(1)
            .create_async()
            .await;

        let err = fetch_latest_release(&Client::new(), &url, &repo(), None)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(err.is_upstream());
        assert!(err.to_string().contains("403"));
        assert!(err.to_string().contains("rate limit"));
    }

    #[tokio::test]
    async fn test_fetch_latest_release_no_release() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/repos/ihsanvp/credo/releases/latest")
            .with_status(404)
            .create_async()
            .await;

        let err = fetch_latest_release(&Client::new(), &url, &repo(), None)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, ReleaseError::UpstreamStatus { .. }));
    }

    #[tokio::test]
    async fn test_fetch_latest_release_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let _mock = server
            .mock("GET", "/repos/ihsanvp/credo/releases/latest")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = fetch_latest_release(&Client::new(), &url, &repo(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, ReleaseError::Decode(_)));
    }

    #[test]
    fn test_unpublished_release_falls_back_to_created_at() {
        let raw: GitHubRelease = serde_json::from_str(
            r#"{"tag_name": "v1.0.0", "body": null, "published_at": null,
                "created_at": "2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let release = Release::from(raw);
        assert_eq!(release.published_at.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(release.assets.is_empty());
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let gh = GitHub::new(Client::new(), Some("http://localhost:1234/".to_string()));
        assert_eq!(gh.api_url, "http://localhost:1234");
        let gh = GitHub::new(Client::new(), None);
        assert_eq!(gh.api_url, "https://api.github.com");
    }
}
