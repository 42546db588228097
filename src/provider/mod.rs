pub mod github;
pub mod http;

use crate::{config::RepoPath, error::Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub tag_name: String,
    pub body: Option<String>,
    pub published_at: DateTime<Utc>,
    pub assets: Vec<Asset>,
}

impl Release {
    /// First asset, in listing order, whose name contains `suffix`.
    pub fn find_asset(&self, suffix: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name.contains(suffix))
    }
}

/// Source of the most recent published release of a project.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    async fn latest_release(&self, repo: &RepoPath) -> Result<Release>;
}

/// Plain GET of a text document, used for detached signature files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String>;
}
