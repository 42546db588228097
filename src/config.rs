use anyhow::Result;
use regex::Regex;
use std::{env, fmt};

pub const OWNER: &str = "ihsanvp";
pub const REPO: &str = "credo";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";
pub const USER_AGENT: &str = concat!("credo-updates/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoPath {
    pub owner: String,
    pub repo: String,
}

impl RepoPath {
    pub fn parse(path: &str) -> Result<Self> {
        let re = Regex::new(r"^([^/\s]+)/([^/\s]+)$")?;

        if let Some(caps) = re.captures(path) {
            Ok(RepoPath {
                owner: caps[1].to_string(),
                repo: caps[2].to_string(),
            })
        } else {
            anyhow::bail!("Invalid repository path: {}", path)
        }
    }
}

impl Default for RepoPath {
    fn default() -> Self {
        RepoPath {
            owner: OWNER.to_string(),
            repo: REPO.to_string(),
        }
    }
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Bearer token for the release provider, read fresh on every call.
pub fn auth_token() -> Option<String> {
    env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty())
}
