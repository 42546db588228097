use anyhow::Result;
use clap::Parser;
use credo_updates::{
    AppState,
    cache::CachePolicy,
    config::{self, RepoPath},
    provider::github::GitHub,
    router,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "credo-updates")]
#[command(about = "HTTP server resolving desktop builds and updater manifests from GitHub releases", version, long_about = None)]
struct Args {
    /// Repository whose latest release is served
    #[arg(long, default_value_t = format!("{}/{}", config::OWNER, config::REPO), value_name = "OWNER/REPO")]
    repo: String,

    /// GitHub API URL
    #[arg(long = "api-url", default_value = config::DEFAULT_API_URL, value_name = "URL")]
    api_url: String,

    /// Shared-cache lifetime (and stale-while-revalidate window) in minutes
    #[arg(short = 'e', long, default_value = "15")]
    cache_minutes: i64,

    /// Server port
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Server host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let repo = RepoPath::parse(&args.repo)?;
    let api_url = url::Url::parse(&args.api_url)?;
    if args.cache_minutes < 0 {
        anyhow::bail!("Cache lifetime must not be negative: {}", args.cache_minutes);
    }

    let client = reqwest::Client::builder()
        .user_agent(config::USER_AGENT)
        .build()?;

    let state = Arc::new(AppState {
        source: Arc::new(GitHub::new(client.clone(), Some(api_url.to_string()))),
        fetcher: Arc::new(client),
        repo,
        cache: CachePolicy::new(args.cache_minutes),
    });

    let app = router(state.clone());

    let addr = format!("{}:{}", args.host, args.port);
    info!("Server listening on http://{}", addr);
    info!("Serving releases of {} via {}", state.repo, api_url);
    info!("Cache-Control: {}", state.cache.header_value());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["credo-updates"]).unwrap();
        assert_eq!(args.repo, "ihsanvp/credo");
        assert_eq!(args.api_url, "https://api.github.com");
        assert_eq!(args.cache_minutes, 15);
        assert_eq!(args.port, 3000);
        assert_eq!(args.host, "127.0.0.1");
    }

    #[test]
    fn test_override_args() {
        let args = Args::try_parse_from([
            "credo-updates",
            "--repo",
            "acme/app",
            "--api-url",
            "http://localhost:8080",
            "-e",
            "5",
            "-p",
            "8000",
        ])
        .unwrap();
        assert_eq!(args.repo, "acme/app");
        assert_eq!(args.api_url, "http://localhost:8080");
        assert_eq!(args.cache_minutes, 5);
        assert_eq!(args.port, 8000);
    }
}
