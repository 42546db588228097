use crate::{
    AppState,
    descriptor::{UpdateDescriptor, build_update_descriptor},
    error::Result,
    platform::Platform,
    resolver::{LatestBuild, resolve_latest_build},
    version,
};
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// `GET /latest/{platform}`
pub async fn latest(
    Path(platform): Path<String>,
    State(state): State<Arc<AppState>>,
) -> std::result::Result<Response, (StatusCode, String)> {
    match latest_build(&state, &platform).await {
        Ok(build) => Ok((
            [(header::CACHE_CONTROL, state.cache.header_value())],
            Json(build),
        )
            .into_response()),
        Err(e) => {
            warn!("Latest build lookup for '{}' failed: {}", platform, e);
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}

/// `GET /update/{target}/{current_version}`
///
/// Answers 204 both when the client is up to date and when anything goes
/// wrong; the updater treats both as "no update".
pub async fn update(
    Path((target, current_version)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Response {
    debug!("Update check from {} at {}", target, current_version);

    match check_update(&state, &current_version).await {
        Ok(Some(descriptor)) => (
            [(header::CACHE_CONTROL, state.cache.header_value())],
            Json(descriptor),
        )
            .into_response(),
        Ok(None) => {
            debug!("{} at {} is up to date", target, current_version);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) if e.is_upstream() => {
            warn!("Release provider unavailable for {}: {}", target, e);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            warn!("Update check for {} at {} failed: {}", target, current_version, e);
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

pub async fn latest_build(state: &AppState, platform: &str) -> Result<LatestBuild> {
    let platform: Platform = platform.parse()?;
    let release = state.source.latest_release(&state.repo).await?;
    resolve_latest_build(&release, platform)
}

/// `None` when `current_version` is already at or past the latest release.
pub async fn check_update(
    state: &AppState,
    current_version: &str,
) -> Result<Option<UpdateDescriptor>> {
    let release = state.source.latest_release(&state.repo).await?;

    if !version::is_newer(&release.tag_name, current_version)? {
        return Ok(None);
    }

    build_update_descriptor(&release, state.fetcher.as_ref())
        .await
        .map(Some)
}
