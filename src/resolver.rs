use crate::{
    error::{ReleaseError, Result},
    platform::Platform,
    provider::Release,
    version,
};
use serde::Serialize;

/// Download entry point for the newest build of one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestBuild {
    pub version: String,
    pub url: String,
    pub name: String,
}

/// Pick the first asset of `release` matching the installer suffix of `platform`.
pub fn resolve_latest_build(release: &Release, platform: Platform) -> Result<LatestBuild> {
    let version = version::normalize(&release.tag_name)?;

    let asset = release
        .find_asset(platform.suffix())
        .ok_or(ReleaseError::NotFound { platform })?;

    Ok(LatestBuild {
        version,
        url: asset.url.clone(),
        name: asset.name.clone(),
    })
}
