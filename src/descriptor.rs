use crate::{
    error::Result,
    platform::Target,
    provider::{Asset, Release, TextFetcher},
    version,
};
use chrono::SecondsFormat;
use futures_util::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Download location and detached signature for one `os-arch` target.
/// Both fields are empty when the release has no bundle for the target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformEntry {
    pub url: String,
    pub signature: String,
}

/// Update manifest consumed by the desktop updater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateDescriptor {
    pub version: String,
    pub notes: String,
    pub pub_date: String,
    pub platforms: BTreeMap<String, PlatformEntry>,
}

/// Build the descriptor for every known target.
///
/// Targets without a bundle come back with empty fields, and a signature that
/// cannot be downloaded degrades to an empty signature. Only an unparseable
/// release tag fails the build.
pub async fn build_update_descriptor(
    release: &Release,
    fetcher: &dyn TextFetcher,
) -> Result<UpdateDescriptor> {
    let version = version::normalize(&release.tag_name)?;

    let entries = join_all(
        Target::ALL
            .into_iter()
            .map(|target| resolve_target(release, target, fetcher)),
    )
    .await;

    let platforms = entries
        .into_iter()
        .map(|(target, entry)| (target.key().to_string(), entry))
        .collect();

    Ok(UpdateDescriptor {
        version,
        notes: release.body.clone().unwrap_or_default(),
        pub_date: release
            .published_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        platforms,
    })
}

fn find_bundle<'a>(release: &'a Release, target: Target) -> Option<&'a Asset> {
    release
        .assets
        .iter()
        .find(|a| a.name.contains(target.suffix()) && !a.name.ends_with(".sig"))
}

/// Signature published next to `bundle`, preferring `<bundle name>.sig`.
fn find_signature<'a>(
    release: &'a Release,
    bundle: &Asset,
    target: Target,
) -> Option<&'a Asset> {
    let sibling = format!("{}.sig", bundle.name);
    release
        .assets
        .iter()
        .find(|a| a.name == sibling)
        .or_else(|| release.find_asset(&target.signature_suffix()))
}

async fn resolve_target(
    release: &Release,
    target: Target,
    fetcher: &dyn TextFetcher,
) -> (Target, PlatformEntry) {
    let Some(bundle) = find_bundle(release, target) else {
        debug!("No bundle for {} in {}", target, release.tag_name);
        return (target, PlatformEntry::default());
    };

    let signature = match find_signature(release, bundle, target) {
        Some(sig) => match fetcher.fetch_text(&sig.url).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Signature for {} unavailable: {}", target, e);
                String::new()
            }
        },
        None => String::new(),
    };

    (
        target,
        PlatformEntry {
            url: bundle.url.clone(),
            signature,
        },
    )
}
