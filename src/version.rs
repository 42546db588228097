use crate::error::{ReleaseError, Result};
use semver::Version;

/// Normalize a tag such as `v1.2.3` or ` =1.2.3 ` into a semantic version.
pub fn clean(raw: &str) -> Result<Version> {
    let trimmed = raw
        .trim()
        .trim_start_matches(|c: char| c == 'v' || c == 'V' || c == '=' || c.is_whitespace());

    Version::parse(trimmed).map_err(|e| ReleaseError::InvalidVersion {
        input: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Normalized string form of [`clean`], without any `v` prefix.
pub fn normalize(raw: &str) -> Result<String> {
    clean(raw).map(|v| v.to_string())
}

/// Whether `latest` is strictly newer than `current` under semver precedence.
///
/// Build metadata is ignored, so `1.0.0+a` and `1.0.0+b` are treated as equal.
pub fn is_newer(latest: &str, current: &str) -> Result<bool> {
    let latest = clean(latest)?;
    let current = clean(current)?;
    Ok(latest.cmp_precedence(&current).is_gt())
}
