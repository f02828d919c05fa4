// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target-version and package-URI resolution (`spec.md` §4.4, C4).

use extlife_core::{ExtensionError, ExtensionSetting, VersionOrder};

/// Resolves the version this extension should end up at, per the
/// auto-upgrade rule: if `upgradePolicy` isn't `auto`, the target is exactly
/// `setting.version`. Otherwise the target is the highest version under
/// `versionUris` sharing `setting.version`'s major series, ranked by
/// `order`.
pub fn resolve_target_version(
    setting: &ExtensionSetting,
    order: &dyn VersionOrder,
) -> Result<String, ExtensionError> {
    if !setting.auto_upgrade() {
        return Ok(setting.version.clone());
    }

    let major = setting.major_series();
    let prefix = format!("{major}.");
    let mut candidates: Vec<&str> = setting
        .version_uris
        .iter()
        .map(|v| v.version.as_str())
        .filter(|v| v.starts_with(&prefix))
        .collect();

    if candidates.is_empty() {
        return Err(ExtensionError::NoMatchingVersion { major: major.to_string() });
    }

    candidates.sort_by(|a, b| order.compare(a, b));
    Ok(candidates.last().copied().unwrap_or_default().to_string())
}

/// Finds the unique `versionUris` entry for `version` and yields its `uris`
/// list in order. Fails with `NoPackageUris` if no entry matches.
pub fn resolve_package_uris<'a>(
    setting: &'a ExtensionSetting,
    version: &str,
) -> Result<&'a [String], ExtensionError> {
    setting
        .uris_for(version)
        .ok_or_else(|| ExtensionError::NoPackageUris(version.to_string()))
}

#[cfg(test)]
mod version_tests;
