// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The extension setting delivered by the control plane (`spec.md` §3).

use serde::{Deserialize, Serialize};

/// The handler's goal state, as requested by the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalState {
    Enabled,
    Disabled,
    Uninstall,
}

impl std::str::FromStr for GoalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "enabled" => Ok(GoalState::Enabled),
            "disabled" => Ok(GoalState::Disabled),
            "uninstall" => Ok(GoalState::Uninstall),
            other => Err(other.to_string()),
        }
    }
}

/// One `{version, uris}` entry from the setting's `versionUris` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionUri {
    pub version: String,
    pub uris: Vec<String>,
}

/// Immutable, control-plane-supplied instruction for one extension
/// (`spec.md` §3 "Extension Setting").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionSetting {
    pub name: String,
    pub version: String,
    #[serde(rename = "seqNo")]
    pub seq_no: u64,
    pub state: GoalState,
    #[serde(rename = "upgradePolicy", default)]
    pub upgrade_policy: Option<String>,
    #[serde(rename = "versionUris", default)]
    pub version_uris: Vec<VersionUri>,
    #[serde(default)]
    pub settings: serde_json::Value,
}

impl ExtensionSetting {
    /// `true` iff `upgradePolicy` is present and case-insensitively equal to
    /// `"auto"` (`spec.md` §4.4).
    pub fn auto_upgrade(&self) -> bool {
        self.upgrade_policy
            .as_deref()
            .map(|p| p.eq_ignore_ascii_case("auto"))
            .unwrap_or(false)
    }

    /// The major series of `self.version`, i.e. everything before the first
    /// `.`. Empty input yields an empty major series.
    pub fn major_series(&self) -> &str {
        self.version.split('.').next().unwrap_or("")
    }

    /// The `uris` list for `version` from `versionUris`, if present.
    pub fn uris_for(&self, version: &str) -> Option<&[String]> {
        self.version_uris
            .iter()
            .find(|v| v.version == version)
            .map(|v| v.uris.as_slice())
    }
}

#[cfg(test)]
mod setting_tests;
