// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler manifest parsing (`spec.md` §3, §4.2, C2).

use std::fs;

use extlife_core::ExtensionError;
use extlife_fs::Paths;

/// Typed view over `HandlerManifest.json`'s `handlerManifest` sub-object.
/// Missing optional flags return `false` / `None`, matching the original
/// `HandlerManifest.isRebootAfterInstall`/`isReportHeartbeat` defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerManifest {
    install_command: String,
    uninstall_command: String,
    update_command: String,
    enable_command: String,
    disable_command: String,
    reboot_after_install: bool,
    report_heartbeat: bool,
    update_mode: Option<String>,
}

impl HandlerManifest {
    pub fn install_command(&self) -> &str {
        &self.install_command
    }

    pub fn uninstall_command(&self) -> &str {
        &self.uninstall_command
    }

    pub fn update_command(&self) -> &str {
        &self.update_command
    }

    pub fn enable_command(&self) -> &str {
        &self.enable_command
    }

    pub fn disable_command(&self) -> &str {
        &self.disable_command
    }

    pub fn reboot_after_install(&self) -> bool {
        self.reboot_after_install
    }

    pub fn report_heartbeat(&self) -> bool {
        self.report_heartbeat
    }

    /// `handlerManifest.updateMode`, compared case-insensitively against
    /// `updatewithinstall`. Per `spec.md` §9 the contract is
    /// `handlerManifest.updateMode` only — a top-level `updateMode` field,
    /// if present, is not consulted.
    pub fn is_update_with_install(&self) -> bool {
        self.update_mode
            .as_deref()
            .map(|m| m.eq_ignore_ascii_case("updatewithinstall"))
            .unwrap_or(false)
    }
}

/// Parses a `HandlerManifest.json` document body (already a single object,
/// not the enclosing one-element array) into a [`HandlerManifest`].
pub fn parse_manifest(doc: &serde_json::Value) -> Result<HandlerManifest, ExtensionError> {
    let inner = doc.get("handlerManifest").and_then(|v| v.as_object()).ok_or_else(|| {
        ExtensionError::MalformedManifest("missing 'handlerManifest' object".into())
    })?;

    let required = |key: &str| -> Result<String, ExtensionError> {
        inner
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| ExtensionError::MalformedManifest(format!("missing 'handlerManifest.{key}'")))
    };

    Ok(HandlerManifest {
        install_command: required("installCommand")?,
        uninstall_command: required("uninstallCommand")?,
        update_command: required("updateCommand")?,
        enable_command: required("enableCommand")?,
        disable_command: required("disableCommand")?,
        reboot_after_install: inner.get("rebootAfterInstall").and_then(|v| v.as_bool()).unwrap_or(false),
        report_heartbeat: inner.get("reportHeartbeat").and_then(|v| v.as_bool()).unwrap_or(false),
        update_mode: inner.get("updateMode").and_then(|v| v.as_str()).map(str::to_string),
    })
}

/// Loads and parses the canonical manifest copy at
/// `<libDir>/<name>-<version>/HandlerManifest.json`. The file holds a
/// one-element array; element 0 is the manifest document.
pub fn load_manifest(paths: &Paths, name: &str, version: &str) -> Result<HandlerManifest, ExtensionError> {
    let path = paths.manifest_file(name, version);
    let raw = fs::read_to_string(&path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let doc = parsed
        .as_array()
        .and_then(|arr| arr.first())
        .ok_or_else(|| ExtensionError::MalformedManifest("manifest array is empty".into()))?;
    parse_manifest(doc)
}

#[cfg(test)]
mod manifest_tests;
