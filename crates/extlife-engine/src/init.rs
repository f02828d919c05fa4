// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `initExtensionDir` (`spec.md` §4.8.3): runs once per freshly-downloaded
//! package, before the first `install`.

use std::fs;
use std::path::{Path, PathBuf};

use extlife_core::{ExtensionError, HandlerState};
use extlife_fs::{create_dir_0700, write_handler_state, Paths};
use extlife_handler::write_handler_environment;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Locates `HandlerManifest.json` anywhere under the base directory
/// (depth-first, first match wins), copies it (BOM-stripped) to the
/// canonical manifest path, creates `status/` and `config/` at mode
/// `0700`, persists handler state `uninstalled`, and writes
/// `HandlerEnvironment.json`.
pub fn init_extension_dir(paths: &Paths, name: &str, version: &str) -> Result<(), ExtensionError> {
    let base_dir = paths.base_dir(name, version);
    let found = find_manifest_depth_first(&base_dir)?.ok_or_else(|| {
        ExtensionError::MalformedManifest("no HandlerManifest.json found under extracted package".into())
    })?;

    let raw = fs::read(&found)?;
    fs::write(paths.manifest_file(name, version), strip_utf8_bom(&raw))?;

    create_dir_0700(&paths.status_dir(name, version))?;
    create_dir_0700(&paths.config_dir(name, version))?;

    write_handler_state(paths, name, version, HandlerState::Uninstalled)?;
    write_handler_environment(paths, name, version)?;
    Ok(())
}

fn strip_utf8_bom(raw: &[u8]) -> &[u8] {
    raw.strip_prefix(&UTF8_BOM).unwrap_or(raw)
}

fn find_manifest_depth_first(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_file() && entry.file_name() == "HandlerManifest.json" {
            return Ok(Some(entry.path()));
        }
        if file_type.is_dir() {
            subdirs.push(entry.path());
        }
    }
    for sub in subdirs {
        if let Some(found) = find_manifest_depth_first(&sub)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod init_tests;
