// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settings-blob staging before a handler command launches (`spec.md` §4.5
//! step 1).

use std::fs;

use extlife_core::ExtensionError;
use extlife_fs::Paths;

/// Writes `settings` to `config/<seqNo>.settings`, overwriting any prior
/// contents. Must run before the corresponding `launch` call so the handler
/// sees the settings for the operation it's about to perform.
pub fn write_settings(
    paths: &Paths,
    name: &str,
    version: &str,
    seq_no: u64,
    settings: &serde_json::Value,
) -> Result<(), ExtensionError> {
    fs::write(paths.settings_file(name, version, seq_no), serde_json::to_vec(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod settings_tests;
