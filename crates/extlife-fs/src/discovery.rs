// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Installed-instance discovery (`spec.md` §4.6, C6).

use std::cmp::Ordering;
use std::fs;

use extlife_core::{ExtensionError, VersionOrder};
use tracing::debug;

use crate::paths::Paths;

/// Splits a `<name>-<version>` directory name on its **last** `-`
/// (`spec.md` §3 invariant 5, §8 law 1: names may contain `-`).
pub fn parse_ext_dir_name(dir_name: &str) -> Result<(String, String), ExtensionError> {
    match dir_name.rfind('-') {
        Some(idx) => Ok((dir_name[..idx].to_string(), dir_name[idx + 1..].to_string())),
        None => Err(ExtensionError::InvalidExtDirName(dir_name.to_string())),
    }
}

/// Scans `paths.lib_dir` for the highest installed version of `target_name`,
/// per `order`. Directories that fail to parse, or whose parsed name doesn't
/// match exactly, are skipped rather than treated as an error — a foreign
/// directory under `libDir` is not this engine's problem.
pub fn discover_installed(
    paths: &Paths,
    target_name: &str,
    order: &dyn VersionOrder,
) -> Result<Option<String>, ExtensionError> {
    let mut best: Option<String> = None;

    let entries = match fs::read_dir(&paths.lib_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let dir_name = entry.file_name();
        let Some(dir_name) = dir_name.to_str() else {
            continue;
        };
        if !dir_name.starts_with(target_name) {
            continue;
        }
        let Ok((name, version)) = parse_ext_dir_name(dir_name) else {
            continue;
        };
        if name != target_name {
            continue;
        }
        best = Some(match best {
            None => version,
            Some(current_best) => {
                if order.compare(&version, &current_best) == Ordering::Greater {
                    version
                } else {
                    current_best
                }
            }
        });
    }

    debug!(target_name, found = ?best, "installed-instance discovery finished");
    Ok(best)
}

#[cfg(test)]
mod discovery_tests;
