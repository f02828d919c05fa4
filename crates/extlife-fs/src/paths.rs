// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canonical paths for the on-disk handler layout (`spec.md` §3, §4.1).
//!
//! Pure functions from `(name, version, seqNo)` to paths, anchored at the
//! process-wide `libDir`/`extLogDir` the daemon injects at construction —
//! this crate owns no global mutable state (`spec.md` §9 "Global state").

use std::fs;
use std::path::{Path, PathBuf};

/// Root directories this engine owns exclusively (`spec.md` §5 "Shared
/// resources").
#[derive(Debug, Clone)]
pub struct Paths {
    pub lib_dir: PathBuf,
    pub ext_log_dir: PathBuf,
}

impl Paths {
    pub fn new(lib_dir: impl Into<PathBuf>, ext_log_dir: impl Into<PathBuf>) -> Self {
        Self {
            lib_dir: lib_dir.into(),
            ext_log_dir: ext_log_dir.into(),
        }
    }

    pub fn base_dir(&self, name: &str, version: &str) -> PathBuf {
        self.lib_dir.join(format!("{name}-{version}"))
    }

    pub fn manifest_file(&self, name: &str, version: &str) -> PathBuf {
        self.base_dir(name, version).join("HandlerManifest.json")
    }

    pub fn environment_file(&self, name: &str, version: &str) -> PathBuf {
        self.base_dir(name, version).join("HandlerEnvironment.json")
    }

    pub fn heartbeat_file(&self, name: &str, version: &str) -> PathBuf {
        self.base_dir(name, version).join("heartbeat.log")
    }

    pub fn status_dir(&self, name: &str, version: &str) -> PathBuf {
        self.base_dir(name, version).join("status")
    }

    pub fn status_file(&self, name: &str, version: &str, seq_no: u64) -> PathBuf {
        self.status_dir(name, version).join(format!("{seq_no}.status"))
    }

    pub fn config_dir(&self, name: &str, version: &str) -> PathBuf {
        self.base_dir(name, version).join("config")
    }

    pub fn settings_file(&self, name: &str, version: &str, seq_no: u64) -> PathBuf {
        self.config_dir(name, version).join(format!("{seq_no}.settings"))
    }

    pub fn handler_state_file(&self, name: &str, version: &str) -> PathBuf {
        self.config_dir(name, version).join("HandlerState")
    }

    pub fn log_dir(&self, name: &str, version: &str) -> PathBuf {
        self.ext_log_dir.join(name).join(version)
    }

    pub fn command_execution_log(&self, name: &str, version: &str) -> PathBuf {
        self.log_dir(name, version).join("CommandExecution.log")
    }
}

/// Creates `dir` (and parents) with owner-only permissions (`0700`).
pub fn create_dir_0700(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    set_owner_only(dir)
}

#[cfg(unix)]
fn set_owner_only(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn set_owner_only(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod paths_tests;
