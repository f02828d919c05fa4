// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration (`SPEC_FULL.md` §10.3).
//!
//! The distilled spec treats `libDir`/`extLogDir` as outer-daemon concerns;
//! this loads them (plus the reference `GoalStateSource`/`EventSink` wiring)
//! from a TOML file, falling back to an `XDG_STATE_HOME`-style default when
//! none is given. Library crates never see this type — they take `Paths`
//! and a `reqwest::Client` at construction instead.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::DaemonError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lib_dir: PathBuf,
    pub ext_log_dir: PathBuf,
    pub goal_state_path: PathBuf,
    pub status_report_path: PathBuf,
    pub poll_interval_secs: u64,
    pub use_proxy: bool,
}

impl Default for Config {
    fn default() -> Self {
        let state_dir = default_state_dir();
        Self {
            lib_dir: state_dir.join("lib"),
            ext_log_dir: state_dir.join("log"),
            goal_state_path: state_dir.join("goal_state.json"),
            status_report_path: state_dir.join("status_reports.jsonl"),
            poll_interval_secs: 60,
            use_proxy: true,
        }
    }
}

impl Config {
    /// Loads `path` as TOML, if given; otherwise returns defaults rooted at
    /// the process's state directory. Missing fields in the file fall back
    /// to the same defaults field-by-field.
    pub fn load(path: Option<&Path>) -> Result<Config, DaemonError> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DaemonError::Config(format!("reading {}: {e}", path.display())))?;
        toml::from_str(&raw).map_err(|e| DaemonError::Config(format!("parsing {}: {e}", path.display())))
    }
}

/// `$XDG_STATE_HOME/extlife`, falling back to `~/.local/state/extlife`.
fn default_state_dir() -> PathBuf {
    dirs::state_dir().unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".local/state")).join("extlife")
}

#[cfg(test)]
mod config_tests;
