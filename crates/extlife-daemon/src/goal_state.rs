// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference `GoalStateSource` (`spec.md` §6, `SPEC_FULL.md` §10.3).
//!
//! The protocol client that actually talks to a control plane is out of
//! scope (`spec.md` §1); this is a reference-quality stand-in good enough
//! to run the daemon end to end against a locally-maintained goal-state
//! file, the way a real fleet would front it with its own HTTP client.

use std::path::PathBuf;

use async_trait::async_trait;
use extlife_core::{AggregateStatusDocument, ExtensionError, ExtensionSetting};
use extlife_engine::GoalStateSource;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Reads the desired-state list from a JSON file and appends every
/// reported aggregate status as one line of newline-delimited JSON.
pub struct FileGoalStateSource {
    goal_state_path: PathBuf,
    status_report_path: PathBuf,
}

impl FileGoalStateSource {
    pub fn new(goal_state_path: PathBuf, status_report_path: PathBuf) -> Self {
        Self { goal_state_path, status_report_path }
    }
}

#[async_trait]
impl GoalStateSource for FileGoalStateSource {
    async fn fetch_extensions(&self) -> Result<Vec<ExtensionSetting>, ExtensionError> {
        let raw = tokio::fs::read_to_string(&self.goal_state_path)
            .await
            .map_err(ExtensionError::Io)?;
        serde_json::from_str(&raw).map_err(ExtensionError::Json)
    }

    /// Best-effort per `spec.md` §6: a write failure is logged, not
    /// returned, so it never aborts the reconciliation pass.
    async fn report_status(&self, name: &str, version: &str, aggregate: &AggregateStatusDocument) {
        let Ok(mut line) = serde_json::to_vec(aggregate) else {
            warn!(name, version, "failed to serialize aggregate status");
            return;
        };
        line.push(b'\n');

        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.status_report_path)
                .await?;
            file.write_all(&line).await
        }
        .await;

        if let Err(e) = result {
            warn!(name, version, error = %e, "failed to append status report");
        }
    }
}

#[cfg(test)]
mod goal_state_tests;
