// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Heartbeat reader (`spec.md` §4.3, C3). Staleness threshold is fixed at
//! 600 seconds, matching the well-known `GOAL_STATE_PERIOD` heartbeat
//! window (see `SPEC_FULL.md` §12).

use std::fs;

use extlife_core::{mtime_epoch_ms, Clock, ExtensionError, Heartbeat};
use extlife_fs::Paths;
use tracing::warn;

const STALE_AFTER_MS: u64 = 600_000;

/// Reads `heartbeat.log`. If the file is missing, fails with
/// `MissingHeartbeat`. If the file's last modification is older than 600
/// seconds (per `clock`), returns a synthetic `Unresponsive` heartbeat
/// instead of parsing. Otherwise parses `[0].heartbeat` and validates
/// `status`, `code`, and `Message` are present.
pub fn read_heartbeat(
    paths: &Paths,
    name: &str,
    version: &str,
    clock: &dyn Clock,
) -> Result<Heartbeat, ExtensionError> {
    let path = paths.heartbeat_file(name, version);
    let metadata = fs::metadata(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtensionError::MissingHeartbeat
        } else {
            ExtensionError::Io(e)
        }
    })?;

    let mtime_ms = mtime_epoch_ms(metadata.modified()?);
    let now_ms = clock.epoch_ms();
    if now_ms.saturating_sub(mtime_ms) > STALE_AFTER_MS {
        warn!(name, version, "heartbeat file is stale, reporting unresponsive");
        return Ok(Heartbeat::unresponsive());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| ExtensionError::MalformedHeartbeat(format!("invalid json: {e}")))?;

    let entry = parsed
        .as_array()
        .and_then(|arr| arr.first())
        .ok_or_else(|| ExtensionError::MalformedHeartbeat("heartbeat file is not a non-empty array".into()))?;

    let hb = entry
        .get("heartbeat")
        .ok_or_else(|| ExtensionError::MalformedHeartbeat("missing 'heartbeat'".into()))?;

    serde_json::from_value(hb.clone())
        .map_err(|e| ExtensionError::MalformedHeartbeat(format!("missing required field: {e}")))
}

#[cfg(test)]
mod heartbeat_tests;
