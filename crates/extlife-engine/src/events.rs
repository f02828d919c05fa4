// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External collaborator interfaces (`spec.md` §6): the protocol client
//! that supplies goal state and accepts status reports, and the event sink
//! that records operation outcomes. Both are consumed, not implemented,
//! by this crate — the daemon provides the real adapters.

use async_trait::async_trait;

use extlife_core::{AggregateStatusDocument, ExtensionError, ExtensionSetting, OperationTag};

/// Supplies the desired-state extension list and accepts aggregate status
/// reports.
#[async_trait]
pub trait GoalStateSource: Send + Sync {
    async fn fetch_extensions(&self) -> Result<Vec<ExtensionSetting>, ExtensionError>;

    /// Best-effort: per-call failures do not abort the reconciliation pass.
    async fn report_status(&self, name: &str, version: &str, aggregate: &AggregateStatusDocument);
}

/// Fire-and-forget telemetry sink for operation outcomes.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn add_extension_event(&self, name: &str, success: bool, op: OperationTag, message: &str);
}
