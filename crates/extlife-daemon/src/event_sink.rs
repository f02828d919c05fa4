// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reference `EventSink` (`spec.md` §6, `SPEC_FULL.md` §10.3). The real
//! telemetry-upload sink is out of scope; this one just routes every event
//! through `tracing`, which is what gets picked up by the process-wide
//! subscriber installed in `logging`.

use async_trait::async_trait;
use extlife_core::OperationTag;
use extlife_engine::EventSink;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn add_extension_event(&self, name: &str, success: bool, op: OperationTag, message: &str) {
        if success {
            info!(name, operation = %op, "extension event");
        } else {
            warn!(name, operation = %op, message, "extension event");
        }
    }
}
