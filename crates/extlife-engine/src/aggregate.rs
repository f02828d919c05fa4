// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Aggregate status assembly (`spec.md` §4.8.4).

use std::str::FromStr;

use extlife_core::{AggregateStatus, AggregateStatusDocument, ExtensionError, RuntimeSettingsStatus};
use extlife_fs::read_handler_state;
use extlife_handler::{load_manifest, read_extension_status, read_heartbeat};

use crate::context::EngineContext;

/// Reads the extension status and handler state, maps the handler state
/// through the fixed table, and — if the manifest advertises heartbeat
/// reporting — overrides the base aggregate with the heartbeat's own
/// status, carrying its `code`/`Message` onto the document.
///
/// `version` locates the on-disk handler directory to read from, which
/// under auto-upgrade may be the resolved target rather than the setting's
/// own version. `report_version` is the value stamped onto the document's
/// `handlerVersion` field — the original source always reports the
/// *setting's* version here (`ExtHandlerInstance.reportStatus`), not
/// whatever version actually ended up installed, so callers pass
/// `setting.version` even when it differs from `version`.
pub fn get_agg_status(
    ctx: &EngineContext,
    name: &str,
    version: &str,
    report_version: &str,
    seq_no: u64,
) -> Result<AggregateStatusDocument, ExtensionError> {
    let ext_status = read_extension_status(&ctx.paths, name, version, seq_no)?;
    let handler_state = read_handler_state(&ctx.paths, name, version)?;
    let manifest = load_manifest(&ctx.paths, name, version)?;

    let mut status = handler_state.base_aggregate();
    let mut code = None;
    let mut message = None;

    if manifest.report_heartbeat() {
        let heartbeat = read_heartbeat(&ctx.paths, name, version, ctx.clock.as_ref())?;
        status = AggregateStatus::from_str(&heartbeat.status)
            .map_err(ExtensionError::InvalidAggregateStatus)?;
        code = Some(heartbeat.code);
        message = Some(heartbeat.message);
    }

    Ok(AggregateStatusDocument {
        handler_version: report_version.to_string(),
        handler_name: name.to_string(),
        status,
        runtime_settings_status: RuntimeSettingsStatus {
            settings_status: ext_status,
            sequence_number: seq_no,
        },
        code,
        message,
    })
}

#[cfg(test)]
mod aggregate_tests;
