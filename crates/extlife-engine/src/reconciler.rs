// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The reconciliation pass (`spec.md` §4.9, C9): for each desired-state
//! setting, discover what's on disk, drive the state machine, assemble an
//! aggregate status, and report it upstream. One extension's failure never
//! aborts the pass.

use extlife_core::{AggregateStatusDocument, ExtensionStatus, OperationTag, RuntimeSettingsStatus};
use extlife_fs::{create_dir_0700, discover_installed};
use tracing::{error, Instrument};

use crate::aggregate::get_agg_status;
use crate::context::EngineContext;
use crate::events::{EventSink, GoalStateSource};
use crate::orchestrator::handle;

/// Runs one top-to-bottom walk of `goal_state.fetch_extensions()`.
///
/// A failure from `fetch_extensions` itself is surfaced to the caller — the
/// outer daemon loop decides whether to retry or wait for the next poll
/// (`spec.md` §1 "Out of scope": the protocol client's own failures are not
/// this core's concern). Per-extension failures never propagate; they become
/// a synthetic `NotReady` aggregate and a failure event (`spec.md` §4.9 step 4).
pub async fn reconcile<G: GoalStateSource, E: EventSink>(ctx: &EngineContext, goal_state: &G, events: &E) {
    let settings = match goal_state.fetch_extensions().await {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "failed to fetch extension settings");
            return;
        }
    };

    for setting in &settings {
        let name = setting.name.as_str();
        let version = setting.version.as_str();

        if let Err(e) = create_dir_0700(&ctx.paths.log_dir(name, version)) {
            error!(name, version, error = %e, "failed to create command-execution log directory");
        }

        let discovered = match discover_installed(&ctx.paths, name, ctx.version_order.as_ref()) {
            Ok(discovered) => discovered,
            Err(e) => {
                report_failure(goal_state, events, setting, None, &e.to_string()).await;
                continue;
            }
        };

        let log_path = ctx.paths.command_execution_log(name, version).display().to_string();
        let span = tracing::info_span!("extension", log_path);
        let (instance, result) = handle(ctx, events, setting, discovered).instrument(span).await;

        match result {
            Ok(()) => match get_agg_status(ctx, name, &instance.curr_version, version, setting.seq_no) {
                Ok(aggregate) => goal_state.report_status(name, version, &aggregate).await,
                Err(e) => {
                    report_failure(goal_state, events, setting, instance.curr_operation, &e.to_string()).await;
                }
            },
            Err(e) => {
                report_failure(goal_state, events, setting, instance.curr_operation, &e.to_string()).await;
            }
        }
    }
}

async fn report_failure<G: GoalStateSource, E: EventSink>(
    goal_state: &G,
    events: &E,
    setting: &extlife_core::ExtensionSetting,
    operation: Option<OperationTag>,
    message: &str,
) {
    let op = operation.unwrap_or(OperationTag::Download);
    events.add_extension_event(&setting.name, false, op, message).await;

    let aggregate = AggregateStatusDocument {
        handler_version: setting.version.clone(),
        handler_name: setting.name.clone(),
        status: extlife_core::AggregateStatus::NotReady,
        runtime_settings_status: RuntimeSettingsStatus {
            settings_status: ExtensionStatus::synthetic_error(op, message),
            sequence_number: setting.seq_no,
        },
        code: None,
        message: None,
    };
    goal_state.report_status(&setting.name, &setting.version, &aggregate).await;
}

#[cfg(test)]
mod reconciler_tests;
