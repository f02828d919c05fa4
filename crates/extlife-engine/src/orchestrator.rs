// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The per-extension state machine (`spec.md` §4.8).
//!
//! Per §4.8.1, transitions emit their own success events directly; a
//! failure is left to propagate as an `ExtensionError` and is converted
//! into a failure event by the Reconciler (`spec.md` §4.9 step 4), not
//! here — emitting it at both layers would double-report one failure.

use std::cmp::Ordering;

use extlife_acquire::{download_and_unpack, resolve_package_uris, resolve_target_version};
use extlife_core::{ExtensionError, ExtensionSetting, GoalState, HandlerState, Instance, OperationTag};
use extlife_fs::read_handler_state;
use extlife_handler::load_manifest;
use tracing::info;

use crate::context::EngineContext;
use crate::events::EventSink;
use crate::init::init_extension_dir;
use crate::transitions;

/// A single launchable lifecycle command, as opposed to the composite
/// `Download`/`Upgrade` operation tags that only ever label events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Install,
    Enable,
    Disable,
    Uninstall,
    Update,
}

impl Transition {
    fn tag(self) -> OperationTag {
        match self {
            Transition::Install => OperationTag::Install,
            Transition::Enable => OperationTag::Enable,
            Transition::Disable => OperationTag::Disable,
            Transition::Uninstall => OperationTag::Uninstall,
            Transition::Update => OperationTag::Update,
        }
    }
}

/// Runs the state machine for one extension setting against any already-
/// discovered installed version. Always returns the `Instance` it built
/// (carrying `currOperation` for the Reconciler's failure path) alongside
/// the transition result.
pub async fn handle<E: EventSink>(
    ctx: &EngineContext,
    events: &E,
    setting: &ExtensionSetting,
    discovered_version: Option<String>,
) -> (Instance, Result<(), ExtensionError>) {
    info!(name = %setting.name, goal = ?setting.state, "reconciling extension");
    let mut instance = match discovered_version {
        Some(version) => {
            let mut inst = Instance::discovered(setting.clone(), version);
            if let Ok(state) = read_handler_state(&ctx.paths, inst.name(), &inst.curr_version) {
                inst.enabled = state == HandlerState::Enabled;
            }
            inst
        }
        None => Instance::fresh(setting.clone()),
    };

    let result = match setting.state {
        GoalState::Enabled => handle_enabled(ctx, events, &mut instance).await,
        GoalState::Disabled => handle_disabled(ctx, events, &mut instance).await,
        GoalState::Uninstall => handle_uninstall(ctx, events, &mut instance).await,
    };

    (instance, result)
}

async fn handle_enabled<E: EventSink>(
    ctx: &EngineContext,
    events: &E,
    instance: &mut Instance,
) -> Result<(), ExtensionError> {
    let target = resolve_target_version(&instance.setting, ctx.version_order.as_ref())?;

    if !instance.installed {
        instance.curr_version = target;
        return run_fresh_install(ctx, events, instance).await;
    }

    match ctx.version_order.compare(&target, &instance.curr_version) {
        Ordering::Greater => run_upgrade(ctx, events, instance, target).await,
        Ordering::Equal => run_enable_only(ctx, events, instance).await,
        Ordering::Less => Err(ExtensionError::DowngradeDisallowed {
            installed: instance.curr_version.clone(),
            requested: target,
        }),
    }
}

async fn handle_disabled<E: EventSink>(
    ctx: &EngineContext,
    events: &E,
    instance: &mut Instance,
) -> Result<(), ExtensionError> {
    if instance.installed && instance.enabled {
        let name = instance.name().to_string();
        let version = instance.curr_version.clone();
        let seq_no = instance.setting.seq_no;
        let settings = instance.setting.settings.clone();
        instance.curr_operation = Some(OperationTag::Disable);
        run_transition(ctx, events, &name, &version, seq_no, &settings, Transition::Disable).await?;
        instance.enabled = false;
    }
    Ok(())
}

async fn handle_uninstall<E: EventSink>(
    ctx: &EngineContext,
    events: &E,
    instance: &mut Instance,
) -> Result<(), ExtensionError> {
    if !instance.installed {
        return Ok(());
    }

    let name = instance.name().to_string();
    let version = instance.curr_version.clone();
    let seq_no = instance.setting.seq_no;
    let settings = instance.setting.settings.clone();

    if instance.enabled {
        instance.curr_operation = Some(OperationTag::Disable);
        run_transition(ctx, events, &name, &version, seq_no, &settings, Transition::Disable).await?;
        instance.enabled = false;
    }

    instance.curr_operation = Some(OperationTag::Uninstall);
    run_transition(ctx, events, &name, &version, seq_no, &settings, Transition::Uninstall).await
}

async fn run_fresh_install<E: EventSink>(
    ctx: &EngineContext,
    events: &E,
    instance: &mut Instance,
) -> Result<(), ExtensionError> {
    let name = instance.name().to_string();
    let version = instance.curr_version.clone();

    instance.curr_operation = Some(OperationTag::Download);
    download_package(ctx, events, &instance.setting, &name, &version).await?;
    init_extension_dir(&ctx.paths, &name, &version)?;

    let seq_no = instance.setting.seq_no;
    let settings = instance.setting.settings.clone();

    instance.curr_operation = Some(OperationTag::Install);
    run_transition(ctx, events, &name, &version, seq_no, &settings, Transition::Install).await?;
    instance.installed = true;

    instance.curr_operation = Some(OperationTag::Enable);
    run_transition(ctx, events, &name, &version, seq_no, &settings, Transition::Enable).await?;
    instance.enabled = true;

    Ok(())
}

async fn run_enable_only<E: EventSink>(
    ctx: &EngineContext,
    events: &E,
    instance: &mut Instance,
) -> Result<(), ExtensionError> {
    let name = instance.name().to_string();
    let version = instance.curr_version.clone();
    let seq_no = instance.setting.seq_no;
    let settings = instance.setting.settings.clone();

    instance.curr_operation = Some(OperationTag::Enable);
    run_transition(ctx, events, &name, &version, seq_no, &settings, Transition::Enable).await?;
    instance.enabled = true;
    Ok(())
}

/// `spec.md` §4.8.2: download+init the new version, then
/// `disable(old), update(new), uninstall(old), [install(new)], enable(new)`
/// in that fixed order.
async fn run_upgrade<E: EventSink>(
    ctx: &EngineContext,
    events: &E,
    instance: &mut Instance,
    target: String,
) -> Result<(), ExtensionError> {
    let name = instance.name().to_string();
    let old_version = instance.curr_version.clone();
    let new_version = target;
    let seq_no = instance.setting.seq_no;
    let settings = instance.setting.settings.clone();

    instance.curr_operation = Some(OperationTag::Download);
    download_package(ctx, events, &instance.setting, &name, &new_version).await?;
    init_extension_dir(&ctx.paths, &name, &new_version)?;

    instance.curr_operation = Some(OperationTag::Disable);
    run_transition(ctx, events, &name, &old_version, seq_no, &settings, Transition::Disable).await?;

    instance.curr_operation = Some(OperationTag::Update);
    run_transition(ctx, events, &name, &new_version, seq_no, &settings, Transition::Update).await?;

    instance.curr_operation = Some(OperationTag::Uninstall);
    run_transition(ctx, events, &name, &old_version, seq_no, &settings, Transition::Uninstall).await?;

    let new_manifest = load_manifest(&ctx.paths, &name, &new_version)?;
    if new_manifest.is_update_with_install() {
        instance.curr_operation = Some(OperationTag::Install);
        run_transition(ctx, events, &name, &new_version, seq_no, &settings, Transition::Install).await?;
    }

    instance.curr_operation = Some(OperationTag::Enable);
    run_transition(ctx, events, &name, &new_version, seq_no, &settings, Transition::Enable).await?;

    instance.curr_version = new_version;
    instance.enabled = true;
    instance.curr_operation = Some(OperationTag::Upgrade);
    events.add_extension_event(&name, true, OperationTag::Upgrade, "").await;
    Ok(())
}

async fn download_package<E: EventSink>(
    ctx: &EngineContext,
    events: &E,
    setting: &ExtensionSetting,
    name: &str,
    version: &str,
) -> Result<(), ExtensionError> {
    let uris = resolve_package_uris(setting, version)?.to_vec();

    info!(name, version, uri_count = uris.len(), "download started");
    download_and_unpack(&ctx.http_client, &ctx.paths, name, version, &uris).await?;
    events.add_extension_event(name, true, OperationTag::Download, "").await;
    Ok(())
}

async fn run_transition<E: EventSink>(
    ctx: &EngineContext,
    events: &E,
    name: &str,
    version: &str,
    seq_no: u64,
    settings: &serde_json::Value,
    transition: Transition,
) -> Result<(), ExtensionError> {
    let op = transition.tag();
    let manifest = load_manifest(&ctx.paths, name, version)?;

    let result = match transition {
        Transition::Install => transitions::install(ctx, name, version, seq_no, settings, &manifest).await,
        Transition::Enable => transitions::enable(ctx, name, version, seq_no, settings, &manifest).await,
        Transition::Disable => transitions::disable(ctx, name, version, seq_no, settings, &manifest).await,
        Transition::Uninstall => transitions::uninstall(ctx, name, version, seq_no, settings, &manifest).await,
        Transition::Update => transitions::update(ctx, name, version, seq_no, settings, &manifest).await,
    };

    if result.is_ok() {
        events.add_extension_event(name, true, op, "").await;
    }

    result
}

#[cfg(test)]
mod orchestrator_tests;
