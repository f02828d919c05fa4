// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Individual lifecycle transitions (`spec.md` §4.8.1): write settings,
//! launch the handler command, and — only on success — persist the new
//! handler state.

use extlife_core::ExtensionError;
use extlife_exec::{default_timeout, launch, write_settings};
use extlife_fs::write_handler_state;
use extlife_handler::HandlerManifest;
use extlife_core::{HandlerState, OperationTag};

use crate::context::EngineContext;

async fn run_command(
    ctx: &EngineContext,
    name: &str,
    version: &str,
    seq_no: u64,
    settings: &serde_json::Value,
    op: OperationTag,
    cmd: &str,
) -> Result<(), ExtensionError> {
    write_settings(&ctx.paths, name, version, seq_no, settings)?;
    launch(&ctx.paths, name, version, cmd, default_timeout(op)).await
}

pub async fn install(
    ctx: &EngineContext,
    name: &str,
    version: &str,
    seq_no: u64,
    settings: &serde_json::Value,
    manifest: &HandlerManifest,
) -> Result<(), ExtensionError> {
    run_command(ctx, name, version, seq_no, settings, OperationTag::Install, manifest.install_command()).await?;
    write_handler_state(&ctx.paths, name, version, HandlerState::Installed)?;
    Ok(())
}

pub async fn enable(
    ctx: &EngineContext,
    name: &str,
    version: &str,
    seq_no: u64,
    settings: &serde_json::Value,
    manifest: &HandlerManifest,
) -> Result<(), ExtensionError> {
    run_command(ctx, name, version, seq_no, settings, OperationTag::Enable, manifest.enable_command()).await?;
    write_handler_state(&ctx.paths, name, version, HandlerState::Enabled)?;
    Ok(())
}

pub async fn disable(
    ctx: &EngineContext,
    name: &str,
    version: &str,
    seq_no: u64,
    settings: &serde_json::Value,
    manifest: &HandlerManifest,
) -> Result<(), ExtensionError> {
    run_command(ctx, name, version, seq_no, settings, OperationTag::Disable, manifest.disable_command()).await?;
    write_handler_state(&ctx.paths, name, version, HandlerState::Disabled)?;
    Ok(())
}

pub async fn uninstall(
    ctx: &EngineContext,
    name: &str,
    version: &str,
    seq_no: u64,
    settings: &serde_json::Value,
    manifest: &HandlerManifest,
) -> Result<(), ExtensionError> {
    run_command(ctx, name, version, seq_no, settings, OperationTag::Uninstall, manifest.uninstall_command()).await?;
    write_handler_state(&ctx.paths, name, version, HandlerState::Uninstalled)?;
    Ok(())
}

/// `update` never alters persisted handler state (`spec.md` §4.8.1).
pub async fn update(
    ctx: &EngineContext,
    name: &str,
    version: &str,
    seq_no: u64,
    settings: &serde_json::Value,
    manifest: &HandlerManifest,
) -> Result<(), ExtensionError> {
    run_command(ctx, name, version, seq_no, settings, OperationTag::Update, manifest.update_command()).await
}

#[cfg(test)]
mod transitions_tests;
