// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `extlifed`: the extension lifecycle engine's poll-loop binary.
//!
//! Reads the desired-state list from a local file, reconciles every
//! extension against it, reports the outcome, sleeps, repeats
//! (`SPEC_FULL.md` §10.3) — until `SIGTERM`/`SIGINT` or `Ctrl-C`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use extlife_core::{LexicalVersionOrder, SystemClock};
use extlife_daemon::{Config, DaemonError, FileGoalStateSource, TracingEventSink};
use extlife_engine::{reconcile, EngineContext};
use extlife_fs::Paths;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "extlifed", about = "Extension lifecycle reconciliation daemon")]
struct Args {
    /// Path to a TOML config file. Defaults to the built-in state-dir layout.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reconcile once and exit instead of looping.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _log_layer = extlife_daemon::logging::init("info");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "extlifed exited with an error");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), DaemonError> {
    let config = Config::load(args.config.as_deref())?;
    info!(lib_dir = %config.lib_dir.display(), poll_interval_secs = config.poll_interval_secs, "extlifed starting");

    let http_client = build_http_client(config.use_proxy);
    let paths = Paths::new(config.lib_dir.clone(), config.ext_log_dir.clone());
    let ctx = EngineContext::new(
        paths,
        http_client,
        Box::new(LexicalVersionOrder),
        Box::new(SystemClock),
    );
    let goal_state = FileGoalStateSource::new(config.goal_state_path.clone(), config.status_report_path.clone());
    let events = TracingEventSink;

    if args.once {
        reconcile(&ctx, &goal_state, &events).await;
        return Ok(());
    }

    let mut interval = tokio::time::interval(std::time::Duration::from_secs(config.poll_interval_secs.max(1)));
    loop {
        tokio::select! {
            _ = interval.tick() => {
                reconcile(&ctx, &goal_state, &events).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("received shutdown signal, exiting");
                return Ok(());
            }
        }
    }
}

/// Builds the shared HTTP client used for package downloads. Proxy
/// environment variables are honored unless the config explicitly opts out
/// (`spec.md` §4.4).
fn build_http_client(use_proxy: bool) -> reqwest::Client {
    let builder = reqwest::Client::builder();
    let builder = if use_proxy { builder } else { builder.no_proxy() };
    builder.build().unwrap_or_default()
}
