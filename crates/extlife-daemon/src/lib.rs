// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! extlife-daemon: the ambient stack around `extlife-engine` — config,
//! logging, and the reference `GoalStateSource`/`EventSink` adapters the
//! `extlifed` binary wires up (`SPEC_FULL.md` §10).

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod event_sink;
pub mod goal_state;
pub mod logging;

use thiserror::Error;

pub use config::Config;
pub use event_sink::TracingEventSink;
pub use goal_state::FileGoalStateSource;

/// Everything that can go wrong setting up or running the daemon itself,
/// as opposed to reconciling any one extension (that's `ExtensionError`).
#[derive(Debug, Error)]
pub enum DaemonError {
    #[error("configuration error: {0}")]
    Config(String),
}
