// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared, injected dependencies for one reconciliation pass (`spec.md` §9
//! "Global state" — the engine owns no process-wide mutable state; a
//! `Paths` record and the version/clock strategies are threaded explicitly
//! instead of living behind a singleton).

use extlife_core::{Clock, VersionOrder};
use extlife_fs::Paths;

pub struct EngineContext {
    pub paths: Paths,
    pub http_client: reqwest::Client,
    pub version_order: Box<dyn VersionOrder + Send + Sync>,
    pub clock: Box<dyn Clock + Send + Sync>,
}

impl EngineContext {
    pub fn new(
        paths: Paths,
        http_client: reqwest::Client,
        version_order: Box<dyn VersionOrder + Send + Sync>,
        clock: Box<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            paths,
            http_client,
            version_order,
            clock,
        }
    }
}
