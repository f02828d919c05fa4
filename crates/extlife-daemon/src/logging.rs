// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging setup.
//!
//! Two things share the wire here: the daemon's own operational log (a
//! `tracing-subscriber` `fmt` layer filtered by `RUST_LOG`) and the
//! per-extension `CommandExecution.log` file each handler gets. The latter
//! is [`ExtensionLogLayer`], a `Layer` that demuxes events by the
//! `log_path` field carried on the extension's tracing span and appends
//! each to its own `tracing_appender::non_blocking` writer, rather than a
//! single global subscriber.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the process-wide subscriber: an `EnvFilter`-gated `fmt` layer
/// for operational logs plus an [`ExtensionLogLayer`] for per-extension
/// command-execution logs. Returns the `ExtensionLogLayer` handle so the
/// reconcile loop can wrap each extension's span in a `log_path` field.
pub fn init(default_filter: &str) -> ExtensionLogLayer {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let extension_layer = ExtensionLogLayer::new();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(extension_layer.clone())
        .init();

    extension_layer
}

struct LogPath(PathBuf);

#[derive(Default)]
struct FieldVisitor {
    log_path: Option<PathBuf>,
    message: Option<String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "log_path" => self.log_path = Some(PathBuf::from(format!("{value:?}").trim_matches('"'))),
            "message" => self.message = Some(format!("{value:?}")),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "log_path" => self.log_path = Some(PathBuf::from(value)),
            "message" => self.message = Some(value.to_string()),
            _ => {}
        }
    }
}

/// Demuxes tracing events to a per-path `CommandExecution.log` file based
/// on the nearest ancestor span carrying a `log_path` field. Events outside
/// any such span are ignored — the `fmt` layer already has them.
#[derive(Clone, Default)]
pub struct ExtensionLogLayer {
    writers: Arc<Mutex<HashMap<PathBuf, (NonBlocking, WorkerGuard)>>>,
}

impl ExtensionLogLayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn writer_for(&self, path: &Path) -> NonBlocking {
        let mut writers = self.writers.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((writer, _guard)) = writers.get(path) {
            return writer.clone();
        }
        let file = std::fs::OpenOptions::new().create(true).append(true).open(path);
        let (non_blocking, guard) = match file {
            Ok(file) => tracing_appender::non_blocking(file),
            Err(_) => tracing_appender::non_blocking(std::io::sink()),
        };
        writers.insert(path.to_path_buf(), (non_blocking.clone(), guard));
        non_blocking
    }
}

impl<S> Layer<S> for ExtensionLogLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);
        if let Some(path) = visitor.log_path {
            if let Some(span) = ctx.span(id) {
                span.extensions_mut().insert(LogPath(path));
            }
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let Some(scope) = ctx.event_scope(event) else { return };
        for span in scope.from_root() {
            let extensions = span.extensions();
            let Some(LogPath(path)) = extensions.get::<LogPath>() else { continue };
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            let mut writer = self.writer_for(path);
            let _ = writeln!(
                writer,
                "{} {}",
                event.metadata().level(),
                visitor.message.unwrap_or_default()
            );
            return;
        }
    }
}

#[cfg(test)]
mod logging_tests;
