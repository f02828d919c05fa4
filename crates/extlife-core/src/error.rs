// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The single error type shared by every extension-lifecycle crate.

use thiserror::Error;

/// Everything that can go wrong while reconciling an extension.
///
/// Every fallible operation across `extlife-fs`, `extlife-handler`,
/// `extlife-acquire`, `extlife-exec` and `extlife-engine` returns
/// `Result<T, ExtensionError>`. Nothing here is fatal to the engine as a
/// whole — the Reconciler converts any variant into a `NotReady` aggregate
/// for the one extension that produced it and moves on to the next.
#[derive(Debug, Error)]
pub enum ExtensionError {
    #[error("invalid extension directory name: {0}")]
    InvalidExtDirName(String),

    #[error("no version under major series {major} matches any versionUris entry")]
    NoMatchingVersion { major: String },

    #[error("a newer version ({installed}) is already installed than the requested {requested}")]
    DowngradeDisallowed { installed: String, requested: String },

    #[error("unknown extension goal state: {0}")]
    UnknownGoalState(String),

    #[error("download of extension package failed after exhausting all uris: {0}")]
    DownloadFailed(String),

    #[error("no package uris found for version {0}")]
    NoPackageUris(String),

    #[error("command timed out after {timeout_secs}s: {command}")]
    CommandTimeout { command: String, timeout_secs: u64 },

    #[error("command exited with non-zero status {code:?}: {command}")]
    CommandNonZeroExit { command: String, code: Option<i32> },

    #[error("failed to launch command {command}: {reason}")]
    LaunchFailed { command: String, reason: String },

    #[error("malformed handler manifest: {0}")]
    MalformedManifest(String),

    #[error("malformed status file: {0}")]
    MalformedStatus(String),

    #[error("malformed heartbeat file: {0}")]
    MalformedHeartbeat(String),

    #[error("heartbeat file is missing")]
    MissingHeartbeat,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid aggregate status: {0}")]
    InvalidAggregateStatus(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExtensionError {
    /// `true` for errors that are precondition/config problems rather than
    /// transient I/O or subprocess failures. Not used for control flow in
    /// this crate; kept for callers that want to distinguish "will never
    /// succeed without a new goal state" from "might succeed on retry".
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ExtensionError::InvalidExtDirName(_)
                | ExtensionError::NoMatchingVersion { .. }
                | ExtensionError::DowngradeDisallowed { .. }
                | ExtensionError::UnknownGoalState(_)
        )
    }
}
