// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess supervisor (`spec.md` §4.5, C5).

use std::process::Stdio;
use std::time::Duration;

use extlife_core::{ExtensionError, OperationTag};
use extlife_fs::Paths;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::{info, warn};

/// Per-command timeout, per the fixed table in `spec.md` §4.5.
pub fn default_timeout(op: OperationTag) -> Duration {
    match op {
        OperationTag::Install | OperationTag::Disable | OperationTag::Update => Duration::from_secs(900),
        OperationTag::Enable | OperationTag::Uninstall => Duration::from_secs(300),
        OperationTag::Download | OperationTag::Upgrade => Duration::from_secs(300),
    }
}

/// Runs `<baseDir>/<cmd>` through the shell with `cwd = baseDir`, stdout
/// redirected to the null device and stderr inherited. Waits up to
/// `timeout`; on expiry, sends `SIGKILL` to the child and fails with
/// `CommandTimeout`. A non-zero exit fails with `CommandNonZeroExit`.
pub async fn launch(paths: &Paths, name: &str, version: &str, cmd: &str, timeout: Duration) -> Result<(), ExtensionError> {
    let base_dir = paths.base_dir(name, version);
    let full_cmd = format!("{}/{cmd}", base_dir.display());

    let mut child = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(&full_cmd)
        .current_dir(&base_dir)
        .stdout(Stdio::null())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| ExtensionError::LaunchFailed {
            command: cmd.to_string(),
            reason: e.to_string(),
        })?;

    let pid = child.id();
    info!(name, version, cmd, pid, timeout_secs = timeout.as_secs(), "command launched");

    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) if status.success() => {
            info!(name, version, cmd, "command exited 0");
            Ok(())
        }
        Ok(Ok(status)) => {
            warn!(name, version, cmd, code = status.code(), "command exited non-zero");
            Err(ExtensionError::CommandNonZeroExit {
                command: cmd.to_string(),
                code: status.code(),
            })
        }
        Ok(Err(e)) => Err(ExtensionError::LaunchFailed {
            command: cmd.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => {
            if let Some(pid) = pid {
                if let Err(e) = kill(Pid::from_raw(pid as i32), Signal::SIGKILL) {
                    warn!(pid, error = %e, "failed to SIGKILL timed-out command");
                }
            }
            let _ = child.wait().await;
            warn!(name, version, cmd, timeout_secs = timeout.as_secs(), "command timed out, killed");
            Err(ExtensionError::CommandTimeout {
                command: cmd.to_string(),
                timeout_secs: timeout.as_secs(),
            })
        }
    }
}

#[cfg(test)]
mod supervisor_tests;
