// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Writes `HandlerEnvironment.json` for the handler to consume
//! (`spec.md` §3, §4.2). The engine never reads this file back on the hot
//! path — it exists purely for the handler process.

use std::fs;

use extlife_core::ExtensionError;
use extlife_fs::Paths;

pub fn write_handler_environment(
    paths: &Paths,
    name: &str,
    version: &str,
) -> Result<(), ExtensionError> {
    let doc = serde_json::json!([{
        "name": name,
        "version": version,
        "handlerEnvironment": {
            "logFolder": paths.log_dir(name, version).display().to_string(),
            "configFolder": paths.config_dir(name, version).display().to_string(),
            "statusFolder": paths.status_dir(name, version).display().to_string(),
            "heartbeatFile": paths.heartbeat_file(name, version).display().to_string(),
        }
    }]);
    fs::write(paths.environment_file(name, version), serde_json::to_vec(&doc)?)?;
    Ok(())
}

#[cfg(test)]
mod environment_tests;
