// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use extlife_core::{LexicalVersionOrder, SystemClock};
use extlife_handler::parse_manifest;

fn manifest_with_scripts() -> HandlerManifest {
    parse_manifest(&serde_json::json!({
        "handlerManifest": {
            "installCommand": "install.sh",
            "uninstallCommand": "uninstall.sh",
            "updateCommand": "update.sh",
            "enableCommand": "enable.sh",
            "disableCommand": "disable.sh",
        }
    }))
    .unwrap()
}

fn write_script(paths: &extlife_fs::Paths, name: &str, version: &str, script: &str, exit_code: i32) {
    let base_dir = paths.base_dir(name, version);
    std::fs::create_dir_all(base_dir.join("config")).unwrap();
    let script_path = base_dir.join(script);
    std::fs::write(&script_path, format!("#!/bin/sh\nexit {exit_code}\n")).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&script_path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script_path, perms).unwrap();
    }
}

fn ctx(tmp: &tempfile::TempDir) -> EngineContext {
    EngineContext::new(
        extlife_fs::Paths::new(tmp.path(), tmp.path().join("logs")),
        reqwest::Client::new(),
        Box::new(LexicalVersionOrder),
        Box::new(SystemClock),
    )
}

#[tokio::test]
async fn install_persists_installed_state_on_success() {
    let tmp = tempfile::tempdir().unwrap();
    let c = ctx(&tmp);
    write_script(&c.paths, "Foo", "1.0.0", "install.sh", 0);

    install(&c, "Foo", "1.0.0", 0, &serde_json::json!({}), &manifest_with_scripts()).await.unwrap();

    let state = extlife_fs::read_handler_state(&c.paths, "Foo", "1.0.0").unwrap();
    assert_eq!(state, extlife_core::HandlerState::Installed);
}

#[tokio::test]
async fn install_failure_leaves_state_untouched() {
    let tmp = tempfile::tempdir().unwrap();
    let c = ctx(&tmp);
    write_script(&c.paths, "Foo", "1.0.0", "install.sh", 1);
    extlife_fs::write_handler_state(&c.paths, "Foo", "1.0.0", extlife_core::HandlerState::Uninstalled).unwrap();

    let err = install(&c, "Foo", "1.0.0", 0, &serde_json::json!({}), &manifest_with_scripts()).await;
    assert!(err.is_err());

    let state = extlife_fs::read_handler_state(&c.paths, "Foo", "1.0.0").unwrap();
    assert_eq!(state, extlife_core::HandlerState::Uninstalled);
}

#[tokio::test]
async fn update_does_not_alter_persisted_state() {
    let tmp = tempfile::tempdir().unwrap();
    let c = ctx(&tmp);
    write_script(&c.paths, "Foo", "1.0.0", "update.sh", 0);
    extlife_fs::write_handler_state(&c.paths, "Foo", "1.0.0", extlife_core::HandlerState::Enabled).unwrap();

    update(&c, "Foo", "1.0.0", 0, &serde_json::json!({}), &manifest_with_scripts()).await.unwrap();

    let state = extlife_fs::read_handler_state(&c.paths, "Foo", "1.0.0").unwrap();
    assert_eq!(state, extlife_core::HandlerState::Enabled);
}

#[tokio::test]
async fn enable_writes_settings_file_before_launch() {
    let tmp = tempfile::tempdir().unwrap();
    let c = ctx(&tmp);
    write_script(&c.paths, "Foo", "1.0.0", "enable.sh", 0);

    enable(&c, "Foo", "1.0.0", 7, &serde_json::json!({"k": "v"}), &manifest_with_scripts()).await.unwrap();

    let raw = std::fs::read_to_string(c.paths.settings_file("Foo", "1.0.0", 7)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["k"], "v");
}
