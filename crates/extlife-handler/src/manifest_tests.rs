// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use extlife_fs::Paths;

fn write_manifest(paths: &Paths, name: &str, version: &str, body: serde_json::Value) {
    std::fs::create_dir_all(paths.base_dir(name, version)).unwrap();
    std::fs::write(
        paths.manifest_file(name, version),
        serde_json::to_string(&serde_json::json!([body])).unwrap(),
    )
    .unwrap();
}

fn full_manifest_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Foo",
        "version": "1.0.0",
        "handlerManifest": {
            "installCommand": "install.sh",
            "uninstallCommand": "uninstall.sh",
            "updateCommand": "update.sh",
            "enableCommand": "enable.sh",
            "disableCommand": "disable.sh",
        }
    })
}

#[test]
fn loads_all_five_commands() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = Paths::new(tmp.path(), tmp.path().join("logs"));
    write_manifest(&paths, "Foo", "1.0.0", full_manifest_body());

    let man = load_manifest(&paths, "Foo", "1.0.0").unwrap();
    assert_eq!(man.install_command(), "install.sh");
    assert_eq!(man.uninstall_command(), "uninstall.sh");
    assert_eq!(man.update_command(), "update.sh");
    assert_eq!(man.enable_command(), "enable.sh");
    assert_eq!(man.disable_command(), "disable.sh");
    assert!(!man.reboot_after_install());
    assert!(!man.report_heartbeat());
    assert!(!man.is_update_with_install());
}

#[yare::parameterized(
    exact = "updateWithInstall",
    lower = "updatewithinstall",
    upper = "UPDATEWITHINSTALL",
)]
fn update_mode_comparison_is_case_insensitive(mode: &str) {
    let mut body = full_manifest_body();
    body["handlerManifest"]["updateMode"] = serde_json::json!(mode);
    let man = parse_manifest(&body).unwrap();
    assert!(man.is_update_with_install());
}

#[test]
fn update_mode_other_value_is_false() {
    let mut body = full_manifest_body();
    body["handlerManifest"]["updateMode"] = serde_json::json!("somethingElse");
    let man = parse_manifest(&body).unwrap();
    assert!(!man.is_update_with_install());
}

#[test]
fn optional_flags_parse_when_present() {
    let mut body = full_manifest_body();
    body["handlerManifest"]["rebootAfterInstall"] = serde_json::json!(true);
    body["handlerManifest"]["reportHeartbeat"] = serde_json::json!(true);
    let man = parse_manifest(&body).unwrap();
    assert!(man.reboot_after_install());
    assert!(man.report_heartbeat());
}

#[test]
fn missing_handler_manifest_object_is_malformed() {
    let body = serde_json::json!({ "name": "Foo" });
    assert!(parse_manifest(&body).is_err());
}

#[yare::parameterized(
    install = "installCommand",
    uninstall = "uninstallCommand",
    update = "updateCommand",
    enable = "enableCommand",
    disable = "disableCommand",
)]
fn missing_required_command_is_malformed(key: &str) {
    let mut body = full_manifest_body();
    body["handlerManifest"].as_object_mut().unwrap().remove(key);
    assert!(parse_manifest(&body).is_err());
}

#[test]
fn load_manifest_rejects_empty_array() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = Paths::new(tmp.path(), tmp.path().join("logs"));
    std::fs::create_dir_all(paths.base_dir("Foo", "1.0.0")).unwrap();
    std::fs::write(paths.manifest_file("Foo", "1.0.0"), "[]").unwrap();
    assert!(load_manifest(&paths, "Foo", "1.0.0").is_err());
}

#[test]
fn load_manifest_missing_file_is_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = Paths::new(tmp.path(), tmp.path().join("logs"));
    assert!(load_manifest(&paths, "Foo", "1.0.0").is_err());
}
