// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn writes_one_element_array_with_expected_shape() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = Paths::new(tmp.path(), tmp.path().join("logs"));
    std::fs::create_dir_all(paths.base_dir("Foo", "1.0.0")).unwrap();

    write_handler_environment(&paths, "Foo", "1.0.0").unwrap();

    let raw = std::fs::read_to_string(paths.environment_file("Foo", "1.0.0")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["name"], "Foo");
    assert_eq!(arr[0]["version"], "1.0.0");
    let env = &arr[0]["handlerEnvironment"];
    assert!(env["logFolder"].as_str().unwrap().ends_with("Foo/1.0.0"));
    assert!(env["configFolder"].as_str().unwrap().ends_with("config"));
    assert!(env["statusFolder"].as_str().unwrap().ends_with("status"));
    assert!(env["heartbeatFile"].as_str().unwrap().ends_with("heartbeat.log"));
}
